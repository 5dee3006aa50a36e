use crate::batch_walker::main::{BatchReport, BatchWalker};
use crate::config::Config;
use crate::error::PipelineError;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::result_aggregator;
use std::sync::Arc;

pub struct App {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
}

impl App {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        Self {
            config,
            logger,
            image_classifier,
        }
    }

    /// Walks the input directory, then writes the table. Nothing is written
    /// if the walk fails.
    pub fn start(&self) -> Result<BatchReport, PipelineError> {
        let _ = self.logger.info("Start image processing...");

        let walker = BatchWalker::new(
            &self.config,
            self.logger.clone(),
            self.image_classifier.clone(),
        );
        let report = walker.run(&self.config.input_dir)?;

        result_aggregator::write(&report.table, &self.config.output)?;

        if report.table.is_empty() {
            let _ = self.logger.warn(&format!(
                "No images scored under {}",
                self.config.input_dir.display()
            ));
        }

        if !report.skipped.is_empty() {
            let _ = self.logger.warn(&format!(
                "Skipped {} of {} files:",
                report.skipped.len(),
                report.visited
            ));
            for skipped in &report.skipped {
                let _ = self
                    .logger
                    .warn(&format!("  {}: {}", skipped.path.display(), skipped.reason));
            }
        }

        let _ = self.logger.info(&format!(
            "Scored {} images into {}",
            report.table.len(),
            self.config.output.output_path.display()
        ));
        let _ = self
            .logger
            .info("The file containing predictions has been created!");

        Ok(report)
    }
}
