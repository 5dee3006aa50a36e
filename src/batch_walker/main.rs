use crate::batch_walker::core::{init, transition, Event, FileOutcome, SkippedFile, State};
use crate::config::{Config, ImageLoaderConfig, WalkerConfig};
use crate::error::PipelineError;
use crate::image_classifier::interface::ImageClassifier;
use crate::image_loader::load_image;
use crate::library::logger::interface::Logger;
use crate::result_aggregator::{PredictionRecord, PredictionTable};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct BatchReport {
    pub table: PredictionTable,
    pub skipped: Vec<SkippedFile>,
    pub visited: usize,
}

pub struct BatchWalker {
    pub config: WalkerConfig,
    pub image_loader: ImageLoaderConfig,
    pub positive_class_index: usize,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
}

impl BatchWalker {
    pub fn new(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        Self {
            config: config.walker.clone(),
            image_loader: config.image_loader.clone(),
            positive_class_index: config.model.positive_class_index,
            logger: logger.with_namespace("batch_walker"),
            image_classifier,
        }
    }

    /// Scores every regular file under `input_root`, one at a time.
    pub fn run(&self, input_root: &Path) -> Result<BatchReport, PipelineError> {
        if !input_root.is_dir() {
            return Err(PipelineError::InputDir {
                path: input_root.to_path_buf(),
            });
        }

        let mut report = BatchReport::default();
        let (state, effects) = init();
        self.run_effects(effects, &mut report)?;

        let mut state = self.step(state, Event::Started, &mut report)?;

        for entry in self.walk(input_root) {
            let outcome = match entry {
                Ok(path) => self.process_file(&path),
                Err(error) => FileOutcome::Failed {
                    path: error
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| input_root.to_path_buf()),
                    error: PipelineError::Walk { source: error },
                },
            };
            state = self.step(state, Event::FileDone(outcome), &mut report)?;
        }

        self.step(state, Event::TraversalExhausted, &mut report)?;

        Ok(report)
    }

    pub fn process_file(&self, path: &Path) -> FileOutcome {
        match self.score_file(path) {
            Ok(record) => FileOutcome::Scored(record),
            Err(error) => FileOutcome::Failed {
                path: path.to_path_buf(),
                error,
            },
        }
    }

    fn score_file(&self, path: &Path) -> Result<PredictionRecord, PipelineError> {
        let tensor = load_image(path, &self.image_loader)?;
        let output = self.image_classifier.score(tensor)?;

        let probability = output
            .get(self.positive_class_index)
            .copied()
            .ok_or_else(|| PipelineError::Inference {
                reason: format!(
                    "output has {} values, positive class index is {}",
                    output.len(),
                    self.positive_class_index
                ),
            })?;

        Ok(PredictionRecord {
            image_name: file_name(path),
            probability,
        })
    }

    fn step(
        &self,
        state: State,
        event: Event,
        report: &mut BatchReport,
    ) -> Result<State, PipelineError> {
        let (state, effects) = transition(&self.config, state, event);
        self.run_effects(effects, report)?;
        Ok(state)
    }

    fn walk(&self, input_root: &Path) -> impl Iterator<Item = Result<PathBuf, walkdir::Error>> {
        let mut walker = WalkDir::new(input_root).follow_links(self.config.follow_links);
        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        walker.into_iter().filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            // Unfollowed links are listed like files unless they point at a directory.
            Ok(entry) if entry.file_type().is_symlink() && !entry.path().is_dir() => {
                Some(Ok(entry.into_path()))
            }
            Ok(_) => None,
            Err(error) => Some(Err(error)),
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
