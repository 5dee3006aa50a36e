use super::main::{BatchReport, BatchWalker};
use crate::batch_walker::core::Effect;
use crate::error::PipelineError;

impl BatchWalker {
    pub fn run_effects(
        &self,
        effects: Vec<Effect>,
        report: &mut BatchReport,
    ) -> Result<(), PipelineError> {
        for effect in effects {
            self.run_effect(effect, report)?;
        }
        Ok(())
    }

    fn run_effect(&self, effect: Effect, report: &mut BatchReport) -> Result<(), PipelineError> {
        match effect {
            Effect::AppendRecord(record) => {
                let _ = self.logger.debug(&format!(
                    "{}: {}",
                    record.image_name, record.probability
                ));
                report.table.push(record);
            }
            Effect::SkipFile(skipped) => {
                let _ = self.logger.warn(&format!(
                    "Skipping {}: {}",
                    skipped.path.display(),
                    skipped.reason
                ));
                report.skipped.push(skipped);
            }
            Effect::ReportProgress { visited } => {
                let _ = self.logger.info(&format!("First {} images done!", visited));
            }
            Effect::ReportFinished { visited } => {
                report.visited = visited;
                let _ = self.logger.debug(&format!("Walked {} files", visited));
            }
            Effect::Abort(error) => return Err(error),
        }
        Ok(())
    }
}
