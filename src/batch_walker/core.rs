use crate::config::{FailurePolicy, WalkerConfig};
use crate::error::PipelineError;
use crate::result_aggregator::PredictionRecord;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of loading and scoring one file.
#[derive(Debug)]
pub enum FileOutcome {
    Scored(PredictionRecord),
    Failed { path: PathBuf, error: PipelineError },
}

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    Idle,
    Walking { visited: usize },
    Done { visited: usize },
}

#[derive(Debug)]
pub enum Event {
    Started,
    FileDone(FileOutcome),
    TraversalExhausted,
}

#[derive(Debug)]
pub enum Effect {
    AppendRecord(PredictionRecord),
    SkipFile(SkippedFile),
    ReportProgress { visited: usize },
    ReportFinished { visited: usize },
    Abort(PipelineError),
}

pub fn init() -> (State, Vec<Effect>) {
    (State::Idle, vec![])
}

pub fn transition(config: &WalkerConfig, state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        (State::Idle, Event::Started) => (State::Walking { visited: 0 }, vec![]),

        (State::Walking { visited }, Event::FileDone(outcome)) => {
            // Traversal errors are not images, so they never advance progress.
            let is_image = !matches!(
                outcome,
                FileOutcome::Failed {
                    error: PipelineError::Walk { .. },
                    ..
                }
            );
            let visited = visited + usize::from(is_image);
            let mut effects = Vec::new();

            match outcome {
                FileOutcome::Scored(record) => effects.push(Effect::AppendRecord(record)),
                FileOutcome::Failed { error, .. }
                    if config.failure_policy == FailurePolicy::Abort || !error.is_recoverable() =>
                {
                    return (State::Done { visited }, vec![Effect::Abort(error)]);
                }
                FileOutcome::Failed { path, error } => effects.push(Effect::SkipFile(SkippedFile {
                    path,
                    reason: error.to_string(),
                })),
            }

            if is_image && is_progress_point(config.progress_interval, visited) {
                effects.push(Effect::ReportProgress { visited });
            }

            (State::Walking { visited }, effects)
        }

        (State::Walking { visited }, Event::TraversalExhausted) => (
            State::Done { visited },
            vec![Effect::ReportFinished { visited }],
        ),

        (state, _) => (state, vec![]),
    }
}

fn is_progress_point(interval: usize, visited: usize) -> bool {
    interval > 0 && visited % interval == 0
}
