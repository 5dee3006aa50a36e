use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to load model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("inference failed: {reason}")]
    Inference { reason: String },

    #[error("failed to write predictions to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("input directory {path} does not exist or is not a directory")]
    InputDir { path: PathBuf },

    #[error("failed to read directory entry: {source}")]
    Walk {
        #[source]
        source: walkdir::Error,
    },
}

impl PipelineError {
    /// Per-file failures can be skipped; everything else ends the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PipelineError::Decode { .. } | PipelineError::Inference { .. } | PipelineError::Walk { .. }
        )
    }
}
