use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::publish::PublishError;

/// Application-level error type. Nothing in the pipeline recovers from these;
/// `main` reports the first one and exits non-zero.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("Label '{label}:' not found in completion text")]
    Extraction { label: String },

    #[error("Malformed {kind} entry, expected '{delimiter}' in {item:?}")]
    MalformedFragment {
        kind: &'static str,
        delimiter: &'static str,
        item: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable short code used in the final log line.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Llm(_) | AppError::Publish(_) => "REMOTE_CALL_FAILURE",
            AppError::Extraction { .. } => "EXTRACTION_FAILURE",
            AppError::MalformedFragment { .. } => "MALFORMED_FRAGMENT",
            AppError::Io { .. } => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
