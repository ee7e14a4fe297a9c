use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the fallible edges of the crate: loading configuration,
/// reading OCR dumps and walking batch directories. The extraction engine
/// itself never fails; it degrades to smaller results instead.
#[derive(Debug, Error)]
pub enum DocScanError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid observation: {0}")]
    InvalidObservation(String),
}

impl DocScanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocScanError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocScanError>;
