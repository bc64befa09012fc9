//! Error types shared by every pipeline stage.

use std::path::PathBuf;
use thiserror::Error;

/// Conversion errors
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Read or write failure on an already open stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be opened or created
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Binary adjacency data does not follow the expected layout
    #[error("malformed binary graph: {0}")]
    Format(String),

    /// A count or identifier does not fit in the 32-bit signed binary fields
    #[error("{0} ({1}) does not fit in a 32-bit signed integer")]
    Overflow(&'static str, u64),

    /// Configuration file could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Open {
            path: path.into(),
            source,
        }
    }
}
