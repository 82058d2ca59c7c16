//! Error types for filtering and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by the filter bank, frame filter and configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Buffer holds {actual} samples, frame requires {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Frame dimensions {width}x{height} overflow the addressable sample count")]
    DimensionOverflow { width: usize, height: usize },

    #[error("Invalid frame description: {0}")]
    InvalidFrameDesc(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to access config file '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {reason}")]
    ConfigFormat { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
