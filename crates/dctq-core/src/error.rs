//! Error types for dctq operations

use crate::StreamKind;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for dctq operations
pub type DctqResult<T> = Result<T, DctqError>;

/// Errors that can occur while converting, transforming or writing planes
#[derive(Error, Debug)]
pub enum DctqError {
    #[error("Cannot open output {}: {source}", path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Write to {stream} stream failed: {source}")]
    WriteFailure {
        stream: StreamKind,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Shape mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DctqError {
    /// Whether the error aborted a plane midway, leaving partial output behind
    pub fn is_partial_write(&self) -> bool {
        matches!(self, DctqError::WriteFailure { .. })
    }
}
