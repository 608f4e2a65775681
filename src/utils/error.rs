//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while scanning stub log directories
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid log directory: {0}")]
    InvalidDirectory(String),

    #[error("Failed to read log directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse log file {0}: {1}")]
    MalformedLog(String, ParseError),
}

/// Errors that can occur during stub log parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid stub log format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur in the distribution pipeline
///
/// Normalization divides by the total call count, so empty and all-zero
/// record sets are rejected up front instead of producing NaN ratios.
#[derive(Error, Debug)]
pub enum DistributionError {
    #[error("Cannot normalize an empty stub set")]
    EmptySet,

    #[error("Cannot normalize stub set: total call count is zero across {0} stubs")]
    ZeroCallTotal(usize),
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
