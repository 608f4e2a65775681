//! Shared configuration constants and error types.

pub mod config;
pub mod error;

// Re-export commonly used error types for convenience
pub use error::{DistributionError, OutputError, ParseError, ScanError};
