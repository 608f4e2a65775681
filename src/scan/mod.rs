//! Stub log discovery and process classification.
//!
//! This module handles:
//! - Validating supplied log directories
//! - Classifying log files into content/parent process sets
//! - Flattening every classifiable log into stub records

pub mod classify;
pub mod log_dir;

// Re-export main types and functions
pub use classify::ProcessKind;
pub use log_dir::{load_stub_logs, validate_log_dir, ScanStats, ScannedLogs};
