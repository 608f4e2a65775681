//! Report diff generation and threshold checking.
//!
//! This module compares two stub report JSONs (baseline vs target) and
//! produces delta reports with threshold violation detection.
//!
//! # Example
//! ```ignore
//! use ic_freq_studio::diff::{generate_diff, check_thresholds, CallThresholds};
//! use ic_freq_studio::output::json::read_report;
//!
//! let baseline = read_report("baseline.json")?;
//! let target = read_report("target.json")?;
//! let mut diff = generate_diff(&baseline, &target)?;
//!
//! let thresholds = CallThresholds {
//!     max_calls_increase_percent: Some(10.0),
//!     ..Default::default()
//! };
//! let violations = check_thresholds(&mut diff, &thresholds);
//! ```

mod engine;
mod normalizer;
mod output;
mod schema;
mod threshold;

// Public API exports
pub use engine::generate_diff;
pub use normalizer::{safe_percentage, UNLABELED_OP};
pub use output::render_terminal_diff;
pub use schema::{
    CallsDelta, Deltas, DiffSummary, OpCallChange, ReportMetadata, StubComparison,
    StubDiffReport, ThresholdViolation, TopStubsDelta, UniqueStubsDelta,
};
pub use threshold::{check_thresholds, CallThresholds};

// Error type
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Incompatible schema versions: baseline={0}, target={1}")]
    IncompatibleVersions(String, String),

    #[error("Cannot compare different process types: baseline={0}, target={1}")]
    ProcessMismatch(String, String),

    #[error("Failed to read report: {0}")]
    ReadFailed(#[from] crate::utils::error::OutputError),
}
