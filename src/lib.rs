//! IC Freq Studio
//!
//! Frequency analysis and distribution reporting for JIT inline cache
//! stub telemetry.
//!
//! Stub logs come from running a debug browser build with IC stub
//! logging enabled (one JSON log per process in the configured log
//! directory). This crate scans those logs, folds duplicate stubs,
//! normalizes call counts into ratios, and ranks the result into
//! per-process distribution reports.
//!
//! ## Getting Started
//!
//! Most users should use the CLI:
//!
//! ```bash
//! ic-freq analyze path/to/stub-logs --summary
//! ic-freq diff -b baseline.json -t current.json --max-increase 10
//! ```

pub mod aggregator;
pub mod commands;
pub mod diff;
pub mod output;
pub mod parser;
pub mod scan;
pub mod utils;
