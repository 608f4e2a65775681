//! Report output backends.
//!
//! JSON persistence for machine-readable reports plus the terminal
//! summary renderer used by `--summary`.

pub mod json;
pub mod summary;

pub use json::{read_report, write_report};
pub use summary::render_summary;
