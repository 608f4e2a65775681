//! Aggregation of stub records into ranked call distributions.
//!
//! This module transforms flattened stub records into:
//! - A deduplicated, ratio-normalized, rank-ordered distribution
//! - Top-stub report entries
//! - Call volume statistics

pub mod distribution;
pub mod metrics;

// Re-export main types and functions
pub use distribution::{compute_distribution, fold_duplicates, normalize_ratios, rank_by_call_count};
pub use metrics::{
    calculate_call_distribution, calculate_top_stubs, coverage, to_report, CallDistribution,
};
