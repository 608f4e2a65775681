//! Calculate summary metrics over a computed stub distribution.
//!
//! The hottest stubs are the primary optimization targets, so most of
//! this is about describing how concentrated the call volume is and
//! shaping the ranked head of the distribution for reports.

use crate::parser::schema::{OpSummary, RankedStub, StubReport};
use crate::parser::stub_log::StubRecord;
use crate::scan::classify::ProcessKind;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use log::debug;
use std::collections::HashMap;

/// Convert the ranked head of a distribution into report entries
///
/// **Public** - main entry point for report shaping
///
/// # Arguments
/// * `records` - Normalized records, already ranked hottest-first
/// * `top_n` - Number of leading stubs to keep (e.g., 20)
///
/// # Returns
/// Vector of ranked stubs, at most `top_n` long
pub fn calculate_top_stubs(records: &[StubRecord], top_n: usize) -> Vec<RankedStub> {
    debug!("Taking top {} of {} ranked stubs", top_n, records.len());

    records.iter().take(top_n).map(to_ranked).collect()
}

/// Create a RankedStub from a normalized record
///
/// **Private** - internal conversion
fn to_ranked(record: &StubRecord) -> RankedStub {
    RankedStub {
        hash: record.hash.clone(),
        op: record.op.clone(),
        call_count: record.call_count,
        call_ratio: record.call_ratio.unwrap_or(0.0),
    }
}

/// Share of all calls captured by the top N ranked stubs
///
/// **Public** - the coverage figure shown in summaries
///
/// Returns 0.0 for an empty or all-zero set.
pub fn coverage(records: &[StubRecord], top_n: usize) -> f64 {
    let total: u64 = records.iter().map(|r| r.call_count).sum();
    if total == 0 {
        return 0.0;
    }

    let head: u64 = records.iter().take(top_n).map(|r| r.call_count).sum();
    head as f64 / total as f64
}

/// Assemble the versioned report for one process distribution
///
/// **Public** - used by the analyze command before writing JSON
///
/// # Arguments
/// * `process` - Process type the records came from
/// * `source_dirs` - Log directories the scan covered
/// * `records` - Normalized records, already ranked hottest-first
/// * `top_n` - Number of ranked stubs kept in the report
pub fn to_report(
    process: ProcessKind,
    source_dirs: &[String],
    records: &[StubRecord],
    top_n: usize,
) -> StubReport {
    let mut by_op: HashMap<String, u64> = HashMap::new();
    let mut unlabeled_calls = 0u64;

    for record in records {
        match &record.op {
            Some(op) => *by_op.entry(op.clone()).or_insert(0) += record.call_count,
            None => unlabeled_calls += record.call_count,
        }
    }

    StubReport {
        version: SCHEMA_VERSION.to_string(),
        process: process.as_str().to_string(),
        source_dirs: source_dirs.to_vec(),
        total_calls: records.iter().map(|r| r.call_count).sum(),
        unique_stubs: records.len(),
        op_summary: OpSummary {
            by_op,
            unlabeled_calls,
        },
        top_stubs: calculate_top_stubs(records, top_n),
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Call volume statistics for one distribution
///
/// **Public** - returned from calculate_call_distribution
#[derive(Debug, Clone, Default)]
pub struct CallDistribution {
    /// Total calls across all stubs
    pub total_calls: u64,

    /// Number of unique stubs
    pub stub_count: usize,

    /// Mean calls per stub
    pub mean_calls_per_stub: u64,

    /// Median calls per stub
    pub median_calls_per_stub: u64,

    /// Calls landing in the top 10% of stubs
    pub top_10_percent_calls: u64,

    /// Percentage of total calls in the top 10%
    pub top_10_percent_percentage: f64,
}

/// Calculate call distribution statistics
///
/// **Public** - provides summary statistics
///
/// # Arguments
/// * `records` - Records ranked hottest-first (the top-10% figure reads
///   the head of the slice)
///
/// # Returns
/// Statistics about how call volume spreads across stubs; the zero
/// default for an empty set
pub fn calculate_call_distribution(records: &[StubRecord]) -> CallDistribution {
    if records.is_empty() {
        return CallDistribution::default();
    }

    let total: u64 = records.iter().map(|r| r.call_count).sum();
    let count = records.len();
    let mean = total / count.max(1) as u64;

    // Get median
    let mut counts: Vec<u64> = records.iter().map(|r| r.call_count).collect();
    counts.sort_unstable();
    let median = counts[counts.len() / 2];

    // Top 10% of stubs
    let top_10_percent_count = (count as f64 * 0.1).ceil() as usize;
    let top_10_percent_calls: u64 = records
        .iter()
        .take(top_10_percent_count)
        .map(|r| r.call_count)
        .sum();

    CallDistribution {
        total_calls: total,
        stub_count: count,
        mean_calls_per_stub: mean,
        median_calls_per_stub: median,
        top_10_percent_calls,
        top_10_percent_percentage: if total > 0 {
            (top_10_percent_calls as f64 / total as f64) * 100.0
        } else {
            0.0
        },
    }
}

impl CallDistribution {
    /// Check if call volume is highly concentrated
    ///
    /// **Public** - useful for spotting a handful of dominant stubs
    ///
    /// Returns true if the top 10% of stubs take >80% of all calls
    pub fn is_highly_concentrated(&self) -> bool {
        self.top_10_percent_percentage > 80.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} calls | Stubs: {} | Mean: {} | Median: {} | Top 10%: {:.1}%",
            self.total_calls,
            self.stub_count,
            self.mean_calls_per_stub,
            self.median_calls_per_stub,
            self.top_10_percent_percentage
        )
    }
}
