//! Diff report data model.
//!
//! These structures serialize into the versioned diff JSON the compare
//! pipeline writes, and feed the terminal renderer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::parser::schema::RankedStub;

/// Versioned document describing how two stub distributions differ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StubDiffReport {
    /// Version of the diff document format
    pub diff_version: String,

    /// RFC 3339 time the comparison ran
    pub generated_at: String,

    /// Identifying fields of the baseline report
    pub baseline: ReportMetadata,

    /// Identifying fields of the target report
    pub target: ReportMetadata,

    /// Every measured delta between the two reports
    pub deltas: Deltas,

    /// Violations found by threshold checking, empty until checked
    pub threshold_violations: Vec<ThresholdViolation>,

    /// Rolled-up outcome
    pub summary: DiffSummary,
}

/// Identifying fields copied out of one input report
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportMetadata {
    /// Process type the report covers
    pub process: String,

    /// Total stub invocations
    pub total_calls: u64,

    /// Number of distinct stubs
    pub unique_stubs: usize,

    /// When the report was generated
    pub generated_at: String,
}

/// Every measured delta between two reports
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Deltas {
    /// Call volume changes
    pub calls: CallsDelta,

    /// Stub population changes
    pub unique_stubs: UniqueStubsDelta,

    /// Changes by bytecode operation
    pub op_changes: HashMap<String, OpCallChange>,

    /// Top stub changes
    pub top_stubs: TopStubsDelta,
}

/// Total call volume delta
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CallsDelta {
    /// Call total in the baseline report
    pub baseline: u64,

    /// Call total in the target report
    pub target: u64,

    /// Signed call difference (target minus baseline)
    pub absolute_change: i64,

    /// Signed change relative to the baseline, in percent
    pub percent_change: f64,
}

/// Stub population delta
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UniqueStubsDelta {
    /// Distinct stubs in baseline
    pub baseline: usize,

    /// Distinct stubs in target
    pub target: usize,

    /// Change in distinct stubs
    pub change: i64,
}

/// Change in call volume for a specific operation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpCallChange {
    /// Call volume in the baseline
    pub baseline: u64,

    /// Call volume in the target
    pub target: u64,

    /// Signed difference in calls
    pub delta: i64,
}

/// Top stubs comparison
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TopStubsDelta {
    /// Stubs ranked in both reports
    pub common: Vec<StubComparison>,

    /// Stubs only ranked in baseline (disappeared)
    pub baseline_only: Vec<RankedStub>,

    /// Stubs only ranked in target (new)
    pub target_only: Vec<RankedStub>,
}

/// Comparison of a single stub ranked in both reports
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StubComparison {
    /// Identity hash of the stub
    pub hash: String,

    /// Calls recorded in the baseline report
    pub baseline_calls: u64,

    /// Calls recorded in the target report
    pub target_calls: u64,

    /// Signed call difference
    pub calls_change: i64,

    /// Call change relative to baseline, in percent
    pub percent_change: f64,

    /// Change in share of total calls (target ratio minus baseline ratio)
    pub ratio_shift: f64,
}

/// One limit the target crossed
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThresholdViolation {
    /// Metric identifier, e.g. `calls.max_increase_percent`
    pub metric: String,

    /// Configured limit
    pub threshold: f64,

    /// Measured value that crossed the limit
    pub actual: f64,

    /// "error" fails the run, "warning" only reports
    pub severity: String,
}

/// Rolled-up outcome of a comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffSummary {
    /// True when any error-severity violation exists
    pub has_regressions: bool,

    /// Count of violations of any severity
    pub violation_count: usize,

    /// One of "PASSED", "WARNING", "FAILED"
    pub status: String,

    /// Advisory message, e.g. when both inputs are the same capture
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
