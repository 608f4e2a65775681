//! Output JSON schema definitions for stub frequency reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level stub frequency report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StubReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Process type the records came from ("content" or "parent")
    pub process: String,

    /// Log directories the records were collected from
    pub source_dirs: Vec<String>,

    /// Total stub invocations across the whole distribution
    pub total_calls: u64,

    /// Number of distinct stubs after duplicates are folded
    pub unique_stubs: usize,

    /// Call volume broken down by bytecode operation
    pub op_summary: OpSummary,

    /// Top stubs, ranked by call count (hottest first)
    pub top_stubs: Vec<RankedStub>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Call volume per bytecode operation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OpSummary {
    /// Summed call counts keyed by op label
    pub by_op: HashMap<String, u64>,

    /// Calls from stubs whose entry carried no op label
    pub unlabeled_calls: u64,
}

/// One ranked stub in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedStub {
    /// Identity hash of the stub
    pub hash: String,

    /// Bytecode operation the stub services (if known)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,

    /// Summed call count
    pub call_count: u64,

    /// Share of total calls, rounded to three decimals
    pub call_ratio: f64,
}
