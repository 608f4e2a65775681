//! Delta math for report comparison.
//!
//! Every numeric difference the diff engine reports is computed here,
//! with zero baselines handled instead of panicking.

use crate::parser::schema::{OpSummary, RankedStub, StubReport};
use std::collections::HashMap;

use super::schema::{CallsDelta, OpCallChange, StubComparison, TopStubsDelta, UniqueStubsDelta};

/// Bucket label for calls whose stubs carried no op
pub const UNLABELED_OP: &str = "(unlabeled)";

/// Calculate total call volume delta between two reports
///
/// # Arguments
/// * `baseline` - Baseline total calls
/// * `target` - Target total calls
///
/// # Returns
/// CallsDelta with absolute and percentage changes
pub fn calculate_calls_delta(baseline: u64, target: u64) -> CallsDelta {
    let absolute_change = (target as i64) - (baseline as i64);
    let percent_change = safe_percentage(absolute_change, baseline);

    CallsDelta {
        baseline,
        target,
        absolute_change,
        percent_change,
    }
}

/// Calculate the change in distinct stub population
pub fn calculate_unique_stubs_delta(baseline: usize, target: usize) -> UniqueStubsDelta {
    UniqueStubsDelta {
        baseline,
        target,
        change: (target as i64) - (baseline as i64),
    }
}

/// Calculate per-operation call volume changes
///
/// Handles ops missing from one side by treating them as 0. Unlabeled
/// calls are compared under the `(unlabeled)` bucket.
///
/// # Arguments
/// * `baseline_summary` - Baseline op summary
/// * `target_summary` - Target op summary
///
/// # Returns
/// Map of op label to change, ops with no calls on either side omitted
pub fn calculate_op_changes(
    baseline_summary: &OpSummary,
    target_summary: &OpSummary,
) -> HashMap<String, OpCallChange> {
    let mut changes = HashMap::new();

    // Collect all op labels present in either report
    let mut all_ops: std::collections::HashSet<&str> = std::collections::HashSet::new();
    all_ops.extend(baseline_summary.by_op.keys().map(String::as_str));
    all_ops.extend(target_summary.by_op.keys().map(String::as_str));

    for op in all_ops {
        let baseline = *baseline_summary.by_op.get(op).unwrap_or(&0);
        let target = *target_summary.by_op.get(op).unwrap_or(&0);

        if baseline > 0 || target > 0 {
            changes.insert(
                op.to_string(),
                OpCallChange {
                    baseline,
                    target,
                    delta: (target as i64) - (baseline as i64),
                },
            );
        }
    }

    let unlabeled_baseline = baseline_summary.unlabeled_calls;
    let unlabeled_target = target_summary.unlabeled_calls;
    if unlabeled_baseline > 0 || unlabeled_target > 0 {
        changes.insert(
            UNLABELED_OP.to_string(),
            OpCallChange {
                baseline: unlabeled_baseline,
                target: unlabeled_target,
                delta: (unlabeled_target as i64) - (unlabeled_baseline as i64),
            },
        );
    }

    changes
}

/// Compare the ranked top stubs of two reports by identity hash
///
/// # Arguments
/// * `baseline_stubs` - Ranked stubs from baseline
/// * `target_stubs` - Ranked stubs from target
///
/// # Returns
/// TopStubsDelta showing common, disappeared, and new stubs. Common
/// stubs keep the baseline ranking order.
pub fn compare_top_stubs(
    baseline_stubs: &[RankedStub],
    target_stubs: &[RankedStub],
) -> TopStubsDelta {
    let baseline_map: HashMap<&str, &RankedStub> = baseline_stubs
        .iter()
        .map(|stub| (stub.hash.as_str(), stub))
        .collect();

    let target_map: HashMap<&str, &RankedStub> = target_stubs
        .iter()
        .map(|stub| (stub.hash.as_str(), stub))
        .collect();

    // Walk the baseline slice so common stubs come out in rank order
    let mut common = Vec::new();
    for baseline_stub in baseline_stubs {
        if let Some(target_stub) = target_map.get(baseline_stub.hash.as_str()) {
            let calls_change =
                (target_stub.call_count as i64) - (baseline_stub.call_count as i64);

            common.push(StubComparison {
                hash: baseline_stub.hash.clone(),
                baseline_calls: baseline_stub.call_count,
                target_calls: target_stub.call_count,
                calls_change,
                percent_change: safe_percentage(calls_change, baseline_stub.call_count),
                ratio_shift: target_stub.call_ratio - baseline_stub.call_ratio,
            });
        }
    }

    let baseline_only: Vec<RankedStub> = baseline_stubs
        .iter()
        .filter(|stub| !target_map.contains_key(stub.hash.as_str()))
        .cloned()
        .collect();

    let target_only: Vec<RankedStub> = target_stubs
        .iter()
        .filter(|stub| !baseline_map.contains_key(stub.hash.as_str()))
        .cloned()
        .collect();

    TopStubsDelta {
        common,
        baseline_only,
        target_only,
    }
}

/// Calculate percentage change safely (handles division by zero)
///
/// # Arguments
/// * `change` - Absolute change (can be negative)
/// * `baseline` - Baseline value
///
/// # Returns
/// Percentage change, or 0.0 if baseline is zero
pub fn safe_percentage(change: i64, baseline: u64) -> f64 {
    if baseline == 0 {
        0.0
    } else {
        (change as f64 / baseline as f64) * 100.0
    }
}

/// Check if two reports are compatible for comparison
///
/// # Arguments
/// * `baseline` - Baseline report
/// * `target` - Target report
///
/// # Returns
/// Ok if compatible, Err with reason if not
pub fn check_compatibility(
    baseline: &StubReport,
    target: &StubReport,
) -> Result<(), super::DiffError> {
    if baseline.version != target.version {
        return Err(super::DiffError::IncompatibleVersions(
            baseline.version.clone(),
            target.version.clone(),
        ));
    }

    // Comparing content against parent distributions is never meaningful
    if baseline.process != target.process {
        return Err(super::DiffError::ProcessMismatch(
            baseline.process.clone(),
            target.process.clone(),
        ));
    }

    Ok(())
}

/// Check if reports describe the same distribution
///
/// # Arguments
/// * `baseline` - Baseline report
/// * `target` - Target report
///
/// # Returns
/// true if the reports have identical call volume and stub population
pub fn are_reports_identical(baseline: &StubReport, target: &StubReport) -> bool {
    baseline.total_calls == target.total_calls
        && baseline.unique_stubs == target.unique_stubs
}
