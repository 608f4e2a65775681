//! Builds the diff report from two parsed stub reports.
//!
//! The engine only measures. Deciding whether a delta is acceptable is
//! threshold checking, applied afterwards by the caller.

use crate::parser::schema::StubReport;
use chrono::Utc;

use super::normalizer::{
    are_reports_identical, calculate_calls_delta, calculate_op_changes,
    calculate_unique_stubs_delta, check_compatibility, compare_top_stubs,
};
use super::schema::{Deltas, DiffSummary, ReportMetadata, StubDiffReport};
use super::DiffError;

/// Compare a target stub report against a baseline
///
/// **Public** - entry point of the diff pipeline
///
/// # Arguments
/// * `baseline` - Reference distribution, usually from a known-good build
/// * `target` - Distribution under evaluation
///
/// # Returns
/// A diff report carrying every computed delta. Threshold violations are
/// left empty and the summary starts at PASSED; `check_thresholds`
/// rewrites both when the caller supplies limits.
///
/// # Errors
/// * `DiffError::IncompatibleVersions` - reports use different schema versions
/// * `DiffError::ProcessMismatch` - reports describe different process types
///
/// # Example
/// ```ignore
/// use ic_freq_studio::diff::generate_diff;
/// use ic_freq_studio::output::json::read_report;
///
/// let baseline = read_report("baseline.json")?;
/// let target = read_report("current.json")?;
/// let diff = generate_diff(&baseline, &target)?;
/// ```
pub fn generate_diff(
    baseline: &StubReport,
    target: &StubReport,
) -> Result<StubDiffReport, DiffError> {
    check_compatibility(baseline, target)?;

    let deltas = Deltas {
        calls: calculate_calls_delta(baseline.total_calls, target.total_calls),
        unique_stubs: calculate_unique_stubs_delta(baseline.unique_stubs, target.unique_stubs),
        op_changes: calculate_op_changes(&baseline.op_summary, &target.op_summary),
        top_stubs: compare_top_stubs(&baseline.top_stubs, &target.top_stubs),
    };

    // Identical totals usually mean the same capture was passed twice
    let warning = if are_reports_identical(baseline, target) {
        Some("Baseline and target reports are identical".to_string())
    } else {
        None
    };

    Ok(StubDiffReport {
        diff_version: "1.0.0".to_string(),
        generated_at: Utc::now().to_rfc3339(),
        baseline: metadata(baseline),
        target: metadata(target),
        deltas,
        threshold_violations: Vec::new(),
        summary: DiffSummary {
            has_regressions: false,
            violation_count: 0,
            status: "PASSED".to_string(),
            warning,
        },
    })
}

/// Capture the identifying fields of one report
///
/// **Private** - internal helper for generate_diff
fn metadata(report: &StubReport) -> ReportMetadata {
    ReportMetadata {
        process: report.process.clone(),
        total_calls: report.total_calls,
        unique_stubs: report.unique_stubs,
        generated_at: report.generated_at.clone(),
    }
}
