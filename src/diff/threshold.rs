//! Regression limits for diff runs.
//!
//! Limits arrive from the command line and are applied after the diff
//! engine has measured its deltas.

use super::schema::{DiffSummary, StubDiffReport, ThresholdViolation};

/// Regression limits for a diff run
#[derive(Debug, Clone, Default)]
pub struct CallThresholds {
    /// Maximum allowed increase in total calls, as a percentage
    pub max_calls_increase_percent: Option<f64>,

    /// Warn if any single common stub grows by more than this percentage
    pub warn_stub_increase_percent: Option<f64>,
}

/// Apply regression limits to a diff report
///
/// # Arguments
/// * `diff` - Report to check; its violations and summary are rewritten
/// * `thresholds` - Limits to check against
///
/// # Returns
/// The violations found, also stored on the report itself
///
/// # Example
/// ```ignore
/// let mut diff = generate_diff(&baseline, &target)?;
/// let thresholds = CallThresholds {
///     max_calls_increase_percent: Some(10.0),
///     ..Default::default()
/// };
/// check_thresholds(&mut diff, &thresholds);
/// ```
pub fn check_thresholds(
    diff: &mut StubDiffReport,
    thresholds: &CallThresholds,
) -> Vec<ThresholdViolation> {
    let mut violations = Vec::new();

    check_calls_threshold(diff, thresholds, &mut violations);
    check_stub_thresholds(diff, thresholds, &mut violations);

    // Update diff report, keeping any warning set during generation
    let warning = diff.summary.warning.take();
    diff.threshold_violations = violations.clone();
    diff.summary = create_summary(&violations);
    diff.summary.warning = warning;

    violations
}

/// Check total call volume threshold
fn check_calls_threshold(
    diff: &StubDiffReport,
    thresholds: &CallThresholds,
    violations: &mut Vec<ThresholdViolation>,
) {
    if let Some(max_percent) = thresholds.max_calls_increase_percent {
        if diff.deltas.calls.percent_change > max_percent {
            violations.push(ThresholdViolation {
                metric: "calls.max_increase_percent".to_string(),
                threshold: max_percent,
                actual: diff.deltas.calls.percent_change,
                severity: "error".to_string(),
            });
        }
    }
}

/// Check per-stub growth thresholds
fn check_stub_thresholds(
    diff: &StubDiffReport,
    thresholds: &CallThresholds,
    violations: &mut Vec<ThresholdViolation>,
) {
    if let Some(max_percent) = thresholds.warn_stub_increase_percent {
        for comparison in &diff.deltas.top_stubs.common {
            if comparison.percent_change > max_percent {
                violations.push(ThresholdViolation {
                    metric: format!("top_stubs.{}", comparison.hash),
                    threshold: max_percent,
                    actual: comparison.percent_change,
                    severity: "warning".to_string(),
                });
            }
        }
    }
}

/// Derive the rolled-up outcome from the violation list
fn create_summary(violations: &[ThresholdViolation]) -> DiffSummary {
    let error_count = violations.iter().filter(|v| v.severity == "error").count();
    let warning_count = violations
        .iter()
        .filter(|v| v.severity == "warning")
        .count();

    let status = if error_count > 0 {
        "FAILED"
    } else if warning_count > 0 {
        "WARNING"
    } else {
        "PASSED"
    };

    DiffSummary {
        has_regressions: error_count > 0,
        violation_count: violations.len(),
        status: status.to_string(),
        warning: None,
    }
}
