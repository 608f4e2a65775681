//! Terminal rendering for diff reports.
//!
//! Turns a diff report into the short text block the compare run
//! prints, flagging regressions and improvements visually.

use super::schema::StubDiffReport;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Render a human-readable summary of a diff report for the terminal
pub fn render_terminal_diff(report: &StubDiffReport) -> String {
    let mut out = String::new();

    out.push_str(&render_header(report));
    out.push_str(&render_calls_delta(report));
    out.push_str(&render_population_delta(report));
    out.push_str(&render_op_changes(report));
    out.push_str(&render_stub_changes(report));
    out.push_str(&render_status(report));

    out
}

fn render_header(report: &StubDiffReport) -> String {
    let mut out = String::new();
    out.push_str("\n📊 ");
    out.push_str(&format!(
        "{}Stub Distribution Comparison ({}){}",
        BOLD, report.baseline.process, RESET
    ));
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!(
        "Baseline: {} calls, generated {}\n",
        report.baseline.total_calls, report.baseline.generated_at
    ));
    out.push_str(&format!(
        "Target:   {} calls, generated {}\n",
        report.target.total_calls, report.target.generated_at
    ));
    out.push_str("---------------------------------------------------\n\n");
    out
}

fn render_calls_delta(report: &StubDiffReport) -> String {
    let calls = &report.deltas.calls;
    let symbol = get_delta_symbol(calls.absolute_change);
    format!(
        "{} Total Calls: {} -> {} ({:+.2}%)\n",
        symbol, calls.baseline, calls.target, calls.percent_change
    )
}

fn render_population_delta(report: &StubDiffReport) -> String {
    let population = &report.deltas.unique_stubs;
    let symbol = get_delta_symbol(population.change);
    format!(
        "{} Unique Stubs: {} -> {} ({:+})\n",
        symbol, population.baseline, population.target, population.change
    )
}

fn render_op_changes(report: &StubDiffReport) -> String {
    let mut out = String::new();
    let op_changes = &report.deltas.op_changes;

    if !op_changes.is_empty() {
        out.push_str("\nTop Op Changes:\n");
        let mut changes: Vec<_> = op_changes.iter().collect();
        changes.sort_by(|a, b| b.1.delta.abs().cmp(&a.1.delta.abs()));

        for (op, change) in changes.iter().take(5) {
            let symbol = if change.delta > 0 { "📈" } else { "📉" };
            out.push_str(&format!(
                "  {} {}: {} -> {} ({:+})\n",
                symbol, op, change.baseline, change.target, change.delta
            ));
        }
    }
    out
}

fn render_stub_changes(report: &StubDiffReport) -> String {
    let mut out = String::new();
    let top_stubs = &report.deltas.top_stubs;

    if !top_stubs.common.is_empty() {
        out.push_str("\nTop Stub Regressions/Improvements:\n");
        let mut changes = top_stubs.common.clone();
        changes.sort_by(|a, b| b.calls_change.abs().cmp(&a.calls_change.abs()));

        for comparison in changes.iter().take(5) {
            let symbol = if comparison.calls_change > 0 { "📈" } else { "📉" };
            out.push_str(&format!(
                "  {} {}: {} -> {} ({:+.2}%)\n",
                symbol,
                comparison.hash,
                comparison.baseline_calls,
                comparison.target_calls,
                comparison.percent_change
            ));
        }
    }

    if !top_stubs.target_only.is_empty() {
        out.push_str(&format!(
            "  📈 {} new stubs entered the top set\n",
            top_stubs.target_only.len()
        ));
    }
    if !top_stubs.baseline_only.is_empty() {
        out.push_str(&format!(
            "  📉 {} stubs dropped out of the top set\n",
            top_stubs.baseline_only.len()
        ));
    }

    out
}

fn render_status(report: &StubDiffReport) -> String {
    let mut out = String::new();
    out.push_str("\n---------------------------------------------------\n");

    let status_msg = match report.summary.status.as_str() {
        "FAILED" => format!(
            "{}{}❌ STATUS: REGRESSION DETECTED ({} violations){}",
            RED, BOLD, report.summary.violation_count, RESET
        ),
        "WARNING" => format!(
            "{}{}⚠️  STATUS: WARNING ({} violations){}",
            YELLOW, BOLD, report.summary.violation_count, RESET
        ),
        _ => format!("{}{}✅ STATUS: PASSED{}", GREEN, BOLD, RESET),
    };
    out.push_str(&status_msg);
    out.push('\n');

    if let Some(warning) = &report.summary.warning {
        out.push_str(&format!("⚠️  {}\n", warning));
    }

    out
}

fn get_delta_symbol(change: i64) -> &'static str {
    if change > 0 {
        "📈"
    } else if change < 0 {
        "📉"
    } else {
        "➡️"
    }
}
