//! Terminal summary rendering for stub distributions.
//!
//! The console counterpart to the capture workflow's charts: a ranked
//! top-N table with call counts and ratios, an aggregate row for the long
//! tail, and a proportional call-share bar section. Output is colored per
//! process type so content and parent summaries read apart at a glance.

use crate::aggregator::metrics::{coverage, CallDistribution};
use crate::parser::stub_log::StubRecord;
use crate::scan::classify::ProcessKind;

const RESET: &str = "\x1b[0m";

// Column widths for the ranked table
const HASH_WIDTH: usize = 18;
const OP_WIDTH: usize = 22;
const CALLS_WIDTH: usize = 12;
const RATIO_WIDTH: usize = 7;

/// Render a ranked distribution as a text block for the terminal
///
/// **Public** - the console summary printer
///
/// # Arguments
/// * `process` - Process type the distribution belongs to
/// * `records` - Normalized records, already ranked hottest-first
/// * `dist` - Call volume statistics for the whole set
/// * `top_n` - Number of leading stubs shown individually
pub fn render_summary(
    process: ProcessKind,
    records: &[StubRecord],
    dist: &CallDistribution,
    top_n: usize,
) -> String {
    let color = process_color(process);
    let mut lines = Vec::new();

    lines.push(format!(
        "  {}🔥 {} PROCESS STUB DISTRIBUTION{}",
        color,
        process.as_str().to_uppercase(),
        RESET
    ));
    lines.push(format!("  {}", dist.summary()));
    lines.push(String::new());

    lines.push(table_border("┏", "┳", "┓"));
    lines.push(format!(
        "  ┃ {:^HASH_WIDTH$} ┃ {:^OP_WIDTH$} ┃ {:^CALLS_WIDTH$} ┃ {:^RATIO_WIDTH$} ┃",
        "Stub Hash", "Op", "Calls", "%"
    ));
    lines.push(table_border("┣", "╋", "┫"));

    for record in records.iter().take(top_n) {
        let ratio = record.call_ratio.unwrap_or(0.0);
        lines.push(format!(
            "  ┃ {}{:<HASH_WIDTH$}{} ┃ {:<OP_WIDTH$} ┃ {:>CALLS_WIDTH$} ┃ {:>6.1}% ┃",
            color,
            truncate_label(&record.hash, HASH_WIDTH),
            RESET,
            truncate_label(record.op.as_deref().unwrap_or("unknown"), OP_WIDTH),
            record.call_count,
            ratio * 100.0
        ));
    }

    // Long tail folded into one row, like the "Other" slice of a pie chart
    if records.len() > top_n {
        let tail = &records[top_n..];
        let tail_calls: u64 = tail.iter().map(|r| r.call_count).sum();
        let tail_ratio: f64 = tail.iter().filter_map(|r| r.call_ratio).sum();
        lines.push(format!(
            "  ┃ {:<HASH_WIDTH$} ┃ {:<OP_WIDTH$} ┃ {:>CALLS_WIDTH$} ┃ {:>6.1}% ┃",
            format!("(other {} stubs)", tail.len()),
            "",
            tail_calls,
            tail_ratio * 100.0
        ));
    }

    lines.push(table_border("┗", "┻", "┛"));

    // Proportional call-share bars, never for stubs the table folded away
    lines.push(String::new());
    lines.push("  📊 CALL SHARE".to_string());
    for record in records.iter().take(top_n.min(5)) {
        let ratio = record.call_ratio.unwrap_or(0.0);
        let bar_width = (ratio * 50.0).round() as usize;
        lines.push(format!(
            "  └─ {:<HASH_WIDTH$} {}{:<50}{} {:>5.1}%",
            truncate_label(&record.hash, HASH_WIDTH),
            color,
            "█".repeat(bar_width),
            RESET,
            ratio * 100.0
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "  Top {} coverage: {:.1}% of {} total calls",
        top_n.min(records.len()),
        coverage(records, top_n) * 100.0,
        dist.total_calls
    ));

    if records.len() > top_n {
        lines.push(format!(
            "  (Showing top {} of {} unique stubs)",
            top_n,
            records.len()
        ));
    }

    lines.join("\n")
}

/// ANSI accent color for a process type
///
/// **Private** - parent reads blue, content magenta
fn process_color(process: ProcessKind) -> &'static str {
    match process {
        ProcessKind::Parent => "\x1b[34m",
        ProcessKind::Content => "\x1b[35m",
    }
}

/// Build one horizontal border line of the ranked table
///
/// **Private** - keeps the column widths in a single place
fn table_border(left: &str, mid: &str, right: &str) -> String {
    let seg = |width: usize| "━".repeat(width + 2);
    format!(
        "  {}{}{}{}{}{}{}{}{}",
        left,
        seg(HASH_WIDTH),
        mid,
        seg(OP_WIDTH),
        mid,
        seg(CALLS_WIDTH),
        mid,
        seg(RATIO_WIDTH),
        right
    )
}

/// Truncate a label to fit a column, char-safe
///
/// **Private** - internal helper
fn truncate_label(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        label.to_string()
    } else {
        let head: String = label.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
