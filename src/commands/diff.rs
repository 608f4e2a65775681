//! Diff command implementation.
//! Orchestrates the comparison of two reports and surfaces deltas/violations.

use crate::diff::{check_thresholds, generate_diff, render_terminal_diff, CallThresholds};
use crate::output::json::read_report;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

/// Arguments for the diff command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct DiffArgs {
    /// Path to the baseline report JSON
    pub baseline: PathBuf,

    /// Path to the target report JSON
    pub target: PathBuf,

    /// Maximum allowed total call increase percentage (e.g., 10.0)
    pub max_increase: Option<f64>,

    /// Warn when a single stub grows by more than this percentage
    pub warn_stub_increase: Option<f64>,

    /// Path to write the diff report JSON
    pub output: Option<PathBuf>,

    /// Print a human-readable summary to the terminal
    pub summary: bool,
}

impl Default for DiffArgs {
    fn default() -> Self {
        Self {
            baseline: PathBuf::new(),
            target: PathBuf::new(),
            max_increase: None,
            warn_stub_increase: None,
            output: None,
            summary: true,
        }
    }
}

/// Execute the diff command
///
/// **Public** - main entry point called from main.rs
///
/// Exits with an error when thresholds are set and the target regresses
/// past them, so CI pipelines can gate on the exit code.
pub fn execute_diff(args: DiffArgs) -> Result<()> {
    // Step 1: Load reports
    info!("Comparing {} against {}", args.target.display(), args.baseline.display());
    let baseline = read_report(&args.baseline).context("Failed to read baseline report")?;
    let target = read_report(&args.target).context("Failed to read target report")?;

    // Step 2: Generate diff
    let mut report = generate_diff(&baseline, &target).context("Failed to generate diff")?;

    // Step 3: Check violations only if thresholds are set
    if args.max_increase.is_some() || args.warn_stub_increase.is_some() {
        let thresholds = CallThresholds {
            max_calls_increase_percent: args.max_increase,
            warn_stub_increase_percent: args.warn_stub_increase,
        };
        check_thresholds(&mut report, &thresholds);
    }

    // Step 4: Write output if requested
    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).context("Failed to write diff report JSON")?;
        println!("📊 Diff report written to {}", path.display());
    }

    // Step 5: Terminal summary
    if args.summary {
        println!("{}", render_terminal_diff(&report));
    }

    // Step 6: Gate the exit code on the rolled-up status
    if report.summary.status == "FAILED" {
        return Err(anyhow::anyhow!("Regression detected against thresholds"));
    }

    Ok(())
}
