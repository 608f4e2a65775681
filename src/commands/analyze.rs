//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Scans the supplied log directories
//! 2. Computes per-process stub distributions
//! 3. Writes report files
//! 4. Renders terminal summaries
//!
//! Content and parent processes are analyzed independently. A process
//! with no records is skipped with a warning rather than failing the
//! run, since single-process captures are common.

use crate::aggregator::{calculate_call_distribution, compute_distribution, to_report};
use crate::output::{render_summary, write_report};
use crate::parser::stub_log::StubRecord;
use crate::scan::{load_stub_logs, ProcessKind};
use crate::utils::config::{DEFAULT_TOP_STUBS, MAX_TOP_STUBS, PREVIEW_STUBS};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Log directories to scan for stub logs
    pub log_dirs: Vec<PathBuf>,

    /// Directory report files are written into (None = current directory)
    pub output_dir: Option<PathBuf>,

    /// Number of top stubs to include in reports and summaries
    pub top_stubs: usize,

    /// Process selection: "content", "parent", or "both" (None = both)
    pub process: Option<String>,

    /// Print text summaries to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            log_dirs: Vec::new(),
            output_dir: None,
            top_stubs: DEFAULT_TOP_STUBS,
            process: None,
            print_summary: false,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Analyze command arguments
///
/// # Returns
/// Ok if at least one distribution was computed and written,
/// Err with context if any step fails
///
/// # Errors
/// * Missing or unreadable log directories
/// * Malformed stub logs
/// * File write errors
/// * No stub records in any supplied directory
///
/// # Example
/// ```ignore
/// let args = AnalyzeArgs {
///     log_dirs: vec![PathBuf::from("stub-logs")],
///     output_dir: None,
///     top_stubs: 20,
///     process: None,
///     print_summary: true,
/// };
///
/// execute_analyze(args)?;
/// ```
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting stub frequency analysis");
    info!("Log directories: {}", format_dirs(&args.log_dirs));

    // Step 1: Scan log directories
    info!("Step 1/4: Scanning log directories...");
    let mut scanned =
        load_stub_logs(&args.log_dirs).context("Failed to scan stub log directories")?;

    info!("Scan result: {}", scanned.stats.summary());

    // Step 2: Compute distributions
    info!("Step 2/4: Computing stub distributions...");
    let mut distributions: Vec<(ProcessKind, Vec<StubRecord>)> = Vec::new();

    for process in selected_processes(&args)? {
        let records = scanned.take_records(process);
        if records.is_empty() {
            warn!("No {} process records found, skipping", process);
            continue;
        }

        info!(
            "Computing {} process stub distribution ({} raw records)...",
            process,
            records.len()
        );

        let ranked = match compute_distribution(records) {
            Ok(ranked) => ranked,
            Err(e) => {
                warn!("Skipping {} process distribution: {}", process, e);
                continue;
            }
        };

        debug!("Top {} stubs ({} process):", PREVIEW_STUBS, process);
        for (i, record) in ranked.iter().take(PREVIEW_STUBS).enumerate() {
            debug!(
                "  {}. {} calls ({:.1}%): {}",
                i + 1,
                record.call_count,
                record.call_ratio.unwrap_or(0.0) * 100.0,
                record.hash
            );
        }

        let dist = calculate_call_distribution(&ranked);
        info!("Call distribution ({}): {}", process, dist.summary());

        distributions.push((process, ranked));
    }

    if distributions.is_empty() {
        anyhow::bail!("No stub records found in any supplied log directory");
    }

    // Step 3: Write reports
    info!("Step 3/4: Writing report files...");
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let source_dirs: Vec<String> = args
        .log_dirs
        .iter()
        .map(|dir| dir.display().to_string())
        .collect();

    for (process, ranked) in &distributions {
        let report = to_report(*process, &source_dirs, ranked, args.top_stubs);
        let path = output_dir.join(format!("stub_report_{}.json", process));

        write_report(&report, &path).context("Failed to write stub report JSON")?;

        info!("✓ Report written to: {}", path.display());
    }

    // Step 4: Terminal summaries (if requested)
    if args.print_summary {
        info!("Step 4/4: Rendering terminal summaries...");

        println!("\n{}", "=".repeat(80));
        println!("STUB FREQUENCY SUMMARY");
        println!("{}", "=".repeat(80));

        for (process, ranked) in &distributions {
            let dist = calculate_call_distribution(ranked);
            println!("\n{}", render_summary(*process, ranked, &dist, args.top_stubs));
        }

        println!("\n{}", "=".repeat(80));
    } else {
        info!("Step 4/4: Skipping terminal summaries (not requested)");
    }

    let elapsed = start_time.elapsed();
    info!(
        "Analysis completed in {:.2}s ({} distributions)",
        elapsed.as_secs_f64(),
        distributions.len()
    );

    Ok(())
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.log_dirs.is_empty() {
        anyhow::bail!("At least one log directory must be supplied");
    }

    if args.top_stubs == 0 {
        anyhow::bail!("top_stubs must be greater than 0");
    }

    if args.top_stubs > MAX_TOP_STUBS {
        anyhow::bail!("top_stubs is too large (max {})", MAX_TOP_STUBS);
    }

    if let Some(process) = &args.process {
        if !process.eq_ignore_ascii_case("both") && process.parse::<ProcessKind>().is_err() {
            anyhow::bail!(
                "Invalid process type '{}' (expected 'content', 'parent', or 'both')",
                process
            );
        }
    }

    Ok(())
}

/// Resolve the process types this run should analyze
///
/// **Private** - internal helper for execute_analyze
fn selected_processes(args: &AnalyzeArgs) -> Result<Vec<ProcessKind>> {
    match &args.process {
        Some(process) if !process.eq_ignore_ascii_case("both") => {
            let kind = process.parse::<ProcessKind>().map_err(anyhow::Error::msg)?;
            Ok(vec![kind])
        }
        _ => Ok(ProcessKind::all().to_vec()),
    }
}

/// Join directory paths for log output
///
/// **Private** - internal helper
fn format_dirs(dirs: &[PathBuf]) -> String {
    dirs.iter()
        .map(|dir| dir.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_args() -> AnalyzeArgs {
        AnalyzeArgs {
            log_dirs: vec![PathBuf::from("logs")],
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&valid_args()).is_ok());
    }

    #[test]
    fn test_validate_args_no_dirs() {
        let args = AnalyzeArgs::default();

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_stubs_zero() {
        let args = AnalyzeArgs {
            top_stubs: 0,
            ..valid_args()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_stubs_too_large() {
        let args = AnalyzeArgs {
            top_stubs: 2000,
            ..valid_args()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_invalid_process() {
        let args = AnalyzeArgs {
            process: Some("gpu".to_string()),
            ..valid_args()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_process_case_insensitive() {
        let args = AnalyzeArgs {
            process: Some("Content".to_string()),
            ..valid_args()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_process_both() {
        let args = AnalyzeArgs {
            process: Some("both".to_string()),
            ..valid_args()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_selected_processes_default_covers_both() {
        let processes = selected_processes(&valid_args()).unwrap();

        assert_eq!(processes.len(), 2);
        assert!(processes.contains(&ProcessKind::Content));
        assert!(processes.contains(&ProcessKind::Parent));
    }

    #[test]
    fn test_selected_processes_restricted() {
        let args = AnalyzeArgs {
            process: Some("parent".to_string()),
            ..valid_args()
        };

        let processes = selected_processes(&args).unwrap();

        assert_eq!(processes, vec![ProcessKind::Parent]);
    }

    #[test]
    fn test_selected_processes_explicit_both() {
        let args = AnalyzeArgs {
            process: Some("both".to_string()),
            ..valid_args()
        };

        let processes = selected_processes(&args).unwrap();

        assert_eq!(processes.len(), 2);
    }
}
