//! IC Freq Studio CLI
//!
//! A frequency analysis tool for JIT inline cache stub telemetry.
//! Aggregates per-process stub logs into ranked call distributions.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use ic_freq_studio::commands::{
    execute_analyze, execute_diff, validate_args, AnalyzeArgs, DiffArgs,
};
use ic_freq_studio::utils::config::SCHEMA_VERSION;

/// IC Freq Studio - Stub frequency analysis for JIT inline caches
#[derive(Parser, Debug)]
#[command(name = "ic-freq")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze stub logs and compute call distributions
    Analyze {
        /// Stub log directories to scan
        #[arg(required = true)]
        log_dirs: Vec<PathBuf>,

        /// Directory report files are written into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of top stubs to include in reports
        #[arg(long, default_value = "20")]
        top: usize,

        /// Process selection: content, parent, or both
        #[arg(long)]
        process: Option<String>,

        /// Print text summaries to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Compare two stub reports (baseline vs target)
    Diff {
        /// Path to baseline report JSON
        #[arg(short, long)]
        baseline: PathBuf,

        /// Path to target report JSON
        #[arg(short, long)]
        target: PathBuf,

        /// Fail if total calls grow by more than this percentage
        #[arg(long)]
        max_increase: Option<f64>,

        /// Warn when a single stub grows by more than this percentage
        #[arg(long)]
        warn_stub_increase: Option<f64>,

        /// Path to write the diff report JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a human-readable summary to the terminal
        #[arg(long)]
        summary: bool,
    },

    /// Validate a stub report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show report schema information
    Schema {
        /// Print every schema field
        #[arg(long)]
        show: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over the flag when set
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            log_dirs,
            output,
            top,
            process,
            summary,
        } => {
            let args = AnalyzeArgs {
                log_dirs,
                output_dir: output,
                top_stubs: top,
                process,
                print_summary: summary,
            };

            // Reject bad arguments before any directory is touched
            validate_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Diff {
            baseline,
            target,
            max_increase,
            warn_stub_increase,
            output,
            summary,
        } => {
            let args = DiffArgs {
                baseline,
                target,
                max_increase,
                warn_stub_increase,
                output,
                summary,
            };

            execute_diff(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a stub report JSON file
///
/// **Private** - internal command implementation
fn validate_report_file(file_path: PathBuf) -> Result<()> {
    use ic_freq_studio::output::read_report;

    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid stub report JSON");
    println!("  Version: {}", report.version);
    println!("  Process: {}", report.process);
    println!("  Total Calls: {}", report.total_calls);
    println!("  Unique Stubs: {}", report.unique_stubs);
    println!("  Top Stubs: {}", report.top_stubs.len());

    Ok(())
}

/// Print the report schema, optionally with every field
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("IC Freq Studio Report Schema");
    println!("Schema Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Report structure:");
        println!("  version: string          - Report schema version");
        println!("  process: string          - Process type ('content' or 'parent')");
        println!("  source_dirs: array       - Log directories the scan covered");
        println!("  total_calls: number      - Total stub invocations");
        println!("  unique_stubs: number     - Distinct stubs after folding");
        println!("  op_summary: object       - Call volume by bytecode operation");
        println!("    by_op: object          - Summed calls keyed by op label");
        println!("    unlabeled_calls: number - Calls from stubs with no op label");
        println!("  top_stubs: array         - Hottest stubs, ranked");
        println!("    hash: string           - Stub identity hash");
        println!("    op: string?            - Bytecode operation (if known)");
        println!("    call_count: number     - Summed call count");
        println!("    call_ratio: number     - Share of total calls (3 decimals)");
        println!("  generated_at: string     - RFC 3339 generation time");
    } else {
        println!("Pass --show to print the full field list");
    }
}

/// Print version details for bug reports
///
/// **Private** - internal command implementation
fn display_version() {
    println!("IC Freq Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("A stub frequency analysis tool for JIT inline cache telemetry.");
}
