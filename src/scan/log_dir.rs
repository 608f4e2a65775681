//! Stub log directory scanning.
//!
//! Stub logs are produced by running a debug browser build with stub
//! telemetry enabled (the JIT writes one JSON document per process into
//! the configured log directory). This module walks those directories,
//! classifies each file by process type, and flattens every classifiable
//! log into per-process record sets.

use super::classify::ProcessKind;
use crate::parser::stub_log::{parse_stub_log, StubRecord};
use crate::utils::error::ScanError;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Records collected by one scan, split by process type
#[derive(Debug, Clone, Default)]
pub struct ScannedLogs {
    /// Records from content-process logs
    pub content: Vec<StubRecord>,

    /// Records from parent-process logs
    pub parent: Vec<StubRecord>,

    /// Counters describing what the scan saw
    pub stats: ScanStats,
}

impl ScannedLogs {
    /// Borrow the record set for one process type
    pub fn records_for(&self, kind: ProcessKind) -> &[StubRecord] {
        match kind {
            ProcessKind::Content => &self.content,
            ProcessKind::Parent => &self.parent,
        }
    }

    /// Move the record set for one process type out of the scan result
    ///
    /// **Public** - lets the analyze command feed the pipeline without cloning
    pub fn take_records(&mut self, kind: ProcessKind) -> Vec<StubRecord> {
        match kind {
            ProcessKind::Content => std::mem::take(&mut self.content),
            ProcessKind::Parent => std::mem::take(&mut self.parent),
        }
    }
}

/// Counters for files seen during a scan
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanStats {
    /// Files inspected (directories and other non-files excluded)
    pub files_seen: usize,

    /// Files classified as content-process logs
    pub content_logs: usize,

    /// Files classified as parent-process logs
    pub parent_logs: usize,

    /// Files carrying no process marker, skipped with a warning
    pub skipped_unclassified: usize,
}

impl ScanStats {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and the analyze banner
    pub fn summary(&self) -> String {
        format!(
            "Files: {} | Content logs: {} | Parent logs: {} | Unclassified: {}",
            self.files_seen, self.content_logs, self.parent_logs, self.skipped_unclassified
        )
    }
}

/// Check that a supplied path is an existing directory
///
/// **Public** - called per argument before any scanning starts
///
/// # Errors
/// * `ScanError::InvalidDirectory` - path is missing or not a directory
pub fn validate_log_dir(path: &Path) -> Result<(), ScanError> {
    if !path.is_dir() {
        return Err(ScanError::InvalidDirectory(format!(
            "{} does not exist or is not a directory",
            path.display()
        )));
    }
    Ok(())
}

/// Load every classifiable stub log under the given directories
///
/// **Public** - main entry point for scanning
///
/// # Arguments
/// * `dirs` - Log directories, each scanned non-recursively
///
/// # Returns
/// Flattened records split by process type, plus scan counters
///
/// # Errors
/// * `ScanError::InvalidDirectory` - a directory is missing
/// * `ScanError::Io` - a directory or file could not be read
/// * `ScanError::MalformedLog` - a classified log failed to parse
///
/// Files whose names carry no process marker are skipped with a warning
/// rather than silently dropped; a classified log that fails to parse
/// aborts the scan, since a corrupt capture would skew the distribution.
pub fn load_stub_logs(dirs: &[PathBuf]) -> Result<ScannedLogs, ScanError> {
    let mut scanned = ScannedLogs::default();

    for dir in dirs {
        validate_log_dir(dir)?;
        scan_dir(dir, &mut scanned)?;
    }

    debug!("Scan complete: {}", scanned.stats.summary());

    Ok(scanned)
}

/// Scan a single directory into the accumulator
///
/// **Private** - internal helper for load_stub_logs
fn scan_dir(dir: &Path, scanned: &mut ScannedLogs) -> Result<(), ScanError> {
    debug!("Scanning log directory: {}", dir.display());

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type()?.is_file() {
            debug!("Skipping non-file entry: {}", path.display());
            continue;
        }

        scanned.stats.files_seen += 1;

        let name = entry.file_name().to_string_lossy().to_string();
        let kind = match ProcessKind::from_file_name(&name) {
            Some(kind) => kind,
            None => {
                warn!("Skipping unclassified log file: {}", path.display());
                scanned.stats.skipped_unclassified += 1;
                continue;
            }
        };

        let text = fs::read_to_string(&path)?;
        let records = parse_stub_log(&text)
            .map_err(|e| ScanError::MalformedLog(path.display().to_string(), e))?;

        debug!(
            "Parsed {} records from {} ({} process)",
            records.len(),
            path.display(),
            kind
        );

        match kind {
            ProcessKind::Content => {
                scanned.stats.content_logs += 1;
                scanned.content.extend(records);
            }
            ProcessKind::Parent => {
                scanned.stats.parent_logs += 1;
                scanned.parent.extend(records);
            }
        }
    }

    Ok(())
}
