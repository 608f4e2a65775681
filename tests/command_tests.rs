use ic_freq_studio::commands::{
    execute_analyze, execute_diff, validate_args, AnalyzeArgs, DiffArgs,
};
use ic_freq_studio::diff::StubDiffReport;
use ic_freq_studio::output::{read_report, write_report};
use ic_freq_studio::parser::schema::{OpSummary, RankedStub, StubReport};
use ic_freq_studio::utils::config::SCHEMA_VERSION;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_log(dir: &Path, file_name: &str, document: serde_json::Value) {
    fs::write(dir.join(file_name), document.to_string()).unwrap();
}

/// Build a report the way analyze would emit it, for exercising diff
fn make_report(process: &str, total_calls: u64, stubs: &[(&str, &str, u64, f64)]) -> StubReport {
    let mut by_op: HashMap<String, u64> = HashMap::new();
    for (_, op, count, _) in stubs {
        *by_op.entry(op.to_string()).or_insert(0) += count;
    }

    StubReport {
        version: SCHEMA_VERSION.to_string(),
        process: process.to_string(),
        source_dirs: vec!["stub-logs".to_string()],
        total_calls,
        unique_stubs: stubs.len(),
        op_summary: OpSummary {
            by_op,
            unlabeled_calls: 0,
        },
        top_stubs: stubs
            .iter()
            .map(|(hash, op, count, ratio)| RankedStub {
                hash: hash.to_string(),
                op: Some(op.to_string()),
                call_count: *count,
                call_ratio: *ratio,
            })
            .collect(),
        generated_at: "2025-01-01T00:00:00Z".to_string(),
    }
}

// ====== ARGUMENT VALIDATION ======

#[test]
fn test_validate_args_valid() {
    let args = AnalyzeArgs {
        log_dirs: vec![PathBuf::from("stub-logs")],
        ..Default::default()
    };

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_no_log_dirs() {
    assert!(validate_args(&AnalyzeArgs::default()).is_err());
}

#[test]
fn test_validate_args_top_stubs_bounds() {
    let zero = AnalyzeArgs {
        log_dirs: vec![PathBuf::from("stub-logs")],
        top_stubs: 0,
        ..Default::default()
    };
    assert!(validate_args(&zero).is_err());

    let too_large = AnalyzeArgs {
        log_dirs: vec![PathBuf::from("stub-logs")],
        top_stubs: 2000,
        ..Default::default()
    };
    assert!(validate_args(&too_large).is_err());
}

#[test]
fn test_validate_args_unknown_process() {
    let args = AnalyzeArgs {
        log_dirs: vec![PathBuf::from("stub-logs")],
        process: Some("gpu".to_string()),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

// ====== ANALYZE END TO END ======

#[test]
fn test_analyze_writes_reports_for_both_processes() {
    let log_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();

    // Duplicate hash inside one document so the fold order is fixed
    write_log(
        log_dir.path(),
        "content_1234.json",
        json!({
            "entries": [
                { "op": "GetProp", "stubs": [ { "hash": "aaaa1111", "call-count": 600 } ] },
                {
                    "op": "GetElem",
                    "stubs": [
                        { "hash": "aaaa1111", "call-count": 100 },
                        { "hash": "bbbb2222", "call-count": 250 }
                    ]
                }
            ]
        }),
    );
    write_log(
        log_dir.path(),
        "content_5678.json",
        json!({
            "entries": [
                { "op": "Call", "stubs": [ { "hash": "cccc3333", "call-count": 50 } ] }
            ]
        }),
    );
    write_log(
        log_dir.path(),
        "parent_0001.json",
        json!({
            "entries": [
                { "op": "SetProp", "stubs": [ { "hash": "dddd4444", "call-count": 40 } ] }
            ]
        }),
    );

    let args = AnalyzeArgs {
        log_dirs: vec![log_dir.path().to_path_buf()],
        output_dir: Some(out_dir.path().to_path_buf()),
        top_stubs: 10,
        ..Default::default()
    };

    execute_analyze(args).unwrap();

    let content = read_report(out_dir.path().join("stub_report_content.json")).unwrap();
    assert_eq!(content.version, SCHEMA_VERSION);
    assert_eq!(content.process, "content");
    assert_eq!(content.total_calls, 1000);
    assert_eq!(content.unique_stubs, 3);
    assert_eq!(content.op_summary.by_op.get("GetProp"), Some(&600));
    assert_eq!(content.op_summary.by_op.get("GetElem"), Some(&350));
    assert_eq!(content.op_summary.by_op.get("Call"), Some(&50));

    // Duplicates merged and ranked descending
    assert_eq!(content.top_stubs[0].hash, "aaaa1111");
    assert_eq!(content.top_stubs[0].call_count, 700);
    assert_eq!(content.top_stubs[0].call_ratio, 0.7);
    assert_eq!(content.top_stubs[0].op.as_deref(), Some("GetProp"));
    assert_eq!(content.top_stubs[2].call_ratio, 0.05);

    let parent = read_report(out_dir.path().join("stub_report_parent.json")).unwrap();
    assert_eq!(parent.process, "parent");
    assert_eq!(parent.total_calls, 40);
    assert_eq!(parent.unique_stubs, 1);
}

#[test]
fn test_analyze_process_restriction() {
    let log_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();

    write_log(
        log_dir.path(),
        "content_1.json",
        json!({
            "entries": [ { "op": "GetProp", "stubs": [ { "hash": "aa", "call-count": 10 } ] } ]
        }),
    );
    write_log(
        log_dir.path(),
        "parent_1.json",
        json!({
            "entries": [ { "op": "SetProp", "stubs": [ { "hash": "bb", "call-count": 20 } ] } ]
        }),
    );

    let args = AnalyzeArgs {
        log_dirs: vec![log_dir.path().to_path_buf()],
        output_dir: Some(out_dir.path().to_path_buf()),
        process: Some("parent".to_string()),
        ..Default::default()
    };

    execute_analyze(args).unwrap();

    assert!(out_dir.path().join("stub_report_parent.json").exists());
    assert!(!out_dir.path().join("stub_report_content.json").exists());
}

#[test]
fn test_analyze_truncates_to_top_stubs() {
    let log_dir = tempdir().unwrap();
    let out_dir = tempdir().unwrap();

    write_log(
        log_dir.path(),
        "content_1.json",
        json!({
            "entries": [
                {
                    "op": "Call",
                    "stubs": [
                        { "hash": "s1", "call-count": 50 },
                        { "hash": "s2", "call-count": 40 },
                        { "hash": "s3", "call-count": 30 },
                        { "hash": "s4", "call-count": 20 },
                        { "hash": "s5", "call-count": 10 }
                    ]
                }
            ]
        }),
    );

    let args = AnalyzeArgs {
        log_dirs: vec![log_dir.path().to_path_buf()],
        output_dir: Some(out_dir.path().to_path_buf()),
        top_stubs: 2,
        ..Default::default()
    };

    execute_analyze(args).unwrap();

    let report = read_report(out_dir.path().join("stub_report_content.json")).unwrap();
    assert_eq!(report.top_stubs.len(), 2);
    assert_eq!(report.top_stubs[0].hash, "s1");
    // Population metrics still describe the full record set
    assert_eq!(report.unique_stubs, 5);
    assert_eq!(report.total_calls, 150);
}

#[test]
fn test_analyze_no_records_fails() {
    let log_dir = tempdir().unwrap();
    write_log(
        log_dir.path(),
        "gpu_1.json",
        json!({
            "entries": [ { "op": "Call", "stubs": [ { "hash": "aa", "call-count": 1 } ] } ]
        }),
    );

    let args = AnalyzeArgs {
        log_dirs: vec![log_dir.path().to_path_buf()],
        ..Default::default()
    };

    let result = execute_analyze(args);

    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("No stub records found"));
}

#[test]
fn test_analyze_missing_directory_fails() {
    let args = AnalyzeArgs {
        log_dirs: vec![PathBuf::from("/nonexistent/stub-logs")],
        ..Default::default()
    };

    assert!(execute_analyze(args).is_err());
}

// ====== DIFF END TO END ======

#[test]
fn test_diff_passes_without_thresholds() {
    let dir = tempdir().unwrap();
    let baseline_path = dir.path().join("baseline.json");
    let target_path = dir.path().join("target.json");

    let baseline = make_report(
        "content",
        1000,
        &[("aaaa1111", "GetProp", 700, 0.7), ("bbbb2222", "Call", 300, 0.3)],
    );
    let target = make_report(
        "content",
        1500,
        &[("aaaa1111", "GetProp", 1100, 0.733), ("bbbb2222", "Call", 400, 0.267)],
    );

    write_report(&baseline, &baseline_path).unwrap();
    write_report(&target, &target_path).unwrap();

    let args = DiffArgs {
        baseline: baseline_path,
        target: target_path,
        summary: false,
        ..Default::default()
    };

    execute_diff(args).unwrap();
}

#[test]
fn test_diff_threshold_regression_fails_and_writes_report() {
    let dir = tempdir().unwrap();
    let baseline_path = dir.path().join("baseline.json");
    let target_path = dir.path().join("target.json");
    let diff_path = dir.path().join("diff.json");

    let baseline = make_report("content", 1000, &[("aaaa1111", "GetProp", 1000, 1.0)]);
    let target = make_report("content", 1800, &[("aaaa1111", "GetProp", 1800, 1.0)]);

    write_report(&baseline, &baseline_path).unwrap();
    write_report(&target, &target_path).unwrap();

    let args = DiffArgs {
        baseline: baseline_path,
        target: target_path,
        max_increase: Some(20.0),
        output: Some(diff_path.clone()),
        summary: false,
        ..Default::default()
    };

    let result = execute_diff(args);
    assert!(result.is_err());

    // The diff report is still written so CI logs keep the evidence
    let json = fs::read_to_string(&diff_path).unwrap();
    let report: StubDiffReport = serde_json::from_str(&json).unwrap();

    assert_eq!(report.summary.status, "FAILED");
    assert!(report.summary.has_regressions);
    assert_eq!(report.deltas.calls.absolute_change, 800);
    assert_eq!(report.deltas.calls.percent_change, 80.0);
    assert_eq!(report.threshold_violations.len(), 1);
    assert_eq!(
        report.threshold_violations[0].metric,
        "calls.max_increase_percent"
    );
}

#[test]
fn test_diff_within_threshold_passes() {
    let dir = tempdir().unwrap();
    let baseline_path = dir.path().join("baseline.json");
    let target_path = dir.path().join("target.json");

    let baseline = make_report("content", 1000, &[("aaaa1111", "GetProp", 1000, 1.0)]);
    let target = make_report("content", 1100, &[("aaaa1111", "GetProp", 1100, 1.0)]);

    write_report(&baseline, &baseline_path).unwrap();
    write_report(&target, &target_path).unwrap();

    let args = DiffArgs {
        baseline: baseline_path,
        target: target_path,
        max_increase: Some(20.0),
        summary: false,
        ..Default::default()
    };

    execute_diff(args).unwrap();
}

#[test]
fn test_diff_process_mismatch_fails() {
    let dir = tempdir().unwrap();
    let baseline_path = dir.path().join("baseline.json");
    let target_path = dir.path().join("target.json");

    let baseline = make_report("content", 1000, &[("aaaa1111", "GetProp", 1000, 1.0)]);
    let target = make_report("parent", 1000, &[("aaaa1111", "GetProp", 1000, 1.0)]);

    write_report(&baseline, &baseline_path).unwrap();
    write_report(&target, &target_path).unwrap();

    let args = DiffArgs {
        baseline: baseline_path,
        target: target_path,
        summary: false,
        ..Default::default()
    };

    assert!(execute_diff(args).is_err());
}

#[test]
fn test_diff_missing_baseline_fails() {
    let dir = tempdir().unwrap();
    let target_path = dir.path().join("target.json");

    let target = make_report("content", 1000, &[("aaaa1111", "GetProp", 1000, 1.0)]);
    write_report(&target, &target_path).unwrap();

    let args = DiffArgs {
        baseline: dir.path().join("missing.json"),
        target: target_path,
        summary: false,
        ..Default::default()
    };

    assert!(execute_diff(args).is_err());
}
