mod common;

use common::{create_test_dir, setup_check, write_file};
use qos_check::{run_check, CheckError, ConfigError, ReportError, ReportFormat, TemplateError};
use std::collections::BTreeSet;
use std::fs;

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_check_default_modes_one_present() {
    let temp_dir = create_test_dir();
    let options = setup_check(temp_dir.path(), "<block>_<mode>.log\n", &["core1_FUNC.log"]);

    let outcome = run_check(&options).expect("Should run check");
    let result = outcome.reconciliation;

    assert_eq!(result.matched, set(&["core1_FUNC.log"]));
    assert_eq!(
        result.missing,
        set(&["core1_ATPG_ATSPEED.log", "core1_ATPG_SHIFT.log", "core1_ATPG_STUCKAT.log"])
    );
    assert!(result.extra.is_empty());
    assert_eq!(outcome.files_scanned, 1);
}

#[test]
fn test_check_finds_extra_files_in_subdirectories() {
    let temp_dir = create_test_dir();
    let options = setup_check(
        temp_dir.path(),
        "plain.txt\n",
        &["plain.txt", "deep/nested/stray.log", ".hidden/ignored.log", ".SYNC"],
    );

    let result = run_check(&options).expect("Should run check").reconciliation;

    assert_eq!(result.matched, set(&["plain.txt"]));
    assert!(result.missing.is_empty());
    assert_eq!(result.extra, set(&["stray.log"]));
}

#[test]
fn test_check_extra_modes_are_expected() {
    let temp_dir = create_test_dir();
    let mut options = setup_check(temp_dir.path(), "<block>_<mode>.log\n", &["core1_IDDQ.log"]);
    options.extra_modes = vec!["IDDQ".to_string()];

    let result = run_check(&options).expect("Should run check").reconciliation;

    assert_eq!(result.matched, set(&["core1_IDDQ.log"]));
    assert_eq!(result.missing.len(), 4);
}

#[test]
fn test_check_with_config_file() {
    let temp_dir = create_test_dir();
    let mut options = setup_check(
        temp_dir.path(),
        "<block>_<PVTE><Mode>.sdf\n",
        &["core1_TT_NV_25C_TYP_FUNC.sdf", "skipme/core1_extra.sdf"],
    );
    let config = write_file(
        temp_dir.path(),
        "axes.json",
        r#"{
            "modes": ["FUNC"],
            "process": ["TT"],
            "voltage": ["NV"],
            "temperature": ["25C", "125C"],
            "environment": ["TYP"],
            "excludeDirs": ["skipme"]
        }"#,
    );
    options.config_path = Some(config);

    let result = run_check(&options).expect("Should run check").reconciliation;

    assert_eq!(result.matched, set(&["core1_TT_NV_25C_TYP_FUNC.sdf"]));
    assert_eq!(result.missing, set(&["core1_TT_NV_125C_TYP_FUNC.sdf"]));
    assert!(result.extra.is_empty());
}

#[test]
fn test_check_missing_directory() {
    let temp_dir = create_test_dir();
    let mut options = setup_check(temp_dir.path(), "a.log\n", &[]);
    options.target_dir = temp_dir.path().join("does-not-exist");

    let err = run_check(&options).unwrap_err();
    assert!(matches!(err, CheckError::DirectoryNotFound(_)));
}

#[test]
fn test_check_missing_golden_list() {
    let temp_dir = create_test_dir();
    let mut options = setup_check(temp_dir.path(), "a.log\n", &[]);
    options.golden_list = temp_dir.path().join("nope.txt");

    let err = run_check(&options).unwrap_err();
    assert!(matches!(err, CheckError::GoldenListNotFound(_)));
    assert!(err.to_string().contains("nope.txt"));
}

#[test]
fn test_check_malformed_template_writes_no_reports() {
    let temp_dir = create_test_dir();
    let options = setup_check(temp_dir.path(), "good.log\n<block_<mode>.log\n", &["good.log"]);

    let err = run_check(&options).unwrap_err();
    match err {
        CheckError::MalformedTemplate(TemplateError::Malformed { line_number, .. }) => {
            assert_eq!(line_number, 2)
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!options.output_dir.exists());
}

#[test]
fn test_check_missing_config_file() {
    let temp_dir = create_test_dir();
    let mut options = setup_check(temp_dir.path(), "a.log\n", &[]);
    options.config_path = Some(temp_dir.path().join("missing.json"));

    let err = run_check(&options).unwrap_err();
    assert!(matches!(err, CheckError::Config(_)));
}

#[test]
fn test_check_writes_three_reports() {
    let temp_dir = create_test_dir();
    let options = setup_check(temp_dir.path(), "<block>_<mode>.log\n", &["core1_FUNC.log"]);

    let reports = run_check(&options).expect("Should run check").reports;

    assert_eq!(
        reports.reconciliation,
        options.output_dir.join("reconciliation_report.txt")
    );
    assert_eq!(reports.file_list, options.output_dir.join("directory_file_list.txt"));
    assert_eq!(
        reports.expanded_list,
        options.output_dir.join("updated_golden_list.txt")
    );

    let expanded = fs::read_to_string(&reports.expanded_list).expect("Should read report");
    let names: Vec<&str> = expanded
        .lines()
        .filter(|l| l.starts_with("core1_"))
        .collect();
    assert_eq!(
        names,
        vec![
            "core1_ATPG_ATSPEED.log",
            "core1_ATPG_SHIFT.log",
            "core1_ATPG_STUCKAT.log",
            "core1_FUNC.log",
        ]
    );

    let listing = fs::read_to_string(&reports.file_list).expect("Should read report");
    assert!(listing.starts_with("Directory File List Report"));
    assert!(listing
        .lines()
        .any(|l| l.ends_with("core1_FUNC.log") && l.contains("artifacts")));
}

#[test]
fn test_check_timestamped_json_reports() {
    let temp_dir = create_test_dir();
    let mut options = setup_check(temp_dir.path(), "a.log\nb.log\n", &["a.log", "c.log"]);
    options.timestamp = true;
    options.format = ReportFormat::Json;

    let reports = run_check(&options).expect("Should run check").reports;

    let file_name = reports
        .reconciliation
        .file_name()
        .and_then(|n| n.to_str())
        .expect("Should have a file name")
        .to_string();
    assert!(file_name.starts_with("reconciliation_report_"));
    assert!(file_name.ends_with(".json"));

    let content = fs::read_to_string(&reports.reconciliation).expect("Should read report");
    let json: serde_json::Value = serde_json::from_str(&content).expect("Should be JSON");
    assert_eq!(json["counts"]["matched"], 1);
    assert_eq!(json["missing"][0]["name"], "b.log");
    assert_eq!(json["extra"][0]["name"], "c.log");
    assert_eq!(json["block_name"], "core1");
}

#[test]
fn test_check_rerun_into_target_dir_ignores_own_reports() {
    let temp_dir = create_test_dir();
    let mut options = setup_check(temp_dir.path(), "a.log\n", &["a.log"]);
    options.output_dir = options.target_dir.clone();

    let first = run_check(&options).expect("Should run check");
    assert!(first.reconciliation.is_clean());
    assert!(options.target_dir.join("reconciliation_report.txt").exists());

    let second = run_check(&options).expect("Should rerun check");
    assert!(second.reconciliation.extra.is_empty());
    assert_eq!(second.reconciliation.matched, set(&["a.log"]));
    assert_eq!(second.files_scanned, 1);
}

#[test]
fn test_check_timestamped_reruns_stay_clean() {
    let temp_dir = create_test_dir();
    let mut options = setup_check(temp_dir.path(), "a.log\n", &["a.log"]);
    options.output_dir = options.target_dir.clone();
    options.timestamp = true;
    options.format = ReportFormat::Json;

    run_check(&options).expect("Should run check");
    let second = run_check(&options).expect("Should rerun check");
    assert!(second.reconciliation.is_clean());
}

#[test]
fn test_check_rejects_template_with_json_output() {
    let temp_dir = create_test_dir();
    let mut options = setup_check(temp_dir.path(), "a.log\n", &["a.log"]);
    options.format = ReportFormat::Json;
    options.report_template = Some(write_file(temp_dir.path(), "custom.hbs", "{{block_name}}\n"));

    let err = run_check(&options).unwrap_err();
    assert!(matches!(
        err,
        CheckError::ReportWrite(ReportError::TemplateFormatMismatch("json"))
    ));
    assert!(!options.output_dir.exists());
}

#[test]
fn test_check_rejects_mode_label_with_path_separator() {
    let temp_dir = create_test_dir();
    let mut options = setup_check(temp_dir.path(), "<block>_<mode>.log\n", &[]);
    options.extra_modes = vec!["SCAN/FAST".to_string()];

    let err = run_check(&options).unwrap_err();
    assert!(matches!(
        err,
        CheckError::Config(ConfigError::InvalidLabel { axis: "modes", .. })
    ));
}
