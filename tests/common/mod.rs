#![allow(dead_code)]

use qos_check::CheckOptions;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Should create temp dir")
}

/// Write a file (and its parent directories) relative to `root`
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Should create parent dir");
    }
    fs::write(&path, content).expect("Should write file");
    path
}

/// Lay out a scan target, a golden list and an output directory under `root`
pub fn setup_check(root: &Path, golden: &str, files: &[&str]) -> CheckOptions {
    let target = root.join("artifacts");
    fs::create_dir_all(&target).expect("Should create target dir");
    for file in files {
        write_file(&target, file, "");
    }
    let golden_list = write_file(root, "golden_list.txt", golden);

    CheckOptions {
        block_name: "core1".to_string(),
        target_dir: target,
        golden_list,
        output_dir: root.join("reports"),
        ..Default::default()
    }
}
