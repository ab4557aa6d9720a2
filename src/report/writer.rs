use super::engine::ReportError;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write a report atomically using a temp file + rename.
///
/// The report either appears complete or not at all; a failed write removes
/// the temp file.
pub fn write_report(path: &Path, content: &str) -> Result<(), ReportError> {
    let write_error = |source: std::io::Error| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let temp_path = temp_path_for(path);
    let result = write_temp(&temp_path, content).and_then(|()| fs::rename(&temp_path, path));

    if let Err(source) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(write_error(source));
    }

    Ok(())
}

fn write_temp(temp_path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("reports/nested/out.txt");

        write_report(&path, "hello\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!temp.path().join("reports/nested/.out.txt.tmp").exists());
    }

    #[test]
    fn test_write_report_replaces_existing() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("out.txt");
        fs::write(&path, "old").unwrap();

        write_report(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_report_failure_names_path() {
        let temp = tempfile::tempdir().unwrap();
        // A file where a parent directory is needed
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("out.txt");

        let err = write_report(&path, "x").unwrap_err();
        match err {
            ReportError::Write { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
