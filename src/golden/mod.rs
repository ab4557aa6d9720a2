use crate::utils::compute_hash;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GoldenListError {
    #[error("Golden list not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read golden list {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A golden-list template as read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenList {
    pub path: PathBuf,
    /// Raw lines, untrimmed, in file order
    pub lines: Vec<String>,
    /// SHA-256 of the file content
    pub fingerprint: String,
}

/// Read a golden-list file. The path must name an existing regular file.
pub fn load_golden_list(path: &Path) -> Result<GoldenList, GoldenListError> {
    if !path.is_file() {
        return Err(GoldenListError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| GoldenListError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let golden = GoldenList {
        path: path.to_path_buf(),
        lines: content.lines().map(String::from).collect(),
        fingerprint: compute_hash(&content),
    };

    info!(
        path = %path.display(),
        lines = golden.lines.len(),
        "Loaded golden list"
    );

    Ok(golden)
}
