//! Synthetic artifact trees for trying out a golden list.
//!
//! A fixture is a directory holding every golden-list name, spread across a
//! few subdirectories, plus some uniquely named extra files that the golden
//! list does not mention.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Refusing to overwrite existing file {0}")]
    AlreadyExists(PathBuf),

    #[error("Invalid fixture name '{0}': must be a bare file name")]
    InvalidName(String),
}

/// Names written when the caller supplies none
pub const DEFAULT_FIXTURE_NAMES: [&str; 5] = [
    "file1.txt",
    "file2.txt",
    "file3.txt",
    "golden_file1.txt",
    "golden_file2.txt",
];

#[derive(Debug, Clone)]
pub struct FixtureOptions {
    pub base_dir: PathBuf,
    pub golden_list_file: PathBuf,
    pub names: Vec<String>,
    pub extra_files: usize,
    pub subdirs: usize,
}

impl FixtureOptions {
    pub fn new(base_dir: impl Into<PathBuf>, golden_list_file: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            golden_list_file: golden_list_file.into(),
            names: DEFAULT_FIXTURE_NAMES.iter().map(|s| s.to_string()).collect(),
            extra_files: 5,
            subdirs: 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixtureResult {
    /// Files named in the golden list
    pub golden_files: Vec<PathBuf>,
    /// Files the golden list does not mention
    pub extra_files: Vec<PathBuf>,
    pub golden_list_file: PathBuf,
}

/// Create a fixture tree and its golden list.
///
/// Golden names are placed round-robin over the base directory and its
/// `subdir_N` children so placement is reproducible.
pub fn create_fixture(options: &FixtureOptions) -> Result<FixtureResult, FixtureError> {
    for name in &options.names {
        if !is_bare_name(name) {
            return Err(FixtureError::InvalidName(name.clone()));
        }
    }

    let mut dirs = vec![options.base_dir.clone()];
    dirs.extend((0..options.subdirs).map(|i| options.base_dir.join(format!("subdir_{}", i))));
    let golden_paths: Vec<PathBuf> = options
        .names
        .iter()
        .enumerate()
        .map(|(i, name)| dirs[i % dirs.len()].join(name))
        .collect();

    // Nothing is created unless every golden path is free
    let taken = std::iter::once(&options.golden_list_file)
        .chain(&golden_paths)
        .find(|path| path.symlink_metadata().is_ok());
    if let Some(path) = taken {
        return Err(FixtureError::AlreadyExists(path.clone()));
    }

    for dir in &dirs {
        fs::create_dir_all(dir)?;
    }

    let mut result = FixtureResult {
        golden_list_file: options.golden_list_file.clone(),
        ..Default::default()
    };

    for (i, path) in golden_paths.into_iter().enumerate() {
        write_new(&path, &format!("This is file {} from the golden list.\n", i))?;
        result.golden_files.push(path);
    }

    let golden: HashSet<&str> = options.names.iter().map(String::as_str).collect();
    for i in 0..options.extra_files {
        let name = loop {
            let candidate = format!("{}.txt", &Uuid::new_v4().simple().to_string()[..8]);
            if !golden.contains(candidate.as_str()) {
                break candidate;
            }
        };
        let path = dirs[i % dirs.len()].join(name);
        write_new(&path, &format!("This is extra random file {}.\n", i))?;
        result.extra_files.push(path);
    }

    let mut listing = options.names.join("\n");
    listing.push('\n');
    write_new(&options.golden_list_file, &listing)?;

    info!(
        base_dir = %options.base_dir.display(),
        golden = result.golden_files.len(),
        extra = result.extra_files.len(),
        "Fixture created"
    );

    Ok(result)
}

fn is_bare_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && Path::new(name).file_name().map(|n| n == name).unwrap_or(false)
}

fn write_new(path: &Path, content: &str) -> Result<(), FixtureError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| match err.kind() {
            std::io::ErrorKind::AlreadyExists => FixtureError::AlreadyExists(path.to_path_buf()),
            _ => FixtureError::IoError(err),
        })?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
