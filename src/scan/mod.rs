use crate::config::DEFAULT_EXCLUDED_DIRS;
use crate::report::is_report_file_name;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Options controlling which entries the scanner visits
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directory names never descended into (in addition to hidden ones)
    pub excluded_dirs: BTreeSet<String>,
    /// Directory this tool writes its reports into. Report files found
    /// directly inside it are not artifacts and are skipped; anything else
    /// there is scanned as usual.
    pub report_dir: Option<PathBuf>,
}

impl ScanOptions {
    /// Skip earlier reports written to `output_dir`, if it exists
    pub fn with_report_dir(mut self, output_dir: &Path) -> Self {
        self.report_dir = output_dir.canonicalize().ok();
        self
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            report_dir: None,
        }
    }
}

/// Files found on disk, keyed by base name.
///
/// A base name may occur in several directories; every location is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActualFiles {
    root: PathBuf,
    by_name: BTreeMap<String, Vec<PathBuf>>,
}

impl ActualFiles {
    /// The absolute root that was scanned
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The actual name set used for reconciliation
    pub fn names(&self) -> BTreeSet<String> {
        self.by_name.keys().cloned().collect()
    }

    /// Every location a base name was found at, sorted
    pub fn paths_for(&self, name: &str) -> &[PathBuf] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every discovered file path, sorted
    pub fn all_paths(&self) -> Vec<&PathBuf> {
        let mut paths: Vec<&PathBuf> = self.by_name.values().flatten().collect();
        paths.sort();
        paths
    }

    /// Number of distinct base names
    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }

    /// Number of files, counting duplicates of a base name separately
    pub fn file_count(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn insert(&mut self, name: String, path: PathBuf) {
        let paths = self.by_name.entry(name).or_default();
        paths.push(path);
        paths.sort();
    }
}

/// Recursively collect every non-hidden file under `root`.
///
/// Hidden directories and excluded directory names are pruned entirely.
/// Entries that cannot be read are logged and skipped.
pub fn scan_directory(root: &Path, options: &ScanOptions) -> Result<ActualFiles, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::DirectoryNotFound(root.to_path_buf()));
    }

    let root = root.canonicalize()?;
    let mut files = ActualFiles {
        root: root.clone(),
        by_name: BTreeMap::new(),
    };

    let walker = WalkDir::new(&root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry, options));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };

        if !is_regular_file(&entry) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        debug!(path = %entry.path().display(), "Found file");
        files.insert(name, entry.into_path());
    }

    info!(
        root = %root.display(),
        files = files.file_count(),
        names = files.name_count(),
        "Scanned directory"
    );

    Ok(files)
}

fn is_pruned(entry: &DirEntry, options: &ScanOptions) -> bool {
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    if entry.file_type().is_dir() {
        return options.excluded_dirs.contains(name.as_ref());
    }
    is_report_file_name(&name)
        && options
            .report_dir
            .as_deref()
            .is_some_and(|dir| entry.path().parent() == Some(dir))
}

fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}
