//! One end-to-end golden-list check.
//!
//! Inputs are validated up front; the expected and actual name sets are both
//! computed in full before anything is compared or written.

use crate::config::{read_config, ConfigError, QosCheckConfig};
use crate::golden::{load_golden_list, GoldenListError};
use crate::reconciliation::{reconcile, Reconciliation};
use crate::report::{
    ExpandedListReport, FileListReport, ReconciliationReport, ReportEngine, ReportError,
    ReportFormat, ReportHeader, ReportWriter,
};
use crate::scan::{scan_directory, ScanError, ScanOptions};
use crate::template::{expand, TemplateError};
use chrono::Utc;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Golden list not found: {0}")]
    GoldenListNotFound(PathBuf),

    #[error(transparent)]
    MalformedTemplate(#[from] TemplateError),

    #[error(transparent)]
    ReportWrite(#[from] ReportError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Golden list error: {0}")]
    GoldenList(GoldenListError),

    #[error("Scan error: {0}")]
    Scan(ScanError),
}

impl From<ScanError> for CheckError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::DirectoryNotFound(path) => CheckError::DirectoryNotFound(path),
            other => CheckError::Scan(other),
        }
    }
}

impl From<GoldenListError> for CheckError {
    fn from(err: GoldenListError) -> Self {
        match err {
            GoldenListError::NotFound(path) => CheckError::GoldenListNotFound(path),
            other => CheckError::GoldenList(other),
        }
    }
}

/// Options for a check run
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub block_name: String,
    pub target_dir: PathBuf,
    pub golden_list: PathBuf,
    /// Unioned into the configured mode set
    pub extra_modes: Vec<String>,
    pub config_path: Option<PathBuf>,
    /// List resolved paths under matched and extra entries
    pub annotate_paths: bool,
    pub output_dir: PathBuf,
    pub timestamp: bool,
    pub format: ReportFormat,
    pub report_template: Option<PathBuf>,
}

/// Paths of the reports a check wrote
#[derive(Debug, Clone)]
pub struct CheckReports {
    pub reconciliation: PathBuf,
    pub file_list: PathBuf,
    pub expanded_list: PathBuf,
}

/// Result of a check run
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub reconciliation: Reconciliation,
    pub files_scanned: usize,
    pub reports: CheckReports,
}

/// Load the axis configuration, falling back to the built-in defaults
pub fn load_config(config_path: Option<&Path>) -> Result<QosCheckConfig, ConfigError> {
    match config_path {
        Some(path) => read_config(path),
        None => Ok(QosCheckConfig::default()),
    }
}

/// Build a report writer for the requested output settings
pub fn report_writer(
    output_dir: &Path,
    format: ReportFormat,
    timestamp: bool,
    report_template: Option<&Path>,
) -> Result<ReportWriter, ReportError> {
    let mut writer = ReportWriter::new(output_dir).with_format(format);
    if timestamp {
        writer = writer.with_timestamp(Utc::now());
    }
    if let Some(path) = report_template {
        writer = writer.with_reconciliation_template(ReportEngine::load_template(path)?)?;
    }
    Ok(writer)
}

/// Run a full check: scan, expand, reconcile and write all reports
pub fn run_check(options: &CheckOptions) -> Result<CheckOutcome, CheckError> {
    if !options.target_dir.is_dir() {
        return Err(CheckError::DirectoryNotFound(options.target_dir.clone()));
    }
    let golden = load_golden_list(&options.golden_list)?;

    let config = load_config(options.config_path.as_deref())?;
    let axes = config
        .axis_sets()?
        .with_extra_modes(&options.extra_modes)?;
    let writer = report_writer(
        &options.output_dir,
        options.format,
        options.timestamp,
        options.report_template.as_deref(),
    )?;

    let expected = expand(&golden.lines, &options.block_name, &axes)?;
    info!(
        block = %options.block_name,
        expected = expected.len(),
        modes = axes.modes().len(),
        "Expanded golden list"
    );

    let scan_options = ScanOptions {
        excluded_dirs: config.excluded_dirs(),
        ..Default::default()
    }
    .with_report_dir(&options.output_dir);
    let actual = scan_directory(&options.target_dir, &scan_options)?;

    let reconciliation = reconcile(&expected, &actual.names());
    info!(
        matched = reconciliation.matched.len(),
        missing = reconciliation.missing.len(),
        extra = reconciliation.extra.len(),
        "Reconciled golden list against directory"
    );

    let header = ReportHeader {
        generated_at: Utc::now(),
        block_name: options.block_name.clone(),
        target_dir: actual.root().to_string_lossy().into_owned(),
        golden_list: golden.path.to_string_lossy().into_owned(),
        golden_fingerprint: golden.fingerprint.clone(),
    };

    let reports = CheckReports {
        file_list: writer.write_file_list(&FileListReport::build(header.generated_at, &actual))?,
        expanded_list: writer.write_expanded_list(&ExpandedListReport::build(&header, &expected))?,
        reconciliation: writer.write_reconciliation(&ReconciliationReport::build(
            header,
            &reconciliation,
            &actual,
            options.annotate_paths,
        ))?,
    };

    Ok(CheckOutcome {
        files_scanned: actual.file_count(),
        reconciliation,
        reports,
    })
}
