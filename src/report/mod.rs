mod engine;
mod templates;
mod types;
mod writer;

pub use engine::{ReportEngine, ReportError};
pub use templates::{EXPANDED_LIST_TEMPLATE, FILE_LIST_TEMPLATE, RECONCILIATION_TEMPLATE};
pub use types::{
    ExpandedListReport, FileListReport, ReconciliationReport, ReportCounts, ReportEntry,
    ReportFormat, ReportHeader,
};
pub use writer::write_report;

use crate::utils::report_file_name;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

pub const RECONCILIATION_STEM: &str = "reconciliation_report";
pub const FILE_LIST_STEM: &str = "directory_file_list";
pub const EXPANDED_LIST_STEM: &str = "updated_golden_list";

static REPORT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^({}|{}|{})(_\d{{8}}_\d{{6}})?\.(txt|json)$",
        RECONCILIATION_STEM, FILE_LIST_STEM, EXPANDED_LIST_STEM
    ))
    .expect("report name pattern should compile")
});

/// True for any name a `ReportWriter` produces, timestamped or not
pub fn is_report_file_name(name: &str) -> bool {
    REPORT_NAME_RE.is_match(name)
}

/// Renders and writes the reports of a run into one output directory
pub struct ReportWriter {
    engine: ReportEngine,
    output_dir: PathBuf,
    timestamp: Option<DateTime<Utc>>,
    format: ReportFormat,
    reconciliation_template: Option<String>,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine: ReportEngine::new(),
            output_dir: output_dir.into(),
            timestamp: None,
            format: ReportFormat::default(),
            reconciliation_template: None,
        }
    }

    /// Suffix every report name with this timestamp
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Replace the built-in reconciliation report layout.
    ///
    /// JSON reports are serialized directly, so a template is refused unless
    /// the format is text.
    pub fn with_reconciliation_template(mut self, template: String) -> Result<Self, ReportError> {
        if self.format != ReportFormat::Text {
            return Err(ReportError::TemplateFormatMismatch(self.format.extension()));
        }
        self.reconciliation_template = Some(template);
        Ok(self)
    }

    /// Where the report with this stem will be written
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.output_dir.join(report_file_name(
            stem,
            self.format.extension(),
            self.timestamp.as_ref(),
        ))
    }

    pub fn write_reconciliation(&self, report: &ReconciliationReport) -> Result<PathBuf, ReportError> {
        if self.reconciliation_template.is_some() && self.format != ReportFormat::Text {
            return Err(ReportError::TemplateFormatMismatch(self.format.extension()));
        }
        let template = self
            .reconciliation_template
            .as_deref()
            .unwrap_or(RECONCILIATION_TEMPLATE);
        self.write(RECONCILIATION_STEM, template, report)
    }

    pub fn write_file_list(&self, report: &FileListReport) -> Result<PathBuf, ReportError> {
        self.write(FILE_LIST_STEM, FILE_LIST_TEMPLATE, report)
    }

    pub fn write_expanded_list(&self, report: &ExpandedListReport) -> Result<PathBuf, ReportError> {
        self.write(EXPANDED_LIST_STEM, EXPANDED_LIST_TEMPLATE, report)
    }

    fn write<T: Serialize>(&self, stem: &str, template: &str, report: &T) -> Result<PathBuf, ReportError> {
        let content = match self.format {
            ReportFormat::Text => self.engine.render(template, report)?,
            ReportFormat::Json => {
                let mut json = serde_json::to_string_pretty(report)?;
                json.push('\n');
                json
            }
        };

        let path = self.path_for(stem);
        write_report(&path, &content)?;
        info!(path = %path.display(), "Report written");
        Ok(path)
    }
}
