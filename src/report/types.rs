use crate::reconciliation::Reconciliation;
use crate::scan::ActualFiles;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Output format for every report a run writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

/// Provenance printed at the top of the reconciliation and golden-list reports
#[derive(Debug, Clone, Serialize)]
pub struct ReportHeader {
    pub generated_at: DateTime<Utc>,
    pub block_name: String,
    pub target_dir: String,
    pub golden_list: String,
    pub golden_fingerprint: String,
}

/// One name in a report section, with the paths it resolved to when annotated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportCounts {
    pub expected: usize,
    pub actual: usize,
    pub files_scanned: usize,
    pub matched: usize,
    pub missing: usize,
    pub extra: usize,
}

/// Context for the reconciliation report.
/// Placeholders: {{title}}, {{generated_at}}, {{block_name}}, {{target_dir}},
/// {{golden_list}}, {{golden_fingerprint}}, {{annotate_paths}}, {{counts.*}},
/// {{matched}}, {{missing}}, {{extra}}
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    pub title: String,
    #[serde(flatten)]
    pub header: ReportHeader,
    pub annotate_paths: bool,
    pub counts: ReportCounts,
    pub matched: Vec<ReportEntry>,
    pub missing: Vec<ReportEntry>,
    pub extra: Vec<ReportEntry>,
}

impl ReconciliationReport {
    pub fn build(
        header: ReportHeader,
        result: &Reconciliation,
        actual: &ActualFiles,
        annotate_paths: bool,
    ) -> Self {
        // Missing names have nothing on disk to resolve to
        let entries = |names: &BTreeSet<String>, resolve: bool| -> Vec<ReportEntry> {
            names
                .iter()
                .map(|name| ReportEntry {
                    name: name.clone(),
                    paths: if resolve {
                        actual.paths_for(name).iter().map(|p| display(p)).collect()
                    } else {
                        Vec::new()
                    },
                })
                .collect()
        };

        Self {
            title: "Golden List Reconciliation Report".to_string(),
            header,
            annotate_paths,
            counts: ReportCounts {
                expected: result.expected_count(),
                actual: result.actual_count(),
                files_scanned: actual.file_count(),
                matched: result.matched.len(),
                missing: result.missing.len(),
                extra: result.extra.len(),
            },
            matched: entries(&result.matched, annotate_paths),
            missing: entries(&result.missing, false),
            extra: entries(&result.extra, annotate_paths),
        }
    }
}

/// Context for the directory file list.
/// Placeholders: {{title}}, {{generated_at}}, {{root}}, {{count}}, {{paths}}
#[derive(Debug, Clone, Serialize)]
pub struct FileListReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub count: usize,
    pub paths: Vec<String>,
}

impl FileListReport {
    pub fn build(generated_at: DateTime<Utc>, actual: &ActualFiles) -> Self {
        let paths: Vec<String> = actual.all_paths().into_iter().map(|p| display(p)).collect();
        Self {
            title: "Directory File List Report".to_string(),
            generated_at,
            root: display(actual.root()),
            count: paths.len(),
            paths,
        }
    }
}

/// Context for the expanded golden list.
/// Placeholders: {{title}}, {{generated_at}}, {{block_name}}, {{golden_list}},
/// {{golden_fingerprint}}, {{count}}, {{names}}
#[derive(Debug, Clone, Serialize)]
pub struct ExpandedListReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub block_name: String,
    pub golden_list: String,
    pub golden_fingerprint: String,
    pub count: usize,
    pub names: Vec<String>,
}

impl ExpandedListReport {
    pub fn build(header: &ReportHeader, expected: &BTreeSet<String>) -> Self {
        Self {
            title: "Updated Golden List".to_string(),
            generated_at: header.generated_at,
            block_name: header.block_name.clone(),
            golden_list: header.golden_list.clone(),
            golden_fingerprint: header.golden_fingerprint.clone(),
            count: expected.len(),
            names: expected.iter().cloned().collect(),
        }
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
