pub mod check;
pub mod config;
pub mod fixture;
pub mod golden;
pub mod reconciliation;
pub mod report;
pub mod scan;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use check::{run_check, CheckError, CheckOptions, CheckOutcome, CheckReports};
pub use config::{read_config, AxisSets, ConfigError, QosCheckConfig, DEFAULT_MODES};
pub use fixture::{create_fixture, FixtureError, FixtureOptions, FixtureResult};
pub use golden::{load_golden_list, GoldenList, GoldenListError};
pub use reconciliation::{reconcile, Reconciliation};
pub use report::{ReportError, ReportFormat, ReportWriter};
pub use scan::{scan_directory, ActualFiles, ScanError, ScanOptions};
pub use template::{expand, ExpectedNames, Placeholder, TemplateError};
