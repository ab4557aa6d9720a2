mod hash;

pub use hash::compute_hash;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// A label that can appear inside a bare file name
static NAME_FRAGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s/\\<>]+$").expect("name fragment pattern should compile"));

/// True when `label` is non-empty and free of whitespace, `/`, `\`, `<` and `>`
pub fn is_name_fragment(label: &str) -> bool {
    NAME_FRAGMENT_RE.is_match(label)
}

/// Suffix appended to report names when timestamped output is requested
pub fn timestamp_suffix(at: &DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// Build a report file name such as `directory_file_list_20240102_030405.txt`
pub fn report_file_name(stem: &str, extension: &str, timestamp: Option<&DateTime<Utc>>) -> String {
    match timestamp {
        Some(at) => format!("{}_{}.{}", stem, timestamp_suffix(at), extension),
        None => format!("{}.{}", stem, extension),
    }
}
