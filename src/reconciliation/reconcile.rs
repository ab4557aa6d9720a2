use serde::Serialize;
use std::collections::BTreeSet;

/// Outcome of comparing expected names against names found on disk.
///
/// The three sets are disjoint: `matched ∪ missing` is the expected set and
/// `matched ∪ extra` is the actual set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Expected and present on disk
    pub matched: BTreeSet<String>,

    /// Expected but not present on disk
    pub missing: BTreeSet<String>,

    /// Present on disk but not expected
    pub extra: BTreeSet<String>,
}

impl Reconciliation {
    /// True when disk and golden list agree exactly
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }

    pub fn expected_count(&self) -> usize {
        self.matched.len() + self.missing.len()
    }

    pub fn actual_count(&self) -> usize {
        self.matched.len() + self.extra.len()
    }
}

/// Classify every name as matched, missing or extra.
///
/// Both inputs must already be bare file names.
pub fn reconcile(expected: &BTreeSet<String>, actual: &BTreeSet<String>) -> Reconciliation {
    Reconciliation {
        matched: expected.intersection(actual).cloned().collect(),
        missing: expected.difference(actual).cloned().collect(),
        extra: actual.difference(expected).cloned().collect(),
    }
}
