use chrono::NaiveDate;

use crate::retention::CollectionSweepResult;

/// One failure the sweep worked past; surfaced in the final summary.
///
/// `collection` is `None` for host-level failures (collection enumeration),
/// `Some` when a single collection's operations failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionFailure {
    pub host: String,
    pub collection: Option<String>,
    pub error: String,
}

/// Aggregated outcome of a retention sweep against the primary.
#[derive(Debug, Clone)]
pub struct RetentionReport {
    pub primary: String,
    pub cutoff_date: NaiveDate,
    pub cutoff_millis: i64,
    pub collections: Vec<CollectionSweepResult>,
    pub failures: Vec<CollectionFailure>,
}

impl RetentionReport {
    pub fn total_removed(&self) -> u64 {
        self.collections.iter().map(|c| c.removed).sum()
    }
}

/// Per-secondary outcome of an index rebuild sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRebuildSummary {
    pub endpoint: String,
    pub collections_rebuilt: usize,
}

/// Aggregated outcome of an index rebuild sweep across all secondaries.
#[derive(Debug, Clone, Default)]
pub struct RebuildReport {
    pub hosts: Vec<HostRebuildSummary>,
    pub failures: Vec<CollectionFailure>,
}
