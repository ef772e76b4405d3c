//! The retention manager: primary discovery, the retention sweep, and the
//! secondary index rebuild sweep.
//!
//! Execution is strictly sequential with at most one open session at a time.
//! Per-collection driver failures are logged and aggregated into the report;
//! only discovery failures (no primary / no secondary) are fatal.

pub mod report;

use chrono::{NaiveDate, Utc};
use tracing::{debug, error, info};

use crate::cluster::{Probe, probe_host};
use crate::config::ClusterConfig;
use crate::driver::{NodeConnector, NodeSession};
use crate::error::SweepError;
use crate::retention::{CollectionSweepResult, RetentionPolicy};

pub use report::{CollectionFailure, HostRebuildSummary, RebuildReport, RetentionReport};

pub struct RetentionManager {
    config: ClusterConfig,
    connector: Box<dyn NodeConnector>,
}

impl RetentionManager {
    pub fn new(config: ClusterConfig, connector: Box<dyn NodeConnector>) -> Self {
        Self { config, connector }
    }

    /// Ordered scan of the configured endpoints, returning a session to the
    /// first host that reports itself primary. Secondaries are closed before
    /// the next probe; unreachable hosts were never opened.
    async fn find_primary(&self) -> Result<Box<dyn NodeSession>, SweepError> {
        for endpoint in self.config.endpoints() {
            match probe_host(self.connector.as_ref(), endpoint).await {
                Probe::Primary(session) => {
                    info!(
                        host = %endpoint,
                        user = self.config.username(),
                        "successfully connected to primary"
                    );
                    return Ok(session);
                }
                Probe::Secondary(session) => {
                    debug!(host = %endpoint, "not primary, trying next host");
                    session.close().await;
                }
                Probe::Unreachable => {}
            }
        }
        error!("primary server not found");
        Err(SweepError::PrimaryNotFound)
    }

    /// Delete aged documents from every collection in the target database,
    /// executed against the primary.
    pub async fn sweep_retention(
        &self,
        policy: &RetentionPolicy,
    ) -> Result<RetentionReport, SweepError> {
        self.sweep_retention_as_of(policy, Utc::now().date_naive())
            .await
    }

    /// Same as [`sweep_retention`](Self::sweep_retention) with an explicit
    /// "today", so cutoff behavior is deterministic under test.
    pub async fn sweep_retention_as_of(
        &self,
        policy: &RetentionPolicy,
        today: NaiveDate,
    ) -> Result<RetentionReport, SweepError> {
        let cutoff_date = policy.cutoff_date(today)?;
        let cutoff_millis = policy.cutoff_epoch_millis(today)?;

        let session = self.find_primary().await?;
        info!(
            months = policy.months(),
            cutoff = %cutoff_date,
            "removing documents older than cutoff"
        );

        let mut report = RetentionReport {
            primary: session.endpoint().to_string(),
            cutoff_date,
            cutoff_millis,
            collections: Vec::new(),
            failures: Vec::new(),
        };

        // Enumeration failure aborts: with no names there is nothing to
        // continue with.
        let names = match session.collection_names().await {
            Ok(names) => names,
            Err(e) => {
                session.close().await;
                return Err(SweepError::Other(e));
            }
        };

        for collection in names {
            match sweep_collection(session.as_ref(), &collection, cutoff_millis).await {
                Ok(result) => report.collections.push(result),
                Err(e) => {
                    error!(collection = %collection, error = %e, "collection sweep failed");
                    report.failures.push(CollectionFailure {
                        host: session.endpoint().to_string(),
                        collection: Some(collection),
                        error: e.to_string(),
                    });
                }
            }
        }

        session.close().await;
        Ok(report)
    }

    /// Rebuild indexes on every collection of every reachable non-primary
    /// member. Primaries are skipped to keep the rebuild load off the
    /// writable member.
    pub async fn sweep_index_rebuild(&self) -> Result<RebuildReport, SweepError> {
        let mut report = RebuildReport::default();
        let mut secondary_found = false;

        for endpoint in self.config.endpoints() {
            let session = match probe_host(self.connector.as_ref(), endpoint).await {
                Probe::Primary(session) => {
                    debug!(host = %endpoint, "primary, skipping for rebuild");
                    session.close().await;
                    continue;
                }
                Probe::Secondary(session) => session,
                Probe::Unreachable => continue,
            };

            secondary_found = true;
            info!(host = %endpoint, "rebuilding indexes on secondary");

            let rebuilt = self.rebuild_host(session.as_ref(), &mut report).await;
            report.hosts.push(HostRebuildSummary {
                endpoint: endpoint.clone(),
                collections_rebuilt: rebuilt,
            });
            session.close().await;
        }

        if !secondary_found {
            error!("secondary server not found");
            return Err(SweepError::SecondaryNotFound);
        }
        Ok(report)
    }

    /// Rebuild every collection on one secondary; returns how many rebuilt.
    async fn rebuild_host(&self, session: &dyn NodeSession, report: &mut RebuildReport) -> usize {
        let endpoint = session.endpoint();
        let names = match session.collection_names().await {
            Ok(names) => names,
            Err(e) => {
                error!(host = %endpoint, error = %e, "listing collections failed");
                report.failures.push(CollectionFailure {
                    host: endpoint.to_string(),
                    collection: None,
                    error: e.to_string(),
                });
                return 0;
            }
        };

        let mut rebuilt = 0;
        for collection in names {
            match rebuild_collection(session, &collection).await {
                Ok(()) => {
                    info!(host = %endpoint, collection = %collection, "indexes rebuilt");
                    rebuilt += 1;
                }
                Err(e) => {
                    error!(
                        host = %endpoint,
                        collection = %collection,
                        error = %e,
                        "index rebuild failed"
                    );
                    report.failures.push(CollectionFailure {
                        host: endpoint.to_string(),
                        collection: Some(collection),
                        error: e.to_string(),
                    });
                }
            }
        }
        rebuilt
    }
}

/// Count, delete, then re-count one collection. The remaining count is a
/// deliberate second query rather than `total − removed`, so the report is
/// accurate under concurrent writes.
async fn sweep_collection(
    session: &dyn NodeSession,
    collection: &str,
    cutoff_millis: i64,
) -> anyhow::Result<CollectionSweepResult> {
    let total = session.count_documents(collection).await?;
    let matched = session.count_older_than(collection, cutoff_millis).await?;
    info!(
        collection = %collection,
        total,
        to_remove = matched,
        "collection scan"
    );

    let removed = session.delete_older_than(collection, cutoff_millis).await?;
    let remaining = session.count_documents(collection).await?;
    info!(collection = %collection, removed, remaining, "documents removed");

    Ok(CollectionSweepResult {
        collection: collection.to_string(),
        total,
        matched,
        removed,
        remaining,
    })
}

async fn rebuild_collection(session: &dyn NodeSession, collection: &str) -> anyhow::Result<()> {
    let indexes = session.index_names(collection).await?;
    for index in &indexes {
        debug!(collection = %collection, index = %index, "index before rebuild");
    }
    session.rebuild_indexes(collection).await
}
