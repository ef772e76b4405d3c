#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, anyhow};

use mongosweep::driver::{NodeConnector, NodeSession};
use mongosweep::error::ConnectError;

/// In-memory replica set: deterministic stand-in for the MongoDB driver
/// behind the `NodeConnector` / `NodeSession` seam. Tracks connect order and
/// concurrently-open sessions so invariants can be asserted after a sweep.
#[derive(Clone, Default)]
pub struct MockCluster {
    inner: Arc<Mutex<ClusterState>>,
}

#[derive(Default)]
struct ClusterState {
    hosts: BTreeMap<String, MockHost>,
    connect_attempts: Vec<String>,
    open_sessions: usize,
    max_open_sessions: usize,
}

#[derive(Default)]
struct MockHost {
    primary: bool,
    reachable: bool,
    fail_listing: bool,
    collections: BTreeMap<String, MockCollection>,
}

#[derive(Default)]
struct MockCollection {
    /// One entry per document; `None` models a document without a
    /// `timestamp` field.
    timestamps: Vec<Option<i64>>,
    indexes: Vec<String>,
    rebuilds: usize,
    fail_ops: bool,
}

impl MockCluster {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ClusterState> {
        self.inner.lock().unwrap()
    }

    // ── Setup ───────────────────────────────────────────────────────────

    pub fn add_host(&self, endpoint: &str, primary: bool) {
        self.lock().hosts.insert(
            endpoint.to_string(),
            MockHost {
                primary,
                reachable: true,
                ..MockHost::default()
            },
        );
    }

    pub fn add_unreachable(&self, endpoint: &str) {
        self.lock().hosts.insert(
            endpoint.to_string(),
            MockHost {
                reachable: false,
                ..MockHost::default()
            },
        );
    }

    pub fn seed_collection(&self, endpoint: &str, collection: &str, timestamps: &[i64]) {
        let mut state = self.lock();
        let coll = state.collection_mut(endpoint, collection);
        coll.timestamps
            .extend(timestamps.iter().copied().map(Some));
        coll.indexes = vec!["_id_".to_string(), "timestamp_1".to_string()];
    }

    pub fn seed_untimestamped(&self, endpoint: &str, collection: &str, documents: usize) {
        let mut state = self.lock();
        let coll = state.collection_mut(endpoint, collection);
        coll.timestamps.extend(std::iter::repeat_n(None, documents));
    }

    /// All driver operations on this collection fail from now on.
    pub fn fail_collection(&self, endpoint: &str, collection: &str) {
        self.lock().collection_mut(endpoint, collection).fail_ops = true;
    }

    /// Collection-name enumeration on this host fails from now on.
    pub fn fail_collection_listing(&self, endpoint: &str) {
        self.lock()
            .hosts
            .get_mut(endpoint)
            .unwrap_or_else(|| panic!("unknown host {endpoint}"))
            .fail_listing = true;
    }

    pub fn connector(&self) -> Box<dyn NodeConnector> {
        Box::new(MockConnector {
            cluster: self.clone(),
        })
    }

    // ── Assertions ──────────────────────────────────────────────────────

    pub fn connect_attempts(&self) -> Vec<String> {
        self.lock().connect_attempts.clone()
    }

    pub fn open_sessions(&self) -> usize {
        self.lock().open_sessions
    }

    pub fn max_open_sessions(&self) -> usize {
        self.lock().max_open_sessions
    }

    pub fn document_count(&self, endpoint: &str, collection: &str) -> usize {
        self.lock().collection_mut(endpoint, collection).timestamps.len()
    }

    pub fn timestamps(&self, endpoint: &str, collection: &str) -> Vec<Option<i64>> {
        self.lock()
            .collection_mut(endpoint, collection)
            .timestamps
            .clone()
    }

    pub fn rebuild_count(&self, endpoint: &str, collection: &str) -> usize {
        self.lock().collection_mut(endpoint, collection).rebuilds
    }
}

impl ClusterState {
    fn collection_mut(&mut self, endpoint: &str, collection: &str) -> &mut MockCollection {
        self.hosts
            .get_mut(endpoint)
            .unwrap_or_else(|| panic!("unknown host {endpoint}"))
            .collections
            .entry(collection.to_string())
            .or_default()
    }
}

// ─── Connector / session ─────────────────────────────────────────────────────

struct MockConnector {
    cluster: MockCluster,
}

#[async_trait::async_trait]
impl NodeConnector for MockConnector {
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn NodeSession>, ConnectError> {
        let mut state = self.cluster.lock();
        state.connect_attempts.push(endpoint.to_string());

        let reachable = state.hosts.get(endpoint).is_some_and(|h| h.reachable);
        if !reachable {
            return Err(ConnectError::new(endpoint, "connection refused"));
        }

        state.open_sessions += 1;
        state.max_open_sessions = state.max_open_sessions.max(state.open_sessions);
        drop(state);

        Ok(Box::new(MockSession {
            cluster: self.cluster.clone(),
            endpoint: endpoint.to_string(),
            closed: AtomicBool::new(false),
        }))
    }
}

struct MockSession {
    cluster: MockCluster,
    endpoint: String,
    closed: AtomicBool,
}

impl MockSession {
    fn with_collection<T>(
        &self,
        collection: &str,
        f: impl FnOnce(&mut MockCollection) -> T,
    ) -> Result<T> {
        let mut state = self.cluster.lock();
        let coll = state.collection_mut(&self.endpoint, collection);
        if coll.fail_ops {
            return Err(anyhow!("operation on {collection} failed"));
        }
        Ok(f(coll))
    }
}

#[async_trait::async_trait]
impl NodeSession for MockSession {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn is_primary(&self) -> Result<bool> {
        let state = self.cluster.lock();
        Ok(state.hosts[&self.endpoint].primary)
    }

    async fn collection_names(&self) -> Result<Vec<String>> {
        let state = self.cluster.lock();
        let host = &state.hosts[&self.endpoint];
        if host.fail_listing {
            return Err(anyhow!("listing collections on {} failed", self.endpoint));
        }
        Ok(host.collections.keys().cloned().collect())
    }

    async fn count_documents(&self, collection: &str) -> Result<u64> {
        self.with_collection(collection, |c| c.timestamps.len() as u64)
    }

    async fn count_older_than(&self, collection: &str, cutoff_millis: i64) -> Result<u64> {
        self.with_collection(collection, |c| {
            c.timestamps
                .iter()
                .filter(|ts| ts.is_some_and(|t| t < cutoff_millis))
                .count() as u64
        })
    }

    async fn delete_older_than(&self, collection: &str, cutoff_millis: i64) -> Result<u64> {
        self.with_collection(collection, |c| {
            let before = c.timestamps.len();
            c.timestamps
                .retain(|ts| !ts.is_some_and(|t| t < cutoff_millis));
            (before - c.timestamps.len()) as u64
        })
    }

    async fn index_names(&self, collection: &str) -> Result<Vec<String>> {
        self.with_collection(collection, |c| c.indexes.clone())
    }

    async fn rebuild_indexes(&self, collection: &str) -> Result<()> {
        self.with_collection(collection, |c| c.rebuilds += 1)
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.cluster.lock().open_sessions -= 1;
    }
}
