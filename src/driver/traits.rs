use anyhow::Result;

use crate::error::ConnectError;

/// Opens sessions against individual replica-set members.
#[async_trait::async_trait]
pub trait NodeConnector: Send + Sync {
    /// Open a session to one `host:port` endpoint and verify it with a
    /// round trip, so transport and auth failures surface here rather than
    /// on the first sweep operation.
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn NodeSession>, ConnectError>;
}

/// An open session to one replica-set member, scoped to the target database.
///
/// Returned by [`NodeConnector::connect`] and passed explicitly through the
/// sweeps — there is no hidden shared connection state. Callers close the
/// current session before opening the next, so at most one is open at a time.
#[async_trait::async_trait]
pub trait NodeSession: Send + Sync {
    /// The `host:port` this session is bound to.
    fn endpoint(&self) -> &str;

    /// Whether this member currently reports itself as the writable primary.
    async fn is_primary(&self) -> Result<bool>;

    /// Collection names in the target database. Server order is not
    /// guaranteed and not relied upon.
    async fn collection_names(&self) -> Result<Vec<String>>;

    /// Total document count.
    async fn count_documents(&self, collection: &str) -> Result<u64>;

    /// Documents with `timestamp < cutoff_millis`. Documents without a
    /// `timestamp` field never match.
    async fn count_older_than(&self, collection: &str, cutoff_millis: i64) -> Result<u64>;

    /// Delete documents with `timestamp < cutoff_millis`; returns the number
    /// deleted.
    async fn delete_older_than(&self, collection: &str, cutoff_millis: i64) -> Result<u64>;

    /// Index names on a collection, for debug-level reporting before a
    /// rebuild.
    async fn index_names(&self, collection: &str) -> Result<Vec<String>>;

    /// Issue a full index rebuild for one collection.
    async fn rebuild_indexes(&self, collection: &str) -> Result<()>;

    /// Close the session. Idempotent: closing twice is a no-op.
    async fn close(&self);
}
