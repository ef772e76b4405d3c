//! Replica-set role probing.
//!
//! A host is probed by opening a session and asking for its role; connect
//! and role-query failures are soft, mapping the host to `Unreachable` so
//! the caller's ordered scan moves on to the next endpoint.

use tracing::{error, warn};

use crate::driver::{NodeConnector, NodeSession};

/// Probe outcome: the host's replica-set role, carrying the open session for
/// reachable hosts.
///
/// The caller owns the session and must close it when rejecting the host,
/// preserving the one-open-session invariant across the scan.
pub enum Probe {
    Primary(Box<dyn NodeSession>),
    Secondary(Box<dyn NodeSession>),
    Unreachable,
}

/// Connect to one endpoint and classify its replica-set role.
pub async fn probe_host(connector: &dyn NodeConnector, endpoint: &str) -> Probe {
    let session = match connector.connect(endpoint).await {
        Ok(session) => session,
        Err(e) => {
            error!(host = %endpoint, error = %e, "error in MongoDB connection");
            return Probe::Unreachable;
        }
    };

    match session.is_primary().await {
        Ok(true) => Probe::Primary(session),
        Ok(false) => Probe::Secondary(session),
        Err(e) => {
            warn!(host = %endpoint, error = %e, "role query failed");
            session.close().await;
            Probe::Unreachable
        }
    }
}
