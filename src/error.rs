use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `mongosweep`.
///
/// Sweep-level failures are the only fatal conditions. Per-host connection
/// failures are soft (the host scan moves on) and per-collection driver
/// failures are aggregated into the sweep report instead of propagating.
#[derive(Debug, Error)]
pub enum SweepError {
    // ── Discovery ───────────────────────────────────────────────────────
    #[error("primary server not found")]
    PrimaryNotFound,

    #[error("secondary server not found")]
    SecondaryNotFound,

    // ── Retention policy ────────────────────────────────────────────────
    #[error("cutoff out of range: {0}")]
    Cutoff(String),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Connection errors ───────────────────────────────────────────────────────

/// Transport or authentication failure while opening a session to one host.
///
/// Never fatal on its own: the caller logs it and tries the next host.
#[derive(Debug, Error)]
#[error("connection to {endpoint} failed: {message}")]
pub struct ConnectError {
    pub endpoint: String,
    pub message: String,
}

impl ConnectError {
    pub fn new(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}
