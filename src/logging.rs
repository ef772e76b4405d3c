//! Log subscriber construction: console by default, plain (no ANSI) append
//! when a logfile path is given.
//!
//! Building is separate from installing so the file path can be exercised
//! with a scoped subscriber under test; `main` installs the result globally.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tracing::{Level, Subscriber};
use tracing_subscriber::FmtSubscriber;

/// Build a subscriber for the given verbosity (`error`..`trace`, or 1-5)
/// writing to stderr, or appending to `logfile` when set.
pub fn build_subscriber(
    loglevel: &str,
    logfile: Option<&Path>,
) -> Result<Box<dyn Subscriber + Send + Sync>> {
    let level =
        Level::from_str(loglevel).map_err(|_| anyhow!("invalid log level: {loglevel}"))?;
    let builder = FmtSubscriber::builder().with_max_level(level);

    match logfile {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening logfile {} failed", path.display()))?;
            Ok(Box::new(
                builder.with_ansi(false).with_writer(Arc::new(file)).finish(),
            ))
        }
        None => Ok(Box::new(builder.with_writer(std::io::stderr).finish())),
    }
}
