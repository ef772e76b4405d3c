use anyhow::Result;
use tracing::info;

use mongosweep::config::{ClusterConfig, Credentials};
use mongosweep::driver::MongoConnector;
use mongosweep::manager::RetentionManager;
use mongosweep::retention::RetentionPolicy;

use crate::cli::commands::Cli;

/// Map parsed arguments onto the requested sweeps.
///
/// Both sweeps are optional and independent; a run with neither flag logs
/// the skip lines and exits 0. Discovery failures propagate out of here and
/// become the non-zero exit status.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let credentials = cli.username.map(|username| Credentials {
        username,
        password: cli.password.unwrap_or_default(),
    });
    let config = ClusterConfig::new(cli.database, cli.server, credentials);
    let connector = MongoConnector::new(config.clone());
    let manager = RetentionManager::new(config, Box::new(connector));

    match cli.retention {
        Some(months) if months > 0 => {
            let report = manager
                .sweep_retention(&RetentionPolicy::new(months))
                .await?;
            info!(
                primary = %report.primary,
                collections = report.collections.len(),
                removed = report.total_removed(),
                failures = report.failures.len(),
                "retention sweep complete"
            );
        }
        _ => info!("called without --retention argument - skipping"),
    }

    if cli.rebuild {
        let report = manager.sweep_index_rebuild().await?;
        info!(
            secondaries = report.hosts.len(),
            failures = report.failures.len(),
            "index rebuild complete"
        );
    } else {
        info!("called without --rebuild argument - skipping");
    }

    Ok(())
}
