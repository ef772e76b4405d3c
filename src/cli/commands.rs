use std::path::PathBuf;

use clap::Parser;

/// `mongosweep` — remove old documents from MongoDB collections and rebuild
/// indexes on secondaries.
///
/// For large datasets it is convenient to run this twice: one day with
/// `--retention` to remove old data, the next with `--rebuild`, to avoid
/// compounding the I/O load.
#[derive(Parser, Debug)]
#[command(name = "mongosweep")]
#[command(version = "0.1.0")]
#[command(
    about = "Age-based retention and secondary index maintenance for MongoDB replica sets.",
    long_about = None
)]
pub struct Cli {
    /// Database to operate on
    pub database: String,

    /// Servers in host:port format; for a replica set provide primary and
    /// secondaries (order is the primary-discovery preference order)
    #[arg(required = true)]
    pub server: Vec<String>,

    /// Mongo database user; connects unauthenticated when unset
    #[arg(short = 'u', long)]
    pub username: Option<String>,

    /// Mongo database user password
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// Remove all collection documents older than this many months
    #[arg(long)]
    pub retention: Option<u32>,

    /// Rebuild all indexes on all database collections on all secondaries
    #[arg(long)]
    pub rebuild: bool,

    /// Write logs to this file instead of the console
    #[arg(long)]
    pub logfile: Option<PathBuf>,

    /// Log verbosity: error, warn, info, debug, trace (or 1-5)
    #[arg(long, default_value = "info")]
    pub loglevel: String,
}
