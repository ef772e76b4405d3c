#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use anyhow::Result;
use clap::Parser;

mod app;
mod cli;

use cli::commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let subscriber = mongosweep::logging::build_subscriber(&cli.loglevel, cli.logfile.as_deref())?;
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");
    app::dispatch::dispatch(cli).await
}
