#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod cluster;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod manager;
pub mod retention;

pub use config::{ClusterConfig, Credentials};
pub use error::{ConnectError, SweepError};
pub use manager::RetentionManager;
pub use retention::{CollectionSweepResult, RetentionPolicy};
