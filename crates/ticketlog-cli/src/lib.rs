//! Shared plumbing for the `ticket_gen` and `store_activities` binaries.

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use config::AppConfig;
pub use error::CliError;
pub use logging::init_logging;
