use std::path::PathBuf;

use thiserror::Error;
use ticketlog_generate::GenerationError;
use ticketlog_load::LoadError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("'{}' does not exist", .0.display())]
    MissingInput(PathBuf),
    #[error("invalid config '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("logging error: {0}")]
    Logging(String),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidArgument(_) => 2,
            CliError::Generation(GenerationError::InvalidArgument(_)) => 2,
            CliError::MissingInput(_) => 3,
            CliError::Load(LoadError::MissingInput(_)) => 3,
            CliError::Load(LoadError::TargetConflict { .. }) => 4,
            CliError::Load(LoadError::ShapeMismatch { .. }) => 5,
            CliError::Load(LoadError::InvalidRecord { .. }) => 5,
            CliError::Load(LoadError::StorageFailure(_)) => 6,
            _ => 1,
        }
    }
}
