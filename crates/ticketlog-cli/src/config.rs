use std::path::Path;

use serde::{Deserialize, Serialize};
use ticketlog_generate::GenerateOptions;
use ticketlog_load::LoadOptions;

use crate::error::CliError;

/// Optional TOML settings shared by both binaries. Every field defaults.
///
/// ```toml
/// [generate]
/// seed = 2021
/// window_seconds = 86399
///
/// [load]
/// task_id_base = 50000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generate: GenerateOptions,
    pub load: LoadOptions,
}

impl AppConfig {
    /// Read the file at `path`, or fall back to defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.is_file() {
            return Err(CliError::MissingInput(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
