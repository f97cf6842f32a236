use serde::{Deserialize, Serialize};

/// One day minus one second.
pub const DEFAULT_WINDOW_SECONDS: i64 = 86_399;

/// Options for the generation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Seed for the random source; entropy-seeded when absent.
    pub seed: Option<u64>,
    /// Length of the window ending at generation time.
    pub window_seconds: i64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: None,
            window_seconds: DEFAULT_WINDOW_SECONDS,
        }
    }
}
