use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input document '{}' does not exist", .0.display())]
    MissingInput(PathBuf),
    #[error("target '{target}' already contains table(s): {}", .tables.join(", "))]
    TargetConflict { target: String, tables: Vec<String> },
    #[error("shape mismatch in ticket {ticket_id}: {reason}")]
    ShapeMismatch { ticket_id: i64, reason: String },
    #[error("record {index} has no usable ticket_id: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error("storage failure: {0}")]
    StorageFailure(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
