use thiserror::Error;

/// Core error type shared across ticketlog crates.
#[derive(Debug, Error)]
pub enum Error {
    /// An activity record does not decode into any valid shape.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
    /// A timestamp string does not follow the document format.
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// Convenience alias for results returned by ticketlog crates.
pub type Result<T> = std::result::Result<T, Error>;
