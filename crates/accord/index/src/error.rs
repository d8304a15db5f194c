//! Index error types

use thiserror::Error;

/// Index errors. Queries never fail; only configuration loading does.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Invalid index config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Result type for index operations
pub type IndexResult<T> = std::result::Result<T, IndexError>;
