//! Construction error types

use accord_filter::FilterSyntaxError;
use thiserror::Error;

/// A capability named a mandatory attribute it does not carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mandatory attribute '{0}' does not exist")]
pub struct MandatoryAttributeMissing(pub String);

/// Errors raised while building capabilities and requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error(transparent)]
    FilterSyntax(#[from] FilterSyntaxError),

    #[error(transparent)]
    MandatoryAttributeMissing(#[from] MandatoryAttributeMissing),

    #[error("namespace must not be empty")]
    EmptyNamespace,

    #[error("invalid value '{value}' for directive '{name}'")]
    InvalidDirective { name: String, value: String },

    #[error("invalid declaration: {0}")]
    InvalidDeclaration(String),
}

/// Result type for model construction
pub type ModelResult<T> = std::result::Result<T, ConstructionError>;
