//! Filter error types

use thiserror::Error;

/// Malformed filter text.
///
/// `position` is the character offset in `filter` where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid filter at position {position}: {kind} (in \"{filter}\")")]
pub struct FilterSyntaxError {
    pub kind: SyntaxErrorKind,
    pub position: usize,
    pub filter: String,
}

/// What went wrong while parsing a filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("empty filter")]
    Empty,

    #[error("missing '('")]
    MissingOpenParen,

    #[error("missing ')'")]
    MissingCloseParen,

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    #[error("missing comparison operator")]
    MissingOperator,

    #[error("empty attribute name")]
    EmptyAttribute,

    #[error("'{0}' requires at least one operand")]
    EmptyComposite(char),

    #[error("'!' requires exactly one operand")]
    NotArity,

    #[error("unescaped '(' in value")]
    UnescapedParen,

    #[error("dangling escape at end of value")]
    DanglingEscape,

    #[error("unexpected trailing characters")]
    TrailingCharacters,

    #[error("filter nested more than {} levels deep", crate::parser::MAX_FILTER_DEPTH)]
    TooDeep,
}

/// Errors from parsing versions and version ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("empty version")]
    Empty,

    #[error("invalid numeric component '{0}'")]
    InvalidNumber(String),

    #[error("invalid qualifier '{0}'")]
    InvalidQualifier(String),

    #[error("too many components in '{0}'")]
    TooManyComponents(String),

    #[error("invalid version range '{0}'")]
    InvalidRange(String),

    #[error("range floor {floor} is above ceiling {ceiling}")]
    InvertedRange { floor: String, ceiling: String },
}

/// Result type for filter parsing
pub type FilterResult<T> = std::result::Result<T, FilterSyntaxError>;
