//! # accord-filter
//!
//! LDAP-style filter expressions over typed attribute maps.
//!
//! ```text
//! (&(name=foo)(version>=1.0)(!(tags=*internal*)))
//! ```
//!
//! Filters are parsed once into an immutable tree and evaluated many times,
//! concurrently, against different attribute maps. Evaluation is total: an
//! absent attribute or an operand of the wrong type is a non-match, never an
//! error.
//!
//! ## Key Types
//!
//! - [`Filter`] - Parsed filter tree (closed set of node kinds)
//! - [`SubstringPattern`] - Wildcard pattern used by `(attr=a*b)` nodes
//! - [`AttributeValue`] / [`Attributes`] - Typed values and immutable maps
//! - [`AttributeLookup`] - What the evaluator needs from an attribute source
//! - [`Version`] / [`VersionRange`] - Four-part versions and intervals
//! - [`FilterSyntaxError`] - Parse failure with position

#![deny(unsafe_code)]

pub mod ast;
pub mod error;
pub mod eval;
pub mod parser;
pub mod substring;
pub mod value;
pub mod version;

pub use ast::Filter;
pub use error::{FilterResult, FilterSyntaxError, SyntaxErrorKind, VersionError};
pub use eval::evaluate;
pub use parser::{parse, MAX_FILTER_DEPTH};
pub use substring::{escape_value, match_substring, parse_substring, Segment, SubstringPattern};
pub use value::{AttributeLookup, AttributeValue, Attributes};
pub use version::{Version, VersionRange};
