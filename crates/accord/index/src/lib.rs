//! # accord-index
//!
//! A mutable, concurrently queryable set of capabilities, optimized for
//! repeated requirement matching.
//!
//! ```text
//! namespace ──► members (seq → capability, insertion order)
//!          └──► attribute ──► value ──► {seq}
//! ```
//!
//! Any number of threads may call [`CapabilityIndex::find_matches`] while
//! module install/uninstall events call `insert`/`remove`. Every query
//! observes each mutation either completely or not at all.
//!
//! ## Key Types
//!
//! - [`CapabilityIndex`] - The index itself
//! - [`Matches`] - Lazy, insertion-ordered match iterator
//! - [`IndexConfig`] - Bucket selection and mandatory-attribute policy
//! - [`IndexStats`] - Point-in-time counters

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod index;
pub mod matches;

// Re-exports
pub use config::{AttributeSelection, IndexConfig};
pub use error::{IndexError, IndexResult};
pub use index::{CapabilityIndex, IndexStats};
pub use matches::Matches;
