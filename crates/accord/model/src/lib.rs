//! # accord-model
//!
//! Immutable capability and requirement declarations.
//!
//! A module publishes [`Capability`] objects (namespace, directives, typed
//! attributes) and declares [`Requirement`] objects (namespace plus a
//! compiled [`accord_filter::Filter`]). Both are validated once at
//! construction and never change afterwards, so they can be shared freely
//! across threads.
//!
//! ## Key Types
//!
//! - [`Capability`] - Published contract with `uses` and `mandatory` parsed
//! - [`Requirement`] - Filter-based query with `optional` and cardinality
//! - [`Declaration`] - Serializable raw form of either
//! - [`Directives`] - Immutable directive map
//! - [`AttributeInterner`] - Content-addressed sharing of attribute maps
//! - [`ConstructionError`] - Everything construction can reject

#![deny(unsafe_code)]

pub mod builder;
pub mod capability;
pub mod declaration;
pub mod directives;
pub mod error;
pub mod intern;
pub mod requirement;
pub mod types;

// Re-exports
pub use builder::{build_capability, build_requirement, synthesize_filter};
pub use capability::Capability;
pub use declaration::Declaration;
pub use directives::Directives;
pub use error::{ConstructionError, MandatoryAttributeMissing, ModelResult};
pub use intern::{AttributeDigest, AttributeInterner};
pub use requirement::{Cardinality, Requirement};
pub use types::{namespaces, CapabilityId, Namespace, ResourceId};
