//! Serializable capability/requirement declarations.

use crate::builder::{build_capability, build_requirement};
use crate::capability::Capability;
use crate::error::{ConstructionError, ModelResult};
use crate::intern::AttributeInterner;
use crate::requirement::Requirement;
use crate::types::{Namespace, ResourceId};
use accord_filter::{AttributeValue, Attributes};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw declaration as read from a manifest, before validation.
///
/// ```json
/// {
///   "namespace": "package",
///   "directives": { "uses": "org.b" },
///   "attributes": { "name": { "type": "string", "value": "org.a" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub namespace: Namespace,
    #[serde(default)]
    pub directives: BTreeMap<String, String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Declaration {
    pub fn new(namespace: impl Into<Namespace>) -> Self {
        Self {
            namespace: namespace.into(),
            directives: BTreeMap::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn directive(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.directives.insert(name.into(), value.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn from_json(text: &str) -> ModelResult<Self> {
        serde_json::from_str(text).map_err(|e| ConstructionError::InvalidDeclaration(e.to_string()))
    }

    pub fn into_capability(self, owner: ResourceId) -> ModelResult<Capability> {
        build_capability(owner, self.namespace, self.directives, self.attributes)
    }

    /// Like [`Declaration::into_capability`], sharing the attribute map
    /// through `interner`.
    pub fn into_capability_with(
        self,
        owner: ResourceId,
        interner: &AttributeInterner,
    ) -> ModelResult<Capability> {
        let attributes = interner.intern(Attributes::new(self.attributes));
        build_capability(owner, self.namespace, self.directives, attributes)
    }

    pub fn into_requirement(self, owner: ResourceId) -> ModelResult<Requirement> {
        build_requirement(owner, self.namespace, self.directives, self.attributes)
    }
}
