//! Published capabilities

use crate::directives::{Directives, EFFECTIVE, EFFECTIVE_RESOLVE};
use crate::types::{CapabilityId, Namespace, ResourceId};
use accord_filter::{Attributes, Filter};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// An immutable contract published by a module.
///
/// Built through [`crate::build_capability`], which guarantees that every
/// mandatory attribute is present. Equality and hashing use the capability
/// id only.
#[derive(Clone, Debug)]
pub struct Capability {
    id: CapabilityId,
    owner: ResourceId,
    namespace: Namespace,
    directives: Directives,
    attributes: Attributes,
    uses: Vec<String>,
    mandatory: BTreeSet<String>,
}

impl Capability {
    pub(crate) fn new(
        owner: ResourceId,
        namespace: Namespace,
        directives: Directives,
        attributes: Attributes,
        uses: Vec<String>,
        mandatory: BTreeSet<String>,
    ) -> Self {
        Self {
            id: CapabilityId::next(),
            owner,
            namespace,
            directives,
            attributes,
            uses,
            mandatory,
        }
    }

    pub fn id(&self) -> CapabilityId {
        self.id
    }

    pub fn owner(&self) -> ResourceId {
        self.owner
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Packages from the `uses` directive, in declaration order.
    pub fn uses(&self) -> &[String] {
        &self.uses
    }

    /// Attributes a requirement has to constrain to match this capability.
    pub fn mandatory(&self) -> &BTreeSet<String> {
        &self.mandatory
    }

    pub fn is_mandatory(&self, attr: &str) -> bool {
        self.mandatory.contains(attr)
    }

    /// Whether `filter` constrains every mandatory attribute.
    pub fn mandatory_satisfied_by(&self, filter: &Filter) -> bool {
        self.mandatory.iter().all(|attr| filter.constrains(attr))
    }

    pub fn effective(&self) -> &str {
        self.directives.get(EFFECTIVE).unwrap_or(EFFECTIVE_RESOLVE)
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Capability {}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
