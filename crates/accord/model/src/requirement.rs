//! Requirements and direct capability matching

use crate::capability::Capability;
use crate::directives::{Directives, EFFECTIVE, EFFECTIVE_RESOLVE};
use crate::types::{Namespace, ResourceId};
use accord_filter::{Attributes, Filter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How many providers a requirement wants wired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    #[default]
    Single,
    Multiple,
}

/// An immutable filter-based query against other modules' capabilities.
#[derive(Clone, Debug)]
pub struct Requirement {
    owner: ResourceId,
    namespace: Namespace,
    directives: Directives,
    attributes: Attributes,
    filter: Arc<Filter>,
    optional: bool,
    cardinality: Cardinality,
}

impl Requirement {
    pub(crate) fn new(
        owner: ResourceId,
        namespace: Namespace,
        directives: Directives,
        attributes: Attributes,
        filter: Filter,
        optional: bool,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            owner,
            namespace,
            directives,
            attributes,
            filter: Arc::new(filter),
            optional,
            cardinality,
        }
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

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Shared handle to the compiled filter.
    pub fn filter_handle(&self) -> Arc<Filter> {
        Arc::clone(&self.filter)
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn effective(&self) -> &str {
        self.directives.get(EFFECTIVE).unwrap_or(EFFECTIVE_RESOLVE)
    }

    /// Same namespace and the filter accepts the capability's attributes.
    pub fn matches(&self, capability: &Capability) -> bool {
        self.namespace == *capability.namespace() && self.filter.matches(capability.attributes())
    }

    /// Like [`Requirement::matches`], but also requires the filter to
    /// constrain every mandatory attribute of the capability.
    pub fn matches_obeying_mandatory(&self, capability: &Capability) -> bool {
        self.matches(capability) && capability.mandatory_satisfied_by(&self.filter)
    }
}
