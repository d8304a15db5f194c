//! Construction-time validation for capabilities and requirements.
//!
//! Everything that can be wrong with a declaration is rejected here, once,
//! so published objects never need re-checking at match time.

use crate::capability::Capability;
use crate::directives::{
    Directives, CARDINALITY, CARDINALITY_MULTIPLE, CARDINALITY_SINGLE, FILTER, MANDATORY,
    RESOLUTION, RESOLUTION_OPTIONAL, USES,
};
use crate::error::{ConstructionError, MandatoryAttributeMissing, ModelResult};
use crate::requirement::{Cardinality, Requirement};
use crate::types::{Namespace, ResourceId};
use accord_filter::{AttributeValue, Attributes, Filter};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Validate a capability declaration and build the immutable capability.
pub fn build_capability(
    owner: ResourceId,
    namespace: impl Into<Namespace>,
    directives: impl Into<Directives>,
    attributes: impl Into<Attributes>,
) -> ModelResult<Capability> {
    let namespace = namespace.into();
    let directives = directives.into();
    let attributes = attributes.into();

    if namespace.is_empty() {
        return Err(ConstructionError::EmptyNamespace);
    }

    let uses = directives.list(USES);

    let mut mandatory = BTreeSet::new();
    for name in directives.list(MANDATORY) {
        if !attributes.contains_key(&name) {
            warn!(
                owner = %owner,
                namespace = %namespace,
                attribute = %name,
                "Mandatory attribute missing"
            );
            return Err(MandatoryAttributeMissing(name).into());
        }
        mandatory.insert(name);
    }

    let capability = Capability::new(owner, namespace, directives, attributes, uses, mandatory);
    debug!(
        capability = %capability.id(),
        owner = %owner,
        namespace = %capability.namespace(),
        uses = capability.uses().len(),
        "Capability built"
    );
    Ok(capability)
}

/// Validate a requirement declaration and compile its filter.
///
/// An explicit `filter` directive always wins; attributes are then kept on
/// the requirement but do not take part in matching. Without the directive
/// the filter is synthesized from the attributes.
pub fn build_requirement(
    owner: ResourceId,
    namespace: impl Into<Namespace>,
    directives: impl Into<Directives>,
    attributes: impl Into<Attributes>,
) -> ModelResult<Requirement> {
    let namespace = namespace.into();
    let directives = directives.into();
    let attributes = attributes.into();

    if namespace.is_empty() {
        return Err(ConstructionError::EmptyNamespace);
    }

    let filter = match directives.get(FILTER) {
        Some(text) => accord_filter::parse(text)?,
        None => synthesize_filter(&attributes),
    };

    let optional = directives.get(RESOLUTION) == Some(RESOLUTION_OPTIONAL);

    let cardinality = match directives.get(CARDINALITY) {
        None | Some(CARDINALITY_SINGLE) => Cardinality::Single,
        Some(CARDINALITY_MULTIPLE) => Cardinality::Multiple,
        Some(other) => {
            return Err(ConstructionError::InvalidDirective {
                name: CARDINALITY.to_string(),
                value: other.to_string(),
            })
        }
    };

    debug!(
        owner = %owner,
        namespace = %namespace,
        filter = %filter,
        optional,
        "Requirement built"
    );

    Ok(Requirement::new(
        owner,
        namespace,
        directives,
        attributes,
        filter,
        optional,
        cardinality,
    ))
}

/// Filter equivalent to "every attribute matches".
///
/// Scalars become `Equal` terms, list elements each contribute their own
/// term, and version ranges become range tests. With no attributes the
/// result is an empty (always true) conjunction.
pub fn synthesize_filter(attributes: &Attributes) -> Filter {
    let mut clauses = Vec::new();
    for (name, value) in attributes.iter() {
        push_clauses(name, value, &mut clauses);
    }
    Filter::all_of(clauses)
}

fn push_clauses(name: &str, value: &AttributeValue, out: &mut Vec<Filter>) {
    match value {
        AttributeValue::VersionRange(range) => out.push(range.to_filter(name)),
        AttributeValue::List(items) => {
            for item in items {
                push_clauses(name, item, out);
            }
        }
        scalar => out.push(Filter::Equal(name.to_string(), scalar.to_string())),
    }
}
