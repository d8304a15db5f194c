//! End-to-end test: mandatory attributes, optional requirements and the
//! `uses` directive as seen by a resolver.

use accord_filter::Attributes;
use accord_index::{CapabilityIndex, IndexConfig};
use accord_model::directives::{FILTER, MANDATORY, RESOLUTION, USES};
use accord_model::{build_capability, build_requirement, ConstructionError, Directives, ResourceId};
use accord_tests::init_tracing;
use std::sync::Arc;

fn directives(pairs: &[(&str, &str)]) -> Directives {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

fn attributes(pairs: &[(&str, &str)]) -> Attributes {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

#[test]
fn publication_fails_when_mandatory_attribute_is_absent() {
    init_tracing();
    let err = build_capability(
        ResourceId(1),
        "pkg",
        directives(&[(MANDATORY, "name,company")]),
        attributes(&[("name", "foo")]),
    )
    .unwrap_err();
    assert!(matches!(err, ConstructionError::MandatoryAttributeMissing(ref m) if m.0 == "company"));
    assert_eq!(err.to_string(), "mandatory attribute 'company' does not exist");
}

#[test]
fn mandatory_aware_index_requires_explicit_constraint() {
    init_tracing();
    let guarded = Arc::new(
        build_capability(
            ResourceId(1),
            "pkg",
            directives(&[(MANDATORY, "company"), (USES, "org.a,org.b")]),
            attributes(&[("name", "foo"), ("company", "acme")]),
        )
        .unwrap(),
    );
    assert_eq!(guarded.uses(), &["org.a", "org.b"]);

    let index = CapabilityIndex::with_config(IndexConfig::default().with_obey_mandatory(true));
    index.insert(Arc::clone(&guarded));

    let loose = build_requirement(
        ResourceId(2),
        "pkg",
        directives(&[(FILTER, "(name=foo)")]),
        Attributes::empty(),
    )
    .unwrap();
    let nested = build_requirement(
        ResourceId(2),
        "pkg",
        directives(&[(FILTER, "(&(name=foo)(|(company=acme)(company=other)))")]),
        Attributes::empty(),
    )
    .unwrap();
    let explicit = build_requirement(
        ResourceId(2),
        "pkg",
        directives(&[(FILTER, "(&(name=foo)(company=acme))")]),
        Attributes::empty(),
    )
    .unwrap();

    assert_eq!(index.find_matches(&loose).count(), 0);
    assert_eq!(index.find_matches(&nested).count(), 0);
    assert_eq!(index.find_matches(&explicit).count(), 1);
}

#[test]
fn optional_requirement_with_no_provider_is_just_empty() {
    init_tracing();
    let index = CapabilityIndex::new();
    let optional = build_requirement(
        ResourceId(3),
        "pkg",
        directives(&[(FILTER, "(name=missing)"), (RESOLUTION, "optional")]),
        Attributes::empty(),
    )
    .unwrap();
    assert!(optional.is_optional());
    assert_eq!(index.find_matches(&optional).count(), 0);
}

#[test]
fn attribute_synthesized_requirement_matches_like_explicit_filter() {
    init_tracing();
    let index = CapabilityIndex::new();
    let cap = Arc::new(
        build_capability(
            ResourceId(1),
            "bundle",
            Directives::empty(),
            attributes(&[("bundle-symbolic-name", "org.example"), ("bundle-version", "1.0")]),
        )
        .unwrap(),
    );
    index.insert(Arc::clone(&cap));

    let synthesized = build_requirement(
        ResourceId(2),
        "bundle",
        Directives::empty(),
        attributes(&[("bundle-symbolic-name", "org.example")]),
    )
    .unwrap();
    assert_eq!(synthesized.filter().to_string(), "(bundle-symbolic-name=org.example)");
    let found: Vec<_> = index.find_matches(&synthesized).map(|c| c.id()).collect();
    assert_eq!(found, vec![cap.id()]);
}
