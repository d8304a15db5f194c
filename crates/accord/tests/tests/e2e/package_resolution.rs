//! End-to-end test: requirements resolve against indexed package exports.

use accord_filter::{AttributeValue, Attributes, Version};
use accord_index::CapabilityIndex;
use accord_model::ResourceId;
use accord_tests::{capability, init_tracing, requirement, typed_capability};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn name_and_version_requirement_matches_exactly_one_export() {
    init_tracing();
    let index = CapabilityIndex::new();
    let foo = capability(1, "pkg", &[("name", "foo"), ("version", "1.2")]);
    index.insert(Arc::clone(&foo));

    let found: Vec<_> = index
        .find_matches(&requirement("pkg", "(&(name=foo)(version>=1.0))"))
        .collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), foo.id());

    assert_eq!(index.find_matches(&requirement("pkg", "(version>=2.0)")).count(), 0);
}

#[test]
fn equal_candidates_come_back_in_registration_order() {
    init_tracing();
    let index = CapabilityIndex::new();
    let a = capability(1, "pkg", &[("name", "foo"), ("version", "1.0")]);
    let b = capability(2, "pkg", &[("name", "foo"), ("version", "1.0")]);
    index.insert(Arc::clone(&a));
    index.insert(Arc::clone(&b));

    for filter in ["(name=foo)", "(&(name=foo)(version=1.0))", "(name=*o*)", "(version<=1.0)"] {
        let order: Vec<_> = index
            .find_matches(&requirement("pkg", filter))
            .map(|c| c.id())
            .collect();
        assert_eq!(order, vec![a.id(), b.id()], "filter {filter}");
    }
}

#[test]
fn typed_versions_order_numerically() {
    init_tracing();
    let index = CapabilityIndex::new();
    let attrs = |v: Version| -> Attributes {
        [("name", AttributeValue::from("lib")), ("version", v.into())]
            .into_iter()
            .collect()
    };
    let old = typed_capability(1, "pkg", attrs(Version::new(1, 9, 0)));
    let new = typed_capability(2, "pkg", attrs(Version::new(1, 10, 0)));
    index.insert(Arc::clone(&old));
    index.insert(Arc::clone(&new));

    let found: Vec<_> = index
        .find_matches(&requirement("pkg", "(&(name=lib)(version>=1.10))"))
        .map(|c| c.owner())
        .collect();
    assert_eq!(found, vec![ResourceId(2)]);

    let range: Vec<_> = index
        .find_matches(&requirement("pkg", "(&(version>=1.0)(!(version>=1.10)))"))
        .map(|c| c.owner())
        .collect();
    assert_eq!(range, vec![ResourceId(1)]);
}

#[test]
fn substring_and_presence_filters() {
    init_tracing();
    let index = CapabilityIndex::new();
    index.insert(capability(1, "pkg", &[("name", "org.example.api")]));
    index.insert(capability(2, "pkg", &[("name", "org.example.impl"), ("internal", "true")]));
    index.insert(capability(3, "pkg", &[("name", "com.other.api")]));

    let owners = |filter: &str| -> Vec<u64> {
        index
            .find_matches(&requirement("pkg", filter))
            .map(|c| c.owner().0)
            .collect()
    };
    assert_eq!(owners("(name=org.example.*)"), vec![1, 2]);
    assert_eq!(owners("(name=*.api)"), vec![1, 3]);
    assert_eq!(owners("(internal=*)"), vec![2]);
    assert_eq!(owners("(&(name=org.*)(!(internal=*)))"), vec![1]);
    assert_eq!(owners("(|(name=com.*)(internal=true))"), vec![2, 3]);
}
