//! End-to-end test: install, uninstall and reinstall of modules keep the
//! index free of stale entries.

use accord_index::{CapabilityIndex, IndexStats};
use accord_model::ResourceId;
use accord_tests::{capability, init_tracing, requirement};
use std::sync::Arc;

#[test]
fn remove_then_reinsert_restores_match_set() {
    init_tracing();
    let index = CapabilityIndex::new();
    let a = capability(1, "pkg", &[("name", "foo")]);
    let b = capability(2, "pkg", &[("name", "foo")]);
    index.insert(Arc::clone(&a));
    index.insert(Arc::clone(&b));
    let before = index.stats();

    assert!(index.remove(&a));
    let without: Vec<_> = index
        .find_matches(&requirement("pkg", "(name=foo)"))
        .map(|c| c.id())
        .collect();
    assert_eq!(without, vec![b.id()]);

    assert!(index.insert(Arc::clone(&a)));
    let mut restored: Vec<_> = index
        .find_matches(&requirement("pkg", "(name=foo)"))
        .map(|c| c.id())
        .collect();
    restored.sort();
    let mut expected = vec![a.id(), b.id()];
    expected.sort();
    assert_eq!(restored, expected);
    assert_eq!(index.stats(), before);
}

#[test]
fn duplicate_teardown_is_harmless() {
    init_tracing();
    let index = CapabilityIndex::new();
    let a = capability(1, "pkg", &[("name", "foo")]);
    index.insert(Arc::clone(&a));

    assert!(index.remove(&a));
    assert!(!index.remove(&a));
    assert_eq!(index.remove_owner(ResourceId(1)), 0);
    assert_eq!(index.stats(), IndexStats::default());
}

#[test]
fn uninstalling_a_module_withdraws_all_its_capabilities() {
    init_tracing();
    let index = CapabilityIndex::new();
    for ns in ["pkg", "bundle", "host"] {
        index.insert(capability(7, ns, &[("name", "mod7"), ("vendor", "acme")]));
    }
    let survivor = capability(8, "pkg", &[("name", "mod8"), ("vendor", "acme")]);
    index.insert(Arc::clone(&survivor));

    assert_eq!(index.remove_owner(ResourceId(7)), 3);
    assert_eq!(index.len(), 1);
    assert_eq!(index.namespaces().len(), 1);

    let stats = index.stats();
    assert_eq!(stats.capabilities, 1);
    assert_eq!(stats.bucket_entries, 2);

    let found: Vec<_> = index
        .find_matches(&requirement("pkg", "(vendor=acme)"))
        .map(|c| c.id())
        .collect();
    assert_eq!(found, vec![survivor.id()]);
}

#[test]
fn earlier_queries_keep_their_snapshot() {
    init_tracing();
    let index = CapabilityIndex::new();
    let a = capability(1, "pkg", &[("name", "foo")]);
    index.insert(Arc::clone(&a));

    let pending = index.find_matches(&requirement("pkg", "(name=foo)"));
    index.remove(&a);
    index.insert(capability(2, "pkg", &[("name", "foo")]));

    let seen: Vec<_> = pending.map(|c| c.id()).collect();
    assert_eq!(seen, vec![a.id()]);
}
