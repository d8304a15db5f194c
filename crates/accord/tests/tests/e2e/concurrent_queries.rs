//! End-to-end test: readers running alongside install/uninstall churn only
//! ever observe whole mutations.

use accord_index::CapabilityIndex;
use accord_tests::{capability, init_tracing, requirement};
use std::sync::Arc;
use std::thread;

const ROUNDS: u64 = 300;

#[test]
fn readers_never_see_half_indexed_capabilities() {
    init_tracing();
    let index = Arc::new(CapabilityIndex::new());
    let anchor = capability(1, "pkg", &[("name", "core"), ("vendor", "acme"), ("tier", "gold")]);
    index.insert(Arc::clone(&anchor));

    let writer = {
        let index = Arc::clone(&index);
        thread::spawn(move || {
            for round in 0..ROUNDS {
                let churn = capability(
                    100 + round,
                    "pkg",
                    &[("name", "core"), ("vendor", "acme"), ("tier", "gold")],
                );
                index.insert(Arc::clone(&churn));
                if round % 3 != 0 {
                    index.remove(&churn);
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            let anchor_id = anchor.id();
            thread::spawn(move || {
                let indexed = requirement("pkg", "(&(name=core)(vendor=acme)(tier=gold))");
                let scanned = requirement("pkg", "(|(tier=gold)(tier=silver))");
                let mut last = 0;
                for _ in 0..ROUNDS {
                    let by_bucket: Vec<_> = index.find_matches(&indexed).map(|c| c.id()).collect();
                    let by_scan: Vec<_> = index.find_matches(&scanned).map(|c| c.id()).collect();
                    assert_eq!(by_bucket.first(), Some(&anchor_id));
                    assert_eq!(by_scan.first(), Some(&anchor_id));
                    assert!(by_bucket.windows(2).all(|w| w[0] != w[1]));
                    last = by_bucket.len();
                }
                last
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        assert!(reader.join().unwrap() >= 1);
    }

    let expected = 1 + (0..ROUNDS).filter(|r| r % 3 == 0).count();
    assert_eq!(index.len(), expected);
    assert_eq!(
        index
            .find_matches(&requirement("pkg", "(&(name=core)(vendor=acme)(tier=gold))"))
            .count(),
        expected
    );
}
