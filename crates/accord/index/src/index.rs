//! Concurrent capability index
//!
//! Capabilities are grouped by namespace. Inside a namespace every member
//! gets a monotonically increasing sequence number, and attribute buckets
//! map `(attribute, value)` to the sequence numbers holding that value.
//! Ordered maps keyed by sequence number give insertion order for free.
//!
//! A single [`RwLock`] covers all of it: mutations hold the write lock for
//! their whole duration, queries hold the read lock only while they copy
//! out their candidate list.

use crate::config::IndexConfig;
use crate::matches::Matches;
use accord_filter::{AttributeValue, Filter};
use accord_model::{Capability, CapabilityId, Namespace, Requirement, ResourceId};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, trace};

/// Point-in-time counters describing index contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub namespaces: usize,
    pub capabilities: usize,
    pub indexed_attributes: usize,
    pub buckets: usize,
    pub bucket_entries: usize,
}

/// Equality buckets for one attribute within one namespace.
#[derive(Default)]
struct AttributeIndex {
    buckets: HashMap<String, BTreeSet<u64>>,
    /// Members carrying this attribute at all.
    holders: usize,
    /// Members whose value is not plain text. While non-zero, string keys
    /// do not decide equality and queries scan instead.
    non_text: usize,
}

#[derive(Default)]
struct NamespaceIndex {
    members: BTreeMap<u64, Arc<Capability>>,
    attributes: HashMap<String, AttributeIndex>,
}

struct Location {
    namespace: Namespace,
    seq: u64,
}

#[derive(Default)]
struct IndexState {
    namespaces: BTreeMap<Namespace, NamespaceIndex>,
    locations: HashMap<CapabilityId, Location>,
    next_seq: u64,
}

/// Mutable, concurrently queryable set of published capabilities.
pub struct CapabilityIndex {
    config: IndexConfig,
    state: RwLock<IndexState>,
}

impl CapabilityIndex {
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            state: RwLock::new(IndexState::default()),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Publish a capability. Returns `false` if it is already present.
    pub fn insert(&self, capability: impl Into<Arc<Capability>>) -> bool {
        let capability = capability.into();
        let mut state = self.state.write();
        if state.locations.contains_key(&capability.id()) {
            return false;
        }

        let seq = state.next_seq;
        state.next_seq += 1;

        let namespace = capability.namespace().clone();
        let ns_index = state.namespaces.entry(namespace.clone()).or_default();
        for (attr, value) in capability.attributes().iter() {
            if !self.config.indexed_attributes.includes(attr) {
                continue;
            }
            let attr_index = ns_index.attributes.entry(attr.clone()).or_default();
            attr_index.holders += 1;
            if !value.is_text() {
                attr_index.non_text += 1;
            }
            for key in bucket_keys(value) {
                attr_index.buckets.entry(key).or_default().insert(seq);
            }
        }
        ns_index.members.insert(seq, Arc::clone(&capability));
        state.locations.insert(
            capability.id(),
            Location {
                namespace: namespace.clone(),
                seq,
            },
        );

        debug!(
            capability = %capability.id(),
            owner = %capability.owner(),
            namespace = %namespace,
            seq,
            "Capability indexed"
        );
        true
    }

    /// Withdraw a capability. Returns `false` if it was not present.
    pub fn remove(&self, capability: &Capability) -> bool {
        let mut state = self.state.write();
        let removed = self.remove_locked(&mut state, capability.id());
        if !removed {
            trace!(capability = %capability.id(), "Remove of absent capability ignored");
        }
        removed
    }

    /// Withdraw every capability owned by `owner`. Returns how many went.
    pub fn remove_owner(&self, owner: ResourceId) -> usize {
        let mut state = self.state.write();
        let ids: Vec<CapabilityId> = state
            .namespaces
            .values()
            .flat_map(|ns| ns.members.values())
            .filter(|cap| cap.owner() == owner)
            .map(|cap| cap.id())
            .collect();

        let removed = ids
            .into_iter()
            .filter(|id| self.remove_locked(&mut state, *id))
            .count();
        debug!(owner = %owner, removed, "Owner capabilities withdrawn");
        removed
    }

    fn remove_locked(&self, state: &mut IndexState, id: CapabilityId) -> bool {
        let Some(Location { namespace, seq }) = state.locations.remove(&id) else {
            return false;
        };
        let Some(ns_index) = state.namespaces.get_mut(&namespace) else {
            return false;
        };
        let Some(capability) = ns_index.members.remove(&seq) else {
            return false;
        };

        for (attr, value) in capability.attributes().iter() {
            if !self.config.indexed_attributes.includes(attr) {
                continue;
            }
            let Some(attr_index) = ns_index.attributes.get_mut(attr.as_str()) else {
                continue;
            };
            for key in bucket_keys(value) {
                if let Some(bucket) = attr_index.buckets.get_mut(&key) {
                    bucket.remove(&seq);
                    if bucket.is_empty() {
                        attr_index.buckets.remove(&key);
                    }
                }
            }
            attr_index.holders -= 1;
            if !value.is_text() {
                attr_index.non_text -= 1;
            }
            if attr_index.holders == 0 {
                ns_index.attributes.remove(attr.as_str());
            }
        }

        if ns_index.members.is_empty() {
            state.namespaces.remove(&namespace);
        }

        debug!(
            capability = %id,
            owner = %capability.owner(),
            namespace = %namespace,
            seq,
            "Capability withdrawn"
        );
        true
    }

    pub fn contains(&self, capability: &Capability) -> bool {
        self.state.read().locations.contains_key(&capability.id())
    }

    pub fn len(&self) -> usize {
        self.state.read().locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().locations.is_empty()
    }

    /// Namespaces with at least one capability, sorted.
    pub fn namespaces(&self) -> Vec<Namespace> {
        self.state.read().namespaces.keys().cloned().collect()
    }

    /// Every capability of `namespace`, in insertion order.
    pub fn capabilities(&self, namespace: &str) -> Vec<Arc<Capability>> {
        self.state
            .read()
            .namespaces
            .get(namespace.trim())
            .map(|ns| ns.members.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn stats(&self) -> IndexStats {
        let state = self.state.read();
        let mut stats = IndexStats {
            namespaces: state.namespaces.len(),
            capabilities: state.locations.len(),
            ..IndexStats::default()
        };
        for ns in state.namespaces.values() {
            stats.indexed_attributes += ns.attributes.len();
            for attr_index in ns.attributes.values() {
                stats.buckets += attr_index.buckets.len();
                stats.bucket_entries += attr_index.buckets.values().map(BTreeSet::len).sum::<usize>();
            }
        }
        stats
    }

    /// Capabilities satisfying `requirement`, in insertion order.
    ///
    /// The result is a lazy iterator over a snapshot of the candidates; each
    /// call sees the index as of that call. No match is an empty iterator.
    pub fn find_matches(&self, requirement: &Requirement) -> Matches {
        let candidates = {
            let state = self.state.read();
            match state.namespaces.get(requirement.namespace().as_str()) {
                Some(ns_index) => self.candidates(ns_index, requirement.filter()),
                None => Vec::new(),
            }
        };
        Matches::new(
            candidates,
            requirement.filter_handle(),
            self.config.obey_mandatory,
        )
    }

    /// Narrow the namespace through equality buckets where they decide the
    /// answer exactly; otherwise every member is a candidate.
    fn candidates(&self, ns_index: &NamespaceIndex, filter: &Filter) -> Vec<Arc<Capability>> {
        let mut sets: Vec<&BTreeSet<u64>> = Vec::new();
        for (attr, value) in filter.required_equalities() {
            if !self.config.indexed_attributes.includes(attr) {
                continue;
            }
            let Some(attr_index) = ns_index.attributes.get(attr) else {
                trace!(attribute = attr, "No member carries attribute");
                return Vec::new();
            };
            if attr_index.non_text > 0 {
                continue;
            }
            match attr_index.buckets.get(value) {
                Some(bucket) => sets.push(bucket),
                None => {
                    trace!(attribute = attr, value, "Empty bucket");
                    return Vec::new();
                }
            }
        }

        sets.sort_by_key(|set| set.len());
        let Some((smallest, rest)) = sets.split_first() else {
            trace!(members = ns_index.members.len(), filter = %filter, "Namespace scan");
            return ns_index.members.values().cloned().collect();
        };

        trace!(
            buckets = sets.len(),
            candidates = smallest.len(),
            filter = %filter,
            "Bucket lookup"
        );
        smallest
            .iter()
            .filter(|seq| rest.iter().all(|set| set.contains(*seq)))
            .filter_map(|seq| ns_index.members.get(seq))
            .cloned()
            .collect()
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        let state = self.state.read();
        assert_eq!(
            state.locations.len(),
            state.namespaces.values().map(|ns| ns.members.len()).sum::<usize>()
        );
        for (namespace, ns_index) in &state.namespaces {
            assert!(!ns_index.members.is_empty());
            for (seq, capability) in &ns_index.members {
                let location = &state.locations[&capability.id()];
                assert_eq!(&location.namespace, namespace);
                assert_eq!(location.seq, *seq);
                for (attr, value) in capability.attributes().iter() {
                    if !self.config.indexed_attributes.includes(attr) {
                        continue;
                    }
                    let attr_index = &ns_index.attributes[attr.as_str()];
                    for key in bucket_keys(value) {
                        assert!(attr_index.buckets[&key].contains(seq));
                    }
                }
            }
            for (attr, attr_index) in &ns_index.attributes {
                let holders = ns_index
                    .members
                    .values()
                    .filter(|cap| cap.attributes().contains_key(attr))
                    .count();
                assert_eq!(attr_index.holders, holders);
                for bucket in attr_index.buckets.values() {
                    assert!(!bucket.is_empty());
                    assert!(bucket.iter().all(|seq| ns_index.members.contains_key(seq)));
                }
            }
        }
    }
}

impl Default for CapabilityIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Bucket keys for one attribute value: one per list element.
fn bucket_keys(value: &AttributeValue) -> BTreeSet<String> {
    value.scalars().into_iter().map(ToString::to_string).collect()
}
