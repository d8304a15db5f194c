//! Content-addressed sharing of attribute maps.
//!
//! Many capabilities declare identical attribute maps (every export of a
//! bundle carries the same `bundle-symbolic-name`/`bundle-version` pair).
//! The interner hands out one shared [`Attributes`] allocation per distinct
//! map. Interned and non-interned maps compare equal.

use accord_filter::{AttributeValue, Attributes};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::trace;

/// BLAKE3 digest of the canonical JSON encoding of an attribute map.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttributeDigest(pub [u8; 32]);

impl AttributeDigest {
    /// Digest of `attributes`, or `None` when the map cannot be encoded.
    pub fn of(attributes: &Attributes) -> Option<Self> {
        let bytes = serde_json::to_vec(attributes).ok()?;
        Some(Self(*blake3::hash(&bytes).as_bytes()))
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Debug for AttributeDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeDigest({})", &self.to_hex()[..12])
    }
}

/// Thread-safe interning table for attribute maps.
#[derive(Default)]
pub struct AttributeInterner {
    table: Mutex<HashMap<AttributeDigest, Attributes>>,
}

impl AttributeInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle equal to `attributes`.
    ///
    /// Returns the input unchanged when it cannot be encoded or when a
    /// digest collision maps it onto a different table entry.
    pub fn intern(&self, attributes: Attributes) -> Attributes {
        let Some(digest) = AttributeDigest::of(&attributes) else {
            return attributes;
        };

        let mut table = self.table.lock();
        match table.get(&digest) {
            Some(existing) if *existing == attributes => {
                trace!(digest = ?digest, "Attribute map shared");
                existing.clone()
            }
            Some(_) => attributes,
            None => {
                table.insert(digest, attributes.clone());
                attributes
            }
        }
    }

    pub fn intern_map(&self, map: BTreeMap<String, AttributeValue>) -> Attributes {
        self.intern(Attributes::new(map))
    }

    /// Number of distinct maps currently held.
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.lock().is_empty()
    }

    /// Drop entries no one outside the table references. Returns how many
    /// were dropped.
    pub fn purge(&self) -> usize {
        let mut table = self.table.lock();
        let before = table.len();
        table.retain(|_, attributes| attributes.share_count() > 1);
        let dropped = before - table.len();
        if dropped > 0 {
            trace!(dropped, remaining = table.len(), "Interner purged");
        }
        dropped
    }
}

impl fmt::Debug for AttributeInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeInterner")
            .field("entries", &self.len())
            .finish()
    }
}
