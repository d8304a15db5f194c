//! Typed attribute values and immutable attribute maps

use crate::version::{Version, VersionRange};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// A typed attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    String(String),
    Long(i64),
    Double(f64),
    Version(Version),
    /// Only meaningful on requirements, where it becomes a range test.
    VersionRange(VersionRange),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// True for values compared as plain text (strings, and lists of them).
    pub fn is_text(&self) -> bool {
        match self {
            AttributeValue::String(_) => true,
            AttributeValue::List(items) => items.iter().all(AttributeValue::is_text),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Scalar elements, with nested lists flattened.
    pub fn scalars(&self) -> Vec<&AttributeValue> {
        let mut out = Vec::new();
        self.collect_scalars(&mut out);
        out
    }

    fn collect_scalars<'a>(&'a self, out: &mut Vec<&'a AttributeValue>) {
        match self {
            AttributeValue::List(items) => {
                for item in items {
                    item.collect_scalars(out);
                }
            }
            scalar => out.push(scalar),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::Long(n) => write!(f, "{n}"),
            AttributeValue::Double(n) => write!(f, "{n}"),
            AttributeValue::Version(v) => write!(f, "{v}"),
            AttributeValue::VersionRange(r) => write!(f, "{r}"),
            AttributeValue::List(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Long(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Double(value)
    }
}

impl From<Version> for AttributeValue {
    fn from(value: Version) -> Self {
        AttributeValue::Version(value)
    }
}

impl From<VersionRange> for AttributeValue {
    fn from(value: VersionRange) -> Self {
        AttributeValue::VersionRange(value)
    }
}

impl<T: Into<AttributeValue>> From<Vec<T>> for AttributeValue {
    fn from(values: Vec<T>) -> Self {
        AttributeValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Read-only access to attributes by name.
///
/// The evaluator only needs lookups, so callers can evaluate filters against
/// whatever map they already hold.
pub trait AttributeLookup {
    fn lookup(&self, name: &str) -> Option<&AttributeValue>;
}

impl AttributeLookup for BTreeMap<String, AttributeValue> {
    fn lookup(&self, name: &str) -> Option<&AttributeValue> {
        self.get(name)
    }
}

impl AttributeLookup for HashMap<String, AttributeValue> {
    fn lookup(&self, name: &str) -> Option<&AttributeValue> {
        self.get(name)
    }
}

/// Immutable, shareable attribute map.
///
/// Cloning is a reference-count bump; the map itself is never mutated after
/// construction. Keys iterate in sorted order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes(Arc<BTreeMap<String, AttributeValue>>);

impl Attributes {
    pub fn new(map: BTreeMap<String, AttributeValue>) -> Self {
        Self(Arc::new(map))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, AttributeValue> {
        &self.0
    }

    /// New map with `name` set to `value`; `self` is left untouched.
    pub fn with(&self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        let mut map = (*self.0).clone();
        map.insert(name.into(), value.into());
        Self::new(map)
    }

    /// Number of live handles sharing this map.
    pub fn share_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// True when both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Attributes) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Serialize for Attributes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::deserialize(deserializer).map(Self::new)
    }
}

impl AttributeLookup for Attributes {
    fn lookup(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }
}

impl From<BTreeMap<String, AttributeValue>> for Attributes {
    fn from(map: BTreeMap<String, AttributeValue>) -> Self {
        Self::new(map)
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
