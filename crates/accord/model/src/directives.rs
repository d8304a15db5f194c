//! Directive maps and the directive names the model understands.
//!
//! Directives configure how a declaration is validated and matched. They
//! are never compared against filters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Packages whose consumers must see the same providers (capabilities).
pub const USES: &str = "uses";
/// Attributes a requirement must mention to match (capabilities).
pub const MANDATORY: &str = "mandatory";
/// `optional` or `mandatory` (requirements).
pub const RESOLUTION: &str = "resolution";
pub const RESOLUTION_OPTIONAL: &str = "optional";
/// Explicit filter text (requirements).
pub const FILTER: &str = "filter";
/// `single` or `multiple` (requirements).
pub const CARDINALITY: &str = "cardinality";
pub const CARDINALITY_SINGLE: &str = "single";
pub const CARDINALITY_MULTIPLE: &str = "multiple";
/// When the declaration takes effect.
pub const EFFECTIVE: &str = "effective";
pub const EFFECTIVE_RESOLVE: &str = "resolve";

/// Immutable directive map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Directives(Arc<BTreeMap<String, String>>);

impl Directives {
    pub fn new(map: BTreeMap<String, String>) -> Self {
        Self(Arc::new(map))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Comma-separated directive value as trimmed, non-empty tokens in
    /// declaration order. An absent directive is an empty list.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.get(name).map(split_list).unwrap_or_default()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

impl Serialize for Directives {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Directives {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::deserialize(deserializer).map(Self::new)
    }
}

impl From<BTreeMap<String, String>> for Directives {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::new(map)
    }
}

impl<K, V> FromIterator<(K, V)> for Directives
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
