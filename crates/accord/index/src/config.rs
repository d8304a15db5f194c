//! Index configuration

use crate::error::IndexResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which attributes get equality buckets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeSelection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl AttributeSelection {
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    pub fn includes(&self, attr: &str) -> bool {
        match self {
            AttributeSelection::All => true,
            AttributeSelection::Only(names) => names.contains(attr),
        }
    }
}

/// Configuration for a [`crate::CapabilityIndex`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Attributes maintained in equality buckets. Queries on other
    /// attributes scan the namespace.
    pub indexed_attributes: AttributeSelection,
    /// Also require the requirement filter to constrain every mandatory
    /// attribute of a candidate.
    pub obey_mandatory: bool,
}

impl IndexConfig {
    pub fn from_json(text: &str) -> IndexResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_indexed_attributes(mut self, selection: AttributeSelection) -> Self {
        self.indexed_attributes = selection;
        self
    }

    pub fn with_obey_mandatory(mut self, obey: bool) -> Self {
        self.obey_mandatory = obey;
        self
    }
}
