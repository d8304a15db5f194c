//! Filter syntax tree

use crate::substring::{escape_value, SubstringPattern};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A parsed filter expression.
///
/// The node set is closed; evaluation matches on it exhaustively.
/// Comparison values are stored unescaped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter {
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    Present(String),
    Equal(String, String),
    Approx(String, String),
    /// `attr>=value`
    GreaterEq(String, String),
    /// `attr<=value`
    LessEq(String, String),
    /// `attr=a*b`. Build it with [`Filter::substring`]: a bare `*` pattern
    /// prints as `(attr=*)` and reads back as `Present`, and a pattern without
    /// a wildcard prints as an equality.
    Substring(String, SubstringPattern),
}

impl Filter {
    /// Attribute compared by this node, if it is a leaf.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Filter::Present(attr)
            | Filter::Equal(attr, _)
            | Filter::Approx(attr, _)
            | Filter::GreaterEq(attr, _)
            | Filter::LessEq(attr, _)
            | Filter::Substring(attr, _) => Some(attr),
            Filter::And(_) | Filter::Or(_) | Filter::Not(_) => None,
        }
    }

    /// Whether this filter places a direct constraint on `attr`: either the
    /// filter itself compares `attr`, or it is an `And` with such a child.
    ///
    /// Deeper nesting does not count; a constraint under `Or`/`Not` may not
    /// apply to every match.
    pub fn constrains(&self, attr: &str) -> bool {
        if self.attribute() == Some(attr) {
            return true;
        }
        match self {
            Filter::And(children) => children.iter().any(|c| c.attribute() == Some(attr)),
            _ => false,
        }
    }

    /// Equality terms every match must satisfy: a top-level `Equal`, or the
    /// `Equal` children of a top-level `And`.
    pub fn required_equalities(&self) -> Vec<(&str, &str)> {
        match self {
            Filter::Equal(attr, value) => vec![(attr.as_str(), value.as_str())],
            Filter::And(children) => children
                .iter()
                .filter_map(|c| match c {
                    Filter::Equal(attr, value) => Some((attr.as_str(), value.as_str())),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Every attribute name mentioned anywhere in the tree.
    pub fn referenced_attributes(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_attributes(&mut names);
        names
    }

    fn collect_attributes<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Filter::And(children) | Filter::Or(children) => {
                for child in children {
                    child.collect_attributes(names);
                }
            }
            Filter::Not(child) => child.collect_attributes(names),
            leaf => {
                if let Some(attr) = leaf.attribute() {
                    names.insert(attr);
                }
            }
        }
    }

    /// `attr=pattern` in the form the parser would produce for its text:
    /// `Present` for a bare `*`, `Equal` when there is no wildcard.
    pub fn substring(attr: impl Into<String>, pattern: SubstringPattern) -> Filter {
        let attr = attr.into();
        if pattern.is_match_all() {
            return Filter::Present(attr);
        }
        if !pattern.has_wildcard() {
            return Filter::Equal(attr, pattern.literals().concat());
        }
        Filter::Substring(attr, pattern)
    }

    /// Conjoin filters; a single filter is returned as-is.
    pub fn all_of(mut filters: Vec<Filter>) -> Filter {
        if filters.len() == 1 {
            filters.remove(0)
        } else {
            Filter::And(filters)
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::And(children) => {
                f.write_str("(&")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
            Filter::Or(children) => {
                f.write_str("(|")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
            Filter::Not(child) => write!(f, "(!{child})"),
            Filter::Present(attr) => write!(f, "({attr}=*)"),
            Filter::Equal(attr, value) => write!(f, "({attr}={})", escape_value(value)),
            Filter::Approx(attr, value) => write!(f, "({attr}~={})", escape_value(value)),
            Filter::GreaterEq(attr, value) => write!(f, "({attr}>={})", escape_value(value)),
            Filter::LessEq(attr, value) => write!(f, "({attr}<={})", escape_value(value)),
            Filter::Substring(attr, pattern) => write!(f, "({attr}={pattern})"),
        }
    }
}
