//! Versions and version ranges
//!
//! A version is `major[.minor[.micro[.qualifier]]]`. Missing numeric parts
//! default to zero and a missing qualifier is empty. Ordering compares the
//! numeric parts first, then the qualifier as a plain string.
//!
//! A range is either an interval (`[1.0,2.0)`, `(1.0,2.0]`, ...) or a bare
//! version, which means "this version or anything later".

use crate::ast::Filter;
use crate::error::VersionError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A four-part version.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    pub qualifier: String,
}

impl Version {
    pub fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: String::new(),
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = qualifier.into();
        self
    }

    /// The `0.0.0` version.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(VersionError::Empty);
        }

        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() > 4 {
            return Err(VersionError::TooManyComponents(text.to_string()));
        }

        let number = |idx: usize| -> Result<u32, VersionError> {
            match parts.get(idx) {
                None => Ok(0),
                Some(raw) => raw
                    .parse::<u32>()
                    .map_err(|_| VersionError::InvalidNumber((*raw).to_string())),
            }
        };

        let qualifier = match parts.get(3) {
            None => String::new(),
            Some(raw) => {
                let valid = !raw.is_empty()
                    && raw
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'));
                if !valid {
                    return Err(VersionError::InvalidQualifier((*raw).to_string()));
                }
                (*raw).to_string()
            }
        };

        Ok(Self {
            major: number(0)?,
            minor: number(1)?,
            micro: number(2)?,
            qualifier,
        })
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if !self.qualifier.is_empty() {
            write!(f, ".{}", self.qualifier)?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Version::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// An interval of versions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VersionRange {
    pub floor: Version,
    pub floor_inclusive: bool,
    /// `None` means unbounded.
    pub ceiling: Option<Version>,
    pub ceiling_inclusive: bool,
}

impl VersionRange {
    /// `[floor, ∞)`
    pub fn at_least(floor: Version) -> Self {
        Self {
            floor,
            floor_inclusive: true,
            ceiling: None,
            ceiling_inclusive: false,
        }
    }

    pub fn parse(text: &str) -> Result<Self, VersionError> {
        let text = text.trim();
        let Some(first) = text.chars().next() else {
            return Err(VersionError::Empty);
        };
        if first != '[' && first != '(' {
            return Ok(Self::at_least(Version::parse(text)?));
        }

        let last = text.chars().last().unwrap_or(first);
        if text.len() < 2 || (last != ']' && last != ')') {
            return Err(VersionError::InvalidRange(text.to_string()));
        }

        let inner = &text[1..text.len() - 1];
        let Some((floor, ceiling)) = inner.split_once(',') else {
            return Err(VersionError::InvalidRange(text.to_string()));
        };
        if ceiling.contains(',') {
            return Err(VersionError::InvalidRange(text.to_string()));
        }

        let floor = Version::parse(floor)?;
        let ceiling = Version::parse(ceiling)?;
        if floor > ceiling {
            return Err(VersionError::InvertedRange {
                floor: floor.to_string(),
                ceiling: ceiling.to_string(),
            });
        }

        Ok(Self {
            floor,
            floor_inclusive: first == '[',
            ceiling: Some(ceiling),
            ceiling_inclusive: last == ']',
        })
    }

    pub fn includes(&self, version: &Version) -> bool {
        let above_floor = if self.floor_inclusive {
            version >= &self.floor
        } else {
            version > &self.floor
        };
        if !above_floor {
            return false;
        }
        match &self.ceiling {
            None => true,
            Some(ceiling) if self.ceiling_inclusive => version <= ceiling,
            Some(ceiling) => version < ceiling,
        }
    }

    /// Filter accepting exactly the versions in this range for `attr`.
    ///
    /// Exclusive bounds are written as negated inclusive comparisons since
    /// the filter language has no strict operators.
    pub fn to_filter(&self, attr: &str) -> Filter {
        let floor = self.floor.to_string();
        let mut clauses = vec![if self.floor_inclusive {
            Filter::GreaterEq(attr.to_string(), floor)
        } else {
            Filter::Not(Box::new(Filter::LessEq(attr.to_string(), floor)))
        }];

        if let Some(ceiling) = &self.ceiling {
            let ceiling = ceiling.to_string();
            clauses.push(if self.ceiling_inclusive {
                Filter::LessEq(attr.to_string(), ceiling)
            } else {
                Filter::Not(Box::new(Filter::GreaterEq(attr.to_string(), ceiling)))
            });
        }

        if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            Filter::And(clauses)
        }
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ceiling {
            None if self.floor_inclusive => write!(f, "{}", self.floor),
            None => write!(f, "({},)", self.floor),
            Some(ceiling) => write!(
                f,
                "{}{},{}{}",
                if self.floor_inclusive { '[' } else { '(' },
                self.floor,
                ceiling,
                if self.ceiling_inclusive { ']' } else { ')' }
            ),
        }
    }
}

impl Serialize for VersionRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        VersionRange::parse(&text).map_err(serde::de::Error::custom)
    }
}
