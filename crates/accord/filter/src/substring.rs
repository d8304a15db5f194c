//! Wildcard substring patterns.
//!
//! A pattern is an alternating run of literal segments and wildcards that
//! always begins and ends with a literal (possibly empty). `*foo*` therefore
//! parses to `["", *, "foo", *, ""]`, and runs of `*` collapse to a single
//! wildcard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One piece of a substring pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Literal(String),
    Wildcard,
}

/// A parsed wildcard pattern.
///
/// Deserialized segment lists are rebuilt through the same rules as parsed
/// text, so `["Wildcard"]` reads back as `["", *, ""]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawPattern")]
pub struct SubstringPattern {
    segments: Vec<Segment>,
}

#[derive(Deserialize)]
struct RawPattern {
    segments: Vec<Segment>,
}

impl From<RawPattern> for SubstringPattern {
    fn from(raw: RawPattern) -> Self {
        let mut builder = PatternBuilder::default();
        for segment in raw.segments {
            match segment {
                Segment::Literal(text) => builder.push_str(&text),
                Segment::Wildcard => builder.push_wildcard(),
            }
        }
        builder.finish()
    }
}

impl SubstringPattern {
    /// Parse pattern text. `\` escapes the next character, so `\*` is a
    /// literal star.
    pub fn parse(pattern: &str) -> Self {
        let mut builder = PatternBuilder::default();
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => builder.push_char(escaped),
                    None => builder.push_char('\\'),
                },
                '*' => builder.push_wildcard(),
                other => builder.push_char(other),
            }
        }
        builder.finish()
    }

    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Wildcard))
    }

    /// True for the bare `*` pattern.
    pub fn is_match_all(&self) -> bool {
        matches!(
            self.segments.as_slice(),
            [Segment::Literal(a), Segment::Wildcard, Segment::Literal(b)] if a.is_empty() && b.is_empty()
        )
    }

    /// Literal pieces in order; wildcards sit between consecutive pieces.
    pub fn literals(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Literal(text) => Some(text.as_str()),
                Segment::Wildcard => None,
            })
            .collect()
    }

    pub fn matches(&self, candidate: &str) -> bool {
        let pieces = self.literals();
        if !self.has_wildcard() {
            return pieces.concat() == candidate;
        }
        let Some((&prefix, rest)) = pieces.split_first() else {
            return true;
        };
        let (suffix, interior) = match rest.split_last() {
            Some((&suffix, interior)) => (suffix, interior),
            None => ("", rest),
        };

        if !candidate.starts_with(prefix) {
            return false;
        }
        let mut index = prefix.len();
        for piece in interior {
            match candidate[index..].find(piece) {
                Some(found) => index += found + piece.len(),
                None => return false,
            }
        }
        // The suffix must not overlap what the earlier pieces consumed.
        candidate.len() >= index + suffix.len() && candidate.ends_with(suffix)
    }
}

impl fmt::Display for SubstringPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(&escape_value(text))?,
                Segment::Wildcard => f.write_str("*")?,
            }
        }
        Ok(())
    }
}

/// Accumulates segments while keeping the literal/wildcard alternation.
#[derive(Default)]
pub(crate) struct PatternBuilder {
    segments: Vec<Segment>,
    current: String,
}

impl PatternBuilder {
    pub(crate) fn push_char(&mut self, c: char) {
        self.current.push(c);
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.current.push_str(text);
    }

    pub(crate) fn push_wildcard(&mut self) {
        if matches!(self.segments.last(), Some(Segment::Wildcard)) && self.current.is_empty() {
            return;
        }
        self.segments
            .push(Segment::Literal(std::mem::take(&mut self.current)));
        self.segments.push(Segment::Wildcard);
    }

    pub(crate) fn finish(mut self) -> SubstringPattern {
        self.segments.push(Segment::Literal(self.current));
        SubstringPattern::from_segments(self.segments)
    }
}

/// Escape the characters that are special inside filter values.
pub fn escape_value(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '(' | ')' | '*') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Parse a wildcard pattern into segments.
pub fn parse_substring(pattern: &str) -> SubstringPattern {
    SubstringPattern::parse(pattern)
}

/// Match `candidate` against a parsed pattern.
pub fn match_substring(pattern: &SubstringPattern, candidate: &str) -> bool {
    pattern.matches(candidate)
}
