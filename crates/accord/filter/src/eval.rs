//! Filter evaluation against attribute maps.
//!
//! Evaluation never fails. A missing attribute, an operand that does not
//! parse as the attribute's type, or an ordering between incomparable values
//! is simply a non-match.

use crate::ast::Filter;
use crate::substring::SubstringPattern;
use crate::value::{AttributeLookup, AttributeValue};
use crate::version::{Version, VersionRange};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug)]
enum Op {
    Equal,
    Approx,
    GreaterEq,
    LessEq,
}

/// Evaluate `filter` against `attributes`.
pub fn evaluate<A: AttributeLookup + ?Sized>(filter: &Filter, attributes: &A) -> bool {
    match filter {
        Filter::And(children) => children.iter().all(|c| evaluate(c, attributes)),
        Filter::Or(children) => children.iter().any(|c| evaluate(c, attributes)),
        Filter::Not(child) => !evaluate(child, attributes),
        Filter::Present(attr) => attributes.lookup(attr).is_some(),
        Filter::Equal(attr, operand) => compare_attr(attributes, attr, Op::Equal, operand),
        Filter::Approx(attr, operand) => compare_attr(attributes, attr, Op::Approx, operand),
        Filter::GreaterEq(attr, operand) => {
            compare_attr(attributes, attr, Op::GreaterEq, operand)
        }
        Filter::LessEq(attr, operand) => compare_attr(attributes, attr, Op::LessEq, operand),
        Filter::Substring(attr, pattern) => attributes
            .lookup(attr)
            .is_some_and(|value| substring_matches(value, pattern)),
    }
}

impl Filter {
    /// Whether `attributes` satisfy this filter.
    pub fn matches<A: AttributeLookup + ?Sized>(&self, attributes: &A) -> bool {
        evaluate(self, attributes)
    }
}

fn compare_attr<A: AttributeLookup + ?Sized>(
    attributes: &A,
    attr: &str,
    op: Op,
    operand: &str,
) -> bool {
    attributes
        .lookup(attr)
        .is_some_and(|value| compare(value, op, operand))
}

fn compare(value: &AttributeValue, op: Op, operand: &str) -> bool {
    match value {
        AttributeValue::List(items) => items.iter().any(|item| compare(item, op, operand)),
        AttributeValue::String(s) => match op {
            Op::Equal => s == operand,
            Op::Approx => approx_eq(s, operand),
            Op::GreaterEq => s.as_str() >= operand,
            Op::LessEq => s.as_str() <= operand,
        },
        AttributeValue::Long(n) => operand
            .trim()
            .parse::<i64>()
            .is_ok_and(|rhs| holds(n.cmp(&rhs), op)),
        AttributeValue::Double(n) => operand
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(|rhs| n.partial_cmp(&rhs))
            .is_some_and(|ord| holds(ord, op)),
        AttributeValue::Version(v) => {
            Version::parse(operand).is_ok_and(|rhs| holds(v.cmp(&rhs), op))
        }
        AttributeValue::VersionRange(range) => match op {
            Op::Equal | Op::Approx => VersionRange::parse(operand).is_ok_and(|rhs| &rhs == range),
            Op::GreaterEq | Op::LessEq => false,
        },
    }
}

fn holds(ord: Ordering, op: Op) -> bool {
    match op {
        Op::Equal | Op::Approx => ord == Ordering::Equal,
        Op::GreaterEq => ord != Ordering::Less,
        Op::LessEq => ord != Ordering::Greater,
    }
}

/// Case-insensitive comparison that ignores all whitespace.
fn approx_eq(lhs: &str, rhs: &str) -> bool {
    let normalize = |s: &str| {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect::<String>()
    };
    normalize(lhs) == normalize(rhs)
}

fn substring_matches(value: &AttributeValue, pattern: &SubstringPattern) -> bool {
    match value {
        AttributeValue::List(items) => items.iter().any(|item| substring_matches(item, pattern)),
        AttributeValue::String(s) => pattern.matches(s),
        scalar => pattern.matches(&scalar.to_string()),
    }
}
