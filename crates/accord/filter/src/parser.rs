//! Recursive descent parser for filter text.
//!
//! ```text
//! filter     := '(' filtercomp ')'
//! filtercomp := and | or | not | item
//! and        := '&' filter+
//! or         := '|' filter+
//! not        := '!' filter
//! item       := attr ('=' | '>=' | '<=' | '~=') value
//! ```
//!
//! Whitespace is skipped around parentheses and attribute names but is kept
//! inside values.

use crate::ast::Filter;
use crate::error::{FilterResult, FilterSyntaxError, SyntaxErrorKind};
use crate::substring::PatternBuilder;
use std::str::FromStr;

/// Deepest nesting of `(...)` groups `parse` accepts.
pub const MAX_FILTER_DEPTH: usize = 128;

/// Parse filter text into a [`Filter`].
pub fn parse(text: &str) -> FilterResult<Filter> {
    let mut parser = Parser::new(text);
    parser.skip_whitespace();
    if parser.eof() {
        return Err(parser.error(SyntaxErrorKind::Empty));
    }
    let filter = parser.parse_filter()?;
    if !parser.eof() {
        return Err(parser.error(SyntaxErrorKind::TrailingCharacters));
    }
    Ok(filter)
}

impl FromStr for Filter {
    type Err = FilterSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

enum Comparison {
    Equal,
    Approx,
    GreaterEq,
    LessEq,
}

struct Parser<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn parse_filter(&mut self) -> FilterResult<Filter> {
        self.skip_whitespace();
        if self.depth == MAX_FILTER_DEPTH {
            return Err(self.error(SyntaxErrorKind::TooDeep));
        }
        self.expect('(', SyntaxErrorKind::MissingOpenParen)?;
        self.depth += 1;
        let filter = self.parse_filtercomp()?;
        self.skip_whitespace();
        self.expect(')', SyntaxErrorKind::MissingCloseParen)?;
        self.depth -= 1;
        self.skip_whitespace();
        Ok(filter)
    }

    fn parse_filtercomp(&mut self) -> FilterResult<Filter> {
        self.skip_whitespace();
        match self.peek() {
            Some('&') => {
                self.pos += 1;
                Ok(Filter::And(self.parse_operands('&')?))
            }
            Some('|') => {
                self.pos += 1;
                Ok(Filter::Or(self.parse_operands('|')?))
            }
            Some('!') => {
                self.pos += 1;
                let start = self.pos;
                let mut operands = self.parse_operands('!')?;
                if operands.len() != 1 {
                    return Err(self.error_at(start, SyntaxErrorKind::NotArity));
                }
                Ok(Filter::Not(Box::new(operands.remove(0))))
            }
            _ => self.parse_item(),
        }
    }

    fn parse_operands(&mut self, op: char) -> FilterResult<Vec<Filter>> {
        let mut operands = Vec::new();
        self.skip_whitespace();
        while self.peek() == Some('(') {
            operands.push(self.parse_filter()?);
        }
        if operands.is_empty() {
            let kind = if op == '!' {
                SyntaxErrorKind::NotArity
            } else {
                SyntaxErrorKind::EmptyComposite(op)
            };
            return Err(self.error(kind));
        }
        Ok(operands)
    }

    fn parse_item(&mut self) -> FilterResult<Filter> {
        let attr = self.parse_attribute()?;
        let comparison = self.parse_comparison()?;
        match comparison {
            Comparison::Equal => self.parse_equality(attr),
            Comparison::Approx => Ok(Filter::Approx(attr, self.parse_value()?)),
            Comparison::GreaterEq => Ok(Filter::GreaterEq(attr, self.parse_value()?)),
            Comparison::LessEq => Ok(Filter::LessEq(attr, self.parse_value()?)),
        }
    }

    fn parse_attribute(&mut self) -> FilterResult<String> {
        self.skip_whitespace();
        let start = self.pos;
        let mut attr = String::new();
        while let Some(c) = self.peek() {
            if matches!(c, '=' | '<' | '>' | '~' | '(' | ')') {
                break;
            }
            attr.push(c);
            self.pos += 1;
        }
        let trimmed = attr.trim_end();
        if trimmed.is_empty() {
            return Err(self.error_at(start, SyntaxErrorKind::EmptyAttribute));
        }
        Ok(trimmed.to_string())
    }

    fn parse_comparison(&mut self) -> FilterResult<Comparison> {
        let start = self.pos;
        let comparison = match self.peek() {
            Some('=') => {
                self.pos += 1;
                return Ok(Comparison::Equal);
            }
            Some('~') => Comparison::Approx,
            Some('>') => Comparison::GreaterEq,
            Some('<') => Comparison::LessEq,
            Some(_) | None => return Err(self.error(SyntaxErrorKind::MissingOperator)),
        };
        self.pos += 1;
        if self.peek() != Some('=') {
            let token = self.chars[start].to_string();
            return Err(self.error_at(start, SyntaxErrorKind::UnknownOperator(token)));
        }
        self.pos += 1;
        Ok(comparison)
    }

    /// Value for `=`, where unescaped `*` introduces a wildcard.
    fn parse_equality(&mut self, attr: String) -> FilterResult<Filter> {
        let mut builder = PatternBuilder::default();
        loop {
            match self.peek() {
                None => return Err(self.error(SyntaxErrorKind::MissingCloseParen)),
                Some(')') => break,
                Some('(') => return Err(self.error(SyntaxErrorKind::UnescapedParen)),
                Some('*') => {
                    builder.push_wildcard();
                    self.pos += 1;
                }
                Some('\\') => {
                    builder.push_char(self.escaped()?);
                }
                Some(c) => {
                    builder.push_char(c);
                    self.pos += 1;
                }
            }
        }

        Ok(Filter::substring(attr, builder.finish()))
    }

    /// Value for `~=`, `>=` and `<=`; `*` is an ordinary character here.
    fn parse_value(&mut self) -> FilterResult<String> {
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error(SyntaxErrorKind::MissingCloseParen)),
                Some(')') => return Ok(value),
                Some('(') => return Err(self.error(SyntaxErrorKind::UnescapedParen)),
                Some('\\') => value.push(self.escaped()?),
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    /// Consume `\x` and return `x`.
    fn escaped(&mut self) -> FilterResult<char> {
        self.pos += 1;
        match self.peek() {
            Some(c) => {
                self.pos += 1;
                Ok(c)
            }
            None => Err(self.error(SyntaxErrorKind::DanglingEscape)),
        }
    }

    fn expect(&mut self, expected: char, kind: SyntaxErrorKind) -> FilterResult<()> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(kind))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn error(&self, kind: SyntaxErrorKind) -> FilterSyntaxError {
        self.error_at(self.pos, kind)
    }

    fn error_at(&self, position: usize, kind: SyntaxErrorKind) -> FilterSyntaxError {
        FilterSyntaxError {
            kind,
            position,
            filter: self.text.to_string(),
        }
    }
}
