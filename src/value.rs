use std::{cmp::Ordering, fmt, str::FromStr};

use rust_decimal::Decimal;

use crate::ast::CompareOp;

/// A scalar value compared by the query language.
///
/// Both literals written in a query and values read out of a document are
/// classified the same way: anything that parses as a decimal number is a
/// [`Value::Number`], everything else is a [`Value::String`].
///
/// # Type Separation
///
/// Numbers and strings never compare with each other. A comparison between
/// a number and a string is simply false, whatever the operator.
///
/// # Examples
///
/// ```
/// use xqr::Value;
///
/// assert!(matches!(Value::parse("42"), Value::Number(_)));
/// assert!(matches!(Value::parse(" 1.5 "), Value::Number(_)));
/// assert!(matches!(Value::parse("1e3"), Value::Number(_)));
/// assert!(matches!(Value::parse("abc"), Value::String(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    /// Decimal number
    Number(Decimal),

    /// Anything that is not a number, kept verbatim
    String(String),
}

/// Parses a decimal number, accepting surrounding whitespace and
/// scientific notation.
pub fn parse_number(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

impl Value {
    /// Classify raw text as a number or a string.
    pub fn parse(text: &str) -> Self {
        match parse_number(text) {
            Some(n) => Value::Number(n),
            None => Value::String(text.to_string()),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Compares `self` (the value found in the document) against `other`
    /// (the literal from the query).
    ///
    /// Mismatched kinds yield `false`. `Contains` on numbers also yields
    /// `false`; the parser rejects it before evaluation.
    pub fn compare(&self, op: CompareOp, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => match op {
                CompareOp::Equal => a == b,
                CompareOp::Greater => a > b,
                CompareOp::Less => a < b,
                CompareOp::Contains => false,
            },
            (Value::String(a), Value::String(b)) => match op {
                CompareOp::Equal => a == b,
                CompareOp::Greater => a.as_str().cmp(b.as_str()) == Ordering::Greater,
                CompareOp::Less => a.as_str().cmp(b.as_str()) == Ordering::Less,
                CompareOp::Contains => a.contains(b.as_str()),
            },
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
        }
    }
}
