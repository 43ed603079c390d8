//! # Construction Input
//!
//! [`TrueTimeInput`] is the set of things a true time can be built from.
//! [`TrueTimeInput::shape`] resolves an input to exactly one [`Shape`],
//! trying the shapes in a fixed priority order:
//!
//! 1. a compact pair whose first element is a 14-digit integer,
//! 2. a token-shaped string (27 characters of digits and delimiters, or any
//!    string containing the token delimiter),
//! 3. any other non-empty string, handed to the free-form date parser,
//! 4. a native `chrono` instant, or nothing at all (the current instant).
//!
//! Dynamically typed callers can go through [`TrueTimeInput::from_json`].

use chrono::{DateTime, FixedOffset, Offset as _, TimeZone};
use serde_json::Value;

use crate::compact::CompactPair;
use crate::error::TrueTimeError;
use crate::token::{Token, DELIMITER};

/// Anything a true time can be constructed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrueTimeInput {
    /// `[YYYYMMDDHHmmss, offset minutes]`.
    Pair(i64, i64),
    /// A token or a free-form date string.
    Text(String),
    /// A native instant with its own offset.
    Instant(DateTime<FixedOffset>),
    /// No input: use the current instant.
    Now,
}

/// The shape an input resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'a> {
    Compact { stamp: i64, offset: i64 },
    Token(&'a str),
    FreeForm(&'a str),
    Instant(&'a DateTime<FixedOffset>),
    Now,
}

impl Shape<'_> {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Compact { .. } => "compact",
            Self::Token(_) => "token",
            Self::FreeForm(_) => "free-form",
            Self::Instant(_) => "instant",
            Self::Now => "now",
        }
    }
}

impl TrueTimeInput {
    /// Resolve the input to a single shape.
    ///
    /// # Errors
    ///
    /// Returns [`TrueTimeError::InvalidInput`] for a pair whose first element
    /// is not a 14-digit integer: no other shape accepts two numbers.
    pub fn shape(&self) -> Result<Shape<'_>, TrueTimeError> {
        match self {
            Self::Pair(stamp, offset) => {
                if CompactPair::is_stamp(*stamp) {
                    Ok(Shape::Compact {
                        stamp: *stamp,
                        offset: *offset,
                    })
                } else {
                    Err(TrueTimeError::InvalidInput(format!(
                        "pair [{stamp}, {offset}] is not a compact pair: first element must be a 14-digit integer"
                    )))
                }
            }
            Self::Text(s) if s.is_empty() => Ok(Shape::Now),
            Self::Text(s) if Token::is_token_shaped(s) || s.contains(DELIMITER) => {
                Ok(Shape::Token(s))
            }
            Self::Text(s) => Ok(Shape::FreeForm(s)),
            Self::Instant(dt) => Ok(Shape::Instant(dt)),
            Self::Now => Ok(Shape::Now),
        }
    }

    /// Interpret a JSON value.
    ///
    /// `null` is the current instant, a string is text, and a 2-element array
    /// of integral numbers is a pair. Floats with no fractional part, such as
    /// `20160815044745.0`, count as integers.
    ///
    /// # Errors
    ///
    /// Returns [`TrueTimeError::InvalidInput`] for every other value.
    pub fn from_json(value: &Value) -> Result<Self, TrueTimeError> {
        match value {
            Value::Null => Ok(Self::Now),
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Array(items) if items.len() == 2 => {
                match (integral(&items[0]), integral(&items[1])) {
                    (Some(stamp), Some(offset)) => Ok(Self::Pair(stamp, offset)),
                    _ => Err(TrueTimeError::InvalidInput(format!(
                        "array elements must be integers, got {value}"
                    ))),
                }
            }
            Value::Array(items) => Err(TrueTimeError::InvalidInput(format!(
                "array input must have exactly 2 elements, got {}",
                items.len()
            ))),
            other => Err(TrueTimeError::InvalidInput(format!(
                "unsupported input type: {}",
                json_type_name(other)
            ))),
        }
    }
}

/// The value as an `i64` if it is a whole number in range.
fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        let f = value.as_f64()?;
        let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
        (f.fract() == 0.0 && in_range).then_some(f as i64)
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<(i64, i64)> for TrueTimeInput {
    fn from((stamp, offset): (i64, i64)) -> Self {
        Self::Pair(stamp, offset)
    }
}

impl From<[i64; 2]> for TrueTimeInput {
    fn from([stamp, offset]: [i64; 2]) -> Self {
        Self::Pair(stamp, offset)
    }
}

impl From<CompactPair> for TrueTimeInput {
    fn from(pair: CompactPair) -> Self {
        let [stamp, offset] = pair.to_array();
        Self::Pair(stamp, offset)
    }
}

impl From<&str> for TrueTimeInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for TrueTimeInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&Token> for TrueTimeInput {
    fn from(token: &Token) -> Self {
        Self::Text(token.as_str().to_string())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TrueTimeInput {
    fn from(dt: DateTime<Tz>) -> Self {
        let fixed = dt.offset().fix();
        Self::Instant(dt.with_timezone(&fixed))
    }
}

impl<T: Into<TrueTimeInput>> From<Option<T>> for TrueTimeInput {
    fn from(input: Option<T>) -> Self {
        input.map_or(Self::Now, Into::into)
    }
}
