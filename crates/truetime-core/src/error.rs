//! # Error Types
//!
//! Every failure in the codec surfaces as a [`TrueTimeError`]. The four
//! variants keep the distinction between the ways construction and reading
//! can go wrong:
//!
//! - `InvalidInput`: the argument is not one of the accepted input shapes.
//! - `Format`: a free-form string could not be parsed as a date.
//! - `Parse`: a token or compact pair had the right shape but failed
//!   structural validation. Carries a [`ParseError`] naming the field and value.
//! - `Uninitialized`: a view was requested from an empty [`TrueTimeCell`].
//!
//! [`TrueTimeCell`]: crate::cell::TrueTimeCell

use thiserror::Error;

use crate::civil::Field;

/// Top-level error type for true time construction, decoding and views.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrueTimeError {
    /// The construction argument is not one of the accepted shapes.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A free-form string could not be parsed as a date.
    #[error("invalid date format {input:?}: {reason}")]
    Format {
        /// The string as supplied by the caller.
        input: String,
        /// Why the date parser rejected it.
        reason: String,
    },

    /// A token or compact pair failed structural validation.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A view was requested before any state was loaded.
    #[error("uninitialized state: {0}")]
    Uninitialized(&'static str),
}

/// Structural decode failure for tokens and compact pairs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token does not have exactly the expected number of characters.
    #[error("token must be {expected} characters, got {actual}")]
    Length {
        /// Required character count.
        expected: usize,
        /// Character count of the input.
        actual: usize,
    },

    /// The token contains a character outside the permitted set.
    #[error("invalid character {ch:?} at position {index}")]
    InvalidCharacter {
        /// Zero-based character position.
        index: usize,
        /// The offending character.
        ch: char,
    },

    /// Splitting on the delimiter did not yield the expected field count.
    #[error("token must have {expected} fields, got {actual}")]
    FieldCount {
        /// Required field count.
        expected: usize,
        /// Field count of the input.
        actual: usize,
    },

    /// A token field has the wrong width.
    #[error("{field} field must be {expected} characters wide, got {value:?}")]
    FieldWidth {
        /// The field in question.
        field: Field,
        /// Required width.
        expected: usize,
        /// The field text as found.
        value: String,
    },

    /// A token field is not numeric.
    #[error("{field} field is not numeric: {value:?}")]
    NotNumeric {
        /// The field in question.
        field: Field,
        /// The field text as found.
        value: String,
    },

    /// A numeric field is outside its calendar range.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// The field in question.
        field: Field,
        /// The decoded value.
        value: i64,
    },

    /// The compact stamp is not a 14-digit positive integer.
    #[error("compact stamp must be a 14-digit integer, got {0}")]
    CompactStamp(i64),
}

/// Error loading [`CodecConfig`](crate::config::CodecConfig) from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but does not hold a valid value.
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        /// Name of the environment variable.
        var: &'static str,
        /// Raw value found in the environment.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}
