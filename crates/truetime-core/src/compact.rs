//! # Compact Pair
//!
//! The numeric encoding of a true time value: `[YYYYMMDDHHmmss, offset]`.
//! The first element is the UTC civil instant packed into a 14-digit integer;
//! the second is the signed offset in minutes. Suitable for two integer
//! database columns. Serializes as a 2-element array.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::civil::{CivilFields, Field};
use crate::error::ParseError;
use crate::offset::Offset;

const MIN_STAMP: i64 = 10_000_000_000_000;
const MAX_STAMP: i64 = 99_999_999_999_999;

/// A validated `[stamp, offset]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(i64, i32)")]
pub struct CompactPair {
    stamp: i64,
    offset: Offset,
}

impl CompactPair {
    /// Validate a raw pair.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::CompactStamp`] if `stamp` is not a 14-digit
    /// positive integer, [`ParseError::OutOfRange`] if any civil field or the
    /// offset is out of range.
    pub fn new(stamp: i64, offset: i64) -> Result<Self, ParseError> {
        let (utc, offset) = Self::decode(stamp, offset)?;
        Ok(Self::encode(&utc, offset))
    }

    /// Pack a UTC instant and offset. The instant's year must be four digits.
    pub fn encode(utc: &NaiveDateTime, offset: Offset) -> Self {
        Self {
            stamp: CivilFields::from_naive(utc).to_stamp(),
            offset,
        }
    }

    /// Unpack a raw pair into its UTC instant and offset.
    pub fn decode(stamp: i64, offset: i64) -> Result<(NaiveDateTime, Offset), ParseError> {
        if !Self::is_stamp(stamp) {
            return Err(ParseError::CompactStamp(stamp));
        }
        let utc = CivilFields::from_stamp(stamp).to_naive()?;
        let offset = Offset::from_minutes(offset).ok_or(ParseError::OutOfRange {
            field: Field::Offset,
            value: offset,
        })?;
        tracing::trace!(stamp, offset = offset.minutes(), "decoded compact pair");
        Ok((utc, offset))
    }

    /// Whether `stamp` rendered in base 10 has exactly 14 digits.
    pub fn is_stamp(stamp: i64) -> bool {
        (MIN_STAMP..=MAX_STAMP).contains(&stamp)
    }

    /// The `YYYYMMDDHHmmss` UTC stamp.
    pub fn stamp(&self) -> i64 {
        self.stamp
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Both elements as plain integers.
    pub fn to_array(&self) -> [i64; 2] {
        [self.stamp, i64::from(self.offset.minutes())]
    }

    /// The UTC instant the stamp describes.
    pub fn utc(&self) -> NaiveDateTime {
        // Every CompactPair is built from a validated instant.
        CivilFields::from_stamp(self.stamp)
            .to_naive()
            .unwrap_or_default()
    }
}

impl TryFrom<(i64, i64)> for CompactPair {
    type Error = ParseError;

    fn try_from((stamp, offset): (i64, i64)) -> Result<Self, Self::Error> {
        Self::new(stamp, offset)
    }
}

impl TryFrom<[i64; 2]> for CompactPair {
    type Error = ParseError;

    fn try_from([stamp, offset]: [i64; 2]) -> Result<Self, Self::Error> {
        Self::new(stamp, offset)
    }
}

impl From<CompactPair> for (i64, i32) {
    fn from(pair: CompactPair) -> Self {
        (pair.stamp, pair.offset.minutes())
    }
}

impl From<CompactPair> for [i64; 2] {
    fn from(pair: CompactPair) -> Self {
        pair.to_array()
    }
}

impl std::fmt::Display for CompactPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.stamp, self.offset.minutes())
    }
}
