//! # UTC Offsets
//!
//! An [`Offset`] is a signed number of minutes east of UTC. The token stores
//! its sign separately from its magnitude, so the magnitude must fit the
//! 5-digit offset field.
//!
//! Zero is always non-negative: there is no `-0` polarity.

use serde::{Deserialize, Serialize};

/// Largest offset magnitude, in minutes, the 5-digit token field can hold.
pub const MAX_OFFSET_MAGNITUDE: u32 = 99_999;

/// Sign of an offset as carried in the first token field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Offset of zero or east of UTC. Encoded as `0`.
    NonNegative,
    /// Offset west of UTC. Encoded as `-`.
    Negative,
}

impl Polarity {
    /// The character written into the polarity field.
    pub fn as_char(self) -> char {
        match self {
            Self::NonNegative => '0',
            Self::Negative => '-',
        }
    }

    /// Read a polarity field. `-` is negative; anything else is non-negative.
    pub fn from_char(c: char) -> Self {
        if c == '-' {
            Self::Negative
        } else {
            Self::NonNegative
        }
    }

    /// `1` or `-1`.
    pub fn signum(self) -> i32 {
        match self {
            Self::NonNegative => 1,
            Self::Negative => -1,
        }
    }
}

/// A UTC offset in whole minutes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i32")]
pub struct Offset(i32);

impl Offset {
    /// UTC itself.
    pub const UTC: Offset = Offset(0);

    /// Create an offset, returning `None` when the magnitude exceeds
    /// [`MAX_OFFSET_MAGNITUDE`].
    pub fn from_minutes(minutes: i64) -> Option<Self> {
        if minutes.unsigned_abs() > u64::from(MAX_OFFSET_MAGNITUDE) {
            return None;
        }
        i32::try_from(minutes).ok().map(Self)
    }

    /// Create an offset from seconds east of UTC, truncating toward zero.
    pub fn from_seconds(seconds: i32) -> Self {
        // |seconds| < 86_400 for any chrono offset, so this never leaves range.
        Self(seconds / 60)
    }

    /// Build from a token's polarity and magnitude fields.
    pub fn from_polarity(polarity: Polarity, magnitude: u32) -> Option<Self> {
        Self::from_minutes(i64::from(polarity.signum()) * i64::from(magnitude))
    }

    /// Signed minutes east of UTC.
    pub fn minutes(self) -> i32 {
        self.0
    }

    /// Absolute value in minutes.
    pub fn magnitude(self) -> u32 {
        self.0.unsigned_abs()
    }

    pub fn polarity(self) -> Polarity {
        if self.0 < 0 {
            Polarity::Negative
        } else {
            Polarity::NonNegative
        }
    }

    /// The offset as a `chrono::Duration`, for shifting a UTC instant.
    pub fn as_duration(self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.0))
    }
}

impl TryFrom<i64> for Offset {
    type Error = String;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes).ok_or_else(|| {
            format!("offset magnitude must not exceed {MAX_OFFSET_MAGNITUDE} minutes, got {minutes}")
        })
    }
}

impl From<Offset> for i32 {
    fn from(offset: Offset) -> Self {
        offset.0
    }
}

impl std::fmt::Display for Offset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let mag = self.magnitude();
        write!(f, "{sign}{:02}:{:02}", mag / 60, mag % 60)
    }
}
