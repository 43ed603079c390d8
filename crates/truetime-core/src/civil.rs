//! # Civil Fields
//!
//! The six calendar fields shared by the token and the compact pair, and
//! validated conversion to and from `chrono::NaiveDateTime`. All civil values
//! in this crate are UTC wall-clock values with whole-second resolution.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::ParseError;

/// Earliest year that fits four digits without a leading zero.
pub const MIN_YEAR: i32 = 1000;
/// Latest four-digit year.
pub const MAX_YEAR: i32 = 9999;

/// Names of the fields of a true time token, in token order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Polarity,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Offset,
}

impl Field {
    /// All fields in token order.
    pub const ALL: [Field; 8] = [
        Field::Polarity,
        Field::Year,
        Field::Month,
        Field::Day,
        Field::Hour,
        Field::Minute,
        Field::Second,
        Field::Offset,
    ];

    /// Width of the field inside a token.
    pub fn width(self) -> usize {
        match self {
            Self::Polarity => 1,
            Self::Year => 4,
            Self::Offset => 5,
            Self::Month | Self::Day | Self::Hour | Self::Minute | Self::Second => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Polarity => "polarity",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Offset => "offset",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Year, month, day, hour, minute and second of a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilFields {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
}

impl CivilFields {
    /// Read the fields of a UTC instant. Sub-second components are ignored.
    pub fn from_naive(dt: &NaiveDateTime) -> Self {
        Self {
            year: i64::from(dt.year()),
            month: i64::from(dt.month()),
            day: i64::from(dt.day()),
            hour: i64::from(dt.hour()),
            minute: i64::from(dt.minute()),
            second: i64::from(dt.second()),
        }
    }

    /// Split a `YYYYMMDDHHmmss` integer into fields. The caller is responsible
    /// for checking the stamp has 14 digits.
    pub fn from_stamp(stamp: i64) -> Self {
        Self {
            year: stamp / 10_000_000_000,
            month: stamp / 100_000_000 % 100,
            day: stamp / 1_000_000 % 100,
            hour: stamp / 10_000 % 100,
            minute: stamp / 100 % 100,
            second: stamp % 100,
        }
    }

    /// Pack the fields into a `YYYYMMDDHHmmss` integer.
    pub fn to_stamp(&self) -> i64 {
        self.year * 10_000_000_000
            + self.month * 100_000_000
            + self.day * 1_000_000
            + self.hour * 10_000
            + self.minute * 100
            + self.second
    }

    /// Build the UTC instant these fields describe, naming the first field
    /// that falls outside its calendar range.
    pub fn to_naive(&self) -> Result<NaiveDateTime, ParseError> {
        let year = in_range(Field::Year, self.year, MIN_YEAR.into(), MAX_YEAR.into())?;
        let month = in_range(Field::Month, self.month, 1, 12)?;
        in_range(Field::Day, self.day, 1, 31)?;
        let hour = in_range(Field::Hour, self.hour, 0, 23)?;
        let minute = in_range(Field::Minute, self.minute, 0, 59)?;
        let second = in_range(Field::Second, self.second, 0, 59)?;

        // Day 1..=31 passed the coarse check; the month decides the rest.
        let date = NaiveDate::from_ymd_opt(year as i32, month as u32, self.day as u32)
            .ok_or(ParseError::OutOfRange {
                field: Field::Day,
                value: self.day,
            })?;
        let time = NaiveTime::from_hms_opt(hour as u32, minute as u32, second as u32).ok_or(
            ParseError::OutOfRange {
                field: Field::Second,
                value: self.second,
            },
        )?;
        Ok(date.and_time(time))
    }
}

/// Whether a year can be represented in a token and a compact stamp.
pub fn year_in_range(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Drop sub-second components.
pub fn truncate_to_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_nanosecond(0).unwrap_or(dt)
}

fn in_range(field: Field, value: i64, min: i64, max: i64) -> Result<i64, ParseError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ParseError::OutOfRange { field, value })
    }
}
