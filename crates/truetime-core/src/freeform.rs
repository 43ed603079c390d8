//! Free-form date strings.
//!
//! Strings that are not tokens are handed to `chrono`. Offset-bearing formats
//! keep their own offset; naive formats are read as local wall time through
//! the codec's [`Clock`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::clock::Clock;
use crate::error::TrueTimeError;
use crate::offset::Offset;

/// Offset-bearing formats tried after RFC 3339 and RFC 2822.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%z",
];

/// Naive date-time formats, read as local wall time.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%B %d, %Y %I:%M:%S %p",
];

/// Date-only formats, read as local midnight.
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

/// Parse a free-form date string into a UTC instant and its offset.
///
/// # Errors
///
/// Returns [`TrueTimeError::Format`] if no known format matches, or if the
/// string names a local wall time that does not exist in the clock's zone.
pub fn parse<C: Clock>(input: &str, clock: &C) -> Result<(NaiveDateTime, Offset), TrueTimeError> {
    let s = input.trim();

    if let Some(dt) = parse_with_offset(s) {
        let offset = Offset::from_seconds(dt.offset().local_minus_utc());
        return Ok((dt.naive_utc(), offset));
    }

    let local = parse_naive(s).ok_or_else(|| TrueTimeError::Format {
        input: input.to_string(),
        reason: "unrecognized date format".to_string(),
    })?;
    let offset = clock
        .offset_at_local(&local)
        .ok_or_else(|| TrueTimeError::Format {
            input: input.to_string(),
            reason: format!("local time {local} does not exist in the local time zone"),
        })?;
    let utc = local
        .checked_sub_signed(offset.as_duration())
        .ok_or_else(|| TrueTimeError::Format {
            input: input.to_string(),
            reason: "date out of range".to_string(),
        })?;
    tracing::debug!(%local, offset = offset.minutes(), "read naive date string as local time");
    Ok((utc, offset))
}

fn parse_with_offset(s: &str) -> Option<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        })
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
