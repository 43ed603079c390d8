//! # True Time Values
//!
//! A [`TrueTime`] pairs a UTC instant (whole seconds) with the UTC offset it
//! was captured under. It is immutable: the canonical [`Token`] is derived
//! once at construction and every later read returns that same token.
//!
//! ## Invariants
//!
//! - The stored instant is UTC. The offset only affects the relative views
//!   and never changes the stored instant.
//! - The year is four digits, so the token is always 27 characters and the
//!   compact stamp always 14 digits.
//! - Values built from a token, from a compact pair or from an instant are
//!   indistinguishable once constructed: decoding always re-encodes.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDateTime, Offset as _, TimeZone};
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::civil::{self, truncate_to_seconds};
use crate::compact::CompactPair;
use crate::error::TrueTimeError;
use crate::input::TrueTimeInput;
use crate::offset::Offset;
use crate::token::Token;

/// A UTC instant together with its originating UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrueTime {
    utc: NaiveDateTime,
    offset: Offset,
    token: Token,
}

impl TrueTime {
    /// Construct from any accepted input using the system clock.
    ///
    /// See [`Codec::construct`](crate::codec::Codec::construct) for the
    /// resolution order and errors.
    pub fn new(input: impl Into<TrueTimeInput>) -> Result<Self, TrueTimeError> {
        crate::codec::Codec::system().construct(input)
    }

    /// The current instant with the host's current offset.
    pub fn now() -> Result<Self, TrueTimeError> {
        crate::codec::Codec::system().now()
    }

    /// Construct from a UTC instant and an offset. Sub-seconds are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`TrueTimeError::InvalidInput`] if the year is not four digits.
    pub fn from_parts(utc: NaiveDateTime, offset: Offset) -> Result<Self, TrueTimeError> {
        if !civil::year_in_range(utc.year()) {
            return Err(TrueTimeError::InvalidInput(format!(
                "year {} is outside {}..={}",
                utc.year(),
                civil::MIN_YEAR,
                civil::MAX_YEAR
            )));
        }
        Ok(Self::encoded(truncate_to_seconds(utc), offset))
    }

    /// Construct from a native instant, keeping its own offset.
    pub fn from_instant<Tz: TimeZone>(dt: &DateTime<Tz>) -> Result<Self, TrueTimeError> {
        let offset = Offset::from_seconds(dt.offset().fix().local_minus_utc());
        Self::from_parts(dt.naive_utc(), offset)
    }

    /// Strictly decode a token.
    ///
    /// # Errors
    ///
    /// Returns [`TrueTimeError::Parse`] for any malformed token.
    pub fn from_token(s: &str) -> Result<Self, TrueTimeError> {
        let (utc, offset) = Token::decode(s)?;
        Ok(Self::encoded(utc, offset))
    }

    /// Decode a raw compact pair.
    ///
    /// # Errors
    ///
    /// Returns [`TrueTimeError::Parse`] if the stamp is not 14 digits or any
    /// field is out of range.
    pub fn from_compact(stamp: i64, offset: i64) -> Result<Self, TrueTimeError> {
        let (utc, offset) = CompactPair::decode(stamp, offset)?;
        Ok(Self::encoded(utc, offset))
    }

    fn encoded(utc: NaiveDateTime, offset: Offset) -> Self {
        let token = Token::encode(&utc, offset);
        Self { utc, offset, token }
    }

    /// The canonical token. Computed once at construction.
    pub fn encode(&self) -> &Token {
        &self.token
    }

    /// The canonical token as a string slice.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// `[YYYYMMDDHHmmss, offset]` of the UTC instant.
    pub fn compact(&self) -> CompactPair {
        CompactPair::encode(&self.utc, self.offset)
    }

    /// The stored UTC instant.
    pub fn utc(&self) -> NaiveDateTime {
        self.utc
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// The UTC instant shifted by the offset: the wall-clock time where it
    /// was captured.
    pub fn local(&self) -> NaiveDateTime {
        // Four-digit years shifted by at most 99_999 minutes stay far inside
        // chrono's range.
        self.utc
            .checked_add_signed(self.offset.as_duration())
            .unwrap_or(self.utc)
    }
}

impl std::fmt::Display for TrueTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token.as_str())
    }
}

impl FromStr for TrueTime {
    type Err = TrueTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

impl From<&TrueTime> for CompactPair {
    fn from(tt: &TrueTime) -> Self {
        tt.compact()
    }
}

impl From<CompactPair> for TrueTime {
    fn from(pair: CompactPair) -> Self {
        Self::encoded(pair.utc(), pair.offset())
    }
}

impl Serialize for TrueTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.token.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TrueTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TrueTimeVisitor)
    }
}

struct TrueTimeVisitor;

impl<'de> Visitor<'de> for TrueTimeVisitor {
    type Value = TrueTime;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a true time token or a [stamp, offset] pair")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TrueTime, E> {
        TrueTime::from_token(v).map_err(E::custom)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TrueTime, A::Error> {
        let stamp: i64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let offset: i64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(3, &self));
        }
        TrueTime::from_compact(stamp, offset).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::token::DELIMITER;
    use chrono::{FixedOffset, NaiveDate, Timelike, Utc};

    fn scenario() -> TrueTime {
        let dt = FixedOffset::east_opt(480 * 60)
            .unwrap()
            .with_ymd_and_hms(2016, 8, 15, 12, 47, 45)
            .unwrap();
        TrueTime::from_instant(&dt).unwrap()
    }

    #[test]
    fn instant_is_stored_as_utc() {
        let tt = scenario();
        assert_eq!(tt.utc().to_string(), "2016-08-15 04:47:45");
        assert_eq!(tt.local().to_string(), "2016-08-15 12:47:45");
        assert_eq!(tt.offset().minutes(), 480);
    }

    #[test]
    fn encode_is_idempotent() {
        let tt = scenario();
        let first = tt.encode().clone();
        let second = tt.encode();
        assert_eq!(&first, second);
        assert_eq!(first.as_str(), tt.to_string());
    }

    #[test]
    fn sub_seconds_dropped() {
        let dt = Utc
            .with_ymd_and_hms(2016, 8, 15, 4, 47, 45)
            .unwrap()
            .with_nanosecond(750_000_000)
            .unwrap();
        let tt = TrueTime::from_instant(&dt).unwrap();
        assert_eq!(tt.utc().nanosecond(), 0);
        assert_eq!(tt.compact().stamp(), 20160815044745);
    }

    #[test]
    fn year_outside_four_digits_is_invalid_input() {
        let utc = NaiveDate::from_ymd_opt(999, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert!(matches!(
            TrueTime::from_parts(utc, Offset::UTC),
            Err(TrueTimeError::InvalidInput(_))
        ));
        let utc = NaiveDate::from_ymd_opt(10_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(TrueTime::from_parts(utc, Offset::UTC).is_err());
    }

    #[test]
    fn token_and_compact_agree() {
        let tt = scenario();
        let from_token = TrueTime::from_token(tt.token()).unwrap();
        let [stamp, offset] = tt.compact().to_array();
        let from_compact = TrueTime::from_compact(stamp, offset).unwrap();
        assert_eq!(from_token, tt);
        assert_eq!(from_compact, tt);
        assert_eq!(from_token.token(), from_compact.token());
    }

    #[test]
    fn non_canonical_polarity_is_re_encoded() {
        let s = ["5", "2016", "08", "15", "04", "47", "45", "00480"].join(&DELIMITER.to_string());
        let tt = TrueTime::from_token(&s).unwrap();
        assert_eq!(tt, scenario());
        assert!(tt.token().starts_with('0'));
    }

    #[test]
    fn from_str_is_strict() {
        assert!(matches!(
            "2016-08-15".parse::<TrueTime>(),
            Err(TrueTimeError::Parse(ParseError::Length { .. }))
        ));
        let tt: TrueTime = scenario().token().parse().unwrap();
        assert_eq!(tt, scenario());
    }

    #[test]
    fn serde_token_and_pair() {
        let tt = scenario();
        let json = serde_json::to_string(&tt).unwrap();
        assert_eq!(json, format!("\"{}\"", tt.token()));
        let back: TrueTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tt);

        let from_pair: TrueTime = serde_json::from_str("[20160815044745, 480]").unwrap();
        assert_eq!(from_pair, tt);

        assert!(serde_json::from_str::<TrueTime>("[20160815044745]").is_err());
        assert!(serde_json::from_str::<TrueTime>("[20160815044745, 480, 1]").is_err());
        assert!(serde_json::from_str::<TrueTime>("\"2016-08-15\"").is_err());
        assert!(serde_json::from_str::<TrueTime>("true").is_err());
    }

    #[test]
    fn compact_pair_converts_both_ways() {
        let tt = scenario();
        let pair = CompactPair::from(&tt);
        assert_eq!(TrueTime::from(pair), tt);
    }

    #[test]
    fn ordering_follows_instant() {
        let earlier = TrueTime::from_compact(20160815044745, 480).unwrap();
        let later = TrueTime::from_compact(20160815044746, -600).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn values_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TrueTime>();

        let tt = scenario();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tt = tt.clone();
                std::thread::spawn(move || tt.token().to_string())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), scenario().token());
        }
    }
}
