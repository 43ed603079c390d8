//! # True Time Token
//!
//! The canonical, fixed-width string encoding of a true time value.
//!
//! ## Layout
//!
//! Eight fields joined by U+200B ZERO WIDTH SPACE:
//!
//! ```text
//! polarity ␣ YYYY ␣ MM ␣ DD ␣ HH ␣ mm ␣ ss ␣ OOOOO
//! ```
//!
//! `polarity` is `0` for offsets of zero or east of UTC and `-` for offsets
//! west of UTC. The date and time fields are the UTC civil fields, zero padded.
//! `OOOOO` is the zero-padded offset magnitude in minutes.
//!
//! A token is always 27 characters: 20 content characters and 7 delimiters
//! (41 bytes of UTF-8). This layout is a storage contract and must stay
//! byte-stable.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};

use crate::civil::{CivilFields, Field};
use crate::error::ParseError;
use crate::offset::{Offset, Polarity};

/// Field delimiter inside a token.
pub const DELIMITER: char = '\u{200B}';

/// Length of a token in characters, delimiters included.
pub const TOKEN_CHARS: usize = 27;

/// Number of delimiter-separated fields in a token.
pub const FIELD_COUNT: usize = Field::ALL.len();

/// A canonical true time token.
///
/// Only produced by [`Token::encode`], so every `Token` value is well formed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(String);

impl Token {
    /// Encode a UTC instant and offset.
    ///
    /// The instant's year must be within [`MIN_YEAR`](crate::civil::MIN_YEAR)
    /// and [`MAX_YEAR`](crate::civil::MAX_YEAR); [`TrueTime`](crate::TrueTime)
    /// checks this before encoding.
    pub fn encode(utc: &NaiveDateTime, offset: Offset) -> Self {
        let f = CivilFields::from_naive(utc);
        let d = DELIMITER;
        let token = format!(
            "{p}{d}{:04}{d}{:02}{d}{:02}{d}{:02}{d}{:02}{d}{:02}{d}{:05}",
            f.year,
            f.month,
            f.day,
            f.hour,
            f.minute,
            f.second,
            offset.magnitude(),
            p = offset.polarity().as_char(),
        );
        tracing::trace!(token = %token.replace(DELIMITER, "."), "encoded true time token");
        Self(token)
    }

    /// Strictly decode a token into its UTC instant and offset.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the input is not exactly
    /// [`TOKEN_CHARS`] characters, contains anything other than digits and
    /// delimiters (plus an optional leading `-`), does not split into
    /// [`FIELD_COUNT`] fields of the expected widths, or describes an
    /// instant outside the calendar.
    pub fn decode(s: &str) -> Result<(NaiveDateTime, Offset), ParseError> {
        check_shape(s)?;

        let parts: Vec<&str> = s.split(DELIMITER).collect();
        if parts.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount {
                expected: FIELD_COUNT,
                actual: parts.len(),
            });
        }
        for (field, part) in Field::ALL.iter().zip(&parts) {
            if part.chars().count() != field.width() {
                return Err(ParseError::FieldWidth {
                    field: *field,
                    expected: field.width(),
                    value: (*part).to_string(),
                });
            }
        }

        let polarity_char = parts[0].chars().next().unwrap_or('0');
        if polarity_char != '0' && polarity_char != '-' {
            tracing::warn!(
                polarity = %polarity_char,
                "non-canonical polarity digit treated as non-negative"
            );
        }
        let polarity = Polarity::from_char(polarity_char);

        let civil = CivilFields {
            year: numeric(Field::Year, parts[1])?,
            month: numeric(Field::Month, parts[2])?,
            day: numeric(Field::Day, parts[3])?,
            hour: numeric(Field::Hour, parts[4])?,
            minute: numeric(Field::Minute, parts[5])?,
            second: numeric(Field::Second, parts[6])?,
        };
        let utc = civil.to_naive()?;

        // Five digits never exceed the magnitude bound.
        let magnitude = numeric(Field::Offset, parts[7])?;
        let offset = Offset::from_polarity(polarity, magnitude as u32).ok_or(
            ParseError::OutOfRange {
                field: Field::Offset,
                value: magnitude,
            },
        )?;

        tracing::trace!(%utc, offset = offset.minutes(), "decoded true time token");
        Ok((utc, offset))
    }

    /// Whether `s` has the length and character class of a token.
    ///
    /// Field widths and calendar ranges are not checked here; that is the
    /// job of [`Token::decode`].
    pub fn is_token_shaped(s: &str) -> bool {
        check_shape(s).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The eight fields of the token, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.split(DELIMITER)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

fn check_shape(s: &str) -> Result<(), ParseError> {
    let actual = s.chars().count();
    if actual != TOKEN_CHARS {
        return Err(ParseError::Length {
            expected: TOKEN_CHARS,
            actual,
        });
    }
    for (index, ch) in s.chars().enumerate() {
        let allowed = ch.is_ascii_digit() || ch == DELIMITER || (index == 0 && ch == '-');
        if !allowed {
            return Err(ParseError::InvalidCharacter { index, ch });
        }
    }
    Ok(())
}

fn numeric(field: Field, value: &str) -> Result<i64, ParseError> {
    value.parse::<i64>().map_err(|_| ParseError::NotNumeric {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scenario_utc() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2016, 8, 15)
            .unwrap()
            .and_hms_opt(4, 47, 45)
            .unwrap()
    }

    fn tok(fields: &[&str]) -> String {
        fields.join(&DELIMITER.to_string())
    }

    #[test]
    fn encode_scenario() {
        let token = Token::encode(&scenario_utc(), Offset::from_minutes(480).unwrap());
        assert_eq!(
            token.as_str(),
            tok(&["0", "2016", "08", "15", "04", "47", "45", "00480"])
        );
        assert_eq!(token.as_str().chars().count(), TOKEN_CHARS);
        assert_eq!(token.as_str().len(), 41);
    }

    #[test]
    fn encode_negative_offset() {
        let token = Token::encode(&scenario_utc(), Offset::from_minutes(-300).unwrap());
        let fields: Vec<&str> = token.fields().collect();
        assert_eq!(fields[0], "-");
        assert_eq!(fields[7], "00300");
    }

    #[test]
    fn encode_zero_offset_is_non_negative() {
        let token = Token::encode(&scenario_utc(), Offset::UTC);
        assert!(token.as_str().starts_with('0'));
        assert_eq!(token.fields().last(), Some("00000"));
    }

    #[test]
    fn decode_scenario() {
        let s = tok(&["0", "2016", "08", "15", "04", "47", "45", "00480"]);
        let (utc, offset) = Token::decode(&s).unwrap();
        assert_eq!(utc, scenario_utc());
        assert_eq!(offset.minutes(), 480);
    }

    #[test]
    fn decode_negative() {
        let s = tok(&["-", "2016", "08", "15", "04", "47", "45", "00570"]);
        let (_, offset) = Token::decode(&s).unwrap();
        assert_eq!(offset.minutes(), -570);
    }

    #[test]
    fn decode_non_canonical_polarity_digit() {
        let s = tok(&["1", "2016", "08", "15", "04", "47", "45", "00060"]);
        let (_, offset) = Token::decode(&s).unwrap();
        assert_eq!(offset.minutes(), 60);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let s = tok(&["0", "2016", "08", "15", "04", "47", "45", "0480"]);
        assert_eq!(
            Token::decode(&s),
            Err(ParseError::Length {
                expected: 27,
                actual: 26
            })
        );
        assert!(matches!(
            Token::decode(""),
            Err(ParseError::Length { actual: 0, .. })
        ));
    }

    #[test]
    fn decode_rejects_bad_characters() {
        let s = tok(&["0", "2016", "08", "15", "04", "47", "4x", "00480"]);
        assert_eq!(
            Token::decode(&s),
            Err(ParseError::InvalidCharacter { index: 20, ch: 'x' })
        );

        // A minus sign is only allowed in the polarity position.
        let s = tok(&["0", "2016", "08", "15", "04", "47", "45", "-0480"]);
        assert!(matches!(
            Token::decode(&s),
            Err(ParseError::InvalidCharacter { ch: '-', .. })
        ));
    }

    #[test]
    fn decode_rejects_misplaced_delimiters() {
        let s = tok(&["0", "20160", "8", "15", "04", "47", "45", "00480"]);
        assert_eq!(
            Token::decode(&s),
            Err(ParseError::FieldWidth {
                field: Field::Year,
                expected: 4,
                value: "20160".to_string()
            })
        );
    }

    #[test]
    fn decode_rejects_wrong_field_count() {
        // One delimiter traded for a digit keeps the length at 27.
        let s = tok(&["0", "2016", "08", "15", "04", "47", "45004800"]);
        assert_eq!(s.chars().count(), 27);
        assert!(matches!(
            Token::decode(&s),
            Err(ParseError::FieldCount { expected: 8, .. })
        ));
    }

    #[test]
    fn decode_rejects_out_of_range_fields() {
        let s = tok(&["0", "2016", "13", "15", "04", "47", "45", "00480"]);
        assert_eq!(
            Token::decode(&s),
            Err(ParseError::OutOfRange {
                field: Field::Month,
                value: 13
            })
        );
        let s = tok(&["0", "2016", "02", "30", "04", "47", "45", "00480"]);
        assert!(matches!(
            Token::decode(&s),
            Err(ParseError::OutOfRange {
                field: Field::Day,
                ..
            })
        ));
    }

    #[test]
    fn shape_predicate() {
        let good = tok(&["0", "2016", "08", "15", "04", "47", "45", "00480"]);
        assert!(Token::is_token_shaped(&good));
        assert!(!Token::is_token_shaped("2016-08-15T04:47:45+08:00"));
        assert!(!Token::is_token_shaped(&format!("{good}0")));
        assert!(Token::is_token_shaped(&"1".repeat(27)));
    }

    #[test]
    fn serializes_as_plain_string() {
        let token = Token::encode(&scenario_utc(), Offset::UTC);
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, format!("\"{}\"", token.as_str()));
    }
}
