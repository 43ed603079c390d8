//! # Construction Entry Point
//!
//! [`Codec`] turns any [`TrueTimeInput`] into a [`TrueTime`]. It owns the
//! [`Clock`] used for inputs that need the host: no input at all, native
//! instants are self-describing, and naive free-form strings are local time.

use serde_json::Value;

use crate::civil::truncate_to_seconds;
use crate::clock::{Clock, SystemClock};
use crate::compact::CompactPair;
use crate::config::CodecConfig;
use crate::error::TrueTimeError;
use crate::freeform;
use crate::input::{Shape, TrueTimeInput};
use crate::offset::Offset;
use crate::truetime::TrueTime;

/// Builds true time values against a clock.
#[derive(Debug, Clone, Default)]
pub struct Codec<C = SystemClock> {
    clock: C,
}

impl Codec<SystemClock> {
    /// A codec over the host clock and time zone.
    pub fn system() -> Self {
        Self {
            clock: SystemClock::new(),
        }
    }

    /// A codec over the host clock, honouring the configured local offset.
    pub fn from_config(config: &CodecConfig) -> Self {
        Self {
            clock: config.clock(),
        }
    }
}

impl<C: Clock> Codec<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Construct a true time from any accepted input.
    ///
    /// Shapes are tried in priority order: compact pair, token, free-form
    /// string, native instant or nothing (the current instant).
    ///
    /// # Errors
    ///
    /// - [`TrueTimeError::InvalidInput`] for a pair that is not a compact
    ///   pair, or an instant whose year is not four digits.
    /// - [`TrueTimeError::Parse`] for a malformed token or compact pair.
    /// - [`TrueTimeError::Format`] for a string no date format matches.
    pub fn construct(&self, input: impl Into<TrueTimeInput>) -> Result<TrueTime, TrueTimeError> {
        let input = input.into();
        let shape = input.shape()?;
        tracing::debug!(shape = shape.name(), "constructing true time");

        match shape {
            Shape::Compact { stamp, offset } => TrueTime::from_compact(stamp, offset),
            Shape::Token(s) => TrueTime::from_token(s),
            Shape::FreeForm(s) => {
                let (utc, offset) = freeform::parse(s, &self.clock)?;
                TrueTime::from_parts(utc, offset).map_err(|e| match e {
                    TrueTimeError::InvalidInput(reason) => TrueTimeError::Format {
                        input: s.to_string(),
                        reason,
                    },
                    other => other,
                })
            }
            Shape::Instant(dt) => TrueTime::from_instant(dt),
            Shape::Now => self.now(),
        }
    }

    /// Construct from a dynamically typed JSON value.
    ///
    /// See [`TrueTimeInput::from_json`] for the accepted values.
    pub fn construct_json(&self, value: &Value) -> Result<TrueTime, TrueTimeError> {
        self.construct(TrueTimeInput::from_json(value)?)
    }

    /// The current instant with the clock's local offset.
    pub fn now(&self) -> Result<TrueTime, TrueTimeError> {
        let utc = truncate_to_seconds(self.clock.now().naive_utc());
        let offset: Offset = self.clock.offset_at_utc(&utc);
        TrueTime::from_parts(utc, offset)
    }

    /// The compact pair of the current instant.
    pub fn now_compact(&self) -> Result<CompactPair, TrueTimeError> {
        Ok(self.now()?.compact())
    }
}

/// The compact pair of the current instant on the host clock.
pub fn now() -> Result<CompactPair, TrueTimeError> {
    Codec::system().now_compact()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::ParseError;
    use crate::token::DELIMITER;
    use chrono::{FixedOffset, TimeZone, Utc};
    use serde_json::json;

    fn codec() -> Codec<FixedClock> {
        Codec::with_clock(FixedClock::new(
            Utc.with_ymd_and_hms(2016, 8, 15, 4, 47, 45).unwrap(),
            Offset::from_minutes(480).unwrap(),
        ))
    }

    fn scenario_token() -> String {
        ["0", "2016", "08", "15", "04", "47", "45", "00480"].join(&DELIMITER.to_string())
    }

    #[test]
    fn every_shape_reaches_the_same_value() {
        let codec = codec();
        let expected = codec.now().unwrap();
        assert_eq!(expected.token(), scenario_token());

        let from_pair = codec.construct([20160815044745_i64, 480]).unwrap();
        let from_token = codec.construct(scenario_token()).unwrap();
        let from_text = codec.construct("8/15/2016 12:47:45 PM").unwrap();
        let from_rfc3339 = codec.construct("2016-08-15T12:47:45+08:00").unwrap();
        let from_instant = codec
            .construct(
                FixedOffset::east_opt(480 * 60)
                    .unwrap()
                    .with_ymd_and_hms(2016, 8, 15, 12, 47, 45)
                    .unwrap(),
            )
            .unwrap();
        let from_nothing = codec.construct(TrueTimeInput::Now).unwrap();
        let from_empty = codec.construct("").unwrap();

        for tt in [
            from_pair,
            from_token,
            from_text,
            from_rfc3339,
            from_instant,
            from_nothing,
            from_empty,
        ] {
            assert_eq!(tt, expected);
        }
    }

    #[test]
    fn error_kinds_by_shape() {
        let codec = codec();
        assert!(matches!(
            codec.construct([2016_i64, 480]),
            Err(TrueTimeError::InvalidInput(_))
        ));
        assert!(matches!(
            codec.construct(format!("{}0", scenario_token())),
            Err(TrueTimeError::Parse(ParseError::Length { actual: 28, .. }))
        ));
        assert!(matches!(
            codec.construct([20161315044745_i64, 480]),
            Err(TrueTimeError::Parse(ParseError::OutOfRange { .. }))
        ));
        assert!(matches!(
            codec.construct("the day after tomorrow"),
            Err(TrueTimeError::Format { .. })
        ));
        assert!(matches!(
            codec.construct("0999-01-01T00:00:00Z"),
            Err(TrueTimeError::Format { .. })
        ));
    }

    #[test]
    fn json_construction() {
        let codec = codec();
        let expected = codec.now().unwrap();
        assert_eq!(codec.construct_json(&json!(null)).unwrap(), expected);
        assert_eq!(
            codec.construct_json(&json!([20160815044745_i64, 480])).unwrap(),
            expected
        );
        assert_eq!(
            codec.construct_json(&json!([20160815044745.0, 480.0])).unwrap(),
            expected
        );
        assert_eq!(
            codec.construct_json(&json!(scenario_token())).unwrap(),
            expected
        );
        assert!(matches!(
            codec.construct_json(&json!({"date": "today"})),
            Err(TrueTimeError::InvalidInput(_))
        ));
    }

    #[test]
    fn now_compact_matches_clock() {
        let pair = codec().now_compact().unwrap();
        assert_eq!(pair.to_array(), [20160815044745, 480]);
    }

    #[test]
    fn config_offset_applies_to_now() {
        let config = CodecConfig {
            local_offset: Offset::from_minutes(-60),
            ..CodecConfig::default()
        };
        let tt = Codec::from_config(&config).now().unwrap();
        assert_eq!(tt.offset().minutes(), -60);
    }

    #[test]
    fn module_now_has_fourteen_digit_stamp() {
        let pair = now().unwrap();
        assert!(CompactPair::is_stamp(pair.stamp()));
    }
}
