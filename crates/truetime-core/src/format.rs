//! # Human-Readable Views
//!
//! Read-only renderings of a [`TrueTime`]. "Real" views show the stored UTC
//! instant; "relative" views show the instant shifted by its offset, i.e. the
//! wall-clock time where it was captured.
//!
//! | View | Example |
//! |---|---|
//! | [`TrueTime::real_time`] | `2016-08-15T04:47:45` |
//! | [`TrueTime::relative_time`] | `2016-08-15T12:47:45` |
//! | [`TrueTime::clock_time`] | `12:47:45 PM` |
//! | [`TrueTime::calendar_date`] | `August 15, 2016` |
//! | [`TrueTime::printable`] | `August 15, 2016 | 12:47:45 PM` |

use crate::config::CodecConfig;
use crate::truetime::TrueTime;

/// Separator used by [`TrueTime::printable`] when none is given.
pub const DEFAULT_SEPARATOR: &str = " | ";

/// ISO 8601 date and time, no offset, no sub-seconds.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// 12-hour clock with meridiem.
pub const CLOCK_FORMAT: &str = "%I:%M:%S %p";

/// Full month name, zero-padded day, four-digit year.
pub const CALENDAR_FORMAT: &str = "%B %d, %Y";

/// How [`TrueTime::print`] joins its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub separator: String,
    /// Append the canonical token as a third segment.
    pub include_token: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            include_token: false,
        }
    }
}

impl PrintOptions {
    /// Options using the configured separator.
    pub fn from_config(config: &CodecConfig) -> Self {
        Self {
            separator: config.separator.clone(),
            include_token: false,
        }
    }

    pub fn with_token(mut self, include_token: bool) -> Self {
        self.include_token = include_token;
        self
    }
}

impl TrueTime {
    /// The UTC instant as `YYYY-MM-DDTHH:mm:ss`.
    pub fn real_time(&self) -> String {
        self.utc().format(ISO8601_FORMAT).to_string()
    }

    /// The offset-adjusted instant as `YYYY-MM-DDTHH:mm:ss`.
    ///
    /// Offsets reach 99_999 minutes, so an instant late in year 9999 can shift
    /// into year 10000. That year is rendered with a sign, as `+10000-...`.
    /// [`real_time`](Self::real_time) and the token are unaffected.
    ///
    /// Do not use this to reference true time.
    pub fn relative_time(&self) -> String {
        self.local().format(ISO8601_FORMAT).to_string()
    }

    /// The offset-adjusted time on a 12-hour clock, e.g. `12:47:45 PM`.
    pub fn clock_time(&self) -> String {
        self.local().format(CLOCK_FORMAT).to_string()
    }

    /// The offset-adjusted date, e.g. `August 15, 2016`.
    pub fn calendar_date(&self) -> String {
        self.local().format(CALENDAR_FORMAT).to_string()
    }

    /// Calendar date and clock time joined by `separator`, optionally
    /// followed by the token.
    ///
    /// A missing or empty separator falls back to [`DEFAULT_SEPARATOR`].
    pub fn printable(&self, separator: Option<&str>, include_token: bool) -> String {
        let separator = match separator {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_SEPARATOR,
        };
        let mut segments = vec![self.calendar_date(), self.clock_time()];
        if include_token {
            segments.push(self.token().to_string());
        }
        segments.join(separator)
    }

    pub fn print(&self, options: &PrintOptions) -> String {
        self.printable(Some(&options.separator), options.include_token)
    }
}
