//! # Clocks
//!
//! The codec's only ambient dependency is the host clock: the current instant
//! (for construction with no input) and the host's UTC offset (for native
//! instants that carry none, and for naive free-form strings). [`Clock`]
//! abstracts both so construction can be made deterministic.

use chrono::{DateTime, Local, NaiveDateTime, Offset as _, TimeZone, Utc};

use crate::offset::Offset;

/// Source of the current instant and the local UTC offset.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The local offset in effect at a UTC instant.
    fn offset_at_utc(&self, utc: &NaiveDateTime) -> Offset;

    /// The local offset in effect at a local wall-clock time, or `None` when
    /// that wall time does not exist locally (a DST gap). Ambiguous times
    /// resolve to the earlier instant.
    fn offset_at_local(&self, local: &NaiveDateTime) -> Option<Offset>;
}

/// The host clock and time zone, optionally pinned to a fixed offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock {
    fixed_offset: Option<Offset>,
}

impl SystemClock {
    /// Use the host time zone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the host clock but report `offset` as the local offset everywhere.
    pub fn with_offset(offset: Offset) -> Self {
        Self {
            fixed_offset: Some(offset),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset_at_utc(&self, utc: &NaiveDateTime) -> Offset {
        match self.fixed_offset {
            Some(offset) => offset,
            None => {
                Offset::from_seconds(Local.offset_from_utc_datetime(utc).fix().local_minus_utc())
            }
        }
    }

    fn offset_at_local(&self, local: &NaiveDateTime) -> Option<Offset> {
        match self.fixed_offset {
            Some(offset) => Some(offset),
            None => Local
                .offset_from_local_datetime(local)
                .earliest()
                .map(|o| Offset::from_seconds(o.fix().local_minus_utc())),
        }
    }
}

/// A clock frozen at one instant with one offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: Offset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, offset: Offset) -> Self {
        Self { now, offset }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn offset_at_utc(&self, _utc: &NaiveDateTime) -> Offset {
        self.offset
    }

    fn offset_at_local(&self, _local: &NaiveDateTime) -> Option<Offset> {
        Some(self.offset)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn offset_at_utc(&self, utc: &NaiveDateTime) -> Offset {
        (**self).offset_at_utc(utc)
    }

    fn offset_at_local(&self, local: &NaiveDateTime) -> Option<Offset> {
        (**self).offset_at_local(local)
    }
}
