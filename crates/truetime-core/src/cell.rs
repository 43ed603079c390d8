//! A slot for a true time that may not be loaded yet.
//!
//! Records deserialized with a missing field, or built before their time is
//! known, can hold a [`TrueTimeCell`]. Views on an empty cell fail with
//! [`TrueTimeError::Uninitialized`] instead of inventing a value. Loading
//! again replaces the held value; strings previously rendered from it are
//! unaffected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::clock::Clock;
use crate::codec::Codec;
use crate::compact::CompactPair;
use crate::error::TrueTimeError;
use crate::input::TrueTimeInput;
use crate::truetime::TrueTime;

const EMPTY: &str = "true time has not been loaded";

/// An optional [`TrueTime`] whose views report the missing state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrueTimeCell {
    value: Option<TrueTime>,
}

impl TrueTimeCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and hold a value using the system clock.
    pub fn load(&mut self, input: impl Into<TrueTimeInput>) -> Result<&TrueTime, TrueTimeError> {
        self.load_with(&Codec::system(), input)
    }

    /// Build and hold a value using `codec`. On error the cell is unchanged.
    pub fn load_with<C: Clock>(
        &mut self,
        codec: &Codec<C>,
        input: impl Into<TrueTimeInput>,
    ) -> Result<&TrueTime, TrueTimeError> {
        let tt = codec.construct(input)?;
        Ok(&*self.value.insert(tt))
    }

    /// Hold `tt`, returning the previous value.
    pub fn replace(&mut self, tt: TrueTime) -> Option<TrueTime> {
        self.value.replace(tt)
    }

    /// Decode the held token again and hold the result.
    pub fn reparse(&mut self) -> Result<&TrueTime, TrueTimeError> {
        let tt = TrueTime::from_token(self.get()?.token())?;
        Ok(&*self.value.insert(tt))
    }

    pub fn take(&mut self) -> Option<TrueTime> {
        self.value.take()
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    /// The held value.
    ///
    /// # Errors
    ///
    /// Returns [`TrueTimeError::Uninitialized`] if the cell is empty.
    pub fn get(&self) -> Result<&TrueTime, TrueTimeError> {
        self.value.as_ref().ok_or(TrueTimeError::Uninitialized(EMPTY))
    }

    pub fn token(&self) -> Result<&str, TrueTimeError> {
        Ok(self.get()?.token())
    }

    pub fn compact(&self) -> Result<CompactPair, TrueTimeError> {
        Ok(self.get()?.compact())
    }

    pub fn real_time(&self) -> Result<String, TrueTimeError> {
        Ok(self.get()?.real_time())
    }

    pub fn relative_time(&self) -> Result<String, TrueTimeError> {
        Ok(self.get()?.relative_time())
    }

    pub fn clock_time(&self) -> Result<String, TrueTimeError> {
        Ok(self.get()?.clock_time())
    }

    pub fn calendar_date(&self) -> Result<String, TrueTimeError> {
        Ok(self.get()?.calendar_date())
    }

    pub fn printable(
        &self,
        separator: Option<&str>,
        include_token: bool,
    ) -> Result<String, TrueTimeError> {
        Ok(self.get()?.printable(separator, include_token))
    }
}

impl From<TrueTime> for TrueTimeCell {
    fn from(tt: TrueTime) -> Self {
        Self { value: Some(tt) }
    }
}

impl Serialize for TrueTimeCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TrueTimeCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self {
            value: Option::<TrueTime>::deserialize(deserializer)?,
        })
    }
}
