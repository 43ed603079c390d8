//! Codec configuration.
//!
//! Defaults follow the host: the system time zone supplies local offsets and
//! printable views are joined with `" | "`. Override via environment
//! variables or explicit construction.

use crate::clock::SystemClock;
use crate::error::ConfigError;
use crate::format::DEFAULT_SEPARATOR;
use crate::offset::Offset;

/// Environment variable pinning the local offset, in signed minutes.
pub const ENV_LOCAL_OFFSET: &str = "TRUETIME_LOCAL_OFFSET";
/// Environment variable overriding the printable separator.
pub const ENV_SEPARATOR: &str = "TRUETIME_SEPARATOR";

/// Configuration for a [`Codec`](crate::codec::Codec) over the system clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Offset reported for every local instant. `None` uses the host zone.
    pub local_offset: Option<Offset>,
    /// Separator used by [`PrintOptions::from_config`](crate::format::PrintOptions::from_config).
    pub separator: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            local_offset: None,
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl CodecConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `TRUETIME_LOCAL_OFFSET` (default: host time zone)
    /// - `TRUETIME_SEPARATOR` (default: `" | "`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_LOCAL_OFFSET) {
            let minutes: i64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    var: ENV_LOCAL_OFFSET,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
            let offset = Offset::from_minutes(minutes).ok_or_else(|| ConfigError::InvalidValue {
                var: ENV_LOCAL_OFFSET,
                value: raw.clone(),
                reason: "offset magnitude out of range".to_string(),
            })?;
            config.local_offset = Some(offset);
        }

        match lookup(ENV_SEPARATOR) {
            Some(sep) if sep.is_empty() => {
                tracing::warn!(var = ENV_SEPARATOR, "empty separator ignored");
            }
            Some(sep) => config.separator = sep,
            None => {}
        }

        tracing::debug!(?config, "loaded codec configuration");
        Ok(config)
    }

    /// The system clock this configuration describes.
    pub fn clock(&self) -> SystemClock {
        match self.local_offset {
            Some(offset) => SystemClock::with_offset(offset),
            None => SystemClock::new(),
        }
    }
}
