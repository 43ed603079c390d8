//! # truetime-core: True Time Tokens
//!
//! A true time is a UTC instant together with the UTC offset it was captured
//! under. This crate encodes that pair into a fixed-width, byte-stable token
//! and a compact integer pair, decodes both back exactly, and renders
//! human-readable views from either.
//!
//! ## Representations
//!
//! - **Token**: 27 characters holding polarity, year, month, day, hour, minute,
//!   second and offset magnitude joined by U+200B. See [`token`].
//! - **Compact pair**: `[YYYYMMDDHHmmss, offset]` as two integers. See
//!   [`compact`].
//!
//! Decoding either form re-encodes, so values are identical no matter which
//! representation they came from:
//!
//! ```
//! use truetime_core::TrueTime;
//!
//! let tt = TrueTime::new("2016-08-15T12:47:45+08:00")?;
//! assert_eq!(tt.real_time(), "2016-08-15T04:47:45");
//! assert_eq!(tt.relative_time(), "2016-08-15T12:47:45");
//! assert_eq!(tt.printable(None, false), "August 15, 2016 | 12:47:45 PM");
//! assert_eq!(tt.compact().to_array(), [20160815044745, 480]);
//!
//! let from_token = TrueTime::new(tt.token())?;
//! let from_pair = TrueTime::new(tt.compact())?;
//! assert_eq!(from_token.token(), from_pair.token());
//! # Ok::<(), truetime_core::TrueTimeError>(())
//! ```
//!
//! ## Crate Policy
//!
//! - Second resolution only. Sub-second components are discarded.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - The library logs through `tracing` and never installs a subscriber.

pub mod cell;
pub mod civil;
pub mod clock;
pub mod codec;
pub mod compact;
pub mod config;
pub mod error;
pub mod format;
pub mod freeform;
pub mod input;
pub mod offset;
pub mod token;
pub mod truetime;

// Re-export primary types for ergonomic imports.
pub use cell::TrueTimeCell;
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{now, Codec};
pub use compact::CompactPair;
pub use config::CodecConfig;
pub use error::{ConfigError, ParseError, TrueTimeError};
pub use format::{PrintOptions, DEFAULT_SEPARATOR};
pub use input::{Shape, TrueTimeInput};
pub use offset::{Offset, Polarity};
pub use token::{Token, DELIMITER, TOKEN_CHARS};
pub use truetime::TrueTime;
