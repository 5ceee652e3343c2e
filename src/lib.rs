//! Time-based one-time passwords as described in
//! [RFC 6238](https://datatracker.ietf.org/doc/html/rfc6238).
//!
//! ```
//! use std::time::{Duration, SystemTime};
//!
//! let generator = totp::new_sha1(b"12345678901234567890");
//! let t = SystemTime::UNIX_EPOCH + Duration::from_secs(59);
//! assert_eq!(generator.at(t), "287082");
//! ```

pub mod clock;
pub mod cmd;
pub mod config;
pub mod error;
pub mod hotp;
pub mod options;
pub mod totp;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::clock::{Clock, GetTime};
pub use crate::error::{Error, Result};
pub use crate::options::Options;
pub use crate::totp::{new_sha1, new_sha256, new_sha512, Generator};
