use std::ops::RangeInclusive;
use std::time::{Duration, SystemTime};

use crate::error::{Error, Result};
use crate::hotp;

// RFC 6238 defaults: T0 = 0, X = 30 seconds
pub const DEFAULT_STEP: Duration = Duration::from_secs(30);
pub const DEFAULT_DIGITS: u32 = 6;

// RFC 4226 section 5.3, a 31-bit value has room for at most 9 digits
// but the RFC only sanctions 6 to 8
pub const DIGITS_RANGE: RangeInclusive<u32> = 6..=8;

/// Parameters of a TOTP generator other than the key and hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub epoch: SystemTime,
    pub step: Duration,
    pub digits: u32,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            epoch: SystemTime::UNIX_EPOCH,
            step: DEFAULT_STEP,
            digits: DEFAULT_DIGITS,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn epoch(mut self, epoch: SystemTime) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn step(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    pub fn digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.step.is_zero() {
            return Err(Error::InvalidConfiguration(String::from(
                "time step must be greater than zero",
            )));
        }
        hotp::check_digits(self.digits)?;
        Ok(())
    }
}
