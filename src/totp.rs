use hmac::digest::{KeyInit, OutputSizeUser};
use hmac::{Hmac, Mac};
use log::{debug, trace};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use std::fmt;
use std::time::{Duration, SystemTime};

use crate::clock::{Clock, GetTime};
use crate::error::Result;
use crate::hotp;
use crate::options::Options;

// TOTP https://datatracker.ietf.org/doc/html/rfc6238
// TOTP = HOTP(K, T) where T = (Current Unix time - T0) / X

pub type HmacSha1 = Hmac<Sha1>;
pub type HmacSha256 = Hmac<Sha256>;
pub type HmacSha512 = Hmac<Sha512>;

/// Computes time-based one-time passwords for a single shared secret.
///
/// The keyed hash `M` is the only algorithm-specific part: any MAC whose
/// output is at least 20 bytes long works, the `Hmac` SHA-1, SHA-256 and
/// SHA-512 variants being the ones RFC 6238 names. A generator never changes
/// after construction, so one instance can serve any number of threads.
#[derive(Clone)]
pub struct Generator<M> {
    mac: M,
    epoch: SystemTime,
    step: Duration,
    digits: u32,
}

/// HMAC-SHA-1 generator with the RFC defaults (Unix epoch, 30 seconds, 6 digits).
pub fn new_sha1(key: &[u8]) -> Generator<HmacSha1> {
    Generator::<HmacSha1>::sha1(key)
}

/// HMAC-SHA-256 generator with the RFC defaults.
pub fn new_sha256(key: &[u8]) -> Generator<HmacSha256> {
    Generator::<HmacSha256>::sha256(key)
}

/// HMAC-SHA-512 generator with the RFC defaults.
pub fn new_sha512(key: &[u8]) -> Generator<HmacSha512> {
    Generator::<HmacSha512>::sha512(key)
}

impl Generator<HmacSha1> {
    pub fn sha1(key: &[u8]) -> Self {
        Self::with_hmac_defaults(key)
    }
}

impl Generator<HmacSha256> {
    pub fn sha256(key: &[u8]) -> Self {
        Self::with_hmac_defaults(key)
    }
}

impl Generator<HmacSha512> {
    pub fn sha512(key: &[u8]) -> Self {
        Self::with_hmac_defaults(key)
    }
}

impl<M> Generator<M>
where
    M: Mac + KeyInit + Clone,
{
    /// Builds a generator from a raw key and explicit options.
    ///
    /// Every way this can fail is reported here, so the query methods
    /// never have to.
    pub fn with_options(key: &[u8], options: Options) -> Result<Self> {
        options.validate()?;

        hotp::check_digest_len::<M>()?;
        let digest_len = <M as OutputSizeUser>::output_size();

        let mac = <M as KeyInit>::new_from_slice(key)?;

        debug!(
            "TOTP generator ready: {} byte digest, {:?} step, {} digits",
            digest_len, options.step, options.digits
        );

        Ok(Generator {
            mac,
            epoch: options.epoch,
            step: options.step,
            digits: options.digits,
        })
    }

    // HMAC takes keys of any length and the defaults always validate
    fn with_hmac_defaults(key: &[u8]) -> Self {
        Self::with_options(key, Options::default())
            .expect("Problem with secret, failed to initialize HMAC")
    }

    pub fn options(&self) -> Options {
        Options {
            epoch: self.epoch,
            step: self.step,
            digits: self.digits,
        }
    }

    /// Number of whole steps between the epoch and `t`, truncated toward
    /// zero. Negative before the epoch.
    pub fn counter_at(&self, t: SystemTime) -> i64 {
        self.counter_for(self.elapsed_nanos(t))
    }

    /// The one-time password valid at `t`.
    pub fn at(&self, t: SystemTime) -> String {
        self.code_for(self.elapsed_nanos(t))
    }

    /// The one-time password valid right now.
    pub fn now(&self) -> String {
        self.now_with(&Clock::new())
    }

    /// The one-time password that will be valid once `d` has passed.
    pub fn after(&self, d: Duration) -> String {
        self.after_with(&Clock::new(), d)
    }

    /// The one-time password that was valid `d` ago.
    pub fn before(&self, d: Duration) -> String {
        self.before_with(&Clock::new(), d)
    }

    pub fn now_with<C: GetTime>(&self, clock: &C) -> String {
        self.at(clock.get_now())
    }

    pub fn after_with<C: GetTime>(&self, clock: &C, d: Duration) -> String {
        self.code_for(self.elapsed_nanos(clock.get_now()) + d.as_nanos() as i128)
    }

    pub fn before_with<C: GetTime>(&self, clock: &C, d: Duration) -> String {
        self.code_for(self.elapsed_nanos(clock.get_now()) - d.as_nanos() as i128)
    }

    fn code_for(&self, elapsed_nanos: i128) -> String {
        let counter = self.counter_for(elapsed_nanos);
        trace!("TOTP step counter {}", counter);

        // pre-epoch counters keep their two's complement bit pattern
        hotp::code_unchecked(&self.mac, counter as u64, self.digits)
    }

    // Truncating division, then wrap into 64 bits
    fn counter_for(&self, elapsed_nanos: i128) -> i64 {
        (elapsed_nanos / self.step.as_nanos() as i128) as i64
    }

    fn elapsed_nanos(&self, t: SystemTime) -> i128 {
        match t.duration_since(self.epoch) {
            Ok(elapsed) => elapsed.as_nanos() as i128,
            Err(err) => -(err.duration().as_nanos() as i128),
        }
    }
}

// Keeps the secret out of debug output
impl<M> fmt::Debug for Generator<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("epoch", &self.epoch)
            .field("step", &self.step)
            .field("digits", &self.digits)
            .finish_non_exhaustive()
    }
}
