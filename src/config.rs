use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

use crate::options::Options;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    pub fn as_str(&self) -> &str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(Algorithm::Sha1),
            "sha256" => Ok(Algorithm::Sha256),
            "sha512" => Ok(Algorithm::Sha512),
            other => Err(format!("unsupported algorithm: {}", other)),
        }
    }
}

/// Generator settings as read from a TOML file or the command line.
///
/// Every field is optional; anything missing falls back to the RFC 6238
/// defaults (SHA-1, Unix epoch, 30 second steps, 6 digits).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub algorithm: Option<Algorithm>,
    /// seconds
    pub step: Option<u64>,
    /// Unix seconds, may be negative
    pub epoch: Option<i64>,
    pub digits: Option<u32>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Unable to read {}: {}", path.display(), e))?;
        Settings::from_toml(&contents)
            .map_err(|e| format!("Unable to parse {}: {}", path.display(), e))
    }

    pub fn from_toml(contents: &str) -> Result<Settings, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    // Values set in `overrides` win
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            algorithm: overrides.algorithm.or(self.algorithm),
            step: overrides.step.or(self.step),
            epoch: overrides.epoch.or(self.epoch),
            digits: overrides.digits.or(self.digits),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm.unwrap_or_default()
    }

    /// Options are checked again when the generator is built; this only
    /// fails for an epoch the platform clock cannot represent.
    pub fn options(&self) -> Result<Options, String> {
        let mut options = Options::default();

        if let Some(step) = self.step {
            options = options.step(Duration::from_secs(step));
        }
        if let Some(digits) = self.digits {
            options = options.digits(digits);
        }
        if let Some(epoch) = self.epoch {
            options = options.epoch(unix_time(epoch)?);
        }

        Ok(options)
    }
}

pub fn unix_time(secs: i64) -> Result<SystemTime, String> {
    let offset = Duration::from_secs(secs.unsigned_abs());
    let time = if secs >= 0 {
        SystemTime::UNIX_EPOCH.checked_add(offset)
    } else {
        SystemTime::UNIX_EPOCH.checked_sub(offset)
    };
    time.ok_or_else(|| format!("time out of range: {}", secs))
}
