pub mod at;
pub mod now;

use clap::{arg, Arg, ArgMatches};
use hmac::digest::KeyInit;
use hmac::Mac;
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::clock::GetTime;
use crate::config::{Algorithm, Settings};
use crate::totp::{Generator, HmacSha1, HmacSha256, HmacSha512};
use crate::utils::decode_base32_key;

pub enum CommandType {
    Now,
    At,
}

impl CommandType {
    pub fn as_str(&self) -> &str {
        match self {
            CommandType::Now => "now",
            CommandType::At => "at",
        }
    }
}

// Point in time a code is asked for
pub enum When {
    // seconds from the current time, negative for the past
    Offset(i64),
    At(SystemTime),
}

pub fn generator_args() -> Vec<Arg<'static>> {
    vec![
        arg!(-k --key <KEY> "Base32 encoded shared secret").required(true),
        arg!(-a --algorithm <ALGORITHM> "Keyed hash to use")
            .required(false)
            .possible_values(["sha1", "sha256", "sha512"]),
        arg!(-d --digits <DIGITS> "Code length, 6 to 8 digits").required(false),
        arg!(-s --step <SECONDS> "Length of one time step in seconds").required(false),
        arg!(-e --epoch <UNIX_SECONDS> "Unix time the first step starts at")
            .required(false)
            .allow_hyphen_values(true),
        arg!(-c --config <FILE> "TOML file with algorithm, step, epoch and digits").required(false),
    ]
}

fn parse_value<T: std::str::FromStr>(args: &ArgMatches, name: &str) -> Result<Option<T>, String>
where
    T::Err: std::fmt::Display,
{
    match args.value_of(name) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid {} '{}': {}", name, value, e)),
        None => Ok(None),
    }
}

// Config file first, then command line flags on top
pub fn settings_from_args(args: &ArgMatches) -> Result<Settings, String> {
    let file_settings = match args.value_of("config") {
        Some(path) => Settings::load(Path::new(path))?,
        None => Settings::default(),
    };

    let flag_settings = Settings {
        algorithm: parse_value(args, "algorithm")?,
        step: parse_value(args, "step")?,
        epoch: parse_value(args, "epoch")?,
        digits: parse_value(args, "digits")?,
    };

    Ok(file_settings.merge(flag_settings))
}

pub fn code_from_args<C: GetTime>(
    args: &ArgMatches,
    when: &When,
    clock: &C,
) -> Result<String, String> {
    let key = match args.value_of("key") {
        Some(key) => decode_base32_key(key)?,
        None => return Err(String::from("Key is required")),
    };
    let settings = settings_from_args(args)?;

    generate_code(&key, &settings, when, clock)
}

pub fn generate_code<C: GetTime>(
    key: &[u8],
    settings: &Settings,
    when: &When,
    clock: &C,
) -> Result<String, String> {
    let options = settings.options()?;
    log::debug!("Generating {} code", settings.algorithm());

    let code = match settings.algorithm() {
        Algorithm::Sha1 => Generator::<HmacSha1>::with_options(key, options)
            .map(|generator| code_for(&generator, when, clock)),
        Algorithm::Sha256 => Generator::<HmacSha256>::with_options(key, options)
            .map(|generator| code_for(&generator, when, clock)),
        Algorithm::Sha512 => Generator::<HmacSha512>::with_options(key, options)
            .map(|generator| code_for(&generator, when, clock)),
    };

    code.map_err(|e| e.to_string())
}

fn code_for<M, C>(generator: &Generator<M>, when: &When, clock: &C) -> String
where
    M: Mac + KeyInit + Clone,
    C: GetTime,
{
    match when {
        When::At(t) => generator.at(*t),
        When::Offset(0) => generator.now_with(clock),
        When::Offset(secs) if *secs > 0 => {
            generator.after_with(clock, Duration::from_secs(secs.unsigned_abs()))
        }
        When::Offset(secs) => generator.before_with(clock, Duration::from_secs(secs.unsigned_abs())),
    }
}
