use hmac::digest::InvalidLength;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<InvalidLength> for Error {
    fn from(_: InvalidLength) -> Self {
        Error::InvalidConfiguration(String::from("key length rejected by HMAC"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
