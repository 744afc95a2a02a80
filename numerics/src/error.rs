use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("bit length {0} is too small, at least 2 bits are required")]
    InvalidBitLength(u64),

    #[error("ceiling {0} is too small, the search range [3, ceiling) is empty")]
    CeilingTooSmall(String),

    #[error("base {0} is invalid")]
    InvalidBase(String),

    #[error("modular inverse does not exist")]
    NoInverse,

    #[error("no prime found after {0} fresh candidates")]
    SearchExhausted(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
