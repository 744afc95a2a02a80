use num_bigint::BigUint;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("key size {0} is outside the supported range of 8 to 65536 bits")]
    InvalidBits(u64),

    #[error("invalid prime pair: {0}")]
    InvalidPrimes(&'static str),

    #[error("public exponent {0} is not coprime with phi")]
    NotCoprime(BigUint),

    #[error("no public exponent coprime with phi after {0} draws")]
    CoprimeAttemptsExhausted(u32),

    #[error("public exponent has no inverse modulo phi")]
    InverseMissing,

    #[error("private exponent is not the inverse of the public exponent modulo phi")]
    InverseCheckFailed,

    #[error("self test failed: {message} decrypted to {decrypted}")]
    SelfTestFailed {
        message: BigUint,
        decrypted: BigUint,
    },

    #[error(transparent)]
    Numerics(#[from] numerics::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
