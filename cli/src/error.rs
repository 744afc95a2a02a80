use num_bigint::BigUint;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("key generation failed: {0}")]
    Keygen(#[from] keygen::Error),

    #[error("PKCS#1 encode error: {0}")]
    Pkcs1(#[from] pkcs::pkcs1::Error),

    #[error("encrypt of {message} = {ciphertext}, decrypt of {ciphertext} = {decrypted}")]
    RoundTripFailed {
        message: BigUint,
        ciphertext: BigUint,
        decrypted: BigUint,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
