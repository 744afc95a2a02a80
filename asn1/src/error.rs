//! Error types for ASN.1 encoding.

use thiserror::Error;

/// Errors that can occur while turning ASN.1 elements into DER.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("ASN.1 object has no elements to encode")]
    EmptyObject,

    // DER errors
    #[error("failed to encode DER: {0}")]
    FailedToEncodeDer(#[from] der::error::Error),
}
