//! Encoder trait for type-safe conversions.
//!
//! The `Encoder` trait converts a source type `T` into a destination type
//! `E`. Each layer of the key serialization pipeline implements it for the
//! step it owns:
//!
//! ```text
//! RSAPrivateKey → Element → ASN1Object → Der → Vec<u8>
//! ```
//!
//! # Implementation Guide
//!
//! Implement both traits to add a new encodable pair:
//!
//! ```no_run
//! use tbrsa::encoder::{EncodableTo, Encoder};
//!
//! struct Digits(u32);
//!
//! #[derive(Debug)]
//! struct MyError;
//!
//! // 1. Mark the destination type as encodable from the source type
//! impl EncodableTo<Digits> for String {}
//!
//! // 2. Implement the encoder on the source type
//! impl Encoder<Digits, String> for Digits {
//!     type Error = MyError;
//!
//!     fn encode(&self) -> Result<String, Self::Error> {
//!         Ok(self.0.to_string())
//!     }
//! }
//! ```

/// Encoder trait for converting from type `T` to type `E`.
///
/// This trait is implemented by the source type `T`. The destination type
/// must implement `EncodableTo<T>`.
pub trait Encoder<T, E: EncodableTo<T>> {
    /// The error type returned when encoding fails.
    type Error;

    /// Encodes `self` into type `E`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that type `E` can be produced from type `T`.
///
/// This trait has no methods. It constrains `Encoder` so that only
/// explicitly declared conversions compile.
pub trait EncodableTo<T> {}
