//! # keygen
//!
//! Two-prime RSA key generation built on `numerics`.
//!
//! A key of `bits` bits is made of a `bits/2 + 2` bit prime and a
//! `bits/2 - 2` bit prime. The public exponent is a random prime below
//! `2^popcount(N)` that is coprime with `(p-1)(q-1)`. Every key is checked
//! with a few encrypt/decrypt round trips before it is handed out.
//!
//! ```no_run
//! use rand::rngs::OsRng;
//!
//! let key = keygen::generate(1024, &mut OsRng).unwrap();
//! let message = num_bigint::BigUint::from(42u32);
//! assert_eq!(message, key.decrypt(&key.encrypt(&message)));
//! ```

#![forbid(unsafe_code)]

pub mod error;
mod generator;
mod key;

pub use error::{Error, Result};
pub use generator::{
    GenerationConfig, MAX_KEY_BITS, MIN_KEY_BITS, from_primes, from_primes_and_exponent,
    generate, generate_once,
};
pub use key::KeyMaterial;
