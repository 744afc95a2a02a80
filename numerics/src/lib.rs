//! # numerics
//!
//! Arbitrary precision number theory used by the key generator: Miller–Rabin
//! primality testing, prime search, the extended Euclidean algorithm and the
//! modular inverse built on it.
//!
//! Every randomized routine takes the caller's generator, which must be a
//! cryptographically secure one (`RngCore + CryptoRng`). There is no shared
//! state between calls.
//!
//! ```no_run
//! use rand::rngs::OsRng;
//!
//! let generated = numerics::gen_nbit_prime(512, &mut OsRng).unwrap();
//! assert!(numerics::is_prime(&generated.prime, &mut OsRng));
//! ```

#![forbid(unsafe_code)]

pub mod error;
mod euclid;
mod factor;
mod primality;
mod prime;

pub use error::{Error, Result};
pub use euclid::{egcd, gcd, modinv};
pub use factor::{
    bit_length, factor_powers_of_p, factor_powers_of_two, next_multiple_of, prime_factors,
    prime_factors_from, sum_of_digits,
};
pub use primality::{DEFAULT_TRIALS, is_prime, is_probable_prime};
pub use prime::{
    DEFAULT_MAX_REDRAWS, GeneratedPrime, PrimeSearch, gen_nbit_prime, gen_prime_ceil,
};
