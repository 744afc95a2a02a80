use log::{debug, trace};
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::primality::{DEFAULT_TRIALS, is_probable_prime};

/// Fresh random draws allowed before a prime search gives up.
pub const DEFAULT_MAX_REDRAWS: u32 = 10_000;

const MIN_NBITS: u64 = 2;
const CEILING_FLOOR: u32 = 3;

/// A prime produced by [`PrimeSearch::gen_nbit_prime`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPrime {
    pub prime: BigUint,
    /// Share of set bits folded around one half: `w/n` when the Hamming
    /// weight `w` is at most `n/2`, else `(n-w)/n`. Diagnostic only.
    pub entropy: f64,
}

/// Prime search parameters.
///
/// A search draws a uniform random candidate and walks upward one integer at
/// a time until a probable prime turns up. Only when the walk hits the top of
/// the range is a fresh candidate drawn. This favours primes that follow long
/// prime gaps, which is accepted behaviour of the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeSearch {
    /// Miller–Rabin bases per candidate.
    pub trials: u32,
    /// Fresh draws allowed after the first one.
    pub max_redraws: u32,
}

impl Default for PrimeSearch {
    fn default() -> Self {
        PrimeSearch {
            trials: DEFAULT_TRIALS,
            max_redraws: DEFAULT_MAX_REDRAWS,
        }
    }
}

impl PrimeSearch {
    /// Finds a probable prime in `[2^(nbits-1), 2^nbits)`.
    pub fn gen_nbit_prime<R>(&self, nbits: u64, rng: &mut R) -> Result<GeneratedPrime>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        if nbits < MIN_NBITS {
            return Err(Error::InvalidBitLength(nbits));
        }

        let lo = BigUint::one() << (nbits - 1);
        let hi = BigUint::one() << nbits;
        debug!("searching a {nbits}-bit prime between 0x{lo:x} and 0x{hi:x}");

        let prime = self.walk(&lo, &hi, rng)?;
        let entropy = bit_entropy(&prime, nbits);
        debug!("found {nbits}-bit prime 0x{prime:x}, entropy {entropy:.4}");

        Ok(GeneratedPrime { prime, entropy })
    }

    /// Finds a probable prime in `[3, ceil)`.
    pub fn gen_prime_ceil<R>(&self, ceil: &BigUint, rng: &mut R) -> Result<BigUint>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let lo = BigUint::from(CEILING_FLOOR);
        if ceil <= &lo {
            return Err(Error::CeilingTooSmall(ceil.to_string()));
        }
        debug!("searching a prime below 0x{ceil:x}");

        self.walk(&lo, ceil, rng)
    }

    fn walk<R>(&self, lo: &BigUint, hi: &BigUint, rng: &mut R) -> Result<BigUint>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let last = hi - 1u32;
        let mut redraws = 0u32;
        let mut candidate = rng.gen_biguint_range(lo, hi);

        while !is_probable_prime(&candidate, self.trials, rng) {
            if candidate < last {
                candidate += 1u32;
                continue;
            }
            redraws += 1;
            if redraws > self.max_redraws {
                return Err(Error::SearchExhausted(self.max_redraws));
            }
            trace!("walked off the top of the range, drawing candidate #{redraws}");
            candidate = rng.gen_biguint_range(lo, hi);
        }

        Ok(candidate)
    }
}

/// [`PrimeSearch::gen_nbit_prime`] with default parameters.
pub fn gen_nbit_prime<R>(nbits: u64, rng: &mut R) -> Result<GeneratedPrime>
where
    R: RngCore + CryptoRng + ?Sized,
{
    PrimeSearch::default().gen_nbit_prime(nbits, rng)
}

/// [`PrimeSearch::gen_prime_ceil`] with default parameters.
pub fn gen_prime_ceil<R>(ceil: &BigUint, rng: &mut R) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    PrimeSearch::default().gen_prime_ceil(ceil, rng)
}

fn bit_entropy(prime: &BigUint, nbits: u64) -> f64 {
    let ones = prime.count_ones() as f64;
    let nbits = nbits as f64;
    if ones <= nbits / 2.0 {
        ones / nbits
    } else {
        (nbits - ones) / nbits
    }
}
