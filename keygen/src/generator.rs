use log::{debug, info, warn};
use num_bigint::BigUint;
use num_traits::One;
use numerics::{PrimeSearch, gcd, modinv};
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::key::KeyMaterial;

/// Smallest accepted key size. Below it the smaller prime would have fewer
/// than 2 bits.
pub const MIN_KEY_BITS: u64 = 8;

/// Largest accepted key size.
pub const MAX_KEY_BITS: u64 = 1 << 16;

// The two primes straddle bits/2 so their product lands near `bits` bits.
const PRIME_SKEW: u64 = 2;
const MIN_PRIME: u32 = 3;
const MIN_MODULUS: u32 = 32;

/// Tunables for key generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Miller–Rabin bases per prime candidate.
    pub trials: u32,
    /// Public exponent draws before giving up on a prime pair.
    pub max_coprime_attempts: u32,
    /// Extra full attempts [`GenerationConfig::generate`] may make.
    pub max_restarts: u32,
    /// Encrypt/decrypt round trips a fresh key has to survive.
    pub self_test_rounds: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            trials: numerics::DEFAULT_TRIALS,
            max_coprime_attempts: 1000,
            max_restarts: 3,
            self_test_rounds: 10,
        }
    }
}

impl GenerationConfig {
    /// Generates a key of roughly `bits` bits, starting over with fresh
    /// primes when an attempt fails its self test or runs out of exponents.
    pub fn generate<R>(&self, bits: u64, rng: &mut R) -> Result<KeyMaterial>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut restarts = 0;
        loop {
            match self.generate_once(bits, rng) {
                Ok(key) => return Ok(key),
                Err(
                    err @ (Error::SelfTestFailed { .. } | Error::CoprimeAttemptsExhausted(_)),
                ) if restarts < self.max_restarts => {
                    restarts += 1;
                    warn!(
                        "key generation attempt failed: {err}, restarting ({restarts}/{})",
                        self.max_restarts
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// A single generation attempt.
    ///
    /// `p` gets `bits/2 + 2` bits and `q` gets `bits/2 - 2` bits.
    pub fn generate_once<R>(&self, bits: u64, rng: &mut R) -> Result<KeyMaterial>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&bits) {
            return Err(Error::InvalidBits(bits));
        }

        let search = self.prime_search();
        let p = search.gen_nbit_prime(bits / 2 + PRIME_SKEW, rng)?;
        debug!("prime p = 0x{:x} (entropy {:.4})", p.prime, p.entropy);
        let q = search.gen_nbit_prime(bits / 2 - PRIME_SKEW, rng)?;
        debug!("prime q = 0x{:x} (entropy {:.4})", q.prime, q.entropy);

        self.with_random_exponent(p.prime, q.prime, rng)
    }

    /// Builds a key from caller supplied primes with a random public exponent.
    pub fn from_primes<R>(&self, p: BigUint, q: BigUint, rng: &mut R) -> Result<KeyMaterial>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        validate_primes(&p, &q)?;
        self.with_random_exponent(p, q, rng)
    }

    /// Builds a key from caller supplied primes and public exponent.
    pub fn from_primes_and_exponent<R>(
        &self,
        p: BigUint,
        q: BigUint,
        e: BigUint,
        rng: &mut R,
    ) -> Result<KeyMaterial>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        validate_primes(&p, &q)?;
        let phi = phi(&p, &q);
        if !gcd(&e, &phi).is_one() {
            return Err(Error::NotCoprime(e));
        }
        self.assemble(p, q, e, &phi, rng)
    }

    fn prime_search(&self) -> PrimeSearch {
        PrimeSearch {
            trials: self.trials,
            ..PrimeSearch::default()
        }
    }

    /// Draws E as any prime in `[3, 2^popcount(N))`, so exponents shorter
    /// than `popcount(N)` bits come up as well.
    fn with_random_exponent<R>(&self, p: BigUint, q: BigUint, rng: &mut R) -> Result<KeyMaterial>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let phi = phi(&p, &q);
        let ceiling = BigUint::one() << (&p * &q).count_ones();
        let e = self.coprime_exponent(&ceiling, &phi, rng)?;
        self.assemble(p, q, e, &phi, rng)
    }

    fn coprime_exponent<R>(&self, ceiling: &BigUint, phi: &BigUint, rng: &mut R) -> Result<BigUint>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let search = self.prime_search();
        for attempt in 1..=self.max_coprime_attempts {
            let e = search.gen_prime_ceil(ceiling, rng)?;
            if gcd(&e, phi).is_one() {
                return Ok(e);
            }
            debug!("exponent candidate {e} shares a factor with phi (attempt {attempt})");
        }
        Err(Error::CoprimeAttemptsExhausted(self.max_coprime_attempts))
    }

    fn assemble<R>(
        &self,
        p: BigUint,
        q: BigUint,
        e: BigUint,
        phi: &BigUint,
        rng: &mut R,
    ) -> Result<KeyMaterial>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let d = modinv(&e, phi).map_err(|_| Error::InverseMissing)?;
        if !((&d * &e) % phi).is_one() {
            return Err(Error::InverseCheckFailed);
        }
        let coefficient = modinv(&q, &p).map_err(|_| Error::InverseMissing)?;

        let key = KeyMaterial {
            modulus: &p * &q,
            exponent1: &d % (&p - 1u32),
            exponent2: &d % (&q - 1u32),
            public_exponent: e,
            private_exponent: d,
            prime1: p,
            prime2: q,
            coefficient,
        };
        key.self_test(self.self_test_rounds, rng)?;

        info!(
            "generated {}-bit key with public exponent {}",
            key.bits(),
            key.public_exponent
        );
        Ok(key)
    }
}

/// [`GenerationConfig::generate`] with default settings.
pub fn generate<R>(bits: u64, rng: &mut R) -> Result<KeyMaterial>
where
    R: RngCore + CryptoRng + ?Sized,
{
    GenerationConfig::default().generate(bits, rng)
}

/// [`GenerationConfig::generate_once`] with default settings.
pub fn generate_once<R>(bits: u64, rng: &mut R) -> Result<KeyMaterial>
where
    R: RngCore + CryptoRng + ?Sized,
{
    GenerationConfig::default().generate_once(bits, rng)
}

/// [`GenerationConfig::from_primes`] with default settings.
pub fn from_primes<R>(p: BigUint, q: BigUint, rng: &mut R) -> Result<KeyMaterial>
where
    R: RngCore + CryptoRng + ?Sized,
{
    GenerationConfig::default().from_primes(p, q, rng)
}

/// [`GenerationConfig::from_primes_and_exponent`] with default settings.
pub fn from_primes_and_exponent<R>(
    p: BigUint,
    q: BigUint,
    e: BigUint,
    rng: &mut R,
) -> Result<KeyMaterial>
where
    R: RngCore + CryptoRng + ?Sized,
{
    GenerationConfig::default().from_primes_and_exponent(p, q, e, rng)
}

fn validate_primes(p: &BigUint, q: &BigUint) -> Result<()> {
    if p == q {
        return Err(Error::InvalidPrimes("p and q must differ"));
    }
    let floor = BigUint::from(MIN_PRIME);
    if p < &floor || q < &floor {
        return Err(Error::InvalidPrimes("p and q must be at least 3"));
    }
    if p * q <= BigUint::from(MIN_MODULUS) {
        return Err(Error::InvalidPrimes("modulus must exceed 32"));
    }
    Ok(())
}

fn phi(p: &BigUint, q: &BigUint) -> BigUint {
    (p - 1u32) * (q - 1u32)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_traits::One;
    use numerics::is_probable_prime;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use rstest::rstest;

    use super::{
        GenerationConfig, MAX_KEY_BITS, from_primes, from_primes_and_exponent, generate,
        generate_once,
    };
    use crate::error::Error;
    use crate::key::KeyMaterial;

    const CHECK_TRIALS: u32 = 40;

    struct NoEntropy;

    impl rand::RngCore for NoEntropy {
        fn next_u32(&mut self) -> u32 {
            panic!("randomness consumed")
        }
        fn next_u64(&mut self) -> u64 {
            panic!("randomness consumed")
        }
        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("randomness consumed")
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            panic!("randomness consumed")
        }
    }

    impl rand::CryptoRng for NoEntropy {}

    fn big(value: u32) -> BigUint {
        BigUint::from(value)
    }

    fn assert_key_invariants(key: &KeyMaterial) {
        let p = key.prime1();
        let q = key.prime2();
        let phi = (p - 1u32) * (q - 1u32);

        assert_ne!(p, q);
        assert_eq!(&(p * q), key.modulus());
        assert!(((key.private_exponent() * key.public_exponent()) % &phi).is_one());
        assert!(key.private_exponent() < &phi);
        assert_eq!(&(key.private_exponent() % (p - 1u32)), key.exponent1());
        assert_eq!(&(key.private_exponent() % (q - 1u32)), key.exponent2());
        assert!(((q * key.coefficient()) % p).is_one());
        assert!(key.coefficient() < p);
    }

    #[test]
    fn test_textbook_key() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let key = from_primes_and_exponent(big(61), big(53), big(17), &mut rng).unwrap();

        assert_eq!(&big(3233), key.modulus());
        assert_eq!(&big(17), key.public_exponent());
        assert_eq!(&big(2753), key.private_exponent());
        assert_eq!(&big(61), key.prime1());
        assert_eq!(&big(53), key.prime2());
        assert_eq!(&big(53), key.exponent1());
        assert_eq!(&big(49), key.exponent2());
        assert_eq!(&big(38), key.coefficient());
        assert_eq!(big(2790), key.encrypt(&big(65)));
        assert_eq!(big(65), key.decrypt(&big(2790)));
        assert_key_invariants(&key);
    }

    #[rstest(e, case(3), case(5), case(13), case(6))]
    fn test_exponent_sharing_a_factor_with_phi(e: u32) {
        // phi = 60 * 52 = 3120 = 2^4 * 3 * 5 * 13
        let err = from_primes_and_exponent(big(61), big(53), big(e), &mut NoEntropy).unwrap_err();
        assert_eq!(Error::NotCoprime(big(e)), err);
    }

    #[rstest(p, q, case(61, 53), case(53, 61), case(11, 7), case(65537, 257))]
    fn test_from_primes_random_exponent(p: u32, q: u32) {
        let mut rng = ChaCha20Rng::seed_from_u64(u64::from(p * q));
        let key = from_primes(big(p), big(q), &mut rng).unwrap();

        let ceiling = BigUint::one() << key.modulus().count_ones();
        assert!(key.public_exponent() >= &big(3));
        assert!(key.public_exponent() < &ceiling);
        assert_key_invariants(&key);
    }

    #[rstest(
        p,
        q,
        case(61, 61),
        case(2, 53),
        case(61, 1),
        case(0, 53),
        case(3, 5),
        case(3, 7)
    )]
    fn test_from_primes_rejects_invalid_pairs(p: u32, q: u32) {
        let err = from_primes(big(p), big(q), &mut NoEntropy).unwrap_err();
        assert!(matches!(err, Error::InvalidPrimes(_)));
    }

    #[rstest(bits, case(16), case(64), case(128), case(256))]
    fn test_generate(bits: u64) {
        let mut rng = ChaCha20Rng::seed_from_u64(bits);
        let key = generate(bits, &mut rng).unwrap();

        assert_eq!(bits / 2 + 2, key.prime1().bits());
        assert_eq!(bits / 2 - 2, key.prime2().bits());
        assert!(is_probable_prime(key.prime1(), CHECK_TRIALS, &mut rng));
        assert!(is_probable_prime(key.prime2(), CHECK_TRIALS, &mut rng));
        assert_key_invariants(&key);
        key.self_test(20, &mut rng).unwrap();
    }

    #[test]
    fn test_generate_once_odd_bits() {
        // 65 bits splits into 34 and 30 bit primes
        let mut rng = ChaCha20Rng::seed_from_u64(65);
        let key = generate_once(65, &mut rng).unwrap();
        assert_eq!(34, key.prime1().bits());
        assert_eq!(30, key.prime2().bits());
        assert_key_invariants(&key);
    }

    #[rstest(
        bits,
        case(0),
        case(1),
        case(4),
        case(7),
        case(MAX_KEY_BITS + 1),
        case(u64::MAX)
    )]
    fn test_generate_rejects_out_of_range_sizes(bits: u64) {
        assert_eq!(Error::InvalidBits(bits), generate(bits, &mut NoEntropy).unwrap_err());
        assert_eq!(
            Error::InvalidBits(bits),
            generate_once(bits, &mut NoEntropy).unwrap_err()
        );
    }

    #[test]
    fn test_generate_gives_up_after_restarts() {
        let config = GenerationConfig {
            max_coprime_attempts: 0,
            max_restarts: 2,
            ..GenerationConfig::default()
        };
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let err = config.generate(64, &mut rng).unwrap_err();
        assert_eq!(Error::CoprimeAttemptsExhausted(0), err);
    }

    #[test]
    fn test_generate_restarts_after_failed_self_test() {
        // With no Miller–Rabin rounds every odd candidate counts as prime, so
        // most attempts build a key from composites that fails its self test.
        let config = GenerationConfig {
            trials: 0,
            max_restarts: 2,
            ..GenerationConfig::default()
        };
        let mut gave_up = 0;
        for seed in 0..32 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let actual = config.generate(64, &mut rng);

            let mut replay = ChaCha20Rng::seed_from_u64(seed);
            let mut failures = 0;
            let expected = loop {
                match config.generate_once(64, &mut replay) {
                    Err(Error::SelfTestFailed { .. } | Error::CoprimeAttemptsExhausted(_))
                        if failures < config.max_restarts =>
                    {
                        failures += 1;
                    }
                    other => break other,
                }
            };

            assert_eq!(expected, actual);
            assert_eq!(replay.next_u64(), rng.next_u64());
            if let Err(Error::SelfTestFailed { message, decrypted }) = actual {
                assert_eq!(config.max_restarts, failures);
                assert_ne!(message, decrypted);
                gave_up += 1;
            }
        }
        assert!(gave_up > 0);
    }

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert_eq!(5, config.trials);
        assert_eq!(1000, config.max_coprime_attempts);
        assert_eq!(3, config.max_restarts);
        assert_eq!(10, config.self_test_rounds);
    }
}
