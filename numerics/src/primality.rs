use log::trace;
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::{CryptoRng, RngCore};

/// Number of Miller–Rabin bases tried per candidate. Each independent base
/// cuts the false positive probability by at least a factor of 4.
pub const DEFAULT_TRIALS: u32 = 5;

/// Miller–Rabin probabilistic primality test.
///
/// `false` means `n` is certainly composite (or one of the excluded values),
/// `true` means no base out of `trials` random ones witnessed compositeness.
///
/// 2 is reported as not prime: the generators never want it.
pub fn is_probable_prime<R>(n: &BigUint, trials: u32, rng: &mut R) -> bool
where
    R: RngCore + CryptoRng + ?Sized,
{
    let two = BigUint::from(2u32);
    if n <= &two || n.is_even() {
        return false;
    }
    // the base interval [2, n-1) is empty for 3
    if n == &BigUint::from(3u32) {
        return true;
    }

    // n-1 = 2^s * d with d odd
    let n_minus_1 = n - 1u32;
    let s = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> s;

    for _ in 0..trials {
        let a = rng.gen_biguint_range(&two, &n_minus_1);
        if is_witness(&a, &d, s, n, &n_minus_1) {
            trace!("0x{a:x} witnesses that 0x{n:x} is composite");
            return false;
        }
    }
    true
}

/// Miller–Rabin with [`DEFAULT_TRIALS`] bases. Values below 2 are not prime.
pub fn is_prime<R>(n: &BigUint, rng: &mut R) -> bool
where
    R: RngCore + CryptoRng + ?Sized,
{
    is_probable_prime(n, DEFAULT_TRIALS, rng)
}

// a is a witness when a^d != 1 and none of a^(2^i * d), i in [0, s), is n-1.
fn is_witness(a: &BigUint, d: &BigUint, s: u64, n: &BigUint, n_minus_1: &BigUint) -> bool {
    let mut x = a.modpow(d, n);
    if x.is_one() {
        return false;
    }
    for _ in 0..s {
        if &x == n_minus_1 {
            return false;
        }
        x = (&x * &x) % n;
    }
    true
}
