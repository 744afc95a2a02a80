use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// Digits of `n` in base `p`, most significant first.
///
/// `0` yields `[0]`.
pub fn factor_powers_of_p(n: &BigUint, p: &BigUint) -> Result<Vec<BigUint>> {
    if p < &BigUint::from(2u32) {
        return Err(Error::InvalidBase(p.to_string()));
    }
    if n.is_zero() {
        return Ok(vec![BigUint::zero()]);
    }

    let mut digits = Vec::new();
    let mut rest = n.clone();
    while !rest.is_zero() {
        let (q, r) = rest.div_rem(p);
        digits.push(r);
        rest = q;
    }
    digits.reverse();
    Ok(digits)
}

/// Exponents of the set bits of `n`, highest first. `13` gives `[3, 2, 0]`.
pub fn factor_powers_of_two(n: &BigUint) -> Vec<u64> {
    (0..n.bits()).rev().filter(|&i| n.bit(i)).collect()
}

/// Prime factors of `n` in ascending order, repeated by multiplicity.
pub fn prime_factors(n: &BigUint) -> Vec<BigUint> {
    trial_division(n, BigUint::from(2u32))
}

/// Trial division that starts dividing at `start` instead of 2.
///
/// Divisors below `start` are never tried, so the result only consists of
/// primes when `n` has no factor below `start`.
pub fn prime_factors_from(n: &BigUint, start: &BigUint) -> Result<Vec<BigUint>> {
    if start < &BigUint::from(2u32) {
        return Err(Error::InvalidBase(start.to_string()));
    }
    Ok(trial_division(n, start.clone()))
}

fn trial_division(n: &BigUint, mut divisor: BigUint) -> Vec<BigUint> {
    let mut n = n.clone();
    let mut factors = Vec::new();
    while &divisor * &divisor <= n {
        let (q, r) = n.div_rem(&divisor);
        if r.is_zero() {
            factors.push(divisor.clone());
            n = q;
        } else {
            divisor += 1u32;
        }
    }
    if n > BigUint::one() {
        factors.push(n);
    }
    factors
}

/// Sum of the decimal digits of `n`.
pub fn sum_of_digits(n: &BigUint) -> u64 {
    n.to_radix_be(10).iter().map(|&d| d as u64).sum()
}

/// `⌈log₂ n⌉`, with `0` and `1` both mapping to 0.
pub fn bit_length(n: &BigUint) -> u64 {
    if n <= &BigUint::one() {
        return 0;
    }
    (n - 1u32).bits()
}

/// The next multiple of `blksize` strictly greater than `num`.
pub fn next_multiple_of(num: &BigUint, blksize: &BigUint) -> Result<BigUint> {
    if blksize.is_zero() {
        return Err(Error::InvalidBase(blksize.to_string()));
    }
    Ok(num + (blksize - num % blksize))
}
