use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `a*x + b*y = g = gcd(a, b)`. The loop is
/// iterative so operand size never translates into stack depth.
pub fn egcd(a: &BigUint, b: &BigUint) -> (BigUint, BigInt, BigInt) {
    let mut a = BigInt::from(a.clone());
    let mut b = BigInt::from(b.clone());
    // b = a0*x + b0*y and a = a0*u + b0*v hold on every iteration
    let (mut x, mut y) = (BigInt::zero(), BigInt::one());
    let (mut u, mut v) = (BigInt::one(), BigInt::zero());

    while !a.is_zero() {
        let (q, r) = b.div_rem(&a);
        let m = &x - &u * &q;
        let n = &y - &v * &q;
        b = a;
        a = r;
        x = u;
        y = v;
        u = m;
        v = n;
    }

    let (_, gcd) = b.into_parts();
    (gcd, x, y)
}

/// Greatest common divisor by repeated remainders.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    if a == b {
        return a.clone();
    }
    let (mut a, mut b) = (a.clone(), b.clone());
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

/// Modular inverse `x` in `[0, m)` such that `a*x ≡ 1 (mod m)`.
pub fn modinv(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(Error::NoInverse);
    }
    let (g, x, _) = egcd(a, m);
    if !g.is_one() {
        return Err(Error::NoInverse);
    }
    let (_, inverse) = x.mod_floor(&BigInt::from(m.clone())).into_parts();
    Ok(inverse)
}
