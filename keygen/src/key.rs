use std::cmp::min;

use log::trace;
use num_bigint::{BigUint, RandBigInt};
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};

// Self-test messages are drawn from [MESSAGE_FLOOR, min(MESSAGE_CEILING, N)).
const MESSAGE_FLOOR: u32 = 32;
const MESSAGE_CEILING: u32 = 65536;

/// Two-prime RSA key material.
///
/// Holds `N = p*q`, the exponents `E` and `D` with `D*E ≡ 1 (mod (p-1)(q-1))`
/// and the CRT values PKCS#1 stores next to them. Only the generator builds
/// one, so every instance already passed its self test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub(crate) modulus: BigUint,
    pub(crate) public_exponent: BigUint,
    pub(crate) private_exponent: BigUint,
    pub(crate) prime1: BigUint,
    pub(crate) prime2: BigUint,
    pub(crate) exponent1: BigUint,
    pub(crate) exponent2: BigUint,
    pub(crate) coefficient: BigUint,
}

impl KeyMaterial {
    /// `N`
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// `E`
    pub fn public_exponent(&self) -> &BigUint {
        &self.public_exponent
    }

    /// `D`
    pub fn private_exponent(&self) -> &BigUint {
        &self.private_exponent
    }

    /// `p`
    pub fn prime1(&self) -> &BigUint {
        &self.prime1
    }

    /// `q`
    pub fn prime2(&self) -> &BigUint {
        &self.prime2
    }

    /// `D mod (p-1)`
    pub fn exponent1(&self) -> &BigUint {
        &self.exponent1
    }

    /// `D mod (q-1)`
    pub fn exponent2(&self) -> &BigUint {
        &self.exponent2
    }

    /// `q⁻¹ mod p`
    pub fn coefficient(&self) -> &BigUint {
        &self.coefficient
    }

    /// Bit length of the modulus.
    pub fn bits(&self) -> u64 {
        self.modulus.bits()
    }

    /// `m^E mod N`
    pub fn encrypt(&self, message: &BigUint) -> BigUint {
        message.modpow(&self.public_exponent, &self.modulus)
    }

    /// `c^D mod N`
    pub fn decrypt(&self, ciphertext: &BigUint) -> BigUint {
        ciphertext.modpow(&self.private_exponent, &self.modulus)
    }

    /// Encrypts and decrypts `rounds` random messages, failing on the first
    /// one that does not come back unchanged.
    pub fn self_test<R>(&self, rounds: u32, rng: &mut R) -> Result<()>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let lo = BigUint::from(MESSAGE_FLOOR);
        let hi = min(BigUint::from(MESSAGE_CEILING), self.modulus.clone());
        if hi <= lo {
            return Err(Error::InvalidPrimes("modulus must exceed 32"));
        }

        for round in 1..=rounds {
            let message = rng.gen_biguint_range(&lo, &hi);
            let ciphertext = self.encrypt(&message);
            let decrypted = self.decrypt(&ciphertext);
            trace!("self test #{round}: {message} -> {ciphertext} -> {decrypted}");
            if decrypted != message {
                return Err(Error::SelfTestFailed { message, decrypted });
            }
        }
        Ok(())
    }
}
