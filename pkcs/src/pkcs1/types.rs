use asn1::{ASN1Object, Element, Integer};
use keygen::KeyMaterial;
use log::debug;
use tbrsa::encoder::{EncodableTo, Encoder};

use super::error::Result;

/*
RFC 8017 - PKCS #1: RSA Cryptography Specifications

RSAPrivateKey ::= SEQUENCE {
    version           Version,
    modulus           INTEGER,  -- n
    publicExponent    INTEGER,  -- e
    privateExponent   INTEGER,  -- d
    prime1            INTEGER,  -- p
    prime2            INTEGER,  -- q
    exponent1         INTEGER,  -- d mod (p-1)
    exponent2         INTEGER,  -- d mod (q-1)
    coefficient       INTEGER,  -- (inverse of q) mod p
    otherPrimeInfos   OtherPrimeInfos OPTIONAL
}

Version ::= INTEGER { two-prime(0), multi(1) }
    (CONSTRAINED BY {-- version must be multi if otherPrimeInfos present --})
*/

/// PKCS#1 RSAPrivateKey version. Generated keys always have two primes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    TwoPrime = 0,
}

impl From<Version> for u64 {
    fn from(v: Version) -> Self {
        v as u64
    }
}

impl From<Version> for Integer {
    fn from(v: Version) -> Self {
        Integer::from(u64::from(v))
    }
}

/// PKCS#1 RSA Private Key structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RSAPrivateKey {
    pub version: Version,
    pub modulus: Integer,          // n
    pub public_exponent: Integer,  // e
    pub private_exponent: Integer, // d
    pub prime1: Integer,           // p
    pub prime2: Integer,           // q
    pub exponent1: Integer,        // d mod (p-1)
    pub exponent2: Integer,        // d mod (q-1)
    pub coefficient: Integer,      // (inverse of q) mod p
                                   // otherPrimeInfos is never produced
}

impl From<&KeyMaterial> for RSAPrivateKey {
    fn from(key: &KeyMaterial) -> Self {
        RSAPrivateKey {
            version: Version::TwoPrime,
            modulus: Integer::from(key.modulus()),
            public_exponent: Integer::from(key.public_exponent()),
            private_exponent: Integer::from(key.private_exponent()),
            prime1: Integer::from(key.prime1()),
            prime2: Integer::from(key.prime2()),
            exponent1: Integer::from(key.exponent1()),
            exponent2: Integer::from(key.exponent2()),
            coefficient: Integer::from(key.coefficient()),
        }
    }
}

impl EncodableTo<RSAPrivateKey> for Element {}

impl Encoder<RSAPrivateKey, Element> for RSAPrivateKey {
    type Error = super::Error;

    fn encode(&self) -> Result<Element> {
        Ok(Element::Sequence(vec![
            Element::Integer(Integer::from(self.version)),
            Element::Integer(self.modulus.clone()),
            Element::Integer(self.public_exponent.clone()),
            Element::Integer(self.private_exponent.clone()),
            Element::Integer(self.prime1.clone()),
            Element::Integer(self.prime2.clone()),
            Element::Integer(self.exponent1.clone()),
            Element::Integer(self.exponent2.clone()),
            Element::Integer(self.coefficient.clone()),
        ]))
    }
}

impl RSAPrivateKey {
    /// Get the key size in bits (RSA modulus bit length)
    pub fn key_size(&self) -> u32 {
        self.modulus.bits() as u32
    }

    pub fn public_key(&self) -> RSAPublicKey {
        RSAPublicKey {
            modulus: self.modulus.clone(),
            public_exponent: self.public_exponent.clone(),
        }
    }

    /// DER bytes of the private key.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let bytes = ASN1Object::new(vec![self.encode()?]).to_bytes()?;
        debug!("encoded {}-bit RSAPrivateKey into {} bytes", self.key_size(), bytes.len());
        Ok(bytes)
    }
}

/*
RFC 8017 - RSA Public Key

RSAPublicKey ::= SEQUENCE {
    modulus           INTEGER,  -- n
    publicExponent    INTEGER   -- e
}
*/

/// PKCS#1 RSA Public Key structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RSAPublicKey {
    pub modulus: Integer,         // n
    pub public_exponent: Integer, // e
}

impl From<&KeyMaterial> for RSAPublicKey {
    fn from(key: &KeyMaterial) -> Self {
        RSAPublicKey {
            modulus: Integer::from(key.modulus()),
            public_exponent: Integer::from(key.public_exponent()),
        }
    }
}

impl EncodableTo<RSAPublicKey> for Element {}

impl Encoder<RSAPublicKey, Element> for RSAPublicKey {
    type Error = super::Error;

    fn encode(&self) -> Result<Element> {
        Ok(Element::Sequence(vec![
            Element::Integer(self.modulus.clone()),
            Element::Integer(self.public_exponent.clone()),
        ]))
    }
}

impl RSAPublicKey {
    /// Get the key size in bits (RSA modulus bit length)
    pub fn key_size(&self) -> u32 {
        self.modulus.bits() as u32
    }

    /// DER bytes of the public key.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let bytes = ASN1Object::new(vec![self.encode()?]).to_bytes()?;
        debug!("encoded {}-bit RSAPublicKey into {} bytes", self.key_size(), bytes.len());
        Ok(bytes)
    }
}
