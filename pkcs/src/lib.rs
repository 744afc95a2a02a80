//! # pkcs
//!
//! PKCS#1 (RFC 8017) RSA key structures built from generated key material
//! and encoded to DER.

#![forbid(unsafe_code)]

pub mod pkcs1;
