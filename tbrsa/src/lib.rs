//! # tbrsa
//!
//! Core traits for the tbrsa key generation toolkit.
//!
//! This crate defines the `Encoder` trait that establishes the type-safe
//! conversion pattern used by the serialization crates.
//!
//! ## Overview
//!
//! Generated key material flows through the encoding layers like this:
//! ```text
//! KeyMaterial → RSAPrivateKey → Element → ASN1Object → Der → Vec<u8>
//! ```
//!
//! Each step past the PKCS#1 schema uses the `Encoder` trait to convert from
//! one type to the next.
//!
//! ## Example
//!
//! The following example shows the chain. Concrete implementations are
//! provided by the `pkcs`, `asn1` and `der` crates:
//!
//! ```ignore
//! use tbrsa::encoder::Encoder;
//! use asn1::{ASN1Object, Element};
//! use der::Der;
//!
//! let element: Element = rsa_private_key.encode().unwrap();
//! let der: Der = ASN1Object::new(vec![element]).encode().unwrap();
//! let bytes: Vec<u8> = der.encode().unwrap();
//! ```

#![forbid(unsafe_code)]

pub mod encoder;
