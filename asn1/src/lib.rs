use std::fmt::Display;

use der::{Der, Tag, Tlv};
use error::Error;
use log::debug;
use num_bigint::BigUint;
use tbrsa::encoder::{EncodableTo, Encoder};

pub mod error;

#[derive(Debug, Clone)]
pub struct ASN1Object {
    elements: Vec<Element>,
}

impl ASN1Object {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn new(elements: Vec<Element>) -> Self {
        ASN1Object { elements }
    }

    /// Runs the object through DER into its final byte form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let der: Der = self.encode()?;
        let bytes: Vec<u8> = der.encode()?;
        debug!("encoded ASN.1 object into {} bytes", bytes.len());
        Ok(bytes)
    }
}

impl EncodableTo<ASN1Object> for Der {}

impl Encoder<ASN1Object, Der> for ASN1Object {
    type Error = Error;

    fn encode(&self) -> Result<Der, Self::Error> {
        if self.elements.is_empty() {
            return Err(Error::EmptyObject);
        }
        let mut tlvs = Vec::new();
        for element in &self.elements {
            tlvs.push(element.encode()?);
        }
        Ok(Der::new(tlvs))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Integer(Integer),
    Sequence(Vec<Element>),
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Integer(i) => write!(f, "Integer({})", i),
            Element::Sequence(elements) => {
                write!(f, "Sequence(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<&Element> for Tlv {
    fn from(element: &Element) -> Self {
        match element {
            Element::Integer(i) => Tlv::new_primitive(Tag::Integer, i.to_der_bytes()),
            Element::Sequence(elements) => {
                let tlvs = elements.iter().map(Tlv::from).collect();
                Tlv::new_constructed(Tag::Sequence, tlvs)
            }
        }
    }
}

impl EncodableTo<Element> for Tlv {}

impl Encoder<Element, Tlv> for Element {
    type Error = Error;

    fn encode(&self) -> Result<Tlv, Self::Error> {
        Ok(Tlv::from(self))
    }
}

// PKCS#1 integers are never negative, so the value is kept unsigned and the
// sign octet is added only at encoding time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Integer {
    inner: BigUint,
}

impl Integer {
    /// Number of significant bits in the value
    pub fn bits(&self) -> u64 {
        self.inner.bits()
    }

    /// Content octets of the INTEGER: minimal big-endian bytes, a single
    /// zero octet for 0, and a leading zero octet when the top bit is set.
    pub fn to_der_bytes(&self) -> Vec<u8> {
        // to_bytes_be yields [0x00] for zero
        let magnitude = self.inner.to_bytes_be();
        match magnitude.first() {
            Some(&msb) if msb & 0x80 == 0x80 => {
                let mut bytes = Vec::with_capacity(magnitude.len() + 1);
                bytes.push(0x00);
                bytes.extend(magnitude);
                bytes
            }
            _ => magnitude,
        }
    }
}

impl From<BigUint> for Integer {
    fn from(value: BigUint) -> Self {
        Integer { inner: value }
    }
}

impl From<&BigUint> for Integer {
    fn from(value: &BigUint) -> Self {
        Integer {
            inner: value.clone(),
        }
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Integer {
            inner: BigUint::from(value),
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}
