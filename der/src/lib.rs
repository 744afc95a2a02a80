use log::trace;
use tbrsa::encoder::{EncodableTo, Encoder};

pub mod error;

use error::Error;

pub const TAG_CONSTRUCTED: u8 = 0x20;

const LONG_FORM: u8 = 0x80;
const SHORT_FORM_MAX: usize = 0x7f;
// 0xff is reserved as the first length octet, so a long form names at most 126 octets.
const MAX_LENGTH_OCTETS: usize = 0x7e;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tag {
    Integer,
    Sequence,
}

impl Tag {
    pub fn is_constructed(&self) -> bool {
        u8::from(self) & TAG_CONSTRUCTED == TAG_CONSTRUCTED
    }
}

impl From<&Tag> for u8 {
    fn from(tag: &Tag) -> Self {
        match tag {
            // universal class, primitive, tag number 2
            Tag::Integer => 0x02,
            // universal class, constructed, tag number 16
            Tag::Sequence => 0x10 | TAG_CONSTRUCTED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Tlv(Vec<Tlv>),
    Data(Vec<u8>),
}

impl Tlv {
    pub fn new_primitive(tag: Tag, data: Vec<u8>) -> Self {
        Tlv {
            tag,
            value: Value::Data(data),
        }
    }

    pub fn new_constructed(tag: Tag, tlvs: Vec<Tlv>) -> Self {
        Tlv {
            tag,
            value: Value::Tlv(tlvs),
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Data(data) => Some(data),
            Value::Tlv(_) => None,
        }
    }

    pub fn tlvs(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Tlv(tlvs) => Some(tlvs),
            Value::Data(_) => None,
        }
    }

    fn contents(&self) -> Result<Vec<u8>, Error> {
        match (&self.value, self.tag.is_constructed()) {
            (Value::Data(data), false) => Ok(data.clone()),
            (Value::Tlv(tlvs), true) => {
                let mut contents = Vec::new();
                for tlv in tlvs {
                    contents.extend(tlv.encode()?);
                }
                Ok(contents)
            }
            _ => Err(Error::UnexpectedValue(self.tag)),
        }
    }
}

impl EncodableTo<Tlv> for Vec<u8> {}

impl Encoder<Tlv, Vec<u8>> for Tlv {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        let contents = self.contents()?;
        let length = encode_length(contents.len())?;
        trace!(
            "encode {:?}: {} length octet(s), {} content octet(s)",
            self.tag,
            length.len(),
            contents.len()
        );

        let mut bytes = Vec::with_capacity(1 + length.len() + contents.len());
        bytes.push(u8::from(&self.tag));
        bytes.extend(length);
        bytes.extend(contents);
        Ok(bytes)
    }
}

/// A sequence of top level TLVs, serialized back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der {
    elements: Vec<Tlv>,
}

impl Der {
    pub fn new(elements: Vec<Tlv>) -> Self {
        Der { elements }
    }

    pub fn elements(&self) -> &[Tlv] {
        &self.elements
    }
}

impl EncodableTo<Der> for Vec<u8> {}

impl Encoder<Der, Vec<u8>> for Der {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        let mut bytes = Vec::new();
        for tlv in &self.elements {
            bytes.extend(tlv.encode()?);
        }
        Ok(bytes)
    }
}

/// Encodes a content length.
///
/// Lengths up to 127 use the short form: a single octet holding the length.
/// Longer contents use the long form: `0x80 | k` followed by `k` big-endian
/// octets of the length, where `k` is the smallest count with `256^k >= length`.
/// A length that is a multiple of 256 gets one extra leading octet. For 256
/// and 65536 this lands on the minimal width; for other multiples (512, 768,
/// ...) the length carries a leading zero octet.
pub fn encode_length(length: usize) -> Result<Vec<u8>, Error> {
    if length <= SHORT_FORM_MAX {
        return Ok(vec![length as u8]);
    }

    let mut octets = ceil_log256(length);
    if length % 256 == 0 {
        octets += 1;
    }
    if octets > MAX_LENGTH_OCTETS {
        return Err(Error::LengthTooLarge(length));
    }

    let mut bytes = Vec::with_capacity(octets + 1);
    bytes.push(LONG_FORM | octets as u8);
    for i in (0..octets).rev() {
        let shifted = length.checked_shr(8 * i as u32).unwrap_or(0);
        bytes.push((shifted & 0xff) as u8);
    }
    Ok(bytes)
}

// Smallest k such that 256^k >= length, for length >= 1.
fn ceil_log256(length: usize) -> usize {
    let bits = usize::BITS - (length - 1).leading_zeros();
    (bits as usize).div_ceil(8).max(1)
}
