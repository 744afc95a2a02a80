use thiserror::Error;

use crate::Tag;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("length {0} does not fit in a long form length field")]
    LengthTooLarge(usize),
    #[error("unexpected value for tag {0:?}: primitive and constructed contents mismatch")]
    UnexpectedValue(Tag),
}
