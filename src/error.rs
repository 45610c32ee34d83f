//! Error types

use crate::binary::read::ReadEof;
use crate::tag::DisplayTag;
use std::fmt;

/// Errors that originate when parsing binary data
///
/// These are font-load failures. Problems encountered while interpreting an individual
/// charstring are reported as [CFFError](crate::cff::CFFError) instead.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParseError {
    BadEof,
    BadValue,
    BadVersion,
    BadOffset,
    BadIndex,
    /// An INDEX offset was out of order or pointed beyond the end of the data.
    MalformedIndex,
    LimitExceeded,
    MissingValue,
    MissingTable(u32),
    /// The data is wrapped in a container that cannot hold CFF, e.g. a TrueType collection.
    UnsupportedContainer(u32),
    /// A CID operation was applied to a name-keyed font or vice versa.
    WrongKind,
    NotImplemented,
}

impl From<ReadEof> for ParseError {
    fn from(_error: ReadEof) -> Self {
        ParseError::BadEof
    }
}

impl From<std::num::TryFromIntError> for ParseError {
    fn from(_error: std::num::TryFromIntError) -> Self {
        ParseError::BadValue
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BadEof => write!(f, "end of data reached unexpectedly"),
            ParseError::BadValue => write!(f, "invalid value"),
            ParseError::BadVersion => write!(f, "unexpected data version"),
            ParseError::BadOffset => write!(f, "invalid data offset"),
            ParseError::BadIndex => write!(f, "invalid data index"),
            ParseError::MalformedIndex => write!(f, "malformed INDEX offsets"),
            ParseError::LimitExceeded => write!(f, "limit exceeded"),
            ParseError::MissingValue => write!(f, "an expected data value was missing"),
            ParseError::MissingTable(tag) => {
                write!(f, "font is missing '{}' table", DisplayTag(*tag))
            }
            ParseError::UnsupportedContainer(tag) => {
                write!(f, "unsupported font container '{}'", DisplayTag(*tag))
            }
            ParseError::WrongKind => write!(f, "operation does not apply to this kind of font"),
            ParseError::NotImplemented => write!(f, "feature not implemented"),
        }
    }
}

impl std::error::Error for ParseError {}
