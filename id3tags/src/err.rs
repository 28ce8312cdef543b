//! Error types.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::{self, ErrorKind};

/// An error that can occur while reading a tag.
///
/// Most malformed data never surfaces as an error. Frames that cannot be decoded are
/// simply left out of the resulting tag, so these variants mostly show up when operating
/// on files or when stripping a tag with a corrupted size.
#[derive(Debug)]
pub enum ParseError {
    /// The data ended before a structure could be fully read.
    NotEnoughData,
    /// The data is structurally invalid.
    MalformedData,
    /// A tag header size byte had its high bit set.
    MalformedHeaderSize,
    /// The tag version is not 2.2, 2.3 or 2.4.
    Unsupported,
    /// An I/O error occurred while accessing a file.
    IoError(io::Error),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::IoError(err) => err.fmt(f),
            Self::MalformedHeaderSize => write![f, "tag header size is not synchsafe"],
            _ => write![f, "{:?}", self],
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        // Streams signal an underread with UnexpectedEof, which is a data problem and
        // not an actual I/O failure.
        match err.kind() {
            ErrorKind::UnexpectedEof => Self::NotEnoughData,
            _ => Self::IoError(err),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// An error that can occur while writing a tag.
#[derive(Debug)]
pub enum SaveError {
    /// The encoded tag body would not fit into a 28-bit synchsafe size.
    TooLarge,
    /// The existing tag could not be stripped from the file.
    Malformed(ParseError),
    /// An I/O error occurred while accessing a file.
    IoError(io::Error),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::TooLarge => write![f, "tag is too large to be written"],
            Self::Malformed(err) => write![f, "malformed tag: {}", err],
            Self::IoError(err) => err.fmt(f),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::IoError(err) => Some(err),
            Self::TooLarge => None,
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(err: io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<ParseError> for SaveError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::IoError(err) => Self::IoError(err),
            err => Self::Malformed(err),
        }
    }
}

pub type SaveResult<T> = Result<T, SaveError>;
