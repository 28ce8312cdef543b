use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult};
use crate::id3v2::syncdata;
use std::convert::TryInto;

pub(crate) const ID_HEADER: &[u8] = b"ID3";

/// The width of a tag header in bytes.
pub const HEADER_SIZE: usize = 10;

/// The ID3v2 revisions that can be read.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Version {
    V22,
    V23,
    V24,
}

impl Version {
    /// Maps a tag header's major version to a `Version`.
    pub fn from_major(major: u8) -> Option<Self> {
        match major {
            2 => Some(Self::V22),
            3 => Some(Self::V23),
            4 => Some(Self::V24),
            _ => None,
        }
    }

    pub fn major(self) -> u8 {
        match self {
            Self::V22 => 2,
            Self::V23 => 3,
            Self::V24 => 4,
        }
    }

    /// The length of a frame identifier.
    pub fn id_width(self) -> usize {
        match self {
            Self::V22 => 3,
            Self::V23 | Self::V24 => 4,
        }
    }

    /// The length of a whole frame header, flags included.
    pub fn header_width(self) -> usize {
        match self {
            Self::V22 => 6,
            Self::V23 | Self::V24 => 10,
        }
    }

    /// Decodes the size field of a frame header.
    pub(crate) fn frame_size(self, raw: &[u8]) -> u32 {
        match self {
            Self::V22 => u32::from_be_bytes([0, raw[0], raw[1], raw[2]]),
            Self::V23 => u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]),
            Self::V24 => syncdata::decode_size([raw[0], raw[1], raw[2], raw[3]]),
        }
    }
}

/// The fixed 10-byte header at the start of every tag.
///
/// Minor versions and flags are read but never acted on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TagHeader {
    version: Version,
    minor: u8,
    flags: u8,
    tag_size: u32,
}

impl TagHeader {
    /// Creates the header written in front of an encoded tag body. Tags are always
    /// written as ID3v2.3.
    pub(crate) fn new(tag_size: u32) -> Self {
        TagHeader {
            version: Version::V23,
            minor: 0,
            flags: 0,
            tag_size,
        }
    }

    pub(crate) fn parse(data: &[u8]) -> ParseResult<Self> {
        let mut stream = BufStream::new(data);

        if stream.slice(3)? != ID_HEADER {
            return Err(ParseError::MalformedData);
        }

        let major = stream.read_u8()?;
        let minor = stream.read_u8()?;
        let flags = stream.read_u8()?;
        let size = stream.read_array()?;

        if !syncdata::is_synchsafe(size) {
            return Err(ParseError::MalformedHeaderSize);
        }

        let version = Version::from_major(major).ok_or(ParseError::Unsupported)?;

        Ok(TagHeader {
            version,
            minor,
            flags,
            tag_size: syncdata::decode_size(size),
        })
    }

    pub(crate) fn render(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0; HEADER_SIZE];

        header[0..3].copy_from_slice(ID_HEADER);
        header[3] = self.version.major();
        header[4] = self.minor;
        header[5] = self.flags;
        header[6..10].copy_from_slice(&syncdata::encode_size(self.tag_size));

        header
    }

    pub(crate) fn version(&self) -> Version {
        self.version
    }

    /// The size of the tag body, excluding this header.
    pub(crate) fn size(&self) -> usize {
        self.tag_size as usize
    }
}

/// Reads the raw synchsafe size bytes out of a tag header without validating anything else.
pub(crate) fn raw_size(data: &[u8]) -> Option<[u8; 4]> {
    data.get(6..HEADER_SIZE)?.try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_v3() {
        let data = b"\x49\x44\x33\x03\x00\xA0\x00\x08\x49\x30";
        let header = TagHeader::parse(&data[..]).unwrap();

        assert_eq!(header.size(), 140464);
        assert_eq!(header.version(), Version::V23);
        assert_eq!(header.minor, 0);
        assert_eq!(header.flags, 0xA0);
    }

    #[test]
    fn parse_v2_and_v4() {
        let data = b"ID3\x02\x00\x00\x00\x00\x02\x01";
        let header = TagHeader::parse(&data[..]).unwrap();
        assert_eq!(header.version(), Version::V22);
        assert_eq!(header.size(), 257);

        let data = b"ID3\x04\x00\x50\x00\x08\x49\x30";
        let header = TagHeader::parse(&data[..]).unwrap();
        assert_eq!(header.version(), Version::V24);
        assert_eq!(header.size(), 140464);
    }

    #[test]
    fn reject_bad_headers() {
        assert!(matches!(
            TagHeader::parse(b"ID3\x03\x00\x00\x00\x80\x00\x00"),
            Err(ParseError::MalformedHeaderSize)
        ));
        assert!(matches!(
            TagHeader::parse(b"ID3\x05\x00\x00\x00\x00\x00\x0A"),
            Err(ParseError::Unsupported)
        ));
        assert!(matches!(
            TagHeader::parse(b"ID3\x03\x00"),
            Err(ParseError::NotEnoughData)
        ));
        assert!(matches!(
            TagHeader::parse(b"TAG\x03\x00\x00\x00\x00\x00\x0A"),
            Err(ParseError::MalformedData)
        ));
    }

    #[test]
    fn render_header() {
        assert_eq!(&TagHeader::new(257).render(), b"ID3\x03\x00\x00\x00\x00\x02\x01");

        // Headers read from ID3v2.2 or ID3v2.4 tags keep their version and flags.
        let data = b"ID3\x04\x00\x40\x00\x00\x02\x01";
        assert_eq!(&TagHeader::parse(data).unwrap().render(), data);
    }

    #[test]
    fn frame_sizes() {
        assert_eq!(Version::V22.frame_size(b"\x01\x02\x03"), 0x010203);
        assert_eq!(Version::V23.frame_size(b"\x00\x00\x01\x00"), 256);
        assert_eq!(Version::V24.frame_size(b"\x00\x00\x02\x00"), 256);
    }
}
