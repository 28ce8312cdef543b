//! ID3v2 tag reading and writing.
//!
//! ID3v2.2, ID3v2.3 and ID3v2.4 tags can be read, while tags are always written as
//! ID3v2.3 with UTF-16 text.

pub mod frames;
mod header;
pub mod syncdata;
mod tag;
mod value;

pub use frames::{
    Chapter, Comment, Frame, Picture, PictureType, Popularimeter, Private, UserText, UserUrl,
};
pub use header::{Version, HEADER_SIZE};
pub use tag::{Tag, TagMap};
pub use value::Value;

use crate::err::{ParseError, ParseResult, SaveError, SaveResult};
use header::{TagHeader, ID_HEADER};
use log::{info, warn};

/// How far into a buffer a tag can start.
const SEARCH_LIMIT: usize = 20;

/// Returns the offset of the first tag identifier within the first 20 bytes of `data`.
pub fn locate(data: &[u8]) -> Option<usize> {
    data.windows(ID_HEADER.len())
        .take(SEARCH_LIMIT + 1)
        .position(|window| window == ID_HEADER)
}

/// Decodes the tag at the start of `data`.
///
/// This never fails. Data with no tag, an unsupported version or a corrupt size yields
/// an empty tag, and frames that cannot be read are left out.
pub fn decode(data: &[u8]) -> Tag {
    let start = match locate(data) {
        Some(start) => start,
        None => return Tag::default(),
    };

    let header = match TagHeader::parse(&data[start..]) {
        Ok(header) => header,
        Err(err) => {
            warn!(target: "id3v2", "ignoring tag at offset {}: {}", start, err);
            return Tag::default();
        }
    };

    let body_start = start + HEADER_SIZE;
    let body_end = usize::min(body_start + header.size(), data.len());

    if body_end - body_start < header.size() {
        info!(target: "id3v2", "tag is larger than the data, reading what is there");
    }

    frames::decode_frames(&data[body_start..body_end], header.version())
}

/// Encodes a tag map into a complete ID3v2.3 tag.
///
/// Keys are resolved as aliases first and frame IDs second. Entries that cannot be
/// encoded are skipped, so an empty map produces a tag with no frames.
pub fn encode(tags: &TagMap) -> SaveResult<Vec<u8>> {
    let body = frames::encode_frames(tags);

    if body.len() >= syncdata::SIZE_LIMIT {
        return Err(SaveError::TooLarge);
    }

    let header = TagHeader::new(body.len() as u32);

    let mut result = Vec::with_capacity(HEADER_SIZE + body.len());
    result.extend(&header.render());
    result.extend(body);

    Ok(result)
}

/// Returns the part of `data` that follows its tag, or all of `data` if there is no tag.
///
/// Anything before the tag is dropped along with it. A tag size that is not synchsafe
/// cannot be skipped reliably and is an error.
pub fn strip(data: &[u8]) -> ParseResult<&[u8]> {
    let start = match locate(data) {
        Some(start) => start,
        None => return Ok(data),
    };

    let size = match header::raw_size(&data[start..]) {
        Some(size) => size,
        None => return Ok(&data[data.len()..]),
    };

    if !syncdata::is_synchsafe(size) {
        return Err(ParseError::MalformedHeaderSize);
    }

    let end = start + HEADER_SIZE + syncdata::decode_size(size) as usize;

    Ok(&data[usize::min(end, data.len())..])
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG: &[u8] = b"ID3\x03\x00\x00\x00\x00\x00\x10\
                         TIT2\x00\x00\x00\x06\x00\x00\
                         \x00Title\
                         AUDIO";

    #[test]
    fn locate_tags() {
        assert_eq!(locate(TAG), Some(0));
        assert_eq!(locate(b"\0\0\0\0ID3"), Some(4));
        assert_eq!(locate(b"no tag here"), None);
        assert_eq!(locate(b""), None);

        let mut data = vec![0; 20];
        data.extend(b"ID3");
        assert_eq!(locate(&data), Some(20));

        data.insert(0, 0);
        assert_eq!(locate(&data), None);
    }

    #[test]
    fn decode_tag() {
        let tag = decode(TAG);

        assert_eq!(tag.raw.len(), 1);
        assert_eq!(tag.raw["TIT2"], Value::from("Title"));
        assert_eq!(tag.aliases["title"], Value::from("Title"));
    }

    #[test]
    fn decode_nothing() {
        assert!(decode(b"AUDIO").is_empty());
        assert!(decode(b"ID3\x03\x00\x00\x00\x00\x80\x10TIT2").is_empty());
        assert!(decode(b"ID3\x09\x00\x00\x00\x00\x00\x10").is_empty());
        assert!(decode(b"ID3\x03").is_empty());
    }

    #[test]
    fn strip_tag() {
        assert_eq!(strip(TAG).unwrap(), b"AUDIO");
        assert_eq!(strip(b"AUDIO").unwrap(), b"AUDIO");
        assert_eq!(strip(b"\0\0ID3\x03\x00\x00\x00\x00\x00\x01\0AUDIO").unwrap(), b"AUDIO");
        assert_eq!(strip(b"ID3\x03\x00\x00\x00\x00\x01\x00").unwrap(), b"");
        assert_eq!(strip(b"ID3\x03").unwrap(), b"");
    }

    #[test]
    fn strip_malformed() {
        assert!(matches!(
            strip(b"ID3\x03\x00\x00\x00\x00\x80\x10AUDIO"),
            Err(ParseError::MalformedHeaderSize)
        ));
    }

    #[test]
    fn encode_tag() {
        let mut tags = TagMap::new();
        tags.insert(String::from("title"), Value::from("a"));

        assert_eq!(
            encode(&tags).unwrap(),
            b"ID3\x03\x00\x00\x00\x00\x00\x0F\
              TIT2\x00\x00\x00\x05\x00\x00\
              \x01\xFF\xFEa\x00"
                .to_vec()
        );

        assert_eq!(encode(&TagMap::new()).unwrap(), b"ID3\x03\x00\x00\x00\x00\x00\x00");
    }
}
