//! Frame segmentation, decoding and encoding.

pub mod bin;
pub mod chapters;
pub mod comments;
pub mod picture;
pub mod registry;
pub mod stats;
pub mod text;
pub mod url;

pub use bin::Private;
pub use chapters::Chapter;
pub use comments::Comment;
pub use picture::{Picture, PictureType};
pub use registry::{FrameKind, FrameSpec, SpecialKind};
pub use stats::Popularimeter;
pub use text::UserText;
pub use url::UserUrl;

use crate::core::io::BufStream;
use crate::err::ParseResult;
use crate::id3v2::{Tag, TagMap, Value, Version};
use log::{debug, warn};
use std::convert::TryFrom;

/// A single frame carved out of a tag body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame<'a> {
    name: String,
    body: &'a [u8],
}

impl<'a> Frame<'a> {
    fn parse(stream: &mut BufStream<'a>, version: Version) -> ParseResult<Self> {
        let header = stream.slice(version.header_width())?;
        let (id, size) = header.split_at(version.id_width());

        // A size that overruns the parent body will fail here.
        let body = stream.slice(version.frame_size(size) as usize)?;

        Ok(Frame {
            name: String::from_utf8_lossy(id).into_owned(),
            body,
        })
    }

    /// The frame identifier, three characters in ID3v2.2 and four otherwise.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The frame body, without the header.
    pub fn body(&self) -> &'a [u8] {
        self.body
    }

    /// The declared size of the frame body.
    pub fn size(&self) -> usize {
        self.body.len()
    }
}

/// Splits a tag body into frames.
///
/// Segmentation stops at the first NUL byte where a frame ID should be, since that is
/// where padding starts. It also stops at the first frame whose header or body does
/// not fit into the remaining data, keeping everything read before it.
pub fn segment(body: &[u8], version: Version) -> Vec<Frame<'_>> {
    let mut stream = BufStream::new(body);
    let mut frames = Vec::new();

    while let Some(&first) = stream.rest().first() {
        if first == 0 {
            break;
        }

        let pos = stream.pos();

        match Frame::parse(&mut stream, version) {
            Ok(frame) => frames.push(frame),
            Err(err) => {
                warn!(target: "id3v2", "truncated frame at offset {}: {}", pos, err);
                break;
            }
        }
    }

    frames
}

/// Segments a tag body and decodes every frame that can be understood into a [`Tag`](Tag).
pub(crate) fn decode_frames(body: &[u8], version: Version) -> Tag {
    decode_nested(body, version, 0)
}

/// Decodes the frames of a body embedded `depth` chapters deep.
pub(crate) fn decode_nested(body: &[u8], version: Version, depth: usize) -> Tag {
    let mut tag = Tag::default();

    for frame in segment(body, version) {
        if let Some((spec, value)) = decode_frame(&frame, version, depth) {
            tag.insert(frame.name(), spec, value);
        }
    }

    tag
}

fn decode_frame(
    frame: &Frame,
    version: Version,
    depth: usize,
) -> Option<(&'static FrameSpec, Value)> {
    let (spec, kind) = match registry::classify(frame.name(), version) {
        Some(found) => found,
        None => {
            debug!(target: "id3v2", "skipping unknown frame {}", frame.name());
            return None;
        }
    };

    let body = frame.body();

    let value = match kind {
        FrameKind::Text => Ok(Value::Text(text::parse_text(body))),
        FrameKind::Url => Ok(Value::Text(url::parse_url(body))),
        FrameKind::Special(kind) => decode_special(kind, body, version, depth),
    };

    match value {
        Ok(value) => Some((spec, value)),
        Err(err) => {
            warn!(target: "id3v2", "could not decode {}: {}", frame.name(), err);
            None
        }
    }
}

fn decode_special(
    kind: SpecialKind,
    body: &[u8],
    version: Version,
    depth: usize,
) -> ParseResult<Value> {
    Ok(match kind {
        SpecialKind::Picture => Value::Picture(Picture::parse(body, version)?),
        SpecialKind::Comment | SpecialKind::Lyrics => Value::Comment(Comment::parse(body)?),
        SpecialKind::UserText => Value::UserText(UserText::parse(body)?),
        SpecialKind::Popularimeter => Value::Popularimeter(Popularimeter::parse(body)?),
        SpecialKind::Private => Value::Private(Private::parse(body)?),
        SpecialKind::Chapter => Value::Chapter(Chapter::parse(body, depth)?),
        SpecialKind::UserUrl => Value::UserUrl(UserUrl::parse(body)?),
    })
}

/// Encodes every entry of a tag map into ID3v2.3 frames. Keys that cannot be resolved and
/// values that cannot be encoded are skipped.
pub(crate) fn encode_frames(tags: &TagMap) -> Vec<u8> {
    encode_nested(tags, 0)
}

/// Encodes the frames of a tag map embedded `depth` chapters deep.
pub(crate) fn encode_nested(tags: &TagMap, depth: usize) -> Vec<u8> {
    let mut result = Vec::new();

    for (key, value) in tags {
        let spec = match registry::resolve(key) {
            Some(spec) => spec,
            None => {
                debug!(target: "id3v2", "no frame for {}, skipping", key);
                continue;
            }
        };

        for item in values_of(spec, value) {
            match encode_value(spec, item, depth).and_then(|body| render(spec.id, &body)) {
                Some(frame) => result.extend(frame),
                None => warn!(target: "id3v2", "could not encode {}, skipping", key),
            }
        }
    }

    result
}

/// Flattens a value into the values that each become one frame.
fn values_of<'a>(spec: &FrameSpec, value: &'a Value) -> Vec<&'a Value> {
    match value {
        Value::List(items) if spec.multiple => {
            let mut values: Vec<&Value> = Vec::with_capacity(items.len());

            for item in items {
                // Multiple URL frames of one kind must all be different.
                if spec.kind != FrameKind::Url || !values.contains(&item) {
                    values.push(item);
                }
            }

            values
        }

        Value::List(_) => {
            warn!(target: "id3v2", "{} cannot hold multiple values", spec.alias);
            Vec::new()
        }

        value => vec![value],
    }
}

fn encode_value(spec: &FrameSpec, value: &Value, depth: usize) -> Option<Vec<u8>> {
    match (spec.kind, value) {
        (FrameKind::Text, Value::Text(text)) => text::render_text(text),
        (FrameKind::Url, Value::Text(url)) => url::render_url(url),
        (FrameKind::Special(kind), value) => encode_special(kind, value, depth),
        _ => None,
    }
}

fn encode_special(kind: SpecialKind, value: &Value, depth: usize) -> Option<Vec<u8>> {
    match (kind, value) {
        (SpecialKind::Picture, Value::Binary(data)) => Picture::new(data.clone()).render(),
        (SpecialKind::Picture, Value::Picture(picture)) => picture.render(),
        (SpecialKind::Comment, Value::Comment(comment))
        | (SpecialKind::Lyrics, Value::Comment(comment)) => comment.render(),
        (SpecialKind::Comment, Value::Text(text)) | (SpecialKind::Lyrics, Value::Text(text)) => {
            Comment::new(text).render()
        }
        (SpecialKind::UserText, Value::UserText(user_text)) => Some(user_text.render()),
        (SpecialKind::Popularimeter, Value::Popularimeter(popm)) => popm.render(),
        (SpecialKind::Private, Value::Private(private)) => private.render(),
        (SpecialKind::Chapter, Value::Chapter(chapter)) => chapter.render(depth),
        (SpecialKind::UserUrl, Value::UserUrl(user_url)) => Some(user_url.render()),
        _ => None,
    }
}

/// Prepends an ID3v2.3 frame header to a body. Flags are always left clear.
pub(crate) fn render(id: &str, body: &[u8]) -> Option<Vec<u8>> {
    let size = u32::try_from(body.len()).ok()?;

    let mut result = Vec::with_capacity(body.len() + 10);

    result.extend(id.as_bytes());
    result.extend(&size.to_be_bytes());
    result.extend(&[0, 0]);
    result.extend(body);

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const V22_BODY: &[u8] = b"TT2\x00\x00\x06\
                              \x00Title\
                              TP1\x00\x00\x07\
                              \x00Artist\
                              \x00\x00\x00\x00";

    const V23_BODY: &[u8] = b"TIT2\x00\x00\x00\x06\x00\x00\
                              \x00Title\
                              WOAR\x00\x00\x00\x05\x00\x00\
                              a.com\
                              WOAR\x00\x00\x00\x05\x00\x00\
                              b.com";

    const V24_BODY: &[u8] = b"TIT2\x00\x00\x01\x00\x00\x00";

    fn text(string: &str) -> Value {
        Value::Text(String::from(string))
    }

    #[test]
    fn segment_v22() {
        let frames = segment(V22_BODY, Version::V22);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].name(), "TT2");
        assert_eq!(frames[0].body(), b"\x00Title");
        assert_eq!(frames[1].name(), "TP1");
        assert_eq!(frames[1].size(), 7);
    }

    #[test]
    fn segment_v23() {
        let frames = segment(V23_BODY, Version::V23);

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].name(), "WOAR");
        assert_eq!(frames[2].body(), b"b.com");
    }

    #[test]
    fn segment_v24_sizes() {
        // A synchsafe size of 128, which does not fit.
        assert!(segment(V24_BODY, Version::V24).is_empty());

        let mut body = V24_BODY.to_vec();
        body.extend(vec![0x16; 128]);

        let frames = segment(&body, Version::V24);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].size(), 128);

        // Read as ID3v2.3, the same size is 256 bytes.
        assert!(segment(&body, Version::V23).is_empty());
    }

    #[test]
    fn segment_truncated() {
        // The second frame claims more data than there is.
        let frames = segment(&V23_BODY[..V23_BODY.len() - 1], Version::V23);
        assert_eq!(frames.len(), 2);

        // A partial header stops segmentation as well.
        let frames = segment(&V23_BODY[..20], Version::V23);
        assert_eq!(frames.len(), 1);

        assert!(segment(b"", Version::V23).is_empty());
        assert!(segment(b"\0\0\0\0", Version::V23).is_empty());
    }

    #[test]
    fn decode_v22_frames() {
        let tag = decode_frames(V22_BODY, Version::V22);

        assert_eq!(tag.raw["TT2"], text("Title"));
        assert_eq!(tag.raw["TP1"], text("Artist"));
        assert_eq!(tag.aliases["title"], text("Title"));
        assert_eq!(tag.aliases["artist"], text("Artist"));
    }

    #[test]
    fn decode_multiple_frames() {
        let tag = decode_frames(V23_BODY, Version::V23);

        assert_eq!(tag.aliases["title"], text("Title"));
        assert_eq!(
            tag.aliases["artistUrl"],
            Value::List(vec![text("a.com"), text("b.com")])
        );
        assert_eq!(tag.raw["WOAR"], tag.aliases["artistUrl"]);
    }

    #[test]
    fn decode_skips_unknown_and_broken() {
        let body = b"XXXX\x00\x00\x00\x01\x00\x00\
                     \x16\
                     COMM\x00\x00\x00\x03\x00\x00\
                     \x05en\
                     TIT2\x00\x00\x00\x02\x00\x00\
                     \x00a";

        let tag = decode_frames(body, Version::V23);

        assert_eq!(tag.raw.len(), 1);
        assert_eq!(tag.aliases["title"], text("a"));
    }

    #[test]
    fn encode_text_and_urls() {
        let mut tags = TagMap::new();
        tags.insert(String::from("title"), text("a"));
        tags.insert(String::from("TPE1"), text(""));
        tags.insert(
            String::from("artistUrl"),
            Value::List(vec![text("a.com"), text("a.com"), text("b.com")]),
        );

        assert_eq!(
            encode_frames(&tags),
            b"TIT2\x00\x00\x00\x05\x00\x00\
              \x01\xFF\xFEa\x00\
              WOAR\x00\x00\x00\x05\x00\x00\
              a.com\
              WOAR\x00\x00\x00\x05\x00\x00\
              b.com"
                .to_vec()
        );
    }

    #[test]
    fn encode_skips_unencodable() {
        let mut tags = TagMap::new();
        tags.insert(String::from("unknown"), text("a"));
        tags.insert(String::from("title"), Value::List(vec![text("a"), text("b")]));
        tags.insert(String::from("album"), Value::Binary(vec![0x16]));
        tags.insert(String::from("private"), Value::Private(Private::default()));

        assert!(encode_frames(&tags).is_empty());
    }

    #[test]
    fn encode_special_frames() {
        let mut tags = TagMap::new();
        tags.insert(String::from("image"), Value::Binary(b"\xFF\xD8\xFF".to_vec()));
        tags.insert(String::from("unsynchronisedLyrics"), text("la"));

        assert_eq!(
            encode_frames(&tags),
            b"APIC\x00\x00\x00\x11\x00\x00\
              \x00image/jpeg\0\x03\0\xFF\xD8\xFF\
              USLT\x00\x00\x00\x0E\x00\x00\
              \x01eng\xFF\xFE\0\0\xFF\xFEl\0a\0"
                .to_vec()
        );
    }

    #[test]
    fn render_header() {
        assert_eq!(
            render("TIT2", b"\x00a").unwrap(),
            b"TIT2\x00\x00\x00\x02\x00\x00\x00a"
        );
    }
}
