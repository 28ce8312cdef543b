use crate::core::io::BufStream;
use crate::err::ParseResult;
use crate::id3v2::frames;
use crate::id3v2::{Tag, Version};
use crate::string::{self, Encoding};
use log::warn;
use std::fmt::{self, Display, Formatter};

/// The on-disk value of an unset chapter byte offset.
const UNSET_OFFSET: u32 = u32::MAX;

/// How many chapters can be nested inside each other. Frames embedded in a chapter at this
/// depth are dropped.
pub(crate) const MAX_DEPTH: usize = 8;

/// A `CHAP` frame. Chapters can carry their own frames, which are decoded into a nested tag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chapter {
    pub element_id: String,
    pub start_time_ms: u32,
    pub end_time_ms: u32,
    pub start_offset_bytes: Option<u32>,
    pub end_offset_bytes: Option<u32>,
    pub tags: Option<Tag>,
}

impl Chapter {
    pub fn new(element_id: &str, start_time_ms: u32, end_time_ms: u32) -> Self {
        Chapter {
            element_id: String::from(element_id),
            start_time_ms,
            end_time_ms,
            ..Default::default()
        }
    }

    /// Parses a chapter found `depth` chapters deep.
    pub(crate) fn parse(body: &[u8], depth: usize) -> ParseResult<Self> {
        let mut stream = BufStream::new(body);

        let element_id = string::read_terminated(Encoding::Latin1, &mut stream)?;
        let start_time_ms = stream.read_u32()?;
        let end_time_ms = stream.read_u32()?;
        let start_offset_bytes = read_offset(&mut stream)?;
        let end_offset_bytes = read_offset(&mut stream)?;

        // Embedded frames always use ID3v2.3 framing, regardless of the parent tag.
        let rest = stream.take_rest();
        let tags = if rest.is_empty() {
            None
        } else if depth >= MAX_DEPTH {
            warn!(
                target: "id3v2",
                "chapter {} is nested too deeply, dropping its frames",
                element_id
            );
            None
        } else {
            Some(frames::decode_nested(rest, Version::V23, depth + 1))
        };

        Ok(Chapter {
            element_id,
            start_time_ms,
            end_time_ms,
            start_offset_bytes,
            end_offset_bytes,
            tags,
        })
    }

    /// Renders the body along with any embedded frames, or `None` if there is no element ID.
    pub(crate) fn render(&self, depth: usize) -> Option<Vec<u8>> {
        if self.element_id.is_empty() {
            return None;
        }

        let mut result = string::render_terminated(Encoding::Latin1, &self.element_id);

        result.extend(&self.start_time_ms.to_be_bytes());
        result.extend(&self.end_time_ms.to_be_bytes());
        result.extend(&self.start_offset_bytes.unwrap_or(UNSET_OFFSET).to_be_bytes());
        result.extend(&self.end_offset_bytes.unwrap_or(UNSET_OFFSET).to_be_bytes());

        if let Some(tags) = &self.tags {
            if depth >= MAX_DEPTH {
                warn!(
                    target: "id3v2",
                    "chapter {} is nested too deeply, dropping its frames",
                    self.element_id
                );
            } else {
                result.extend(frames::encode_nested(&tags.aliases, depth + 1));
            }
        }

        Some(result)
    }
}

impl Display for Chapter {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![
            f,
            "{} [Start: {}ms, End: {}ms]",
            self.element_id, self.start_time_ms, self.end_time_ms
        ]?;

        if let Some(tags) = &self.tags {
            write![f, " Sub-Frames:"]?;

            for name in tags.raw.keys() {
                write![f, " {}", name]?;
            }
        }

        Ok(())
    }
}

fn read_offset(stream: &mut BufStream) -> ParseResult<Option<u32>> {
    match stream.read_u32()? {
        UNSET_OFFSET => Ok(None),
        offset => Ok(Some(offset)),
    }
}
