use crate::core::io::BufStream;
use crate::err::ParseResult;
use crate::id3v2::Version;
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

/// An attached picture, read from an `APIC` frame or an ID3v2.2 `PIC` frame.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Picture {
    /// The short image format, `jpeg` or `png` for the common cases and the raw mime
    /// type or ID3v2.2 format code otherwise. Full mime types are accepted when writing.
    pub mime: String,
    pub pic_type: PictureType,
    pub description: String,
    pub data: Vec<u8>,
}

impl Picture {
    /// Creates a front cover picture from raw image data, guessing a JPEG or PNG format
    /// from the image signature.
    pub fn new(data: Vec<u8>) -> Self {
        Picture {
            mime: String::from(sniff_mime(&data)),
            pic_type: PictureType::FRONT_COVER,
            description: String::new(),
            data,
        }
    }

    pub(crate) fn parse(body: &[u8], version: Version) -> ParseResult<Self> {
        let mut stream = BufStream::new(body);

        let encoding = Encoding::from_flag(stream.read_u8()?);

        // ID3v2.2 uses a fixed three-character format instead of a mime type.
        let format = match version {
            Version::V22 => string::decode(Encoding::Latin1, stream.slice(3)?),
            Version::V23 | Version::V24 => string::read_terminated(Encoding::Latin1, &mut stream)?,
        };

        let pic_type = PictureType::new(stream.read_u8()?);
        let description = string::read_terminated(encoding, &mut stream)?;
        let data = stream.take_rest().to_vec();

        Ok(Picture {
            mime: short_mime(&format).map(String::from).unwrap_or(format),
            pic_type,
            description,
            data,
        })
    }

    /// Renders an `APIC` body, or `None` if there is no image data. Descriptions are
    /// written as UTF-16 unless they are empty.
    pub(crate) fn render(&self) -> Option<Vec<u8>> {
        if self.data.is_empty() {
            return None;
        }

        let encoding = if self.description.is_empty() {
            Encoding::Latin1
        } else {
            Encoding::Utf16
        };

        let mime = match self.mime.as_str() {
            "jpeg" | "jpg" | "JPG" => "image/jpeg",
            "png" | "PNG" => "image/png",
            mime => mime,
        };

        let mut result = vec![encoding.flag()];

        result.extend(string::render_terminated(Encoding::Latin1, mime));
        result.push(self.pic_type.id());
        result.extend(string::render_terminated(encoding, &self.description));
        result.extend(&self.data);

        Some(result)
    }
}

impl Display for Picture {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} ", self.mime]?;

        if !self.description.is_empty() {
            write![f, "\"{}\" ", self.description]?;
        }

        write![f, "[{}]", self.pic_type]
    }
}

/// The role of a picture, such as a front cover or a band logo.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PictureType(u8);

static PICTURE_TYPES: &[&str] = &[
    "other",
    "file icon",
    "other file icon",
    "front cover",
    "back cover",
    "leaflet page",
    "media",
    "lead artist",
    "artist",
    "conductor",
    "band",
    "composer",
    "lyricist",
    "recording location",
    "during recording",
    "during performance",
    "video screen capture",
    "a bright coloured fish",
    "illustration",
    "band logotype",
    "publisher logotype",
];

impl PictureType {
    pub const OTHER: Self = Self(0x00);
    pub const FRONT_COVER: Self = Self(0x03);
    pub const BACK_COVER: Self = Self(0x04);

    pub fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn id(self) -> u8 {
        self.0
    }

    /// The readable name of this type, or `None` for values outside of the defined range.
    pub fn name(self) -> Option<&'static str> {
        PICTURE_TYPES.get(usize::from(self.0)).copied()
    }
}

impl Default for PictureType {
    fn default() -> Self {
        Self::FRONT_COVER
    }
}

impl Display for PictureType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write![f, "{}", name],
            None => write![f, "unknown type {}", self.0],
        }
    }
}

/// Guesses the format of raw image data. Anything that is not a JPEG is assumed to be a PNG.
fn sniff_mime(data: &[u8]) -> &'static str {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "jpeg"
    } else {
        "png"
    }
}

fn short_mime(format: &str) -> Option<&'static str> {
    match format {
        "image/jpeg" | "JPG" => Some("jpeg"),
        "image/png" | "PNG" => Some("png"),
        _ => None,
    }
}
