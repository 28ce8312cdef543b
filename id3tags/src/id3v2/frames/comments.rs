//! Comments and unsynchronized lyrics.

use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult};
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

/// The language written when a comment has none.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// A `COMM` comment or a `USLT` lyrics frame. Both share the same layout.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Comment {
    pub language: String,
    pub description: String,
    pub text: String,
}

impl Comment {
    pub fn new(text: &str) -> Self {
        Comment {
            language: String::from(DEFAULT_LANGUAGE),
            description: String::new(),
            text: String::from(text),
        }
    }

    pub(crate) fn parse(body: &[u8]) -> ParseResult<Self> {
        let mut stream = BufStream::new(body);

        let encoding = match stream.read_u8()? {
            0x00 => Encoding::Latin1,
            0x01 => Encoding::Utf16,
            _ => return Err(ParseError::MalformedData),
        };

        stream.skip(3)?;
        let language = string::decode_range(Encoding::Latin1, body, 1, Some(4));

        let (description, text) = match encoding {
            Encoding::Latin1 => match string::read_terminated(Encoding::Latin1, &mut stream) {
                Ok(description) => (description, string::read(Encoding::Latin1, &mut stream)),
                // An unterminated Latin1 description takes up the rest of the frame.
                Err(_) => (string::read(Encoding::Latin1, &mut stream), String::new()),
            },

            Encoding::Utf16 => {
                let description = string::read_terminated(Encoding::Utf16, &mut stream)?;
                (description, string::read(Encoding::Utf16, &mut stream))
            }
        };

        Ok(Comment {
            language,
            description,
            text,
        })
    }

    /// Renders a UTF-16 body, or `None` if there is no text.
    pub(crate) fn render(&self) -> Option<Vec<u8>> {
        if self.text.is_empty() {
            return None;
        }

        let mut result = vec![Encoding::Utf16.flag()];

        result.extend(&render_language(&self.language));
        result.extend(string::render_terminated(Encoding::Utf16, &self.description));
        result.extend(string::render(Encoding::Utf16, &self.text));

        Some(result)
    }
}

impl Display for Comment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if !self.description.is_empty() {
            write![f, "{}: ", self.description]?;
        }

        write![f, "{}", self.text]
    }
}

/// Renders a three byte language code. Longer codes are truncated and shorter codes are
/// padded with NULs.
fn render_language(language: &str) -> [u8; 3] {
    let language = if language.is_empty() {
        DEFAULT_LANGUAGE
    } else {
        language
    };

    let mut code = [0; 3];

    for (dest, byte) in code.iter_mut().zip(string::render(Encoding::Latin1, language)) {
        *dest = byte;
    }

    code
}
