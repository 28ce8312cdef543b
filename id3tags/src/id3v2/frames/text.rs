use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult};
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

/// Decodes the body of a plain text frame. The first byte is the encoding and the
/// rest is the text, with all NULs removed.
pub(crate) fn parse_text(body: &[u8]) -> String {
    match body.split_first() {
        Some((&flag, text)) => string::decode(Encoding::from_flag(flag), text),
        None => String::new(),
    }
}

/// Renders a text frame body as UTF-16, or `None` if there is no text to write.
pub(crate) fn render_text(text: &str) -> Option<Vec<u8>> {
    if text.is_empty() {
        return None;
    }

    let mut result = vec![Encoding::Utf16.flag()];
    result.extend(string::render(Encoding::Utf16, text));

    Some(result)
}

/// A `TXXX` frame, a text value keyed by a free-form description.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserText {
    pub description: String,
    pub value: String,
}

impl UserText {
    pub fn new(description: &str, value: &str) -> Self {
        UserText {
            description: String::from(description),
            value: String::from(value),
        }
    }

    pub(crate) fn parse(body: &[u8]) -> ParseResult<Self> {
        let mut stream = BufStream::new(body);

        let encoding = match stream.read_u8()? {
            0x00 => Encoding::Latin1,
            0x01 => Encoding::Utf16,
            _ => return Err(ParseError::MalformedData),
        };

        let description = string::read_terminated(encoding, &mut stream)?;
        let value = string::read(encoding, &mut stream);

        Ok(UserText { description, value })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![Encoding::Utf16.flag()];

        result.extend(string::render_terminated(Encoding::Utf16, &self.description));
        result.extend(string::render(Encoding::Utf16, &self.value));

        result
    }
}

impl Display for UserText {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}: {}", self.description, self.value]
    }
}
