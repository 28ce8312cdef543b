use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult};
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

/// Decodes the body of a plain URL frame. URLs have no encoding byte and are always Latin1.
pub(crate) fn parse_url(body: &[u8]) -> String {
    string::decode(Encoding::Latin1, body)
}

/// Renders a URL frame body, or `None` if there is no URL to write.
pub(crate) fn render_url(url: &str) -> Option<Vec<u8>> {
    if url.is_empty() {
        return None;
    }

    Some(string::render(Encoding::Latin1, url))
}

/// A `WXXX` frame, a link keyed by a free-form description.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserUrl {
    pub description: String,
    pub url: String,
}

impl UserUrl {
    pub fn new(description: &str, url: &str) -> Self {
        UserUrl {
            description: String::from(description),
            url: String::from(url),
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

        // The URL itself is never UTF-16, even when the description is.
        let url = string::read(Encoding::Latin1, &mut stream);

        Ok(UserUrl { description, url })
    }

    pub(crate) fn render(&self) -> Vec<u8> {
        let mut result = vec![Encoding::Utf16.flag()];

        result.extend(string::render_terminated(Encoding::Utf16, &self.description));
        result.extend(string::render(Encoding::Latin1, &self.url));

        result
    }
}

impl Display for UserUrl {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.description.is_empty() {
            write![f, "{}", self.url]
        } else {
            write![f, "{}: {}", self.description, self.url]
        }
    }
}
