use crate::core::io::BufStream;
use crate::err::ParseResult;
use crate::string::{self, Encoding};
use std::fmt::{self, Display, Formatter};

/// A `PRIV` frame, opaque data tagged with the identifier of whoever wrote it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Private {
    pub owner: String,
    pub data: Vec<u8>,
}

impl Private {
    pub fn new(owner: &str, data: Vec<u8>) -> Self {
        Private {
            owner: String::from(owner),
            data,
        }
    }

    /// Creates a private frame holding text, which is stored as Latin1.
    pub fn with_text(owner: &str, text: &str) -> Self {
        Self::new(owner, string::render(Encoding::Latin1, text))
    }

    pub(crate) fn parse(body: &[u8]) -> ParseResult<Self> {
        let mut stream = BufStream::new(body);

        let owner = string::read_terminated(Encoding::Latin1, &mut stream)?;
        let data = stream.take_rest().to_vec();

        Ok(Private { owner, data })
    }

    /// Renders the body, or `None` if either the owner or the data is missing.
    pub(crate) fn render(&self) -> Option<Vec<u8>> {
        if self.owner.is_empty() || self.data.is_empty() {
            return None;
        }

        let mut result = string::render_terminated(Encoding::Latin1, &self.owner);
        result.extend(&self.data);

        Some(result)
    }
}

impl Display for Private {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} [{} bytes]", self.owner, self.data.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIV_DATA: &[u8] = b"test@test.com\0\
                               \x16\x16\x16\x16\x16\x16";

    #[test]
    fn parse_priv() {
        let frame = Private::parse(PRIV_DATA).unwrap();

        assert_eq!(frame.owner, "test@test.com");
        assert_eq!(frame.data, b"\x16\x16\x16\x16\x16\x16");

        let frame = Private::parse(b"owner\0").unwrap();
        assert!(frame.data.is_empty());

        assert!(Private::parse(b"owner").is_err());
    }

    #[test]
    fn render_priv() {
        let frame = Private::new("test@test.com", vec![0x16; 6]);
        assert_eq!(frame.render().unwrap(), PRIV_DATA);

        let frame = Private::with_text("owner", "text");
        assert_eq!(frame.render().unwrap(), b"owner\0text");

        assert_eq!(Private::new("owner", Vec::new()).render(), None);
        assert_eq!(Private::new("", vec![0x16]).render(), None);
    }
}
