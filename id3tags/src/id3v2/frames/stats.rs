use crate::core::io::BufStream;
use crate::err::ParseResult;
use crate::string::{self, Encoding};
use log::info;
use std::fmt::{self, Display, Formatter};

/// A `POPM` frame. The rating and play counter are both optional on disk, but frames
/// built here always carry them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Popularimeter {
    pub email: String,
    pub rating: Option<u8>,
    pub counter: Option<u32>,
}

impl Popularimeter {
    pub fn new(email: &str, rating: u8, counter: u32) -> Self {
        Popularimeter {
            email: String::from(email),
            rating: Some(rating),
            counter: Some(counter),
        }
    }

    /// Creates a popularimeter from arbitrary numbers. Values are truncated, and anything
    /// that is not a number or does not fit into the field is replaced with zero.
    pub fn from_lossy(email: &str, rating: f64, counter: f64) -> Self {
        Self::new(
            email,
            clamp_field(rating, f64::from(u8::MAX)) as u8,
            clamp_field(counter, f64::from(u32::MAX)) as u32,
        )
    }

    pub(crate) fn parse(body: &[u8]) -> ParseResult<Self> {
        let mut stream = BufStream::new(body);

        let email = string::read_terminated(Encoding::Latin1, &mut stream)?;
        let rating = stream.read_u8().ok();

        let counter = if stream.remaining() >= 4 {
            Some(stream.read_u32()?)
        } else {
            None
        };

        Ok(Popularimeter {
            email,
            rating,
            counter,
        })
    }

    /// Renders the body, or `None` if there is no email. A missing rating or counter is
    /// written as zero, so it reads back as `Some(0)`.
    pub(crate) fn render(&self) -> Option<Vec<u8>> {
        if self.email.is_empty() {
            return None;
        }

        let mut result = string::render_terminated(Encoding::Latin1, &self.email);

        result.push(self.rating.unwrap_or(0));
        result.extend(&self.counter.unwrap_or(0).to_be_bytes());

        Some(result)
    }
}

impl Default for Popularimeter {
    fn default() -> Self {
        Self::new("", 0, 0)
    }
}

impl Display for Popularimeter {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.email]?;

        if let Some(rating) = self.rating {
            write![f, " [rating {}/255]", rating]?;
        }

        if let Some(counter) = self.counter {
            write![f, " [plays {}]", counter]?;
        }

        Ok(())
    }
}

fn clamp_field(value: f64, max: f64) -> f64 {
    let value = value.trunc();

    if value.is_nan() || value < 0.0 || value > max {
        info!(target: "id3v2", "popularimeter field {} is out of range, using 0", value);
        return 0.0;
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    const POPM_DATA: &[u8] = b"test@test.com\0\
                               \x80\
                               \x00\x00\x16\x16";

    #[test]
    fn parse_popm() {
        let frame = Popularimeter::parse(POPM_DATA).unwrap();

        assert_eq!(frame.email, "test@test.com");
        assert_eq!(frame.rating, Some(0x80));
        assert_eq!(frame.counter, Some(0x1616));
    }

    #[test]
    fn parse_partial_popm() {
        let frame = Popularimeter::parse(b"a@b\0\x05\x01\x02").unwrap();
        assert_eq!(frame.rating, Some(5));
        assert_eq!(frame.counter, None);

        let frame = Popularimeter::parse(b"a@b\0").unwrap();
        assert_eq!(frame.rating, None);
        assert_eq!(frame.counter, None);

        assert!(Popularimeter::parse(b"a@b").is_err());
    }

    #[test]
    fn render_popm() {
        let frame = Popularimeter::new("test@test.com", 0x80, 0x1616);
        assert_eq!(frame.render().unwrap(), POPM_DATA);

        let frame = Popularimeter {
            email: String::from("a@b"),
            rating: None,
            counter: None,
        };

        assert_eq!(frame.render().unwrap(), b"a@b\0\0\0\0\0\0");
        assert_eq!(Popularimeter::default().render(), None);
    }

    #[test]
    fn render_then_parse() {
        let frame = Popularimeter {
            email: String::from("a@b"),
            ..Default::default()
        };

        assert_eq!(frame.rating, Some(0));
        assert_eq!(frame.counter, Some(0));
        assert_eq!(Popularimeter::parse(&frame.render().unwrap()).unwrap(), frame);
    }

    #[test]
    fn lossy_fields() {
        assert_eq!(
            Popularimeter::from_lossy("a@b", 128.9, 3.5),
            Popularimeter::new("a@b", 128, 3)
        );

        assert_eq!(
            Popularimeter::from_lossy("a@b", 256.0, -1.0),
            Popularimeter::new("a@b", 0, 0)
        );

        assert_eq!(
            Popularimeter::from_lossy("a@b", f64::NAN, f64::INFINITY),
            Popularimeter::new("a@b", 0, 0)
        );
    }
}
