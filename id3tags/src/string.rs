//! Tag string handling.

use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult};
use log::warn;

/// The text encodings an ID3v2 frame can declare.
///
/// Only two encodings are understood. Any encoding byte other than `0x01` is treated
/// as [`Latin1`](Encoding::Latin1), and text is always written as [`Utf16`](Encoding::Utf16).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Encoding {
    /// ISO-8859-1, also known as Latin1. All Unicode text in a string outside of this range
    /// will be flattened into "?" characters when written.
    Latin1,
    /// UTF-16 with a BOM. This is always written as UTF-16LE with a `0xFFFE` BOM.
    Utf16,
}

impl Encoding {
    /// Maps a frame encoding byte to an encoding.
    pub fn from_flag(flag: u8) -> Self {
        match flag {
            0x01 => Self::Utf16,
            _ => Self::Latin1,
        }
    }

    /// Returns the encoding byte written for this encoding.
    pub fn flag(self) -> u8 {
        match self {
            Self::Latin1 => 0x00,
            Self::Utf16 => 0x01,
        }
    }

    pub(crate) fn nul_size(self) -> usize {
        match self {
            Self::Latin1 => 1,
            Self::Utf16 => 2,
        }
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::Utf16
    }
}

/// Consumes the rest of this stream and decodes it into a string according
/// to the encoding.
pub(crate) fn read(encoding: Encoding, stream: &mut BufStream) -> String {
    decode(encoding, stream.take_rest())
}

/// Consumes the stream up to and including a NUL terminator and decodes everything
/// before it. Latin1 strings end at the first NUL byte, while UTF-16 strings end at the
/// first double NUL found by [`find_double_nul`](find_double_nul). A string without a
/// terminator is an error.
pub(crate) fn read_terminated(encoding: Encoding, stream: &mut BufStream) -> ParseResult<String> {
    let rest = stream.rest();

    let end = match encoding {
        Encoding::Latin1 => rest.iter().position(|&byte| byte == 0),
        Encoding::Utf16 => find_double_nul(rest, 0),
    }
    .ok_or(ParseError::MalformedData)?;

    let string = decode(encoding, &rest[..end]);
    stream.skip(end + encoding.nul_size())?;

    Ok(string)
}

/// Renders a string according to the encoding
pub(crate) fn render(encoding: Encoding, string: &str) -> Vec<u8> {
    match encoding {
        Encoding::Latin1 => encode_latin1(string),
        Encoding::Utf16 => encode_utf16(string),
    }
}

/// Renders a string plus a NUL terminator according to the encoding
pub(crate) fn render_terminated(encoding: Encoding, string: &str) -> Vec<u8> {
    let mut result = render(encoding, string);

    // One byte for Latin1, two bytes for UTF-16
    result.resize(result.len() + encoding.nul_size(), 0);

    result
}

/// Decodes `data` into a string, removing every NUL character from the result.
pub fn decode(encoding: Encoding, data: &[u8]) -> String {
    let mut string = match encoding {
        Encoding::Latin1 => decode_latin1(data),
        Encoding::Utf16 => decode_utf16(data),
    };

    string.retain(|ch| ch != '\0');
    string
}

/// Decodes `data` and returns the characters in `from..to` of the result, with NULs removed.
/// A missing `to` takes everything after `from`. Out of range bounds are clamped.
pub fn decode_range(encoding: Encoding, data: &[u8], from: usize, to: Option<usize>) -> String {
    let decoded = match encoding {
        Encoding::Latin1 => decode_latin1(data),
        Encoding::Utf16 => decode_utf16(data),
    };

    let count = to.map(|to| to.saturating_sub(from)).unwrap_or(usize::MAX);

    decoded
        .chars()
        .skip(from)
        .take(count)
        .filter(|&ch| ch != '\0')
        .collect()
}

/// Finds the double NUL that terminates a UTF-16 description, starting at `start`.
///
/// The cursor advances until it sits on two NUL bytes that are not followed by a third,
/// so the trailing zero byte of a character like `A\0` is not mistaken for the terminator.
/// Running off the end of the data means the description was never terminated.
pub(crate) fn find_double_nul(data: &[u8], start: usize) -> Option<usize> {
    let is_nul = |idx: usize| data.get(idx) == Some(&0);

    (start..data.len()).find(|&i| is_nul(i) && is_nul(i + 1) && !is_nul(i + 2))
}

fn decode_latin1(data: &[u8]) -> String {
    // UTF-8 expresses high bits as two bytes instead of one, so we cannot convert directly.
    // Instead, we simply reinterpret the bytes as chars to make sure the code-points line up.
    data.iter().map(|&byte| char::from(byte)).collect()
}

fn decode_utf16(data: &[u8]) -> String {
    match data {
        [0xFF, 0xFE, rest @ ..] => decode_utf16le(rest),
        [0xFE, 0xFF, rest @ ..] => decode_utf16be(rest),
        [] => String::new(),
        _ => {
            warn!(target: "id3v2", "could not determine UTF-16 BOM, defaulting to UTF-16LE");
            decode_utf16le(data)
        }
    }
}

fn decode_utf16be(data: &[u8]) -> String {
    String::from_utf16_lossy(
        data.chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect::<Vec<u16>>()
            .as_slice(),
    )
}

fn decode_utf16le(data: &[u8]) -> String {
    String::from_utf16_lossy(
        data.chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect::<Vec<u16>>()
            .as_slice(),
    )
}

fn encode_latin1(string: &str) -> Vec<u8> {
    // All Latin1 chars line up with UTF-8 code-points, but everything else has
    // to be expressed as a ?
    string
        .chars()
        .map(|ch| if u32::from(ch) > 0xFF { b'?' } else { ch as u8 })
        .collect()
}

fn encode_utf16(string: &str) -> Vec<u8> {
    let mut result: Vec<u8> = vec![0xFF, 0xFE];

    result.extend(string.encode_utf16().flat_map(|cp| cp.to_le_bytes()));

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const STR_LATIN1: &str = "Caf\u{e9} Ol\u{e9}";
    const STR_UNICODE: &str = "\u{2551} Caf\u{e9} \u{1d568}";

    const DATA_LATIN1: &[u8] = b"Caf\xE9 Ol\xE9";
    const DATA_LATIN1_LOSSY: &[u8] = b"? Caf\xE9 ?";

    const DATA_UTF16: &[u8] = b"\xFF\xFE\x51\x25\x20\x00\x43\x00\x61\x00\x66\x00\xe9\x00\
                                \x20\x00\x35\xd8\x68\xdd";

    const DATA_UTF16BE: &[u8] = b"\xFE\xFF\x25\x51\x00\x20\x00\x43\x00\x61\x00\x66\x00\xe9\
                                  \x00\x20\xd8\x35\xdd\x68";

    #[test]
    fn parse_latin1() {
        assert_eq!(decode(Encoding::Latin1, DATA_LATIN1), STR_LATIN1);
    }

    #[test]
    fn parse_utf16() {
        assert_eq!(decode(Encoding::Utf16, DATA_UTF16), STR_UNICODE);
        assert_eq!(decode(Encoding::Utf16, DATA_UTF16BE), STR_UNICODE);
    }

    #[test]
    fn parse_utf16_no_bom() {
        assert_eq!(decode(Encoding::Utf16, &DATA_UTF16[2..]), STR_UNICODE);
    }

    #[test]
    fn parse_strips_nuls() {
        assert_eq!(decode(Encoding::Latin1, b"\0ab\0c\0"), "abc");
        assert_eq!(decode(Encoding::Utf16, b"\xFF\xFEa\0\0\0b\0\0\0"), "ab");
    }

    #[test]
    fn parse_range() {
        assert_eq!(decode_range(Encoding::Latin1, b"\0engDesc", 1, Some(4)), "eng");
        assert_eq!(decode_range(Encoding::Latin1, b"\0engDesc", 4, None), "Desc");
        assert_eq!(decode_range(Encoding::Latin1, b"\0en\0", 1, Some(4)), "en");
        assert_eq!(decode_range(Encoding::Latin1, b"ab", 1, Some(16)), "b");
        assert_eq!(decode_range(Encoding::Latin1, b"ab", 4, None), "");
    }

    #[test]
    fn render_latin1() {
        assert_eq!(render(Encoding::Latin1, STR_LATIN1), DATA_LATIN1);
    }

    #[test]
    fn render_latin1_lossy() {
        assert_eq!(render(Encoding::Latin1, STR_UNICODE), DATA_LATIN1_LOSSY);
    }

    #[test]
    fn render_utf16() {
        assert_eq!(render(Encoding::Utf16, STR_UNICODE), DATA_UTF16);
        assert_eq!(render(Encoding::Utf16, ""), b"\xFF\xFE");
    }

    #[test]
    fn render_nul() {
        assert_eq!(render_terminated(Encoding::Latin1, "ab"), b"ab\0");
        assert_eq!(render_terminated(Encoding::Utf16, ""), b"\xFF\xFE\0\0");
        assert_eq!(render_terminated(Encoding::Utf16, "a"), b"\xFF\xFEa\0\0\0");
    }

    #[test]
    fn encoding_flags() {
        assert_eq!(Encoding::from_flag(0x00), Encoding::Latin1);
        assert_eq!(Encoding::from_flag(0x01), Encoding::Utf16);
        assert_eq!(Encoding::from_flag(0x03), Encoding::Latin1);
        assert_eq!(Encoding::Utf16.flag(), 0x01);
    }

    #[test]
    fn double_nul_skips_character_zeroes() {
        // "A" in UTF-16LE, the terminator, then a BOM
        let data = b"\x41\x00\x00\x00\xFF\xFE";
        assert_eq!(find_double_nul(data, 0), Some(2));

        // Empty description with a BOM
        let data = b"\xFF\xFE\x00\x00\xFF\xFE\x41\x00";
        assert_eq!(find_double_nul(data, 0), Some(2));
        assert_eq!(find_double_nul(data, 3), None);

        // A terminator sitting at the very end
        assert_eq!(find_double_nul(b"\x41\x00\x00\x00", 0), Some(2));
        assert_eq!(find_double_nul(b"\x00\x00", 0), Some(0));
    }

    #[test]
    fn double_nul_unterminated() {
        assert_eq!(find_double_nul(b"\xFF\xFE\x41\x00\x42\x00", 0), None);
        assert_eq!(find_double_nul(b"", 0), None);
        assert_eq!(find_double_nul(b"\x00", 0), None);
    }

    #[test]
    fn parse_terminated() {
        let mut stream = BufStream::new(b"abc\0def");

        assert_eq!(read_terminated(Encoding::Latin1, &mut stream).unwrap(), "abc");
        assert!(read_terminated(Encoding::Latin1, &mut stream).is_err());
        assert_eq!(read(Encoding::Latin1, &mut stream), "def");
    }

    #[test]
    fn parse_terminated_utf16() {
        let mut stream = BufStream::new(b"\xFF\xFEa\0\0\0\xFF\xFEb\0");

        assert_eq!(read_terminated(Encoding::Utf16, &mut stream).unwrap(), "a");
        assert_eq!(read(Encoding::Utf16, &mut stream), "b");
    }
}
