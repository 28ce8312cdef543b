//! Synchsafe integers.
//!
//! ID3v2 stores tag sizes (and ID3v2.4 frame sizes) as 28-bit integers spread over four
//! bytes, with the high bit of every byte left clear so that no size can look like an
//! MPEG sync marker.

/// The first size that can no longer be expressed as a synchsafe integer.
pub const SIZE_LIMIT: usize = 1 << 28;

/// Decodes a synchsafe size. High bits are ignored, use [`is_synchsafe`](is_synchsafe)
/// to reject sizes that were never synchsafe.
pub fn decode_size(raw: [u8; 4]) -> u32 {
    raw.iter()
        .fold(0, |sum, &byte| (sum << 7) | u32::from(byte & 0x7F))
}

/// Encodes a size into a synchsafe integer. Anything above 28 bits is discarded.
pub fn encode_size(size: u32) -> [u8; 4] {
    [
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]
}

/// Returns whether every byte of `raw` has its high bit clear.
pub fn is_synchsafe(raw: [u8; 4]) -> bool {
    raw.iter().all(|&byte| byte < 0x80)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_synchsafe() {
        assert_eq!(decode_size([0x00, 0x08, 0x49, 0x30]), 140464);
        assert_eq!(decode_size([0x00, 0x00, 0x02, 0x01]), 257);
        assert_eq!(decode_size([0x7F, 0x7F, 0x7F, 0x7F]), 0x0FFF_FFFF);
    }

    #[test]
    fn encode_synchsafe() {
        assert_eq!(encode_size(140464), [0x00, 0x08, 0x49, 0x30]);
        assert_eq!(encode_size(257), [0x00, 0x00, 0x02, 0x01]);
        assert_eq!(encode_size(0x0FFF_FFFF), [0x7F, 0x7F, 0x7F, 0x7F]);
    }

    #[test]
    fn check_synchsafe() {
        assert!(is_synchsafe([0x00, 0x08, 0x49, 0x30]));
        assert!(!is_synchsafe([0x00, 0x80, 0x00, 0x00]));
        assert!(!is_synchsafe([0xFF, 0xFF, 0xFF, 0xFF]));
    }
}
