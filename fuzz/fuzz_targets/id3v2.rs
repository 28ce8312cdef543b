#![no_main]

use id3tags::id3v2;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding never fails, so this only catches panics.
    let tag = id3v2::decode(data);

    // Re-encoding what was read must not panic either.
    let _ = id3v2::encode(&tag.aliases);

    if let Ok(rest) = id3v2::strip(data) {
        let _ = id3v2::strip(rest);
    }
});
