//! ID3v2 metadata manipulation.
//!
//! id3tags reads ID3v2.2, ID3v2.3 and ID3v2.4 tags into ordered key/value maps, writes
//! those maps back out as ID3v2.3 tags, and strips tags from audio data. The codec works
//! on byte slices in [`id3v2`](id3v2), while [`file`](file) applies it to whole files.

#![forbid(unsafe_code)]

mod core;

pub mod err;
pub mod file;
pub mod id3v2;
pub mod string;

#[cfg(test)]
mod tests;
