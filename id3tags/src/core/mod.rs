//! Core utilities.

pub(crate) mod io;

pub use io::BufStream;
