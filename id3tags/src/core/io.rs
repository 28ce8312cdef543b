use std::error;
use std::fmt::{self, Display, Formatter};
use std::io::{self, ErrorKind};

/// A simple ergonomics layer around an internal slice, created primarily to automate bounds checking.
pub struct BufStream<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> BufStream<'a> {
    /// Construct a new `BufStream` from `src`.
    pub fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    /// Read this stream into an array of size `N`, returning an error when the array
    /// cannot be filled.
    pub fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut arr = [0; N];
        arr.copy_from_slice(self.slice(N)?);
        Ok(arr)
    }

    /// Read exactly one byte from this stream. If there is no data remaining in the stream then
    /// an error will be returned.
    pub fn read_u8(&mut self) -> io::Result<u8> {
        if self.is_empty() {
            return Err(eos_error());
        }

        self.pos += 1;

        Ok(self.src[self.pos - 1])
    }

    /// Read a big-endian u32 from this stream. If the u32 cannot be filled an error will be returned.
    pub fn read_u32(&mut self) -> io::Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Skip `n` bytes in this stream. If this skip is beyond the stream length then an error will be
    /// returned.
    pub fn skip(&mut self, n: usize) -> io::Result<()> {
        if self.remaining() < n {
            return Err(oob_error());
        }

        self.pos += n;

        Ok(())
    }

    /// Consumes the stream and returns a slice of size n. If the slice cannot be created, then an error is returned.
    pub fn slice(&mut self, n: usize) -> io::Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(underread_error());
        }

        self.pos += n;

        Ok(&self.src[self.pos - n..self.pos])
    }

    /// Returns the unconsumed portion of this stream without consuming it.
    pub fn rest(&self) -> &'a [u8] {
        &self.src[self.pos..]
    }

    /// Takes the rest of the streams data into a slice, leaving the stream in an fully consumed state.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let rest = self.rest();
        self.pos = self.src.len();
        rest
    }

    /// Returns the length of this stream
    pub fn len(&self) -> usize {
        self.src.len()
    }

    /// Returns the stream position
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the remaining length of this stream.
    pub fn remaining(&self) -> usize {
        self.len() - self.pos()
    }

    /// Returns if this stream has been fully consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

#[derive(Debug)]
pub enum StreamError {
    EndOfStream,
    BufferUnderread,
    OutOfBounds,
}

impl Display for StreamError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{:?}", self]
    }
}

impl error::Error for StreamError {
    // Nothing to implement
}

#[inline(always)]
fn eos_error() -> io::Error {
    io::Error::new(ErrorKind::UnexpectedEof, StreamError::EndOfStream)
}

#[inline(always)]
fn underread_error() -> io::Error {
    io::Error::new(ErrorKind::UnexpectedEof, StreamError::BufferUnderread)
}

#[inline(always)]
fn oob_error() -> io::Error {
    io::Error::new(ErrorKind::UnexpectedEof, StreamError::OutOfBounds)
}
