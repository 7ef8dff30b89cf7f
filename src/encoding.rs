//! Byte decoding: BOM detection, charset names and per-encoding decoders.
//!
//! A [`ByteDecoder`] pulls bytes from a [`BufRead`] source and turns them into one
//! code point per call. Which decoder is active is decided at run time, first from
//! the byte order mark and later from the `encoding` name of the XML declaration,
//! so decoders are used as boxed strategy objects. They never consume bytes past
//! the code point they return, which is what allows swapping them mid-stream.
//!
//! Callers with an input that is not a byte stream can bypass all of this by
//! implementing [`CharReader`] and binding it directly to an inspector.

use std::io::{self, BufRead};

use thiserror::Error;

pub use self::bom::Bom;
pub use self::charset::Charset;
pub use self::single_byte::SingleByteDecoder;
pub use self::utf::{UnicodeDecoder, Utf32Decoder};

mod bom;
mod charset;
mod single_byte;
mod utf;

/// Failure to produce the next code point.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The bytes cannot be decoded under the active charset.
    #[error("invalid byte sequence for the active encoding")]
    InvalidByteSequence,

    /// The underlying byte source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Outcome of a decode call: a code point, `None` at the end of input, or an error.
pub type DecodeResult = Result<Option<char>, DecodeError>;

/// Decodes one code point at a time from a byte source.
pub trait ByteDecoder {
    /// Charset handled by this decoder.
    fn charset(&self) -> Charset;

    /// Reads the bytes of the next code point and decodes them.
    fn decode(&mut self, bytes: &mut dyn BufRead) -> DecodeResult;
}

/// A source of already decoded code points.
///
/// This is the contract for caller-supplied inputs: the inspector asks for one
/// code point per call and never looks at bytes.
pub trait CharReader {
    /// Returns the next code point, `None` at the end of input.
    fn read_char(&mut self) -> DecodeResult;
}

impl<F> CharReader for F where F: FnMut() -> DecodeResult {
    fn read_char(&mut self) -> DecodeResult {
        (*self)()
    }
}

/// Returns the next byte without consuming it, `None` at the end of the stream.
fn peek_byte(bytes: &mut dyn BufRead) -> io::Result<Option<u8>> {
    loop {
        match bytes.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn next_byte(bytes: &mut dyn BufRead) -> io::Result<Option<u8>> {
    let byte = peek_byte(bytes)?;
    if byte.is_some() {
        bytes.consume(1);
    }
    Ok(byte)
}

/// Decodes a whole byte slice with the given decoder.
#[cfg(test)]
pub(crate) fn decode_all(decoder: &mut dyn ByteDecoder, mut bytes: &[u8]) -> Result<String, DecodeError> {
    let mut result = String::new();
    while let Some(c) = decoder.decode(&mut bytes)? {
        result.push(c);
    }
    Ok(result)
}
