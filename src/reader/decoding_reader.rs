//! Encoding negotiation between the byte order mark and the declared encoding.

use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::mem;

use log::debug;

use crate::encoding::{Bom, ByteDecoder, CharReader, Charset, DecodeError, DecodeResult, UnicodeDecoder};
use crate::reader::ErrorCode;

/// Where an inspector takes its code points from.
pub(crate) enum Source<'a> {
    /// Nothing is bound; every read is a stream error.
    Unbound,
    /// A byte source with run-time encoding selection.
    Bytes(DecodingReader<'a>),
    /// A caller-supplied source of decoded code points.
    Chars(Box<dyn CharReader + 'a>),
}

impl<'a> Source<'a> {
    pub fn read_char(&mut self) -> DecodeResult {
        match self {
            Source::Unbound => Err(DecodeError::Io(io::Error::new(
                io::ErrorKind::NotConnected,
                "no input source is bound",
            ))),
            Source::Bytes(reader) => reader.read_char(),
            Source::Chars(reader) => reader.read_char(),
        }
    }

    /// Byte order mark found at the start of a byte source.
    pub fn bom(&self) -> Bom {
        match self {
            Source::Bytes(reader) => reader.bom.unwrap_or_default(),
            _ => Bom::None,
        }
    }

    /// Reconciles an encoding name from the XML declaration with the source.
    ///
    /// Sources of decoded code points only check that the name is known.
    pub fn declare_encoding(&mut self, label: &str) -> Result<(), ErrorCode> {
        let charset = Charset::for_label(label).ok_or(ErrorCode::UnknownEncoding)?;
        match self {
            Source::Bytes(reader) => reader.declare(charset),
            _ => Ok(()),
        }
    }
}

/// Decodes a byte source with the decoder picked by BOM detection and,
/// possibly, replaced once the XML declaration names a legacy charset.
pub(crate) struct DecodingReader<'a> {
    bytes: Box<dyn BufRead + 'a>,
    decoder: Box<dyn ByteDecoder>,
    /// `None` until the first read has looked for a byte order mark.
    bom: Option<Bom>,
}

impl<'a> DecodingReader<'a> {
    /// Wraps a byte stream, reading `buffer_size` bytes from it at a time.
    pub fn new<R: Read + 'a>(inner: R, buffer_size: usize) -> DecodingReader<'a> {
        DecodingReader {
            bytes: Box::new(BufReader::with_capacity(buffer_size.max(1), inner)),
            decoder: Box::new(UnicodeDecoder::utf8()),
            bom: None,
        }
    }

    fn read_char(&mut self) -> DecodeResult {
        if self.bom.is_none() {
            self.detect_bom()?;
        }
        self.decoder.decode(&mut *self.bytes)
    }

    fn detect_bom(&mut self) -> Result<(), DecodeError> {
        let mut prefix = Vec::with_capacity(4);
        (&mut self.bytes).take(4).read_to_end(&mut prefix)?;
        let bom = Bom::detect(&prefix)?;
        prefix.drain(..bom.bytes().len());
        if !prefix.is_empty() {
            // give back what was read past the mark
            let rest = mem::replace(&mut self.bytes, Box::new(io::empty()));
            self.bytes = Box::new(Cursor::new(prefix).chain(rest));
        }
        self.decoder = bom.decoder();
        self.bom = Some(bom);
        debug!("detected byte order mark {:?}, decoding as {}", bom, self.decoder.charset());
        Ok(())
    }

    fn declare(&mut self, charset: Charset) -> Result<(), ErrorCode> {
        let bom = self.bom.unwrap_or_default();
        if !charset.accepts(bom) {
            return Err(ErrorCode::EncodingConfusion);
        }
        if charset.is_single_byte() && self.decoder.charset() != charset {
            debug!("switching decoder from {} to {}", self.decoder.charset(), charset);
            self.decoder = charset.decoder();
        }
        Ok(())
    }
}
