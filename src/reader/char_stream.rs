//! Newline normalization and position tracking.

use crate::common::{is_xml_char, TextPosition};
use crate::encoding::{Bom, DecodeResult};
use crate::reader::decoding_reader::Source;
use crate::reader::{Error, ErrorCode};

/// A cursor over the normalized characters of a source.
///
/// `CR LF`, a lone `CR` and `LF` all come out as a single `LF`. Telling a lone
/// `CR` apart needs the character after it, which is kept until the next read.
/// The cursor always sits on one character, the current one, whose position is
/// known; at the end of input the current character is `None` and the position
/// is just past the last character.
pub(crate) struct CharStream<'a> {
    source: Source<'a>,
    current: Option<char>,
    lookahead: Option<DecodeResult>,
    pos: TextPosition,
    eof: bool,
}

impl<'a> CharStream<'a> {
    pub fn new(source: Source<'a>) -> CharStream<'a> {
        CharStream {
            source,
            current: None,
            lookahead: None,
            pos: TextPosition::new(),
            eof: false,
        }
    }

    /// Drops the current source and starts over with `source`.
    pub fn rebind(&mut self, source: Source<'a>) {
        *self = CharStream::new(source);
    }

    #[inline]
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Position of the current character.
    #[inline]
    pub fn position(&self) -> TextPosition {
        self.pos
    }

    #[inline]
    pub fn bom(&self) -> Bom {
        self.source.bom()
    }

    pub fn declare_encoding(&mut self, label: &str) -> Result<(), ErrorCode> {
        self.source.declare_encoding(label)
    }

    /// Moves to the next character. Does nothing at the end of input.
    pub fn bump(&mut self) -> Result<(), Error> {
        if self.eof {
            return Ok(());
        }
        if self.current == Some('\n') {
            self.pos.new_line();
        } else {
            self.pos.advance(1);
        }
        match self.read_normalized() {
            Ok(Some(c)) if !is_xml_char(c as u32) => {
                fail!(InvalidSyntax, self.pos, "Character U+{:04X} is not allowed in XML", c as u32)
            }
            Ok(Some(c)) => self.current = Some(c),
            Ok(None) => {
                self.current = None;
                self.eof = true;
            }
            Err(e) => return Err(Error::decoding(e, self.pos)),
        }
        Ok(())
    }

    fn read_normalized(&mut self) -> DecodeResult {
        let c = match self.lookahead.take() {
            Some(pending) => pending?,
            None => self.source.read_char()?,
        };
        if c == Some('\r') {
            match self.source.read_char() {
                Ok(Some('\n')) => {}
                other => self.lookahead = Some(other),
            }
            return Ok(Some('\n'));
        }
        Ok(c)
    }
}
