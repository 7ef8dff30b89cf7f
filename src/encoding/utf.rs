use std::fmt;
use std::io::BufRead;
use std::slice;

use encoding_rs::{Decoder, DecoderResult, Encoding};

use super::{next_byte, peek_byte, ByteDecoder, Charset, DecodeError, DecodeResult};

/// Strict decoder for UTF-8 and the two byte orders of UTF-16, driven by `encoding_rs`.
///
/// Bytes are fed to the underlying decoder one at a time, so nothing past the
/// returned code point is consumed. Overlong forms, encoded or unpaired
/// surrogates and truncated sequences are invalid byte sequences.
pub struct UnicodeDecoder {
    charset: Charset,
    decoder: Decoder,
    decoded: String,
    next: usize,
    finished: bool,
}

impl UnicodeDecoder {
    fn new(charset: Charset, encoding: &'static Encoding) -> UnicodeDecoder {
        UnicodeDecoder {
            charset,
            decoder: encoding.new_decoder_without_bom_handling(),
            decoded: String::new(),
            next: 0,
            finished: false,
        }
    }

    #[must_use]
    pub fn utf8() -> UnicodeDecoder {
        UnicodeDecoder::new(Charset::Utf8, encoding_rs::UTF_8)
    }

    #[must_use]
    pub fn utf16_be() -> UnicodeDecoder {
        UnicodeDecoder::new(Charset::Utf16Be, encoding_rs::UTF_16BE)
    }

    #[must_use]
    pub fn utf16_le() -> UnicodeDecoder {
        UnicodeDecoder::new(Charset::Utf16Le, encoding_rs::UTF_16LE)
    }
}

impl ByteDecoder for UnicodeDecoder {
    fn charset(&self) -> Charset {
        self.charset
    }

    fn decode(&mut self, bytes: &mut dyn BufRead) -> DecodeResult {
        loop {
            if let Some(c) = self.decoded[self.next..].chars().next() {
                self.next += c.len_utf8();
                return Ok(Some(c));
            }
            if self.finished {
                return Ok(None);
            }
            self.decoded.clear();
            self.next = 0;

            let byte = peek_byte(bytes)?;
            let src: &[u8] = match &byte {
                Some(b) => slice::from_ref(b),
                None => &[],
            };
            let last = byte.is_none();
            if let Some(space) = self.decoder.max_utf8_buffer_length_without_replacement(src.len()) {
                self.decoded.reserve(space);
            }
            let (result, read) = self.decoder.decode_to_string_without_replacement(src, &mut self.decoded, last);
            bytes.consume(read);
            match result {
                DecoderResult::InputEmpty => self.finished = last,
                DecoderResult::OutputFull => unreachable!("space for one more byte is reserved"),
                DecoderResult::Malformed(_, _) => return Err(DecodeError::InvalidByteSequence),
            }
        }
    }
}

impl fmt::Debug for UnicodeDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnicodeDecoder").field("charset", &self.charset).finish()
    }
}

/// UTF-32 decoder with a fixed byte order.
///
/// `encoding_rs` follows the WHATWG set of encodings, which has no UTF-32.
#[derive(Copy, Clone, Debug)]
pub struct Utf32Decoder {
    big_endian: bool,
}

impl Utf32Decoder {
    #[must_use]
    pub fn big_endian() -> Utf32Decoder {
        Utf32Decoder { big_endian: true }
    }

    #[must_use]
    pub fn little_endian() -> Utf32Decoder {
        Utf32Decoder { big_endian: false }
    }
}

impl ByteDecoder for Utf32Decoder {
    fn charset(&self) -> Charset {
        if self.big_endian { Charset::Utf32Be } else { Charset::Utf32Le }
    }

    fn decode(&mut self, bytes: &mut dyn BufRead) -> DecodeResult {
        let mut unit = [0u8; 4];
        for (i, slot) in unit.iter_mut().enumerate() {
            match next_byte(bytes)? {
                Some(b) => *slot = b,
                None if i == 0 => return Ok(None),
                None => return Err(DecodeError::InvalidByteSequence),
            }
        }
        let code = if self.big_endian { u32::from_be_bytes(unit) } else { u32::from_le_bytes(unit) };
        char::from_u32(code).map(Some).ok_or(DecodeError::InvalidByteSequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::decode_all;

    fn invalid(decoder: &mut dyn ByteDecoder, bytes: &[u8]) -> bool {
        matches!(decode_all(decoder, bytes), Err(DecodeError::InvalidByteSequence))
    }

    #[test]
    fn utf8_valid_and_invalid() {
        assert_eq!(decode_all(&mut UnicodeDecoder::utf8(), "añ€😀".as_bytes()).unwrap(), "añ€😀");
        // overlong '/'
        assert!(invalid(&mut UnicodeDecoder::utf8(), b"\xC0\xAF"));
        assert!(invalid(&mut UnicodeDecoder::utf8(), b"\xE0\x80\xAF"));
        // encoded surrogate
        assert!(invalid(&mut UnicodeDecoder::utf8(), b"\xED\xA0\x80"));
        // truncated sequence
        assert!(invalid(&mut UnicodeDecoder::utf8(), b"a\xE2\x82"));
        assert!(invalid(&mut UnicodeDecoder::utf8(), b"\xF5\x80\x80\x80"));
    }

    #[test]
    fn stops_right_after_each_code_point() {
        let mut decoder = UnicodeDecoder::utf8();
        let mut bytes: &[u8] = b"\xC3\xA9\xF0\x9F\x98\x80\xFF";
        assert_eq!(decoder.decode(&mut bytes).unwrap(), Some('\u{E9}'));
        assert_eq!(bytes, b"\xF0\x9F\x98\x80\xFF");
        assert_eq!(decoder.decode(&mut bytes).unwrap(), Some('\u{1F600}'));
        assert_eq!(bytes, b"\xFF");
    }

    #[test]
    fn utf16_pairs_and_lone_surrogates() {
        let le: Vec<u8> = "a😀".encode_utf16().flat_map(u16::to_le_bytes).collect();
        assert_eq!(decode_all(&mut UnicodeDecoder::utf16_le(), &le).unwrap(), "a😀");
        let be: Vec<u8> = "a😀".encode_utf16().flat_map(u16::to_be_bytes).collect();
        assert_eq!(decode_all(&mut UnicodeDecoder::utf16_be(), &be).unwrap(), "a😀");

        assert!(invalid(&mut UnicodeDecoder::utf16_be(), b"\xD8\x00\x00a"));
        assert!(invalid(&mut UnicodeDecoder::utf16_be(), b"\xDC\x00"));
        assert!(invalid(&mut UnicodeDecoder::utf16_be(), b"\x00a\x00"));
    }

    #[test]
    fn utf32_range() {
        let be: Vec<u8> = "x😀".chars().flat_map(|c| (c as u32).to_be_bytes()).collect();
        assert_eq!(decode_all(&mut Utf32Decoder::big_endian(), &be).unwrap(), "x😀");
        assert!(invalid(&mut Utf32Decoder::little_endian(), b"\x00\x00\x11\x00"));
        assert!(invalid(&mut Utf32Decoder::little_endian(), b"a\x00\x00"));
    }
}
