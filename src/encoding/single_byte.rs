use std::fmt;
use std::io::BufRead;

use encoding_rs::Encoding;

use super::{next_byte, ByteDecoder, Charset, DecodeError, DecodeResult};

/// Decoder for the single-byte legacy charsets.
///
/// The lower half is always ASCII. The upper half is looked up in a table built
/// once per decoder from the `encoding_rs` index of the closest WHATWG encoding;
/// bytes the charset leaves unassigned decode to an invalid byte sequence.
#[derive(Clone)]
pub struct SingleByteDecoder {
    charset: Charset,
    high: [Option<char>; 128],
}

impl SingleByteDecoder {
    /// Builds the decoder for a single-byte `charset`.
    ///
    /// Multi-byte charsets produce a decoder which accepts ASCII only; use
    /// [`Charset::decoder`] to get the right decoder for any charset.
    pub fn new(charset: Charset) -> SingleByteDecoder {
        let mut high = [None; 128];
        match charset {
            Charset::Iso8859_1 => identity(&mut high, 0x80..=0xFF),
            // Both are supersets in encoding_rs; the ISO flavours keep C1 controls
            // where the Windows code pages put typographic characters.
            Charset::Iso8859_9 => {
                from_index(&mut high, encoding_rs::WINDOWS_1254);
                identity(&mut high, 0x80..=0x9F);
            }
            Charset::Tis620 => {
                from_index(&mut high, encoding_rs::WINDOWS_874);
                identity(&mut high, 0x80..=0x9F);
            }
            other => {
                if let Some(index) = whatwg_index(other) {
                    from_index(&mut high, index);
                }
            }
        }
        SingleByteDecoder { charset, high }
    }
}

fn whatwg_index(charset: Charset) -> Option<&'static Encoding> {
    Some(match charset {
        Charset::Iso8859_2 => encoding_rs::ISO_8859_2,
        Charset::Iso8859_3 => encoding_rs::ISO_8859_3,
        Charset::Iso8859_4 => encoding_rs::ISO_8859_4,
        Charset::Iso8859_5 => encoding_rs::ISO_8859_5,
        Charset::Iso8859_6 => encoding_rs::ISO_8859_6,
        Charset::Iso8859_7 => encoding_rs::ISO_8859_7,
        Charset::Iso8859_8 => encoding_rs::ISO_8859_8,
        Charset::Iso8859_10 => encoding_rs::ISO_8859_10,
        Charset::Iso8859_13 => encoding_rs::ISO_8859_13,
        Charset::Iso8859_14 => encoding_rs::ISO_8859_14,
        Charset::Iso8859_15 => encoding_rs::ISO_8859_15,
        Charset::Iso8859_16 => encoding_rs::ISO_8859_16,
        Charset::Windows874 => encoding_rs::WINDOWS_874,
        Charset::Windows1250 => encoding_rs::WINDOWS_1250,
        Charset::Windows1251 => encoding_rs::WINDOWS_1251,
        Charset::Windows1252 => encoding_rs::WINDOWS_1252,
        Charset::Windows1253 => encoding_rs::WINDOWS_1253,
        Charset::Windows1254 => encoding_rs::WINDOWS_1254,
        Charset::Windows1255 => encoding_rs::WINDOWS_1255,
        Charset::Windows1256 => encoding_rs::WINDOWS_1256,
        Charset::Windows1257 => encoding_rs::WINDOWS_1257,
        Charset::Windows1258 => encoding_rs::WINDOWS_1258,
        _ => return None,
    })
}

fn from_index(high: &mut [Option<char>; 128], index: &'static Encoding) {
    for (slot, byte) in high.iter_mut().zip(0x80u8..=0xFF) {
        *slot = index.decode_without_bom_handling_and_without_replacement(&[byte])
            .and_then(|s| {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            });
    }
}

fn identity(high: &mut [Option<char>; 128], bytes: std::ops::RangeInclusive<u8>) {
    for byte in bytes {
        high[usize::from(byte - 0x80)] = Some(char::from(byte));
    }
}

impl ByteDecoder for SingleByteDecoder {
    fn charset(&self) -> Charset {
        self.charset
    }

    fn decode(&mut self, bytes: &mut dyn BufRead) -> DecodeResult {
        match next_byte(bytes)? {
            None => Ok(None),
            Some(b) if b < 0x80 => Ok(Some(char::from(b))),
            Some(b) => self.high[usize::from(b - 0x80)]
                .map(Some)
                .ok_or(DecodeError::InvalidByteSequence),
        }
    }
}

impl fmt::Debug for SingleByteDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleByteDecoder").field("charset", &self.charset).finish()
    }
}
