use super::{ByteDecoder, DecodeError, UnicodeDecoder, Utf32Decoder};

/// Byte order mark found at the beginning of a byte source.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Bom {
    /// No byte order mark; the source is read as UTF-8 until declared otherwise.
    #[default]
    None,
    /// `EF BB BF`
    Utf8,
    /// `FE FF`
    Utf16Be,
    /// `FF FE`
    Utf16Le,
    /// `00 00 FE FF`
    Utf32Be,
    /// `FF FE 00 00`
    Utf32Le,
}

impl Bom {
    /// Classifies the first bytes of a source.
    ///
    /// `prefix` holds up to four leading bytes, fewer only when the source is
    /// shorter. Longer marks take priority, so `FF FE 00 00` is UTF-32LE rather
    /// than UTF-16LE followed by a NUL character. A prefix which starts like a
    /// byte order mark but does not complete one is an invalid byte sequence.
    pub fn detect(prefix: &[u8]) -> Result<Bom, DecodeError> {
        Ok(match prefix {
            [0x00, 0x00, 0xFE, 0xFF, ..] => Bom::Utf32Be,
            [0xFF, 0xFE, 0x00, 0x00, ..] => Bom::Utf32Le,
            [0xEF, 0xBB, 0xBF, ..] => Bom::Utf8,
            [0xFE, 0xFF, ..] => Bom::Utf16Be,
            [0xFF, 0xFE, ..] => Bom::Utf16Le,
            [0xEF, 0xBB, ..] | [0xFE, ..] | [0xFF, ..] | [0x00, 0x00, 0xFE, ..] =>
                return Err(DecodeError::InvalidByteSequence),
            _ => Bom::None,
        })
    }

    /// Bytes of the mark itself.
    pub fn bytes(self) -> &'static [u8] {
        match self {
            Bom::None => &[],
            Bom::Utf8 => &[0xEF, 0xBB, 0xBF],
            Bom::Utf16Be => &[0xFE, 0xFF],
            Bom::Utf16Le => &[0xFF, 0xFE],
            Bom::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
            Bom::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
        }
    }

    /// Creates the decoder selected by this byte order mark.
    pub fn decoder(self) -> Box<dyn ByteDecoder> {
        match self {
            Bom::None | Bom::Utf8 => Box::new(UnicodeDecoder::utf8()),
            Bom::Utf16Be => Box::new(UnicodeDecoder::utf16_be()),
            Bom::Utf16Le => Box::new(UnicodeDecoder::utf16_le()),
            Bom::Utf32Be => Box::new(Utf32Decoder::big_endian()),
            Bom::Utf32Le => Box::new(Utf32Decoder::little_endian()),
        }
    }

    /// Checks whether a document starting with this mark must carry an XML
    /// declaration with an `encoding` name.
    #[inline]
    pub fn requires_declaration(self) -> bool {
        !matches!(self, Bom::None | Bom::Utf8)
    }
}

#[cfg(test)]
mod tests {
    use super::Bom;
    use crate::encoding::DecodeError;

    #[test]
    fn longest_prefix_wins() {
        assert!(matches!(Bom::detect(b"\xFF\xFE\x00\x00"), Ok(Bom::Utf32Le)));
        assert!(matches!(Bom::detect(b"\xFF\xFE<\x00"), Ok(Bom::Utf16Le)));
        assert!(matches!(Bom::detect(b"\x00\x00\xFE\xFF"), Ok(Bom::Utf32Be)));
        assert!(matches!(Bom::detect(b"\xFE\xFF\x00<"), Ok(Bom::Utf16Be)));
        assert!(matches!(Bom::detect(b"\xEF\xBB\xBF<"), Ok(Bom::Utf8)));
        assert!(matches!(Bom::detect(b"\xFF\xFE"), Ok(Bom::Utf16Le)));
    }

    #[test]
    fn absent_mark() {
        assert!(matches!(Bom::detect(b"<a/>"), Ok(Bom::None)));
        assert!(matches!(Bom::detect(b""), Ok(Bom::None)));
        assert!(matches!(Bom::detect(b"\x00\x00\x00<"), Ok(Bom::None)));
        assert!(Bom::None.bytes().is_empty());
    }

    #[test]
    fn mark_bytes_detect_themselves() {
        for bom in [Bom::Utf8, Bom::Utf16Be, Bom::Utf16Le, Bom::Utf32Be, Bom::Utf32Le] {
            assert_eq!(Bom::detect(bom.bytes()).unwrap(), bom);
        }
    }

    #[test]
    fn broken_marks_are_rejected() {
        assert!(matches!(Bom::detect(b"\xEF\xBB<"), Err(DecodeError::InvalidByteSequence)));
        assert!(matches!(Bom::detect(b"\xFE<"), Err(DecodeError::InvalidByteSequence)));
        assert!(matches!(Bom::detect(b"\xFF"), Err(DecodeError::InvalidByteSequence)));
    }

    #[test]
    fn declaration_requirement() {
        assert!(!Bom::None.requires_declaration());
        assert!(!Bom::Utf8.requires_declaration());
        assert!(Bom::Utf16Le.requires_declaration());
        assert!(Bom::Utf32Be.requires_declaration());
    }
}
