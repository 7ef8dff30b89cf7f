use std::fmt;

use super::{Bom, ByteDecoder, SingleByteDecoder, UnicodeDecoder, Utf32Decoder};

/// A character set which can be named in the `encoding` pseudo-attribute.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Charset {
    Utf8,
    /// UTF-16 of either byte order.
    Utf16,
    Utf16Be,
    Utf16Le,
    /// UTF-32 of either byte order.
    Utf32,
    Utf32Be,
    Utf32Le,
    UsAscii,
    Iso8859_1,
    Iso8859_2,
    Iso8859_3,
    Iso8859_4,
    Iso8859_5,
    Iso8859_6,
    Iso8859_7,
    Iso8859_8,
    Iso8859_9,
    Iso8859_10,
    /// TIS-620, registered together with its alias ISO-8859-11.
    Tis620,
    Iso8859_13,
    Iso8859_14,
    Iso8859_15,
    Iso8859_16,
    Windows874,
    Windows1250,
    Windows1251,
    Windows1252,
    Windows1253,
    Windows1254,
    Windows1255,
    Windows1256,
    Windows1257,
    Windows1258,
}

/// Registered names and aliases, compared ASCII case-insensitively.
///
/// Reference: [Character Sets registered by IANA](https://www.iana.org/assignments/character-sets/character-sets.xhtml)
static ALIASES: &[(&str, Charset)] = &[
    ("UTF-8", Charset::Utf8),
    ("csUTF8", Charset::Utf8),
    ("UTF-16", Charset::Utf16),
    ("csUTF16", Charset::Utf16),
    ("UTF-16BE", Charset::Utf16Be),
    ("csUTF16BE", Charset::Utf16Be),
    ("UTF-16LE", Charset::Utf16Le),
    ("csUTF16LE", Charset::Utf16Le),
    ("UTF-32", Charset::Utf32),
    ("csUTF32", Charset::Utf32),
    ("UTF-32BE", Charset::Utf32Be),
    ("csUTF32BE", Charset::Utf32Be),
    ("UTF-32LE", Charset::Utf32Le),
    ("csUTF32LE", Charset::Utf32Le),
    ("US-ASCII", Charset::UsAscii),
    ("iso-ir-6", Charset::UsAscii),
    ("ANSI_X3.4-1968", Charset::UsAscii),
    ("ANSI_X3.4-1986", Charset::UsAscii),
    ("ISO_646.irv:1991", Charset::UsAscii),
    ("ISO646-US", Charset::UsAscii),
    ("us", Charset::UsAscii),
    ("IBM367", Charset::UsAscii),
    ("cp367", Charset::UsAscii),
    ("csASCII", Charset::UsAscii),
    ("ISO_8859-1:1987", Charset::Iso8859_1),
    ("iso-ir-100", Charset::Iso8859_1),
    ("ISO_8859-1", Charset::Iso8859_1),
    ("ISO-8859-1", Charset::Iso8859_1),
    ("latin1", Charset::Iso8859_1),
    ("l1", Charset::Iso8859_1),
    ("IBM819", Charset::Iso8859_1),
    ("CP819", Charset::Iso8859_1),
    ("csISOLatin1", Charset::Iso8859_1),
    ("ISO_8859-2:1987", Charset::Iso8859_2),
    ("iso-ir-101", Charset::Iso8859_2),
    ("ISO_8859-2", Charset::Iso8859_2),
    ("ISO-8859-2", Charset::Iso8859_2),
    ("latin2", Charset::Iso8859_2),
    ("l2", Charset::Iso8859_2),
    ("csISOLatin2", Charset::Iso8859_2),
    ("ISO_8859-3:1988", Charset::Iso8859_3),
    ("iso-ir-109", Charset::Iso8859_3),
    ("ISO_8859-3", Charset::Iso8859_3),
    ("ISO-8859-3", Charset::Iso8859_3),
    ("latin3", Charset::Iso8859_3),
    ("l3", Charset::Iso8859_3),
    ("csISOLatin3", Charset::Iso8859_3),
    ("ISO_8859-4:1988", Charset::Iso8859_4),
    ("iso-ir-110", Charset::Iso8859_4),
    ("ISO_8859-4", Charset::Iso8859_4),
    ("ISO-8859-4", Charset::Iso8859_4),
    ("latin4", Charset::Iso8859_4),
    ("l4", Charset::Iso8859_4),
    ("csISOLatin4", Charset::Iso8859_4),
    ("ISO_8859-5:1988", Charset::Iso8859_5),
    ("iso-ir-144", Charset::Iso8859_5),
    ("ISO_8859-5", Charset::Iso8859_5),
    ("ISO-8859-5", Charset::Iso8859_5),
    ("cyrillic", Charset::Iso8859_5),
    ("csISOLatinCyrillic", Charset::Iso8859_5),
    ("ISO_8859-6:1987", Charset::Iso8859_6),
    ("iso-ir-127", Charset::Iso8859_6),
    ("ISO_8859-6", Charset::Iso8859_6),
    ("ISO-8859-6", Charset::Iso8859_6),
    ("ECMA-114", Charset::Iso8859_6),
    ("ASMO-708", Charset::Iso8859_6),
    ("arabic", Charset::Iso8859_6),
    ("csISOLatinArabic", Charset::Iso8859_6),
    ("ISO_8859-7:1987", Charset::Iso8859_7),
    ("iso-ir-126", Charset::Iso8859_7),
    ("ISO_8859-7", Charset::Iso8859_7),
    ("ISO-8859-7", Charset::Iso8859_7),
    ("ELOT_928", Charset::Iso8859_7),
    ("ECMA-118", Charset::Iso8859_7),
    ("greek", Charset::Iso8859_7),
    ("greek8", Charset::Iso8859_7),
    ("csISOLatinGreek", Charset::Iso8859_7),
    ("ISO_8859-8:1988", Charset::Iso8859_8),
    ("iso-ir-138", Charset::Iso8859_8),
    ("ISO_8859-8", Charset::Iso8859_8),
    ("ISO-8859-8", Charset::Iso8859_8),
    ("hebrew", Charset::Iso8859_8),
    ("csISOLatinHebrew", Charset::Iso8859_8),
    ("ISO_8859-9:1989", Charset::Iso8859_9),
    ("iso-ir-148", Charset::Iso8859_9),
    ("ISO_8859-9", Charset::Iso8859_9),
    ("ISO-8859-9", Charset::Iso8859_9),
    ("latin5", Charset::Iso8859_9),
    ("l5", Charset::Iso8859_9),
    ("csISOLatin5", Charset::Iso8859_9),
    ("ISO-8859-10", Charset::Iso8859_10),
    ("iso-ir-157", Charset::Iso8859_10),
    ("l6", Charset::Iso8859_10),
    ("ISO_8859-10:1992", Charset::Iso8859_10),
    ("csISOLatin6", Charset::Iso8859_10),
    ("latin6", Charset::Iso8859_10),
    ("TIS-620", Charset::Tis620),
    ("csTIS620", Charset::Tis620),
    ("ISO-8859-11", Charset::Tis620),
    ("ISO-8859-13", Charset::Iso8859_13),
    ("csISO885913", Charset::Iso8859_13),
    ("ISO-8859-14", Charset::Iso8859_14),
    ("iso-ir-199", Charset::Iso8859_14),
    ("ISO_8859-14:1998", Charset::Iso8859_14),
    ("ISO_8859-14", Charset::Iso8859_14),
    ("latin8", Charset::Iso8859_14),
    ("iso-celtic", Charset::Iso8859_14),
    ("l8", Charset::Iso8859_14),
    ("csISO885914", Charset::Iso8859_14),
    ("ISO-8859-15", Charset::Iso8859_15),
    ("ISO_8859-15", Charset::Iso8859_15),
    ("Latin-9", Charset::Iso8859_15),
    ("csISO885915", Charset::Iso8859_15),
    ("ISO-8859-16", Charset::Iso8859_16),
    ("iso-ir-226", Charset::Iso8859_16),
    ("ISO_8859-16:2001", Charset::Iso8859_16),
    ("ISO_8859-16", Charset::Iso8859_16),
    ("latin10", Charset::Iso8859_16),
    ("l10", Charset::Iso8859_16),
    ("csISO885916", Charset::Iso8859_16),
    ("windows-874", Charset::Windows874),
    ("cswindows874", Charset::Windows874),
    ("windows-1250", Charset::Windows1250),
    ("cswindows1250", Charset::Windows1250),
    ("windows-1251", Charset::Windows1251),
    ("cswindows1251", Charset::Windows1251),
    ("windows-1252", Charset::Windows1252),
    ("cswindows1252", Charset::Windows1252),
    ("windows-1253", Charset::Windows1253),
    ("cswindows1253", Charset::Windows1253),
    ("windows-1254", Charset::Windows1254),
    ("cswindows1254", Charset::Windows1254),
    ("windows-1255", Charset::Windows1255),
    ("cswindows1255", Charset::Windows1255),
    ("windows-1256", Charset::Windows1256),
    ("cswindows1256", Charset::Windows1256),
    ("windows-1257", Charset::Windows1257),
    ("cswindows1257", Charset::Windows1257),
    ("windows-1258", Charset::Windows1258),
    ("cswindows1258", Charset::Windows1258),
];

impl Charset {
    /// Looks up a charset by any of its registered names.
    pub fn for_label(label: &str) -> Option<Charset> {
        ALIASES.iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(label))
            .map(|&(_, charset)| charset)
    }

    /// Preferred MIME name of the charset.
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Utf16 => "UTF-16",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Utf32 => "UTF-32",
            Charset::Utf32Be => "UTF-32BE",
            Charset::Utf32Le => "UTF-32LE",
            Charset::UsAscii => "US-ASCII",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::Iso8859_2 => "ISO-8859-2",
            Charset::Iso8859_3 => "ISO-8859-3",
            Charset::Iso8859_4 => "ISO-8859-4",
            Charset::Iso8859_5 => "ISO-8859-5",
            Charset::Iso8859_6 => "ISO-8859-6",
            Charset::Iso8859_7 => "ISO-8859-7",
            Charset::Iso8859_8 => "ISO-8859-8",
            Charset::Iso8859_9 => "ISO-8859-9",
            Charset::Iso8859_10 => "ISO-8859-10",
            Charset::Tis620 => "TIS-620",
            Charset::Iso8859_13 => "ISO-8859-13",
            Charset::Iso8859_14 => "ISO-8859-14",
            Charset::Iso8859_15 => "ISO-8859-15",
            Charset::Iso8859_16 => "ISO-8859-16",
            Charset::Windows874 => "windows-874",
            Charset::Windows1250 => "windows-1250",
            Charset::Windows1251 => "windows-1251",
            Charset::Windows1252 => "windows-1252",
            Charset::Windows1253 => "windows-1253",
            Charset::Windows1254 => "windows-1254",
            Charset::Windows1255 => "windows-1255",
            Charset::Windows1256 => "windows-1256",
            Charset::Windows1257 => "windows-1257",
            Charset::Windows1258 => "windows-1258",
        }
    }

    /// Byte order marks under which a document may declare this charset.
    ///
    /// This is the complete acceptance matrix; any combination missing here is
    /// an encoding confusion. Note that the byte-order-neutral names are
    /// accepted with either mark, while a name fixing the byte order only
    /// accepts the matching mark.
    pub fn accepted_boms(self) -> &'static [Bom] {
        match self {
            Charset::Utf8 => &[Bom::None, Bom::Utf8],
            Charset::Utf16 => &[Bom::Utf16Be, Bom::Utf16Le],
            Charset::Utf16Be => &[Bom::Utf16Be],
            Charset::Utf16Le => &[Bom::Utf16Le],
            Charset::Utf32 => &[Bom::Utf32Be, Bom::Utf32Le],
            Charset::Utf32Be => &[Bom::Utf32Be],
            Charset::Utf32Le => &[Bom::Utf32Le],
            _ => &[Bom::None],
        }
    }

    /// Checks whether a document with the given byte order mark may declare this charset.
    #[inline]
    pub fn accepts(self, bom: Bom) -> bool {
        self.accepted_boms().contains(&bom)
    }

    /// Checks whether this is a single-byte legacy charset.
    pub fn is_single_byte(self) -> bool {
        !matches!(self,
            Charset::Utf8 | Charset::Utf16 | Charset::Utf16Be | Charset::Utf16Le |
            Charset::Utf32 | Charset::Utf32Be | Charset::Utf32Le)
    }

    /// Creates a decoder for this charset.
    ///
    /// The byte-order-neutral UTF-16 and UTF-32 names decode big-endian, which is
    /// what an unmarked stream in those encodings is assumed to be.
    pub fn decoder(self) -> Box<dyn ByteDecoder> {
        match self {
            Charset::Utf8 => Box::new(UnicodeDecoder::utf8()),
            Charset::Utf16 | Charset::Utf16Be => Box::new(UnicodeDecoder::utf16_be()),
            Charset::Utf16Le => Box::new(UnicodeDecoder::utf16_le()),
            Charset::Utf32 | Charset::Utf32Be => Box::new(Utf32Decoder::big_endian()),
            Charset::Utf32Le => Box::new(Utf32Decoder::little_endian()),
            single_byte => Box::new(SingleByteDecoder::new(single_byte)),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
