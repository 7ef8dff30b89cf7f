//! Contains several types and functions used throughout the library.

use std::fmt;

/// Represents a position inside some textual document.
///
/// Both coordinates are 1-based. Line breaks are counted after newline
/// normalization, so a `\r\n` pair advances the row exactly once.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TextPosition {
    /// Row, counting from 1.
    pub row: u64,
    /// Column, counting from 1.
    pub column: u64,
}

impl TextPosition {
    /// Creates a new position initialized to the beginning of the document.
    ///
    /// The column is 0 because no character has been read yet; the first
    /// character of the document is at `1:1`.
    #[inline]
    #[must_use]
    pub const fn new() -> TextPosition {
        TextPosition { row: 1, column: 0 }
    }

    /// Creates a position from explicit coordinates.
    #[inline]
    #[must_use]
    pub const fn at(row: u64, column: u64) -> TextPosition {
        TextPosition { row, column }
    }

    /// Advances the position inside a line.
    #[inline]
    pub fn advance(&mut self, count: u64) {
        self.column += count;
    }

    /// Advances the position to the beginning of the next line.
    #[inline]
    pub fn new_line(&mut self) {
        self.column = 1;
        self.row += 1;
    }
}

impl Default for TextPosition {
    fn default() -> Self {
        TextPosition::new()
    }
}

impl fmt::Display for TextPosition {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Designates a type which can yield a position inside some textual document.
///
/// This trait is implemented by the inspector and by errors.
pub trait Position {
    /// Returns the current position or a position corresponding to the object.
    fn position(&self) -> TextPosition;
}

impl Position for TextPosition {
    #[inline]
    fn position(&self) -> TextPosition {
        *self
    }
}

/// Checks whether the given code point matches the `Char` production of XML 1.0.
///
/// ```text
/// [2] Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
/// ```
#[must_use]
#[inline]
pub fn is_xml_char(c: u32) -> bool {
    matches!(c,
        0x9 | 0xA | 0xD
        | 0x20..=0xD7FF
        | 0xE000..=0xFFFD
        | 0x10000..=0x10FFFF
    )
}

/// Checks whether the given character is a white space character (`S`)
/// as is defined by XML 1.0 specification, [section 2.3][1].
///
/// [1]: http://www.w3.org/TR/2008/REC-xml-20081126/#sec-common-syn
#[must_use]
#[inline]
pub fn is_whitespace_char(c: char) -> bool {
    matches!(c, '\x20' | '\x0a' | '\x09' | '\x0d')
}

/// Checks whether the given character is a name start character (`NameStartChar`)
/// as is defined by XML 1.0 specification, [section 2.3][1].
///
/// [1]: http://www.w3.org/TR/2008/REC-xml-20081126/#sec-common-syn
#[must_use]
pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z' |
        '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}' |
        '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' |
        '\u{200C}'..='\u{200D}' | '\u{2070}'..='\u{218F}' |
        '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}' |
        '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' |
        '\u{10000}'..='\u{EFFFF}')
}

/// Checks whether the given character is a name character (`NameChar`)
/// as is defined by XML 1.0 specification, [section 2.3][1].
///
/// [1]: http://www.w3.org/TR/2008/REC-xml-20081126/#sec-common-syn
#[must_use]
pub fn is_name_char(c: char) -> bool {
    if is_name_start_char(c) {
        return true;
    }
    matches!(c,
        '-' | '.' | '0'..='9' | '\u{B7}' |
        '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Checks whether the given character may start a name without a namespace prefix
/// separator, i.e. it is a `NameStartChar` other than `:`.
#[must_use]
#[inline]
pub fn is_ncname_start_char(c: char) -> bool {
    c != ':' && is_name_start_char(c)
}
