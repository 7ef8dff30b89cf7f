//! Contains XML attributes manipulation types and functions.

use std::fmt;

use crate::common::TextPosition;
use crate::name::QualifiedName;
use crate::reader::pool::Recycle;
use crate::string_writer::StringWriter;

/// The quote character which delimited an attribute value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Delimiter {
    /// `'value'`
    SingleQuote,
    /// `"value"`
    #[default]
    DoubleQuote,
}

impl Delimiter {
    /// Returns the quote character, if `c` is one.
    #[must_use]
    pub fn from_char(c: char) -> Option<Delimiter> {
        match c {
            '\'' => Some(Delimiter::SingleQuote),
            '"' => Some(Delimiter::DoubleQuote),
            _ => None,
        }
    }

    /// Returns the delimiting character.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Delimiter::SingleQuote => '\'',
            Delimiter::DoubleQuote => '"',
        }
    }
}

/// An attribute of a start tag, an empty-element tag or the XML declaration.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Attribute<S: StringWriter = String> {
    /// Qualified name of the attribute.
    pub name: QualifiedName<S>,

    /// Attribute value with references resolved and whitespace normalized.
    pub value: S,

    /// Quote character used around the value.
    pub delimiter: Delimiter,

    /// Position of the first character of the attribute name.
    pub position: TextPosition,
}

impl<S: StringWriter> Attribute<S> {
    /// Creates an attribute with a local name and the given value.
    #[must_use]
    pub fn new(name: QualifiedName<S>, value: &str) -> Attribute<S> {
        Attribute {
            name,
            value: S::from_str(value),
            delimiter: Delimiter::DoubleQuote,
            position: TextPosition::new(),
        }
    }
}

impl<S: StringWriter> Recycle for Attribute<S> {
    fn recycle(&mut self) {
        self.name.clear();
        self.value.clear();
        self.delimiter = Delimiter::DoubleQuote;
        self.position = TextPosition::new();
    }
}

impl<S: StringWriter + fmt::Display> fmt::Display for Attribute<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.delimiter.as_char();
        write!(f, "{}={q}{}{q}", self.name, self.value)
    }
}
