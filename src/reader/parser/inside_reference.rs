use crate::common::{is_name_char, is_ncname_start_char, is_xml_char, TextPosition};
use crate::string_writer::StringWriter;

use super::{PullParser, Result};

/// Character references may have at most this many significant digits.
const MAX_REFERENCE_DIGITS: usize = 7;

pub(super) enum Reference {
    /// A character reference or a predefined entity.
    Char(char),
    /// Any other entity; its name is in `entity_name`.
    Entity,
}

impl<'a, S: StringWriter> PullParser<'a, S> {
    /// Reads a reference starting at the current `&`, up to and including the `;`.
    pub(super) fn read_reference(&mut self) -> Result<Reference> {
        let start = self.here();
        self.bump()?;
        match self.cur() {
            Some('#') => {
                self.bump()?;
                self.read_char_reference(start).map(Reference::Char)
            }
            Some(c) if is_ncname_start_char(c) => self.read_entity_reference(start),
            _ => fail!(InvalidReferenceSyntax, start, "Expected a name or '#' after '&'"),
        }
    }

    fn read_char_reference(&mut self, start: TextPosition) -> Result<char> {
        let radix = if self.cur() == Some('x') {
            self.bump()?;
            16
        } else {
            10
        };

        let mut value = 0u32;
        let mut significant = 0;
        let mut any_digit = false;
        loop {
            match self.cur() {
                Some(';') => break,
                Some(c) => match c.to_digit(radix) {
                    Some(d) => {
                        any_digit = true;
                        if value != 0 || d != 0 {
                            significant += 1;
                            if significant > MAX_REFERENCE_DIGITS {
                                fail!(InvalidCharacterReference, start, "Character reference is out of range");
                            }
                            value = value * radix + d;
                        }
                        self.bump()?;
                    }
                    None => fail!(InvalidReferenceSyntax, start, "Unexpected character '{}' in a character reference", c),
                },
                None => fail!(InvalidReferenceSyntax, start, "Character reference is not terminated by ';'"),
            }
        }
        if !any_digit {
            fail!(InvalidReferenceSyntax, start, "Character reference has no digits");
        }
        self.bump()?;

        match char::from_u32(value) {
            Some(c) if is_xml_char(value) => Ok(c),
            _ => fail!(InvalidCharacterReference, start, "Character reference to U+{:04X} is not allowed in XML", value),
        }
    }

    fn read_entity_reference(&mut self, start: TextPosition) -> Result<Reference> {
        self.buf.clear();
        loop {
            match self.cur() {
                Some(';') => break,
                Some(':') => fail!(InvalidReferenceSyntax, start, "Entity names cannot contain ':'"),
                Some(c) if is_name_char(c) => {
                    self.buf.push(c);
                    self.bump()?;
                }
                _ => fail!(InvalidReferenceSyntax, start, "Entity reference is not terminated by ';'"),
            }
        }
        self.bump()?;

        let c = match self.buf.as_str() {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "apos" => '\'',
            "quot" => '"',
            _ => {
                self.entity_name.clear();
                self.entity_name.push_str(&self.buf);
                return Ok(Reference::Entity);
            }
        };
        Ok(Reference::Char(c))
    }
}
