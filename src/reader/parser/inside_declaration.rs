use crate::attribute::Delimiter;
use crate::common::{is_name_start_char, TextPosition};
use crate::reader::{Error, ErrorCode, NodeKind};
use crate::string_writer::StringWriter;

use super::{PullParser, Result};

/// The last pseudo-attribute read, in the order they must appear.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum Stage {
    Start,
    Version,
    Encoding,
    Standalone,
}

impl<'a, S: StringWriter> PullParser<'a, S> {
    /// Reads the rest of the XML declaration after `<?xml`.
    pub(super) fn inside_declaration(&mut self, pos: TextPosition) -> Result<NodeKind> {
        if pos != TextPosition::at(1, 1) {
            fail!(InvalidXmlDeclarationLocation, pos, "The XML declaration must be at the very start of the document");
        }

        let mut stage = Stage::Start;
        loop {
            let had_whitespace = self.skip_whitespace()?;
            match self.cur() {
                Some('?') => {
                    self.bump()?;
                    match self.cur() {
                        Some('>') => {
                            self.bump()?;
                            break;
                        }
                        Some(c) => fail!(InvalidSyntax, self.here(), "Expected '>' after '?', found '{}'", c),
                        None => fail!(UnclosedToken, pos, "Unclosed XML declaration"),
                    }
                }
                Some(c) if had_whitespace && is_name_start_char(c) => {
                    stage = self.read_pseudo_attribute(stage, pos)?;
                }
                Some(c) => fail!(InvalidSyntax, self.here(), "Unexpected character '{}' in the XML declaration", c),
                None => fail!(UnclosedToken, pos, "Unclosed XML declaration"),
            }
        }

        if stage == Stage::Start {
            fail!(InvalidSyntax, pos, "The XML declaration must specify a version");
        }
        Ok(NodeKind::XmlDeclaration)
    }

    fn read_pseudo_attribute(&mut self, stage: Stage, pos: TextPosition) -> Result<Stage> {
        let mut attr = self.attributes.take_slot();
        attr.position = self.here();
        self.read_qualified_name(&mut attr.name, ErrorCode::InvalidSyntax, pos)?;

        let next = if attr.name.name.matches("version") {
            Stage::Version
        } else if attr.name.name.matches("encoding") {
            Stage::Encoding
        } else if attr.name.name.matches("standalone") {
            Stage::Standalone
        } else {
            fail!(InvalidSyntax, attr.position, "Unknown pseudo-attribute '{}'", attr.name.name.to_utf8());
        };
        if stage == Stage::Start && next != Stage::Version {
            fail!(InvalidSyntax, attr.position, "The XML declaration must start with the version");
        }
        if next <= stage {
            fail!(InvalidSyntax, attr.position, "Pseudo-attribute '{}' is repeated or out of order",
                  attr.name.name.to_utf8());
        }

        self.skip_whitespace()?;
        match self.cur() {
            Some('=') => self.bump()?,
            Some(c) => fail!(InvalidSyntax, self.here(), "Expected '=', found '{}'", c),
            None => fail!(UnclosedToken, pos, "Unclosed XML declaration"),
        }
        self.skip_whitespace()?;
        attr.delimiter = match self.cur() {
            Some(c) => match Delimiter::from_char(c) {
                Some(delimiter) => delimiter,
                None => fail!(InvalidSyntax, self.here(), "Pseudo-attribute values must be quoted"),
            },
            None => fail!(UnclosedToken, pos, "Unclosed XML declaration"),
        };
        self.bump()?;

        let quote = attr.delimiter.as_char();
        self.buf.clear();
        loop {
            match self.cur() {
                Some(c) if c == quote => break,
                Some(c) => {
                    self.buf.push(c);
                    self.bump()?;
                }
                None => fail!(UnclosedToken, pos, "Unclosed XML declaration"),
            }
        }

        match next {
            Stage::Version if !is_version_number(&self.buf) => {
                fail!(InvalidSyntax, attr.position, "Unsupported XML version '{}'", self.buf)
            }
            Stage::Encoding => {
                if !is_encoding_name(&self.buf) {
                    fail!(InvalidSyntax, attr.position, "Malformed encoding name '{}'", self.buf);
                }
                // the closing quote has been decoded already, so the next
                // character comes from the declared decoder
                if let Err(code) = self.stream.declare_encoding(&self.buf) {
                    let message = format!("{} ({})", code, self.buf);
                    return Err(Error::with_message(code, attr.position, message));
                }
                self.declared_encoding = true;
            }
            Stage::Standalone if self.buf != "yes" && self.buf != "no" => {
                fail!(InvalidSyntax, attr.position, "Standalone must be 'yes' or 'no', found '{}'", self.buf)
            }
            _ => {}
        }
        self.bump()?;

        attr.value.push_str(&self.buf);
        self.attributes.push(attr);
        Ok(next)
    }
}

/// `1.` followed by at least one digit.
fn is_version_number(s: &str) -> bool {
    match s.strip_prefix("1.") {
        Some(minor) => !minor.is_empty() && minor.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// `[A-Za-z] ([A-Za-z0-9._] | '-')*`
fn is_encoding_name(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}
