use crate::common::TextPosition;
use crate::reader::NodeKind;
use crate::string_writer::StringWriter;

use super::{PullParser, Result};

impl<'a, S: StringWriter> PullParser<'a, S> {
    /// Reads a comment; the cursor is on the first `-` of `<!--`.
    pub(super) fn inside_comment(&mut self, pos: TextPosition) -> Result<NodeKind> {
        self.expect_str("--", pos)?;
        loop {
            match self.cur() {
                Some('-') => {
                    let dash = self.here();
                    self.bump()?;
                    if self.cur() == Some('-') {
                        self.bump()?;
                        match self.cur() {
                            Some('>') => {
                                self.bump()?;
                                return Ok(NodeKind::Comment);
                            }
                            Some(_) => fail!(InvalidSyntax, dash, "'--' is not allowed inside a comment"),
                            None => fail!(UnclosedToken, pos, "Unclosed comment"),
                        }
                    }
                    self.value.push_char('-');
                }
                Some(c) => {
                    self.value.push_char(c);
                    self.bump()?;
                }
                None => fail!(UnclosedToken, pos, "Unclosed comment"),
            }
        }
    }
}
