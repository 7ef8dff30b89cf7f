use crate::common::{is_whitespace_char, TextPosition};
use crate::reader::{ErrorCode, NodeKind};
use crate::string_writer::StringWriter;

use super::{PullParser, Result};

impl<'a, S: StringWriter> PullParser<'a, S> {
    /// Reads a processing instruction or the XML declaration; the cursor is on the `?`.
    pub(super) fn inside_processing_instruction(&mut self, pos: TextPosition) -> Result<NodeKind> {
        self.bump()?;
        let name_pos = self.here();
        self.read_node_name(ErrorCode::InvalidSyntax, pos)?;

        if self.name.name.matches("xml") {
            return self.inside_declaration(pos);
        }
        if self.name.name.to_utf8().eq_ignore_ascii_case("xml") {
            fail!(InvalidSyntax, name_pos, "Processing instruction target '{}' is reserved", self.name.name.to_utf8());
        }

        match self.cur() {
            Some('?') => {}
            Some(c) if is_whitespace_char(c) => {
                self.skip_whitespace()?;
            }
            Some(c) => fail!(InvalidSyntax, self.here(), "Unexpected character '{}' after a processing instruction target", c),
            None => fail!(UnclosedToken, pos, "Unclosed processing instruction"),
        }

        loop {
            match self.cur() {
                Some('?') => {
                    self.bump()?;
                    if self.cur() == Some('>') {
                        self.bump()?;
                        return Ok(NodeKind::ProcessingInstruction);
                    }
                    self.value.push_char('?');
                }
                Some(c) => {
                    self.value.push_char(c);
                    self.bump()?;
                }
                None => fail!(UnclosedToken, pos, "Unclosed processing instruction"),
            }
        }
    }
}
