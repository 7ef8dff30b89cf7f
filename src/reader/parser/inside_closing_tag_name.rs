use crate::common::TextPosition;
use crate::reader::{ErrorCode, NodeKind};
use crate::string_writer::StringWriter;

use super::{PullParser, Result};

impl<'a, S: StringWriter> PullParser<'a, S> {
    /// Reads an end tag; the cursor is on the `/`.
    pub(super) fn inside_closing_tag_name(&mut self, pos: TextPosition) -> Result<NodeKind> {
        self.bump()?;
        let name_pos = self.here();
        self.read_node_name(ErrorCode::InvalidTagName, pos)?;
        self.skip_whitespace()?;
        match self.cur() {
            Some('>') => self.bump()?,
            Some(c) => fail!(InvalidSyntax, self.here(), "Unexpected character '{}' in an end tag", c),
            None => fail!(UnclosedToken, pos, "Unclosed end tag"),
        }

        match self.elements.last() {
            Some(frame) if frame.name.name == self.name.name => {}
            Some(frame) => fail!(UnexpectedEndTag, name_pos, "Expected end tag '{}', found '{}'",
                                 frame.name.name.to_utf8(), self.name.name.to_utf8()),
            None => fail!(UnexpectedEndTag, name_pos, "End tag '{}' does not close any element",
                          self.name.name.to_utf8()),
        }
        if let Some(frame) = self.elements.pop() {
            self.name.assign(&frame.name);
        }

        let depth = self.elements.len();
        self.depth = depth;
        self.namespaces.pop_depth(depth);
        Ok(NodeKind::EndTag)
    }
}
