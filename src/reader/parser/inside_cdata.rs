use crate::common::TextPosition;
use crate::reader::NodeKind;
use crate::string_writer::StringWriter;

use super::{PullParser, Result};

impl<'a, S: StringWriter> PullParser<'a, S> {
    /// Reads a CDATA section; the cursor is on the `[` of `<![CDATA[`.
    ///
    /// The section ends at the first `]]>`; any further `]` right before it is content.
    pub(super) fn inside_cdata(&mut self, pos: TextPosition) -> Result<NodeKind> {
        self.expect_str("[CDATA[", pos)?;
        if self.elements.is_empty() {
            fail!(CDataSectionOutside, pos, "CDATA sections are not allowed outside of the root element");
        }

        let mut brackets = 0usize;
        loop {
            match self.cur() {
                Some(']') => {
                    brackets += 1;
                    self.bump()?;
                }
                Some('>') if brackets >= 2 => {
                    for _ in 2..brackets {
                        self.value.push_char(']');
                    }
                    self.bump()?;
                    return Ok(NodeKind::CData);
                }
                Some(c) => {
                    for _ in 0..brackets {
                        self.value.push_char(']');
                    }
                    brackets = 0;
                    self.value.push_char(c);
                    self.bump()?;
                }
                None => fail!(UnclosedToken, pos, "Unclosed CDATA section"),
            }
        }
    }
}
