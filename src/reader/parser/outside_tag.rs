use crate::common::{is_ncname_start_char, is_whitespace_char, TextPosition};
use crate::reader::NodeKind;
use crate::string_writer::StringWriter;

use super::inside_reference::Reference;
use super::{PullParser, Result};

impl<'a, S: StringWriter> PullParser<'a, S> {
    /// Reads the next token. `None` means the document ended properly.
    pub(super) fn next_node(&mut self) -> Result<Option<NodeKind>> {
        self.clear_node();
        self.depth = self.elements.len();

        if let Some(pos) = self.pending_entity.take() {
            self.pos = pos;
            return self.entity_reference(pos).map(Some);
        }

        let pos = self.here();
        self.pos = pos;
        let kind = match self.cur() {
            None => return self.end_of_document(),
            Some('<') => self.markup(pos)?,
            Some(_) => self.read_text(pos)?,
        };

        if self.nodes_read == 0 {
            let bom = self.stream.bom();
            if bom.requires_declaration() && !(kind == NodeKind::XmlDeclaration && self.declared_encoding) {
                fail!(EncodingDeclarationRequired, pos,
                      "A document starting with a {:?} byte order mark must declare its encoding", bom);
            }
        }
        self.nodes_read += 1;
        Ok(Some(kind))
    }

    fn markup(&mut self, pos: TextPosition) -> Result<NodeKind> {
        self.bump()?;
        match self.cur() {
            Some('/') => self.inside_closing_tag_name(pos),
            Some('?') => self.inside_processing_instruction(pos),
            Some('!') => {
                self.bump()?;
                match self.cur() {
                    Some('-') => self.inside_comment(pos),
                    Some('[') => self.inside_cdata(pos),
                    Some('D') => self.inside_doctype(pos),
                    Some(c) => fail!(InvalidSyntax, self.here(), "Unexpected character '{}' after '<!'", c),
                    None => fail!(UnclosedToken, pos, "Unexpected end of input after '<!'"),
                }
            }
            Some(c) if is_ncname_start_char(c) => self.inside_opening_tag(pos),
            Some(c) => fail!(InvalidTagName, pos, "Character '{}' cannot start a tag name", c),
            None => fail!(UnclosedToken, pos, "Unexpected end of input after '<'"),
        }
    }

    /// Reads character data up to the next `<`, resolving references.
    ///
    /// An unknown entity reference ends the text; it is reported by itself
    /// right away if the text is still empty, or by the next pull otherwise.
    fn read_text(&mut self, pos: TextPosition) -> Result<NodeKind> {
        let mut whitespace = true;
        let mut brackets = 0usize;
        loop {
            match self.cur() {
                None | Some('<') => break,
                Some('&') => {
                    let reference_pos = self.here();
                    match self.read_reference()? {
                        Reference::Char(c) => {
                            self.value.push_char(c);
                            whitespace = false;
                        }
                        Reference::Entity if self.value.is_empty() => {
                            self.pos = reference_pos;
                            return self.entity_reference(reference_pos);
                        }
                        Reference::Entity => {
                            self.pending_entity = Some(reference_pos);
                            break;
                        }
                    }
                    brackets = 0;
                }
                Some(c) => {
                    if c == '>' && brackets >= 2 {
                        let here = self.here();
                        fail!(InvalidSyntax, TextPosition::at(here.row, here.column - 2),
                              "']]>' is not allowed in character data");
                    }
                    brackets = if c == ']' { brackets + 1 } else { 0 };
                    whitespace &= is_whitespace_char(c);
                    self.value.push_char(c);
                    self.bump()?;
                }
            }
        }

        if !whitespace && self.elements.is_empty() {
            fail!(InvalidSyntax, pos, "Character data is not allowed outside of the root element");
        }
        Ok(if whitespace { NodeKind::Whitespace } else { NodeKind::Text })
    }

    fn entity_reference(&mut self, pos: TextPosition) -> Result<NodeKind> {
        if self.elements.is_empty() {
            fail!(InvalidSyntax, pos, "Entity references are not allowed outside of the root element");
        }
        self.name.name.clone_from(&self.entity_name);
        self.name.local_name.clone_from(&self.entity_name);
        Ok(NodeKind::EntityReference)
    }

    fn end_of_document(&mut self) -> Result<Option<NodeKind>> {
        if let Some(frame) = self.elements.last() {
            fail!(UnclosedTag, frame.position, "Element '{}' is not closed", frame.name.name.to_utf8());
        }
        if !self.root_seen {
            fail!(NoElement, self.here(), "The document has no root element");
        }
        Ok(None)
    }
}
