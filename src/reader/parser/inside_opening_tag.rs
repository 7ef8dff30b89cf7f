use crate::attribute::{Attribute, Delimiter};
use crate::common::{is_name_start_char, is_whitespace_char, TextPosition};
use crate::namespace::{self, check_declaration, Declaration};
use crate::reader::indexset::AttributeKey;
use crate::reader::{Error, ErrorCode, NodeKind};
use crate::string_writer::StringWriter;

use super::inside_reference::Reference;
use super::{PullParser, Result};

impl<'a, S: StringWriter> PullParser<'a, S> {
    /// Reads a start tag or an empty-element tag; the cursor is on the first
    /// character of the element name.
    pub(super) fn inside_opening_tag(&mut self, pos: TextPosition) -> Result<NodeKind> {
        if self.root_seen && self.elements.is_empty() {
            fail!(ElementOutside, pos, "Only one root element is allowed");
        }

        let name_pos = self.here();
        self.read_node_name(ErrorCode::InvalidTagName, pos)?;
        if self.name.prefix.matches(namespace::NS_XMLNS_PREFIX) {
            fail!(InvalidTagName, name_pos, "Element names cannot have the 'xmlns' prefix");
        }

        let empty = self.read_attributes(pos)?;
        self.resolve_namespaces(name_pos)?;

        let depth = self.elements.len();
        self.depth = depth;
        self.root_seen = true;
        if empty {
            self.namespaces.pop_depth(depth);
            Ok(NodeKind::EmptyElementTag)
        } else {
            let mut frame = self.elements.take_slot();
            frame.name.assign(&self.name);
            frame.position = pos;
            self.elements.push(frame);
            Ok(NodeKind::StartTag)
        }
    }

    /// Reads attributes up to the end of the tag, telling whether it was `/>`.
    fn read_attributes(&mut self, pos: TextPosition) -> Result<bool> {
        self.attribute_index.clear();
        let mut after_value = false;
        loop {
            let had_whitespace = self.skip_whitespace()?;
            match self.cur() {
                Some('>') => {
                    self.bump()?;
                    return Ok(false);
                }
                Some('/') => {
                    self.bump()?;
                    return match self.cur() {
                        Some('>') => {
                            self.bump()?;
                            Ok(true)
                        }
                        Some(c) => fail!(InvalidSyntax, self.here(), "Expected '>' after '/', found '{}'", c),
                        None => fail!(UnclosedToken, pos, "Unclosed tag"),
                    };
                }
                None => fail!(UnclosedToken, pos, "Unclosed tag"),
                Some(c) if had_whitespace && is_name_start_char(c) => self.read_attribute(pos)?,
                Some(c) if had_whitespace => {
                    fail!(InvalidAttributeName, self.here(), "Character '{}' cannot start an attribute name", c)
                }
                Some(_) if after_value => fail!(InvalidSyntax, self.here(), "Attributes must be separated by whitespace"),
                Some(c) => fail!(InvalidTagName, self.here(), "Character '{}' is not allowed in a tag name", c),
            }
            after_value = true;
        }
    }

    fn read_attribute(&mut self, pos: TextPosition) -> Result<()> {
        let mut attr = self.attributes.take_slot();
        attr.position = self.here();
        self.read_qualified_name(&mut attr.name, ErrorCode::InvalidAttributeName, pos)?;

        let had_whitespace = self.skip_whitespace()?;
        match self.cur() {
            Some('=') => self.bump()?,
            None => fail!(UnclosedToken, pos, "Unclosed tag"),
            Some(_) if had_whitespace => {
                fail!(InvalidSyntax, self.here(), "Expected '=' after attribute '{}'", attr.name.name.to_utf8())
            }
            Some(c) => fail!(InvalidAttributeName, self.here(), "Character '{}' is not allowed in an attribute name", c),
        }
        self.skip_whitespace()?;

        attr.delimiter = match self.cur() {
            Some(c) => match Delimiter::from_char(c) {
                Some(delimiter) => delimiter,
                None => fail!(InvalidSyntax, self.here(), "Attribute values must be quoted"),
            },
            None => fail!(UnclosedToken, pos, "Unclosed tag"),
        };
        self.bump()?;
        self.read_attribute_value(&mut attr, pos)?;

        self.attributes.push(attr);
        if self.attribute_index.has_duplicate(self.attributes.as_slice(), AttributeKey::Raw) {
            let attr = &self.attributes[self.attributes.len() - 1];
            fail!(DoubleAttributeName, attr.position, "Attribute '{}' is defined twice", attr.name.name.to_utf8());
        }
        Ok(())
    }

    /// Reads an attribute value after its opening quote, consuming the closing one.
    ///
    /// References are resolved, and every literal whitespace character becomes a space.
    fn read_attribute_value(&mut self, attr: &mut Attribute<S>, pos: TextPosition) -> Result<()> {
        let quote = attr.delimiter.as_char();
        loop {
            match self.cur() {
                Some(c) if c == quote => return self.bump(),
                Some('<') => fail!(InvalidSyntax, self.here(), "Character '<' is not allowed in attribute values"),
                Some('&') => {
                    let reference_pos = self.here();
                    match self.read_reference()? {
                        Reference::Char(c) => attr.value.push_char(c),
                        Reference::Entity => fail!(InvalidReferenceSyntax, reference_pos,
                            "Entity '{}' cannot be used in an attribute value", self.entity_name.to_utf8()),
                    }
                }
                Some(c) => {
                    attr.value.push_char(if is_whitespace_char(c) { ' ' } else { c });
                    self.bump()?;
                }
                None => fail!(UnclosedToken, pos, "Unclosed attribute value"),
            }
        }
    }

    /// Pushes the namespace declarations of the current tag, then resolves the
    /// prefixes of the element and of its attributes.
    fn resolve_namespaces(&mut self, name_pos: TextPosition) -> Result<()> {
        let depth = self.elements.len();
        let no_prefix = S::default();
        for attr in self.attributes.as_slice() {
            let declaration = Declaration::of(&attr.name);
            match check_declaration(declaration, &attr.name, &attr.value) {
                Ok(true) => {
                    let prefix = if declaration == Declaration::Prefix { &attr.name.local_name } else { &no_prefix };
                    self.namespaces.push(prefix, &attr.value, depth);
                }
                Ok(false) => {}
                Err((code, message)) => return Err(Error::with_message(code, attr.position, message)),
            }
        }

        match self.namespaces.get(&self.name.prefix) {
            Some(uri) => self.name.namespace_uri.clone_from(uri),
            None if !self.name.has_prefix() => self.name.namespace_uri.clear(),
            None => fail!(PrefixWithoutAssignedNamespace, name_pos,
                          "Prefix '{}' is not bound to a namespace", self.name.prefix.to_utf8()),
        }

        for attr in self.attributes.as_mut_slice() {
            if attr.name.has_prefix() {
                match self.namespaces.get(&attr.name.prefix) {
                    Some(uri) => attr.name.namespace_uri.clone_from(uri),
                    None => fail!(PrefixWithoutAssignedNamespace, attr.position,
                                  "Prefix '{}' is not bound to a namespace", attr.name.prefix.to_utf8()),
                }
            } else if Declaration::of(&attr.name) == Declaration::Default {
                attr.name.namespace_uri.clone_from(self.namespaces.xmlns_uri());
            } else {
                attr.name.namespace_uri.clear();
            }
        }

        self.attribute_index.clear();
        for end in 1..=self.attributes.len() {
            if self.attribute_index.has_duplicate(&self.attributes.as_slice()[..end], AttributeKey::Resolved) {
                let attr = &self.attributes[end - 1];
                fail!(DoubleAttributeName, attr.position,
                      "Attribute '{}' duplicates another attribute in namespace '{}'",
                      attr.name.local_name.to_utf8(), attr.name.namespace_uri.to_utf8());
            }
        }
        Ok(())
    }
}
