//! Contains an implementation of the pull-based scanner behind [`Inspector`](crate::Inspector).
//!
//! The scanner sits on one character at a time. Each pull reads exactly one
//! token, dispatching on its first characters to one of the `inside_*`
//! submodules, and leaves the cursor on the first character after the token.

use std::mem;

use log::{debug, trace};

use crate::attribute::Attribute;
use crate::common::{is_name_char, is_ncname_start_char, is_whitespace_char, Position, TextPosition};
use crate::name::QualifiedName;
use crate::namespace::NamespaceStack;
use crate::reader::char_stream::CharStream;
use crate::reader::config::ParserConfig;
use crate::reader::decoding_reader::Source;
use crate::reader::indexset::AttributeIndex;
use crate::reader::pool::{Pool, Recycle};
use crate::reader::{Error, ErrorCode, NodeKind};
use crate::string_writer::StringWriter;

mod inside_cdata;
mod inside_closing_tag_name;
mod inside_comment;
mod inside_declaration;
mod inside_doctype;
mod inside_opening_tag;
mod inside_processing_instruction;
mod inside_reference;
mod outside_tag;

type Result<T> = std::result::Result<T, Error>;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum State {
    NotStarted,
    Running,
    Finished,
    Failed,
}

/// An element whose end tag has not been read yet.
#[derive(Default)]
pub(crate) struct ElementFrame<S: StringWriter> {
    name: QualifiedName<S>,
    /// Position of the `<` of the start tag.
    position: TextPosition,
}

impl<S: StringWriter> Recycle for ElementFrame<S> {
    fn recycle(&mut self) {
        self.name.clear();
        self.position = TextPosition::new();
    }
}

/// Pull-based XML parser.
pub(crate) struct PullParser<'a, S: StringWriter> {
    config: ParserConfig,
    stream: CharStream<'a>,
    st: State,
    error: Option<Error>,

    kind: NodeKind,
    name: QualifiedName<S>,
    value: S,
    attributes: Pool<Attribute<S>>,
    attribute_index: AttributeIndex,
    pos: TextPosition,
    depth: usize,

    elements: Pool<ElementFrame<S>>,
    namespaces: NamespaceStack<S>,

    root_seen: bool,
    doctype_seen: bool,
    declared_encoding: bool,
    nodes_read: u64,

    /// An unknown entity reference which ended a text node and is reported next.
    pending_entity: Option<TextPosition>,
    entity_name: S,
    /// Scratch space for reference names and declaration values.
    buf: String,
}

impl<'a, S: StringWriter> PullParser<'a, S> {
    /// Returns a new unbound parser using the given config.
    pub fn new(config: ParserConfig) -> PullParser<'a, S> {
        PullParser {
            config,
            stream: CharStream::new(Source::Unbound),
            st: State::NotStarted,
            error: None,

            kind: NodeKind::None,
            name: QualifiedName::default(),
            value: S::default(),
            attributes: Pool::new(),
            attribute_index: AttributeIndex::new(),
            pos: TextPosition::new(),
            depth: 0,

            elements: Pool::new(),
            namespaces: NamespaceStack::new(),

            root_seen: false,
            doctype_seen: false,
            declared_encoding: false,
            nodes_read: 0,

            pending_entity: None,
            entity_name: S::default(),
            buf: String::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Forgets the current document and starts over with `source`.
    pub fn bind(&mut self, source: Source<'a>) {
        self.st = State::NotStarted;
        self.error = None;
        self.clear_node();
        self.pos = TextPosition::new();
        self.depth = 0;
        self.elements.clear();
        self.namespaces.clear();
        self.attribute_index.clear();
        self.root_seen = false;
        self.doctype_seen = false;
        self.declared_encoding = false;
        self.nodes_read = 0;
        self.pending_entity = None;
        self.entity_name.clear();
        self.buf.clear();
        self.stream.rebind(source);
    }

    /// Releases the storage of all pooled records.
    pub fn release(&mut self) {
        self.attributes.release();
        self.elements.release();
        self.namespaces.release();
        self.attribute_index = AttributeIndex::new();
        self.name = QualifiedName::default();
        self.value = S::default();
        self.entity_name = S::default();
        self.buf = String::new();
    }

    /// Latches an error which happened outside of inspection, such as a failure to open a file.
    pub fn fail_with(&mut self, err: Error) {
        self.latch(err);
    }

    pub fn inspect(&mut self) -> bool {
        match self.st {
            State::Finished | State::Failed => return false,
            State::NotStarted => {
                self.st = State::Running;
                if let Err(e) = self.stream.bump() {
                    self.latch(e);
                    return false;
                }
            }
            State::Running => {}
        }

        loop {
            match self.next_node() {
                Ok(Some(kind)) => {
                    let kind = match kind {
                        NodeKind::Comment if self.config.ignore_comments => continue,
                        NodeKind::Whitespace if self.config.ignore_whitespace => continue,
                        NodeKind::Whitespace if self.config.whitespace_to_characters => NodeKind::Text,
                        NodeKind::CData if self.config.cdata_to_characters => NodeKind::Text,
                        other => other,
                    };
                    self.kind = kind;
                    trace!("{:?} at {}, depth {}", kind, self.pos, self.depth);
                    return true;
                }
                Ok(None) => {
                    self.clear_node();
                    self.pos = self.stream.position();
                    self.st = State::Finished;
                    debug!("document finished at {}", self.pos);
                    return false;
                }
                Err(e) => {
                    self.latch(e);
                    return false;
                }
            }
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &QualifiedName<S> {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &S {
        &self.value
    }

    #[inline]
    pub fn attributes(&self) -> &[Attribute<S>] {
        self.attributes.as_slice()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    #[cold]
    fn latch(&mut self, err: Error) {
        debug!("inspection failed: {}", err);
        self.clear_node();
        self.pos = err.position();
        self.depth = 0;
        self.pending_entity = None;
        self.error = Some(err);
        self.st = State::Failed;
    }

    fn clear_node(&mut self) {
        self.kind = NodeKind::None;
        self.name.clear();
        self.value.clear();
        self.attributes.clear();
    }

    #[inline]
    fn cur(&self) -> Option<char> {
        self.stream.current()
    }

    #[inline]
    fn here(&self) -> TextPosition {
        self.stream.position()
    }

    #[inline]
    fn bump(&mut self) -> Result<()> {
        self.stream.bump()
    }

    /// Skips whitespace, telling whether there was any.
    fn skip_whitespace(&mut self) -> Result<bool> {
        let mut skipped = false;
        while let Some(c) = self.cur() {
            if !is_whitespace_char(c) {
                break;
            }
            skipped = true;
            self.bump()?;
        }
        Ok(skipped)
    }

    /// Consumes the characters of `s`, which continue the token starting at `start`.
    fn expect_str(&mut self, s: &str, start: TextPosition) -> Result<()> {
        for expected in s.chars() {
            match self.cur() {
                Some(c) if c == expected => self.bump()?,
                Some(c) => fail!(InvalidSyntax, self.here(), "Expected '{}', found '{}'", expected, c),
                None => fail!(UnclosedToken, start, "Unexpected end of input"),
            }
        }
        Ok(())
    }

    /// Reads a qualified name into `name`, which must be empty.
    ///
    /// The name must start with a `NameStartChar` other than `:`, and at most
    /// one `:` may separate the prefix from a non-empty local part. Violations
    /// are reported with `code`.
    fn read_qualified_name(&mut self, name: &mut QualifiedName<S>, code: ErrorCode, start: TextPosition) -> Result<()> {
        match self.cur() {
            Some(c) if is_ncname_start_char(c) => {}
            Some(c) => return Err(Error::with_message(code, self.here(), format!("Character '{c}' cannot start a name"))),
            None => fail!(UnclosedToken, start, "Unexpected end of input"),
        }
        while let Some(c) = self.cur() {
            if c == ':' {
                if name.has_prefix() {
                    return Err(Error::with_message(code, self.here(), "A name cannot contain more than one ':'"));
                }
                name.finish_prefix();
                self.bump()?;
                match self.cur() {
                    Some(c) if is_ncname_start_char(c) => {}
                    None => fail!(UnclosedToken, start, "Unexpected end of input"),
                    Some(_) => return Err(Error::with_message(code, self.here(), "A local name must follow the prefix")),
                }
            } else if is_name_char(c) {
                name.push_char(c);
                self.bump()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Reads a qualified name into the name of the current node.
    fn read_node_name(&mut self, code: ErrorCode, start: TextPosition) -> Result<()> {
        let mut name = mem::take(&mut self.name);
        let result = self.read_qualified_name(&mut name, code, start);
        self.name = name;
        result
    }
}

impl<'a, S: StringWriter> Position for PullParser<'a, S> {
    /// Returns the position of the current node, or of the error
    #[inline]
    fn position(&self) -> TextPosition {
        self.pos
    }
}
