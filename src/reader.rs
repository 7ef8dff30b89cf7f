//! Contains high-level interface for a pull-based XML parser.
//!
//! The most important type in this module is [`Inspector`], which moves through a
//! document one node at a time and exposes the current node through accessors.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::attribute::Attribute;
use crate::common::{Position, TextPosition};
use crate::encoding::{CharReader, DecodeResult};
use crate::name::QualifiedName;
use crate::string_writer::StringWriter;

pub use self::config::ParserConfig;
pub use self::error::{Error, ErrorCode};

use self::decoding_reader::{DecodingReader, Source};
use self::parser::PullParser;

mod char_stream;
mod config;
mod decoding_reader;
mod error;
mod indexset;
mod parser;
pub(crate) mod pool;

/// Kind of the node an inspector currently sits on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum NodeKind {
    /// No node: nothing was inspected yet, the document ended, or an error occurred.
    #[default]
    None,
    /// `<name ...>`
    StartTag,
    /// `</name>`
    EndTag,
    /// `<name .../>`
    EmptyElementTag,
    /// Character data, with references resolved.
    Text,
    /// Character data made only of literal whitespace.
    Whitespace,
    /// `<![CDATA[...]]>`
    CData,
    /// `<!--...-->`
    Comment,
    /// `<?target data?>`
    ProcessingInstruction,
    /// `<?xml ...?>`
    XmlDeclaration,
    /// `<!DOCTYPE ...>`
    DocumentType,
    /// A reference to an entity other than the predefined ones.
    EntityReference,
}

/// A pull-based XML parser over a bound source.
///
/// Every call to [`inspect`](Inspector::inspect) moves to the next node. The
/// strings of the current node are stored in `S`, which decides their in-memory
/// encoding; they stay valid until the next call.
///
/// An inspector keeps its attribute, element and namespace records between
/// documents, so binding a new source with one of the `reset_*` methods reuses
/// the storage of the previous document. An inspector is meant to be owned by a
/// single caller: every operation takes `&mut self`, and the boxed sources it
/// holds make it neither `Send` nor `Sync`.
pub struct Inspector<'a, S: StringWriter = String> {
    parser: PullParser<'a, S>,
}

impl<'a> Inspector<'a> {
    /// Creates an unbound inspector with the default configuration.
    ///
    /// Inspecting before a source is bound fails with [`ErrorCode::StreamError`].
    #[inline]
    #[must_use]
    pub fn new() -> Inspector<'a> {
        Inspector::configured(ParserConfig::new())
    }

    /// Creates an unbound inspector with the given configuration.
    #[inline]
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Inspector<'a> {
        Inspector::configured(config)
    }

    /// Creates an inspector over a string.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn from_str(text: &'a str) -> Inspector<'a> {
        let mut inspector = Inspector::new();
        inspector.reset_str(text);
        inspector
    }

    /// Creates an inspector over encoded bytes.
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8]) -> Inspector<'a> {
        let mut inspector = Inspector::new();
        inspector.reset_bytes(bytes);
        inspector
    }

    /// Creates an inspector over a byte stream.
    pub fn from_reader<R: Read + 'a>(reader: R) -> Inspector<'a> {
        let mut inspector = Inspector::new();
        inspector.reset_reader(reader);
        inspector
    }
}

impl Inspector<'static> {
    /// Creates an inspector over a file.
    ///
    /// A file which cannot be opened latches a [`ErrorCode::StreamError`].
    pub fn open<P: AsRef<Path>>(path: P) -> Inspector<'static> {
        let mut inspector = Inspector::new();
        inspector.reset_path(path);
        inspector
    }
}

impl<'a> Default for Inspector<'a> {
    #[inline]
    fn default() -> Inspector<'a> {
        Inspector::new()
    }
}

impl<'a, S: StringWriter> Inspector<'a, S> {
    /// Creates an unbound inspector writing its strings as `S`.
    #[must_use]
    pub fn configured(config: ParserConfig) -> Inspector<'a, S> {
        Inspector { parser: PullParser::new(config) }
    }

    /// Returns the configuration of this inspector.
    #[inline]
    pub fn config(&self) -> &ParserConfig {
        self.parser.config()
    }

    /// Moves to the next node.
    ///
    /// Returns `false` once the document is exhausted or an error occurred; use
    /// [`error`](Inspector::error) to tell the two apart. After that every call
    /// returns `false` until a new source is bound.
    #[inline]
    pub fn inspect(&mut self) -> bool {
        self.parser.inspect()
    }

    /// Skips everything up to and including the end tag matching the current start tag.
    ///
    /// Returns `false` if the current node is not a start tag, or if the
    /// document ends or fails before the matching end tag.
    pub fn skip_subtree(&mut self) -> bool {
        if self.node_kind() != NodeKind::StartTag {
            return false;
        }
        let depth = self.depth();
        while self.inspect() {
            if self.node_kind() == NodeKind::EndTag && self.depth() == depth {
                return true;
            }
        }
        false
    }

    #[inline]
    pub fn node_kind(&self) -> NodeKind {
        self.parser.kind()
    }

    /// Returns the name of the current node with all its parts.
    #[inline]
    pub fn qualified_name(&self) -> &QualifiedName<S> {
        self.parser.name()
    }

    /// Returns the full name of the current node as written, prefix included.
    ///
    /// Tags have their element name, processing instructions their target,
    /// the document type declaration its root element name and entity
    /// references the entity name. Other nodes have an empty name.
    #[inline]
    pub fn name(&self) -> &S {
        &self.parser.name().name
    }

    #[inline]
    pub fn local_name(&self) -> &S {
        &self.parser.name().local_name
    }

    #[inline]
    pub fn prefix(&self) -> &S {
        &self.parser.name().prefix
    }

    /// Returns the namespace URI the prefix of the current tag resolves to.
    #[inline]
    pub fn namespace_uri(&self) -> &S {
        &self.parser.name().namespace_uri
    }

    /// Returns the value of the current node.
    ///
    /// This is the content of text, CDATA sections and comments, the data of
    /// processing instructions and the external identifier part of the
    /// document type declaration. Tags have an empty value.
    #[inline]
    pub fn value(&self) -> &S {
        self.parser.value()
    }

    #[inline]
    pub fn attributes_count(&self) -> usize {
        self.parser.attributes().len()
    }

    /// Returns the attribute at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`attributes_count`](Inspector::attributes_count).
    pub fn attribute_at(&self, index: usize) -> &Attribute<S> {
        let attributes = self.parser.attributes();
        assert!(
            index < attributes.len(),
            "attribute index {} is out of range for {} attributes",
            index,
            attributes.len()
        );
        &attributes[index]
    }

    /// Returns the attribute at `index`, if there is one.
    #[inline]
    pub fn get_attribute(&self, index: usize) -> Option<&Attribute<S>> {
        self.parser.attributes().get(index)
    }

    /// Returns all attributes of the current node, in document order.
    #[inline]
    pub fn attributes(&self) -> &[Attribute<S>] {
        self.parser.attributes()
    }

    /// Row of the first character of the current node, or of the error.
    #[inline]
    pub fn row(&self) -> u64 {
        self.parser.position().row
    }

    /// Column of the first character of the current node, or of the error.
    #[inline]
    pub fn column(&self) -> u64 {
        self.parser.position().column
    }

    /// Number of elements enclosing the current node.
    ///
    /// A start tag does not enclose itself; an end tag no longer does.
    #[inline]
    pub fn depth(&self) -> usize {
        self.parser.depth()
    }

    #[inline]
    pub fn has_error(&self) -> bool {
        self.parser.error().is_some()
    }

    #[inline]
    pub fn error(&self) -> Option<&Error> {
        self.parser.error()
    }

    #[inline]
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.parser.error().map(Error::code)
    }

    /// Returns the message of the latched error, or an empty string.
    #[inline]
    pub fn error_message(&self) -> &str {
        self.parser.error().map_or("", Error::message)
    }

    /// Unbinds the source and forgets the document, keeping pooled records.
    pub fn reset(&mut self) {
        self.parser.bind(Source::Unbound);
    }

    /// Unbinds the source and releases all pooled records.
    pub fn clear(&mut self) {
        self.reset();
        self.parser.release();
    }

    /// Starts over with a string.
    ///
    /// The string is already decoded, so an encoding named by its XML
    /// declaration is only checked for being known.
    pub fn reset_str(&mut self, text: &'a str) {
        debug!("binding string source of {} bytes", text.len());
        let mut chars = text.chars();
        self.parser.bind(Source::Chars(Box::new(move || -> DecodeResult { Ok(chars.next()) })));
    }

    /// Starts over with encoded bytes.
    pub fn reset_bytes(&mut self, bytes: &'a [u8]) {
        debug!("binding byte source of {} bytes", bytes.len());
        self.bind_bytes(bytes);
    }

    /// Starts over with a byte stream.
    pub fn reset_reader<R: Read + 'a>(&mut self, reader: R) {
        debug!("binding stream source");
        self.bind_bytes(reader);
    }

    /// Starts over with the content of a file.
    ///
    /// A file which cannot be opened latches a [`ErrorCode::StreamError`].
    pub fn reset_path<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => {
                debug!("binding file source {}", path.display());
                self.bind_bytes(file);
            }
            Err(e) => {
                self.reset();
                self.parser.fail_with(Error::with_message(
                    ErrorCode::StreamError,
                    TextPosition::at(1, 1),
                    format!("Cannot open {}: {e}", path.display()),
                ));
            }
        }
    }

    /// Starts over with a caller-supplied source of decoded code points.
    ///
    /// No byte order mark is looked for, and an encoding named by the XML
    /// declaration is only checked for being known.
    pub fn reset_char_reader<R: CharReader + 'a>(&mut self, reader: R) {
        debug!("binding character source");
        self.parser.bind(Source::Chars(Box::new(reader)));
    }

    fn bind_bytes<R: Read + 'a>(&mut self, reader: R) {
        let buffer_size = self.parser.config().buffer_size;
        self.parser.bind(Source::Bytes(DecodingReader::new(reader, buffer_size)));
    }
}

impl<'a, S: StringWriter> Position for Inspector<'a, S> {
    /// Returns the position of the current node, or of the error.
    #[inline]
    fn position(&self) -> TextPosition {
        self.parser.position()
    }
}
