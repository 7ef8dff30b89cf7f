#![forbid(non_camel_case_types)]
#![forbid(unsafe_code)]

//! A non-validating, namespace-aware pull XML parser.
//!
//! The caller repeatedly asks an [`Inspector`] for the next node and reads the
//! node's kind, names, value and attributes through accessors. No document tree
//! is ever built; nesting is tracked with an explicit stack, so document depth
//! does not grow the call stack.
//!
//! ```
//! use xml_inspector::{Inspector, NodeKind};
//!
//! let mut inspector = Inspector::from_str(r#"<a x="1"><b/></a>"#);
//! let mut kinds = Vec::new();
//! while inspector.inspect() {
//!     kinds.push((inspector.node_kind(), inspector.depth()));
//! }
//! assert!(inspector.error().is_none());
//! assert_eq!(kinds, vec![
//!     (NodeKind::StartTag, 0),
//!     (NodeKind::EmptyElementTag, 1),
//!     (NodeKind::EndTag, 0),
//! ]);
//! ```

pub use crate::reader::{Error, ErrorCode, Inspector, NodeKind, ParserConfig};

#[macro_use]
mod macros;

pub mod attribute;
pub mod common;
pub mod encoding;
pub mod name;
pub mod namespace;
pub mod reader;
pub mod string_writer;
