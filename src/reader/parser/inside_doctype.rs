use crate::common::{is_whitespace_char, TextPosition};
use crate::reader::{ErrorCode, NodeKind};
use crate::string_writer::StringWriter;

use super::{PullParser, Result};

impl<'a, S: StringWriter> PullParser<'a, S> {
    /// Reads a document type declaration; the cursor is on the `D` of `<!DOCTYPE`.
    ///
    /// The value is the external identifier, if any. The internal subset is
    /// skipped without being interpreted.
    pub(super) fn inside_doctype(&mut self, pos: TextPosition) -> Result<NodeKind> {
        self.expect_str("DOCTYPE", pos)?;
        if self.doctype_seen {
            fail!(DoubleDocumentTypeDeclaration, pos, "Only one document type declaration is allowed");
        }
        if self.root_seen {
            fail!(InvalidDocumentTypeDeclarationLocation, pos,
                  "The document type declaration must come before the root element");
        }
        self.doctype_seen = true;

        match self.cur() {
            Some(c) if is_whitespace_char(c) => {
                self.skip_whitespace()?;
            }
            Some(c) => fail!(InvalidSyntax, self.here(), "Expected whitespace after 'DOCTYPE', found '{}'", c),
            None => fail!(UnclosedToken, pos, "Unclosed document type declaration"),
        };
        self.read_node_name(ErrorCode::InvalidTagName, pos)?;
        match self.cur() {
            Some(c) if is_whitespace_char(c) || c == '[' || c == '>' => {}
            Some(c) => fail!(InvalidSyntax, self.here(), "Unexpected character '{}' after the document type name", c),
            None => fail!(UnclosedToken, pos, "Unclosed document type declaration"),
        }

        self.buf.clear();
        let mut quote = None;
        loop {
            match (self.cur(), quote) {
                (None, _) => fail!(UnclosedToken, pos, "Unclosed document type declaration"),
                (Some(c), Some(q)) => {
                    if c == q {
                        quote = None;
                    }
                    self.buf.push(c);
                    self.bump()?;
                }
                (Some('>'), None) => {
                    self.bump()?;
                    break;
                }
                (Some('['), None) => {
                    self.bump()?;
                    self.skip_internal_subset(pos)?;
                }
                (Some(c), None) => {
                    if c == '"' || c == '\'' {
                        quote = Some(c);
                    }
                    self.buf.push(c);
                    self.bump()?;
                }
            }
        }

        self.value.push_str(self.buf.trim());
        Ok(NodeKind::DocumentType)
    }

    /// Skips the internal subset up to and including its closing `]`.
    fn skip_internal_subset(&mut self, pos: TextPosition) -> Result<()> {
        let mut depth = 1usize;
        let mut quote = None;
        let mut in_comment = false;
        // how much of "<!--" or "--" has just been seen
        let mut matched = 0usize;
        while depth > 0 {
            let c = match self.cur() {
                Some(c) => c,
                None => fail!(UnclosedToken, pos, "Unclosed internal subset"),
            };
            self.bump()?;

            if in_comment {
                matched = match c {
                    '-' => matched + 1,
                    '>' if matched >= 2 => {
                        in_comment = false;
                        0
                    }
                    _ => 0,
                };
                continue;
            }
            if let Some(q) = quote {
                if c == q {
                    quote = None;
                }
                continue;
            }

            matched = match (matched, c) {
                (_, '<') => 1,
                (1, '!') => 2,
                (2, '-') => 3,
                (3, '-') => {
                    in_comment = true;
                    0
                }
                _ => 0,
            };
            match c {
                '"' | '\'' => quote = Some(c),
                '[' => depth += 1,
                ']' => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{Position, TextPosition};
    use crate::reader::{ErrorCode, Inspector, NodeKind};

    #[test]
    fn external_id_is_kept_and_subset_skipped() {
        let mut inspector = Inspector::from_str(concat!(
            "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0//EN\" 'a]b' [\n",
            "  <!ENTITY gt2 \"]>\">\n",
            "  <!-- ]> -->\n",
            "  <!ELEMENT html (#PCDATA)>\n",
            "] >\n<html/>"
        ));
        assert!(inspector.inspect());
        assert_eq!(inspector.node_kind(), NodeKind::DocumentType);
        assert_eq!(inspector.name(), "html");
        assert_eq!(inspector.value(), "PUBLIC \"-//W3C//DTD XHTML 1.0//EN\" 'a]b'");
        assert!(inspector.inspect());
        assert_eq!(inspector.node_kind(), NodeKind::Whitespace);
        assert!(inspector.inspect());
        assert_eq!(inspector.node_kind(), NodeKind::EmptyElementTag);
    }

    #[test]
    fn bare_doctype() {
        let mut inspector = Inspector::from_str("<!DOCTYPE root><root/>");
        assert!(inspector.inspect());
        assert_eq!(inspector.name(), "root");
        assert_eq!(inspector.value(), "");
    }

    #[test]
    fn doctype_placement() {
        let mut inspector = Inspector::from_str("<!DOCTYPE a><!DOCTYPE a><a/>");
        assert!(inspector.inspect());
        assert!(!inspector.inspect());
        assert_eq!(inspector.error_code(), Some(ErrorCode::DoubleDocumentTypeDeclaration));
        assert_eq!(inspector.position(), TextPosition::at(1, 13));

        let mut inspector = Inspector::from_str("<a><!DOCTYPE a></a>");
        assert!(inspector.inspect());
        assert!(!inspector.inspect());
        assert_eq!(inspector.error_code(), Some(ErrorCode::InvalidDocumentTypeDeclarationLocation));
        assert_eq!(inspector.position(), TextPosition::at(1, 4));
    }

    #[test]
    fn malformed_doctype() {
        let mut inspector = Inspector::from_str("<!DOCTYPEa><a/>");
        assert!(!inspector.inspect());
        assert_eq!(inspector.error_code(), Some(ErrorCode::InvalidSyntax));
        assert_eq!(inspector.position(), TextPosition::at(1, 10));

        let mut inspector = Inspector::from_str("<!DOCTYPE a [ <!ELEMENT a ANY>");
        assert!(!inspector.inspect());
        assert_eq!(inspector.error_code(), Some(ErrorCode::UnclosedToken));
        assert_eq!(inspector.position(), TextPosition::at(1, 1));
    }
}
