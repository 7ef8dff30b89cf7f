use std::borrow::Cow;

use thiserror::Error;

use crate::common::{Position, TextPosition};
use crate::encoding::DecodeError;

/// The closed set of failures an inspector can report.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Error)]
pub enum ErrorCode {
    /// The underlying source failed to deliver data, or no source is bound.
    #[error("stream error")]
    StreamError,
    /// Bytes cannot be decoded under the active charset.
    #[error("invalid byte sequence")]
    InvalidByteSequence,

    /// The declared encoding name is not known.
    #[error("unknown encoding")]
    UnknownEncoding,
    /// The declared encoding contradicts the byte order mark.
    #[error("encoding confusion")]
    EncodingConfusion,
    /// A UTF-16 or UTF-32 byte order mark is not followed by a declaration naming the encoding.
    #[error("encoding declaration required")]
    EncodingDeclarationRequired,

    #[error("invalid syntax")]
    InvalidSyntax,
    #[error("invalid tag name")]
    InvalidTagName,
    #[error("invalid attribute name")]
    InvalidAttributeName,
    /// The input ended inside a token.
    #[error("unclosed token")]
    UnclosedToken,
    #[error("invalid reference syntax")]
    InvalidReferenceSyntax,
    /// A character reference denotes a code point outside the `Char` production.
    #[error("invalid character reference")]
    InvalidCharacterReference,

    #[error("invalid XML declaration location")]
    InvalidXmlDeclarationLocation,
    #[error("CDATA section outside of the root element")]
    CDataSectionOutside,
    /// A second top-level element.
    #[error("element outside of the root element")]
    ElementOutside,
    #[error("invalid document type declaration location")]
    InvalidDocumentTypeDeclarationLocation,
    #[error("duplicate document type declaration")]
    DoubleDocumentTypeDeclaration,
    #[error("unexpected end tag")]
    UnexpectedEndTag,
    #[error("unclosed tag")]
    UnclosedTag,
    /// The document has no root element.
    #[error("no element")]
    NoElement,
    #[error("duplicate attribute name")]
    DoubleAttributeName,

    #[error("prefix without an assigned namespace")]
    PrefixWithoutAssignedNamespace,
    #[error("prefix bound to an empty namespace")]
    PrefixWithEmptyNamespace,
    /// The `xmlns` prefix itself was declared.
    #[error("xmlns prefix declared")]
    XmlnsDeclared,
    #[error("prefix bound to a reserved namespace")]
    PrefixBoundToReservedNamespace,
    #[error("reserved namespace declared as the default namespace")]
    ReservedNamespaceAsDefault,
    #[error("invalid declaration of the xml prefix")]
    InvalidXmlPrefixDeclaration,
}

/// A latched parse failure: what went wrong, a description, and where.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
#[error("{position} {message}")]
pub struct Error {
    code: ErrorCode,
    message: Cow<'static, str>,
    position: TextPosition,
}

impl Error {
    /// Creates an error whose message is the generic description of `code`.
    pub fn new(code: ErrorCode, position: TextPosition) -> Error {
        Error { code, message: Cow::Owned(code.to_string()), position }
    }

    pub fn with_message(code: ErrorCode, position: TextPosition, message: impl Into<Cow<'static, str>>) -> Error {
        Error { code, message: message.into(), position }
    }

    pub(crate) fn decoding(err: DecodeError, position: TextPosition) -> Error {
        match err {
            DecodeError::InvalidByteSequence => Error::with_message(
                ErrorCode::InvalidByteSequence,
                position,
                "Invalid byte sequence for the active encoding",
            ),
            DecodeError::Io(e) => Error::with_message(ErrorCode::StreamError, position, format!("Stream error: {e}")),
        }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the human-readable description of the failure.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Position for Error {
    #[inline]
    fn position(&self) -> TextPosition {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::{Error, ErrorCode};
    use crate::common::{Position, TextPosition};
    use crate::encoding::DecodeError;

    #[test]
    fn display_includes_position() {
        let err = Error::with_message(ErrorCode::UnclosedTag, TextPosition::at(3, 7), "Element 'a' is not closed");
        assert_eq!(err.to_string(), "3:7 Element 'a' is not closed");
        assert_eq!(Error::new(ErrorCode::NoElement, TextPosition::at(1, 1)).message(), "no element");
    }

    #[test]
    fn decode_errors_map_to_codes() {
        let pos = TextPosition::at(2, 4);
        let err = Error::decoding(DecodeError::InvalidByteSequence, pos);
        assert_eq!(err.code(), ErrorCode::InvalidByteSequence);
        assert_eq!(err.position(), pos);

        let io = io::Error::new(io::ErrorKind::UnexpectedEof, "gone");
        assert_eq!(Error::decoding(DecodeError::Io(io), pos).code(), ErrorCode::StreamError);
    }
}
