//! Contains XML qualified names manipulation types and functions.

use std::fmt;

use crate::string_writer::StringWriter;

/// An XML qualified name as it was read from the document.
///
/// `name` holds the full name exactly as written (`prefix:local` or `local`),
/// while `prefix` and `local_name` hold its two parts; `prefix` is empty when the
/// name has no prefix. `namespace_uri` is filled in once the owning element has
/// been read completely and the namespace stack has been searched.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct QualifiedName<S: StringWriter = String> {
    /// Full name, including the prefix and the separator.
    pub name: S,
    /// Local (unprefixed) part of the name.
    pub local_name: S,
    /// Namespace prefix, empty when absent.
    pub prefix: S,
    /// Resolved namespace URI, empty when the name belongs to no namespace.
    pub namespace_uri: S,
}

impl<S: StringWriter> QualifiedName<S> {
    /// Returns a name consisting of a local part only.
    #[must_use]
    pub fn local(local_name: &str) -> QualifiedName<S> {
        QualifiedName {
            name: S::from_str(local_name),
            local_name: S::from_str(local_name),
            prefix: S::default(),
            namespace_uri: S::default(),
        }
    }

    /// Returns a prefixed name bound to the given namespace URI.
    #[must_use]
    pub fn qualified(local_name: &str, prefix: &str, namespace_uri: &str) -> QualifiedName<S> {
        let mut name = S::from_str(prefix);
        if !prefix.is_empty() {
            name.push_char(':');
        }
        name.push_str(local_name);
        QualifiedName {
            name,
            local_name: S::from_str(local_name),
            prefix: S::from_str(prefix),
            namespace_uri: S::from_str(namespace_uri),
        }
    }

    /// Checks whether this name has a non-empty prefix.
    #[inline]
    pub fn has_prefix(&self) -> bool {
        !self.prefix.is_empty()
    }

    /// Empties all parts of the name, keeping their storage.
    pub fn clear(&mut self) {
        self.name.clear();
        self.local_name.clear();
        self.prefix.clear();
        self.namespace_uri.clear();
    }

    /// Copies all parts of `other` into this name, reusing storage.
    pub fn assign(&mut self, other: &QualifiedName<S>) {
        self.name.clone_from(&other.name);
        self.local_name.clone_from(&other.local_name);
        self.prefix.clone_from(&other.prefix);
        self.namespace_uri.clone_from(&other.namespace_uri);
    }

    /// Appends a name character, keeping `name` and `local_name` in sync.
    #[inline]
    pub(crate) fn push_char(&mut self, c: char) {
        self.name.push_char(c);
        self.local_name.push_char(c);
    }

    /// Turns everything read so far into the prefix and starts the local part.
    pub(crate) fn finish_prefix(&mut self) {
        std::mem::swap(&mut self.prefix, &mut self.local_name);
        self.local_name.clear();
        self.name.push_char(':');
    }
}

impl<S: StringWriter + fmt::Display> fmt::Display for QualifiedName<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace_uri.is_empty() {
            write!(f, "{{{}}}", self.namespace_uri)?;
        }
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::QualifiedName;

    #[test]
    fn build_by_characters() {
        let mut name: QualifiedName = QualifiedName::default();
        "ns".chars().for_each(|c| name.push_char(c));
        name.finish_prefix();
        "item".chars().for_each(|c| name.push_char(c));

        assert_eq!(name.name, "ns:item");
        assert_eq!(name.prefix, "ns");
        assert_eq!(name.local_name, "item");
        assert!(name.has_prefix());
    }

    #[test]
    fn display_includes_namespace() {
        let name: QualifiedName = QualifiedName::qualified("item", "ns", "urn:x");
        assert_eq!(name.to_string(), "{urn:x}ns:item");
        let name: QualifiedName = QualifiedName::local("item");
        assert_eq!(name.to_string(), "item");
    }
}
