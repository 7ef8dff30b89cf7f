//! Contains namespace manipulation types and functions.

use crate::name::QualifiedName;
use crate::reader::pool::{Pool, Recycle};
use crate::reader::ErrorCode;
use crate::string_writer::StringWriter;

/// Designates prefix for namespace definitions.
pub const NS_XMLNS_PREFIX: &str = "xmlns";
/// Designates the standard URI for `xmlns` prefix.
pub const NS_XMLNS_URI: &str = "http://www.w3.org/2000/xmlns/";
/// Designates prefix for a namespace containing several special predefined attributes.
pub const NS_XML_PREFIX: &str = "xml";
/// Designates the standard URI for `xml` prefix.
pub const NS_XML_URI: &str = "http://www.w3.org/XML/1998/namespace";
/// Designates the absence of prefix in a qualified name.
pub const NS_NO_PREFIX: &str = "";
/// Designates an empty namespace URI, which is equivalent to absence of namespace.
pub const NS_EMPTY_URI: &str = "";

/// A prefix to URI mapping introduced by an `xmlns` or `xmlns:*` attribute.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct NamespaceBinding<S: StringWriter = String> {
    /// Declared prefix; empty for the default namespace.
    pub prefix: S,
    /// Namespace URI.
    pub uri: S,
    /// Depth of the element which declared the binding.
    pub owner_depth: usize,
}

impl<S: StringWriter> Recycle for NamespaceBinding<S> {
    fn recycle(&mut self) {
        self.prefix.clear();
        self.uri.clear();
        self.owner_depth = 0;
    }
}

/// What kind of namespace declaration an attribute is.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Declaration {
    /// An ordinary attribute.
    None,
    /// `xmlns="..."`
    Default,
    /// `xmlns:prefix="..."`
    Prefix,
}

impl Declaration {
    pub fn of<S: StringWriter>(name: &QualifiedName<S>) -> Declaration {
        if name.prefix.matches(NS_XMLNS_PREFIX) {
            Declaration::Prefix
        } else if name.prefix.matches(NS_NO_PREFIX) && name.local_name.matches(NS_XMLNS_PREFIX) {
            Declaration::Default
        } else {
            Declaration::None
        }
    }
}

/// Checks a namespace declaration against the reserved prefixes and URIs.
///
/// Returns whether a binding has to be pushed for it; `xmlns:xml` bound to its
/// fixed URI is allowed but changes nothing.
pub(crate) fn check_declaration<S: StringWriter>(
    declaration: Declaration,
    name: &QualifiedName<S>,
    uri: &S,
) -> Result<bool, (ErrorCode, &'static str)> {
    let reserved_uri = uri.matches(NS_XML_URI) || uri.matches(NS_XMLNS_URI);
    match declaration {
        Declaration::None => Ok(false),
        Declaration::Default if reserved_uri => Err((
            ErrorCode::ReservedNamespaceAsDefault,
            "A reserved namespace cannot be declared as the default namespace",
        )),
        Declaration::Default => Ok(true),
        Declaration::Prefix => {
            let prefix = &name.local_name;
            if prefix.matches(NS_XMLNS_PREFIX) {
                Err((ErrorCode::XmlnsDeclared, "The 'xmlns' prefix cannot be declared"))
            } else if prefix.matches(NS_XML_PREFIX) {
                if uri.matches(NS_XML_URI) {
                    Ok(false)
                } else {
                    Err((
                        ErrorCode::InvalidXmlPrefixDeclaration,
                        "The 'xml' prefix can only be bound to http://www.w3.org/XML/1998/namespace",
                    ))
                }
            } else if reserved_uri {
                Err((
                    ErrorCode::PrefixBoundToReservedNamespace,
                    "A prefix cannot be bound to a reserved namespace",
                ))
            } else if uri.matches(NS_EMPTY_URI) {
                Err((
                    ErrorCode::PrefixWithEmptyNamespace,
                    "A prefix cannot be bound to an empty namespace",
                ))
            } else {
                Ok(true)
            }
        }
    }
}

/// Stack of namespace bindings scoped by element depth.
///
/// Bindings are searched from the most recently pushed one backward, so an inner
/// declaration shadows an outer one. The `xml` and `xmlns` prefixes are always bound
/// to their fixed URIs and never appear on the stack.
pub(crate) struct NamespaceStack<S: StringWriter> {
    bindings: Pool<NamespaceBinding<S>>,
    xml_uri: S,
    xmlns_uri: S,
}

impl<S: StringWriter> NamespaceStack<S> {
    pub fn new() -> NamespaceStack<S> {
        NamespaceStack {
            bindings: Pool::new(),
            xml_uri: S::from_str(NS_XML_URI),
            xmlns_uri: S::from_str(NS_XMLNS_URI),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[cfg(test)]
    pub fn allocated(&self) -> usize {
        self.bindings.allocated()
    }

    /// Pushes a binding owned by the element at `owner_depth`.
    pub fn push(&mut self, prefix: &S, uri: &S, owner_depth: usize) {
        let binding = self.bindings.push_recycled();
        binding.prefix.clone_from(prefix);
        binding.uri.clone_from(uri);
        binding.owner_depth = owner_depth;
    }

    /// Performs a search for the given prefix in the whole stack.
    ///
    /// An empty prefix designates the default namespace.
    pub fn get(&self, prefix: &S) -> Option<&S> {
        if prefix.matches(NS_XML_PREFIX) {
            return Some(&self.xml_uri);
        }
        if prefix.matches(NS_XMLNS_PREFIX) {
            return Some(&self.xmlns_uri);
        }
        self.bindings.as_slice().iter().rev()
            .find(|b| b.prefix == *prefix)
            .map(|b| &b.uri)
    }

    /// Returns the URI of the `xmlns` namespace.
    #[inline]
    pub fn xmlns_uri(&self) -> &S {
        &self.xmlns_uri
    }

    /// Removes every binding owned by the element at `depth`.
    pub fn pop_depth(&mut self, depth: usize) {
        while self.bindings.last().map_or(false, |b| b.owner_depth >= depth) {
            self.bindings.pop();
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    #[inline]
    pub fn release(&mut self) {
        self.bindings.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> String {
        v.to_owned()
    }

    #[test]
    fn inner_bindings_shadow_outer_ones() {
        let mut nst: NamespaceStack<String> = NamespaceStack::new();
        nst.push(&s("a"), &s("urn:outer"), 0);
        nst.push(&s(""), &s("urn:default"), 0);
        nst.push(&s("a"), &s("urn:inner"), 1);

        assert_eq!(nst.get(&s("a")).map(String::as_str), Some("urn:inner"));
        assert_eq!(nst.get(&s("")).map(String::as_str), Some("urn:default"));
        assert_eq!(nst.get(&s("b")), None);

        nst.pop_depth(1);
        assert_eq!(nst.get(&s("a")).map(String::as_str), Some("urn:outer"));
        assert_eq!(nst.len(), 2);

        nst.pop_depth(0);
        assert_eq!(nst.len(), 0);
        assert_eq!(nst.allocated(), 3);
    }

    #[test]
    fn reserved_prefixes_are_always_bound() {
        let nst: NamespaceStack<String> = NamespaceStack::new();
        assert_eq!(nst.get(&s("xml")).map(String::as_str), Some(NS_XML_URI));
        assert_eq!(nst.get(&s("xmlns")).map(String::as_str), Some(NS_XMLNS_URI));
    }

    #[test]
    fn declaration_rules() {
        let prefixed = |p: &str| QualifiedName::<String>::qualified(p, "xmlns", "");
        let default = QualifiedName::<String>::local("xmlns");

        assert_eq!(Declaration::of(&default), Declaration::Default);
        assert_eq!(Declaration::of(&prefixed("p")), Declaration::Prefix);
        assert_eq!(Declaration::of(&QualifiedName::<String>::local("id")), Declaration::None);

        let check = |d, n: &QualifiedName<String>, uri: &str| {
            check_declaration(d, n, &s(uri)).map_err(|(code, _)| code)
        };
        assert_eq!(check(Declaration::Prefix, &prefixed("p"), "urn:p"), Ok(true));
        assert_eq!(check(Declaration::Prefix, &prefixed("xml"), NS_XML_URI), Ok(false));
        assert_eq!(check(Declaration::Prefix, &prefixed("xml"), "urn:p"), Err(ErrorCode::InvalidXmlPrefixDeclaration));
        assert_eq!(check(Declaration::Prefix, &prefixed("xmlns"), "urn:p"), Err(ErrorCode::XmlnsDeclared));
        assert_eq!(check(Declaration::Prefix, &prefixed("p"), NS_XMLNS_URI), Err(ErrorCode::PrefixBoundToReservedNamespace));
        assert_eq!(check(Declaration::Prefix, &prefixed("p"), ""), Err(ErrorCode::PrefixWithEmptyNamespace));
        assert_eq!(check(Declaration::Default, &default, NS_XML_URI), Err(ErrorCode::ReservedNamespaceAsDefault));
        assert_eq!(check(Declaration::Default, &default, ""), Ok(true));
    }
}
