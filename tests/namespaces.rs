use xml_inspector::common::{Position, TextPosition};
use xml_inspector::namespace::{NS_XMLNS_URI, NS_XML_URI};
use xml_inspector::{ErrorCode, Inspector, NodeKind};

fn error_of(doc: &str) -> (ErrorCode, TextPosition) {
    let mut inspector = Inspector::from_str(doc);
    while inspector.inspect() {}
    let err = inspector.error().unwrap_or_else(|| panic!("document should be rejected: {doc:?}"));
    (err.code(), err.position())
}

macro_rules! expect_error(
    ($doc:expr, $code:ident, $row:expr, $col:expr) => (
        assert_eq!(error_of($doc), (ErrorCode::$code, TextPosition::at($row, $col)), "document {:?}", $doc)
    )
);

macro_rules! expect_tag(
    ($inspector:expr, $kind:ident, $name:expr, $uri:expr) => ({
        assert!($inspector.inspect(), "unexpected error: {:?}", $inspector.error());
        assert_eq!($inspector.node_kind(), NodeKind::$kind);
        assert_eq!($inspector.name(), $name);
        assert_eq!($inspector.namespace_uri(), $uri);
    })
);

#[test]
fn prefixes_resolve_to_innermost_binding() {
    let mut inspector = Inspector::from_str(concat!(
        r#"<r xmlns="urn:default" xmlns:p="urn:outer">"#,
        r#"<p:a xmlns:p="urn:inner"><p:b/></p:a>"#,
        r#"<p:c/><d xmlns=""/><e/>"#,
        r#"</r>"#
    ));
    expect_tag!(inspector, StartTag, "r", "urn:default");
    expect_tag!(inspector, StartTag, "p:a", "urn:inner");
    assert_eq!(inspector.prefix(), "p");
    assert_eq!(inspector.local_name(), "a");
    expect_tag!(inspector, EmptyElementTag, "p:b", "urn:inner");
    expect_tag!(inspector, EndTag, "p:a", "urn:inner");
    expect_tag!(inspector, EmptyElementTag, "p:c", "urn:outer");
    expect_tag!(inspector, EmptyElementTag, "d", "");
    expect_tag!(inspector, EmptyElementTag, "e", "urn:default");
    expect_tag!(inspector, EndTag, "r", "urn:default");
    assert!(!inspector.inspect());
    assert!(!inspector.has_error());
}

#[test]
fn attribute_namespaces() {
    let mut inspector = Inspector::from_str(r#"<a xmlns="urn:d" xmlns:x="u" x:y="1" y="2" xml:lang="en"/>"#);
    assert!(inspector.inspect());
    let resolved: Vec<_> = inspector
        .attributes()
        .iter()
        .map(|a| (a.name.name.as_str(), a.name.namespace_uri.as_str()))
        .collect();
    assert_eq!(resolved, [
        ("xmlns", NS_XMLNS_URI),
        ("xmlns:x", NS_XMLNS_URI),
        ("x:y", "u"),
        ("y", ""),
        ("xml:lang", NS_XML_URI),
    ]);
}

#[test]
fn bindings_of_empty_elements_do_not_leak() {
    let mut inspector = Inspector::from_str(r#"<r><a xmlns:x="u"/><x:b/></r>"#);
    assert!(inspector.inspect());
    assert!(inspector.inspect());
    assert!(!inspector.inspect());
    assert_eq!(inspector.error_code(), Some(ErrorCode::PrefixWithoutAssignedNamespace));
    assert_eq!(inspector.position(), TextPosition::at(1, 21));
}

#[test]
fn unprefixed_attributes_need_no_namespace() {
    let mut inspector = Inspector::from_str(r#"<a y="1"/>"#);
    assert!(inspector.inspect());
    assert!(!inspector.has_error());
    expect_error!(r#"<a x:y="1"/>"#, PrefixWithoutAssignedNamespace, 1, 4);
}

#[test]
fn declaration_errors() {
    expect_error!(r#"<a xmlns:xmlns="urn:x"/>"#, XmlnsDeclared, 1, 4);
    expect_error!(r#"<a xmlns:xml="urn:x"/>"#, InvalidXmlPrefixDeclaration, 1, 4);
    expect_error!(r#"<a xmlns:p="http://www.w3.org/XML/1998/namespace"/>"#, PrefixBoundToReservedNamespace, 1, 4);
    expect_error!(r#"<a xmlns:p="http://www.w3.org/2000/xmlns/"/>"#, PrefixBoundToReservedNamespace, 1, 4);
    expect_error!(r#"<a xmlns="http://www.w3.org/2000/xmlns/"/>"#, ReservedNamespaceAsDefault, 1, 4);
    expect_error!(r#"<a xmlns:p=""/>"#, PrefixWithEmptyNamespace, 1, 4);
    expect_error!(r#"<p:a/>"#, PrefixWithoutAssignedNamespace, 1, 2);
    expect_error!(r#"<xmlns:a/>"#, InvalidTagName, 1, 2);
}

#[test]
fn xml_prefix_may_be_redeclared_to_its_own_namespace() {
    let mut inspector = Inspector::from_str(r#"<a xmlns:xml="http://www.w3.org/XML/1998/namespace" xml:space="preserve"/>"#);
    assert!(inspector.inspect());
    assert!(!inspector.has_error());
    assert_eq!(inspector.attribute_at(1).name.namespace_uri, NS_XML_URI);
}

#[test]
fn duplicates_after_resolution() {
    expect_error!(r#"<a xmlns:p="u" xmlns:q="u" p:x="1" q:x="2"/>"#, DoubleAttributeName, 1, 36);

    let mut inspector = Inspector::from_str(r#"<a xmlns:p="u" xmlns:q="v" p:x="1" q:x="2" x="3"/>"#);
    assert!(inspector.inspect());
    assert!(!inspector.has_error());
}
