use quickcheck::{quickcheck, TestResult};

use xml_inspector::common::{is_xml_char, Position, TextPosition};
use xml_inspector::{ErrorCode, Inspector, NodeKind};

fn utf16(text: &str, big_endian: bool) -> Vec<u8> {
    let mut bytes = if big_endian { vec![0xFE, 0xFF] } else { vec![0xFF, 0xFE] };
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&if big_endian { unit.to_be_bytes() } else { unit.to_le_bytes() });
    }
    bytes
}

fn utf32(text: &str, big_endian: bool) -> Vec<u8> {
    let mut bytes = if big_endian { vec![0x00, 0x00, 0xFE, 0xFF] } else { vec![0xFF, 0xFE, 0x00, 0x00] };
    for c in text.chars() {
        let c = c as u32;
        bytes.extend_from_slice(&if big_endian { c.to_be_bytes() } else { c.to_le_bytes() });
    }
    bytes
}

fn nodes_of(bytes: &[u8]) -> Nodes {
    let mut inspector = Inspector::from_bytes(bytes);
    let mut nodes = Vec::new();
    while inspector.inspect() {
        nodes.push((inspector.node_kind(), inspector.name().clone(), inspector.value().clone()));
    }
    match inspector.error() {
        Some(e) => Err((e.code(), e.position())),
        None => Ok(nodes),
    }
}

fn error_of(bytes: &[u8]) -> (ErrorCode, TextPosition) {
    match nodes_of(bytes) {
        Ok(nodes) => panic!("document should be rejected, got {nodes:?}"),
        Err(e) => e,
    }
}

#[test]
fn utf8_with_and_without_bom() {
    let plain = nodes_of("<a>\u{E9}\u{1F600}</a>".as_bytes()).unwrap();
    let marked = nodes_of(b"\xEF\xBB\xBF<a>\xC3\xA9\xF0\x9F\x98\x80</a>").unwrap();
    assert_eq!(plain, marked);
    assert_eq!(plain[1].2, "\u{E9}\u{1F600}");
}

#[test]
fn wide_encodings_need_a_declaration() {
    assert_eq!(error_of(&utf16("<a/>", false)), (ErrorCode::EncodingDeclarationRequired, TextPosition::at(1, 1)));
    assert_eq!(
        error_of(&utf32("<?xml version='1.0'?><a/>", true)),
        (ErrorCode::EncodingDeclarationRequired, TextPosition::at(1, 1))
    );

    let doc = "<?xml version='1.0' encoding='UTF-16'?><a>\u{E9}</a>";
    let nodes = nodes_of(&utf16(doc, false)).unwrap();
    assert_eq!(nodes[2], (NodeKind::Text, String::new(), "\u{E9}".to_owned()));
    assert_eq!(nodes_of(&utf16(doc, true)).unwrap(), nodes);
}

#[test]
fn declared_encoding_must_agree_with_bom() {
    assert_eq!(
        error_of(&utf16("<?xml version='1.0' encoding='utf-8'?><a/>", false)),
        (ErrorCode::EncodingConfusion, TextPosition::at(1, 21))
    );
    assert_eq!(
        error_of(&utf16("<?xml version='1.0' encoding='UTF-16BE'?><a/>", false)),
        (ErrorCode::EncodingConfusion, TextPosition::at(1, 21))
    );
    assert_eq!(
        error_of(b"\xEF\xBB\xBF<?xml version='1.0' encoding='latin1'?><a/>"),
        (ErrorCode::EncodingConfusion, TextPosition::at(1, 21))
    );
    assert!(nodes_of(&utf32("<?xml version='1.0' encoding='UTF-32LE'?><a/>", false)).is_ok());
    assert!(nodes_of(&utf16("<?xml version='1.0' encoding='utf-16'?><a/>", true)).is_ok());
}

#[test]
fn unknown_encoding() {
    assert_eq!(
        error_of(b"<?xml version='1.0' encoding='x-unknown'?><a/>"),
        (ErrorCode::UnknownEncoding, TextPosition::at(1, 21))
    );
}

#[test]
fn legacy_charsets_replace_the_decoder() {
    let nodes = nodes_of(b"<?xml version='1.0' encoding='ISO-8859-1'?><a v='\xFF'>\xE9</a>").unwrap();
    assert_eq!(nodes[2].2, "\u{E9}");

    let mut inspector = Inspector::from_bytes(b"<?xml version='1.0' encoding='windows-1252'?><a v='\x80'>\x93</a>");
    assert!(inspector.inspect());
    assert!(inspector.inspect());
    assert_eq!(inspector.attribute_at(0).value, "\u{20AC}");
    assert!(inspector.inspect());
    assert_eq!(inspector.value(), "\u{201C}");

    let nodes = nodes_of(b"<?xml version='1.0' encoding='KOI8-R'?><a/>");
    assert_eq!(nodes.unwrap_err().0, ErrorCode::UnknownEncoding);
}

#[test]
fn invalid_bytes() {
    assert_eq!(error_of(b"<a>\xFF</a>"), (ErrorCode::InvalidByteSequence, TextPosition::at(1, 4)));
    assert_eq!(error_of(b"<a>\xC3</a>"), (ErrorCode::InvalidByteSequence, TextPosition::at(1, 4)));
    assert_eq!(
        error_of(b"<?xml version='1.0' encoding='us-ascii'?><a>\x80</a>"),
        (ErrorCode::InvalidByteSequence, TextPosition::at(1, 45))
    );
}

#[test]
fn string_sources_only_check_the_declared_name() {
    let mut inspector = Inspector::from_str("<?xml version='1.0' encoding='UTF-16'?><a>\u{E9}</a>");
    while inspector.inspect() {}
    assert!(!inspector.has_error());

    let mut inspector = Inspector::from_str("<?xml version='1.0' encoding='nonsense'?><a/>");
    assert!(!inspector.inspect());
    assert_eq!(inspector.error_code(), Some(ErrorCode::UnknownEncoding));
    assert_eq!(inspector.position(), TextPosition::at(1, 21));
}

#[test]
fn small_buffers_do_not_split_characters() {
    let doc = "<a>\u{E9}\u{1F600}\u{E9}</a>";
    let config = xml_inspector::ParserConfig::new().buffer_size(1);
    let mut inspector = Inspector::with_config(config);
    inspector.reset_bytes(doc.as_bytes());
    assert!(inspector.inspect());
    assert!(inspector.inspect());
    assert_eq!(inspector.value(), "\u{E9}\u{1F600}\u{E9}");
}

/// Keeps characters which may appear in character data, escaping markup.
fn text_content(raw: &str) -> (String, String) {
    let mut source = String::new();
    let mut expected = String::new();
    let mut chars = raw.chars().filter(|&c| is_xml_char(c as u32)).peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' => source.push_str("&lt;"),
            '&' => source.push_str("&amp;"),
            '>' => source.push_str("&gt;"),
            '\r' => {
                source.push('\r');
                if chars.peek() == Some(&'\n') {
                    chars.next();
                    source.push('\n');
                }
                expected.push('\n');
                continue;
            }
            _ => source.push(c),
        }
        expected.push(c);
    }
    (source, expected)
}

fn text_of(nodes: &[(NodeKind, String, String)]) -> String {
    nodes
        .iter()
        .filter(|(kind, _, _)| matches!(kind, NodeKind::Text | NodeKind::Whitespace))
        .map(|(_, _, value)| value.as_str())
        .collect()
}

type Nodes = Result<Vec<(NodeKind, String, String)>, (ErrorCode, TextPosition)>;

fn after_declaration(bytes: &[u8]) -> Nodes {
    nodes_of(bytes).map(|mut nodes| {
        assert_eq!(nodes.remove(0).0, NodeKind::XmlDeclaration);
        nodes
    })
}

quickcheck! {
    fn text_round_trips(raw: String) -> TestResult {
        let (source, expected) = text_content(&raw);
        let doc = format!("<r>{source}</r>");
        match nodes_of(doc.as_bytes()) {
            Ok(nodes) => TestResult::from_bool(text_of(&nodes) == expected),
            Err(e) => TestResult::error(format!("{doc:?} rejected with {e:?}")),
        }
    }

    fn wide_encodings_agree_with_utf8(raw: String) -> TestResult {
        let (source, _) = text_content(&raw);
        let doc = format!("<r a='{}'>{source}</r>", source.replace('\'', "&apos;"));
        let expected = nodes_of(doc.as_bytes());
        if expected.is_err() {
            return TestResult::error(format!("{doc:?} rejected with {expected:?}"));
        }
        let utf16_doc = format!("<?xml version='1.0' encoding='UTF-16'?>{doc}");
        let utf32_doc = format!("<?xml version='1.0' encoding='UTF-32'?>{doc}");
        TestResult::from_bool(
            after_declaration(&utf16(&utf16_doc, false)) == expected
                && after_declaration(&utf16(&utf16_doc, true)) == expected
                && after_declaration(&utf32(&utf32_doc, false)) == expected
                && after_declaration(&utf32(&utf32_doc, true)) == expected
        )
    }
}
