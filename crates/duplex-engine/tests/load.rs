//! End-to-end load tests
//!
//! Exercises the full pipeline: config validation, mode sniffing, both
//! backends, and serialization. The fixture is an XHTML-shaped document
//! whose `<CUSTOMTAG />` makes the resolved mode observable: XML honors the
//! self-closing syntax (no children), HTML ignores it (the following
//! paragraph nests inside).

use duplex_engine::{
    ConfigError, Document, LoadConfig, LoadError, NodeData, ParsingMode, load_document_blocking,
    serialize_document,
};

const XML_FIXTURE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
<body>
<CUSTOMTAG />
<p>Hello</p>
</body>
</html>
"#;

/// Was the fixture parsed with XML semantics?
fn is_parsed_as_xml(doc: &Document) -> bool {
    let custom = doc.elements_by_tag_name("CUSTOMTAG");
    !custom.is_empty() && doc.text_content(custom[0]).trim().is_empty()
}

// ============================================================================
// CONFIG VALIDATION
// ============================================================================

#[test]
fn test_missing_source_is_config_error() {
    let err = load_document_blocking(LoadConfig::new()).unwrap_err();
    assert!(matches!(err, LoadError::Config(ConfigError::MissingSource)));
}

#[test]
fn test_conflicting_sources_is_config_error() {
    let err = load_document_blocking(LoadConfig::new().html("<p/>").file("x.xml")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Config(ConfigError::ConflictingSources)
    ));
}

#[test]
fn test_missing_file_is_file_error() {
    let err =
        load_document_blocking(LoadConfig::new().file("/no/such/duplex-fixture.xml")).unwrap_err();
    assert!(matches!(err, LoadError::File(_)));
}

// ============================================================================
// MODE RESOLUTION THROUGH THE PUBLIC API
// ============================================================================

#[test]
fn test_inline_defaults_to_html() {
    let doc = load_document_blocking(LoadConfig::new().html(XML_FIXTURE)).unwrap();
    assert_eq!(doc.mode(), ParsingMode::Html);
    assert!(!is_parsed_as_xml(&doc));
}

#[test]
fn test_explicit_xml_mode_on_inline_markup() {
    let doc = load_document_blocking(
        LoadConfig::new().html(XML_FIXTURE).parsing_mode(ParsingMode::Xml),
    )
    .unwrap();
    assert_eq!(doc.mode(), ParsingMode::Xml);
    assert!(is_parsed_as_xml(&doc));
}

#[test]
fn test_self_closing_ignored_in_html_mode() {
    let doc = load_document_blocking(
        LoadConfig::new().html(XML_FIXTURE).parsing_mode(ParsingMode::Html),
    )
    .unwrap();
    let custom = doc.elements_by_tag_name("customtag");
    assert_eq!(custom.len(), 1);
    assert_eq!(doc.text_content(custom[0]).trim(), "Hello");
}

#[test]
fn test_xml_extension_detected_for_files() {
    let path = write_fixture("duplex_ext_detect.xml", XML_FIXTURE);
    let doc = load_document_blocking(LoadConfig::new().file(&path)).unwrap();
    assert_eq!(doc.mode(), ParsingMode::Xml);
    assert!(is_parsed_as_xml(&doc));
}

#[test]
fn test_explicit_mode_beats_xml_extension() {
    let path = write_fixture("duplex_ext_override.xml", XML_FIXTURE);
    let doc = load_document_blocking(
        LoadConfig::new().file(&path).parsing_mode(ParsingMode::Html),
    )
    .unwrap();
    assert_eq!(doc.mode(), ParsingMode::Html);
    assert!(!is_parsed_as_xml(&doc));
}

#[test]
fn test_non_xml_extension_defaults_to_html() {
    let path = write_fixture("duplex_plain.txt", XML_FIXTURE);
    let doc = load_document_blocking(LoadConfig::new().file(&path)).unwrap();
    assert_eq!(doc.mode(), ParsingMode::Html);
}

// ============================================================================
// MODE-CORRECT TREES
// ============================================================================

#[test]
fn test_invalid_html_document_still_loads() {
    let doc = load_document_blocking(LoadConfig::new().html("<!DOCTYPE html><html</html>")).unwrap();
    assert!(doc.tree().len() >= 1);
}

#[test]
fn test_xml_keeps_tag_casing() {
    let doc = load_document_blocking(
        LoadConfig::new().html("<foo><bar/></foo>").parsing_mode(ParsingMode::Xml),
    )
    .unwrap();
    let foo = doc.elements_by_tag_name("foo");
    assert_eq!(foo.len(), 1);
    assert_eq!(doc.element(foo[0]).unwrap().name.qualified(), "foo");
}

#[test]
fn test_xml_attributes_case_sensitive() {
    let doc = load_document_blocking(
        LoadConfig::new()
            .html("<foo caseSensitive='abc' casesensitive='def'><bar/></foo>")
            .parsing_mode(ParsingMode::Xml),
    )
    .unwrap();
    let foo = doc.elements_by_tag_name("foo")[0];
    assert_eq!(doc.attribute(foo, "caseSensitive"), Some("abc"));
    assert_eq!(doc.attribute(foo, "casesensitive"), Some("def"));
}

#[test]
fn test_xml_directives_accessible() {
    let doc = load_document_blocking(
        LoadConfig::new()
            .html("<?xml-stylesheet version='1.0'?><foo caseSensitive='abc' casesensitive='def'><bar/></foo>")
            .parsing_mode(ParsingMode::Xml),
    )
    .unwrap();

    let first = doc.first_child().unwrap();
    let node = doc.tree().get(first).unwrap();
    assert_eq!(node.node_name(), "xml-stylesheet");
    assert!(matches!(
        &node.data,
        NodeData::ProcessingInstruction { data, .. } if data == "version='1.0'"
    ));
}

#[test]
fn test_xml_recognizes_builtin_schemas() {
    let doc = load_document_blocking(
        LoadConfig::new()
            .html("<element xml:lang='uk'></element>")
            .parsing_mode(ParsingMode::Xml),
    )
    .unwrap();

    let root = doc.document_element().unwrap();
    let lang = doc
        .element(root)
        .unwrap()
        .attribute_ns("http://www.w3.org/XML/1998/namespace", "lang");
    assert_eq!(lang, Some("uk"));
}

#[test]
fn test_unclosed_xml_root_aborts_load() {
    let err = load_document_blocking(
        LoadConfig::new().html("<foo><bar>").parsing_mode(ParsingMode::Xml),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::Xml(_)));
}

// ============================================================================
// SERIALIZATION
// ============================================================================

#[test]
fn test_serialize_xml_document_with_prefixes() {
    let source = r#"<foo xmlns:foo="http://example.org/bar"><foo:bar></foo:bar></foo>"#;
    let doc = load_document_blocking(
        LoadConfig::new().html(source).parsing_mode(ParsingMode::Xml),
    )
    .unwrap();
    assert_eq!(
        serialize_document(&doc),
        r#"<foo xmlns:foo="http://example.org/bar"><foo:bar/></foo>"#
    );
}

#[test]
fn test_xml_round_trip_is_structurally_stable() {
    let doc = load_document_blocking(
        LoadConfig::new().html(XML_FIXTURE).parsing_mode(ParsingMode::Xml),
    )
    .unwrap();
    let emitted = serialize_document(&doc);
    let reparsed = load_document_blocking(
        LoadConfig::new().html(emitted).parsing_mode(ParsingMode::Xml),
    )
    .unwrap();
    assert!(doc.structurally_eq(&reparsed));
}

#[test]
fn test_html_serialization_uses_void_table() {
    let doc = load_document_blocking(
        LoadConfig::new().html("<body><p>a<br>b</p></body>"),
    )
    .unwrap();
    let emitted = serialize_document(&doc);
    assert!(emitted.contains("<br>"), "void elements stay bare: {emitted}");
    assert!(!emitted.contains("<br/>"));
    assert!(!emitted.contains("<br></br>"));
}

// ============================================================================
// HELPERS
// ============================================================================

fn write_fixture(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    std::fs::write(&path, contents).expect("fixture write");
    path
}
