//! Mode-aware serializer.
//!
//! Walks a [`Document`] tree and emits markup text honoring the mode the
//! tree was built with:
//!
//! - XML: childless elements use the self-closing form (`<a/>`), prefixes
//!   and case are emitted exactly as stored, attribute values and text are
//!   escaped so re-parsing yields a structurally equal tree.
//! - HTML: void elements (`<br>`, `<img>`, ...) are emitted without a
//!   closing tag and never with `/>`; every other element gets an explicit
//!   start/end pair even when empty; script/style contents are not escaped.

use crate::{Document, ElementData, NodeData, NodeId, ParsingMode};

/// Elements serialized as a bare start tag in HTML output
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are emitted without escaping in HTML output
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// Serialize a document back to markup text.
///
/// Deterministic given the tree and its recorded mode. The output is not
/// byte-identical with arbitrary hand-written input (quote style and
/// self-closing forms are normalized), but re-parsing it in the same mode
/// reproduces an equivalent tree.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    for child in doc.tree().children(doc.root()) {
        match doc.mode() {
            ParsingMode::Xml => serialize_xml_node(doc, child, &mut out),
            ParsingMode::Html => serialize_html_node(doc, child, &mut out, false),
        }
    }
    tracing::debug!(mode = %doc.mode(), bytes = out.len(), "serialized document");
    out
}

fn serialize_xml_node(doc: &Document, id: NodeId, out: &mut String) {
    let Some(node) = doc.tree().get(id) else {
        return;
    };
    match &node.data {
        NodeData::Document => {}
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => write_doctype(name, public_id, system_id, out),
        NodeData::Element(elem) => {
            out.push('<');
            out.push_str(&elem.name.qualified());
            write_attrs(elem, out);
            if node.first_child.is_valid() {
                out.push('>');
                for child in doc.tree().children(id) {
                    serialize_xml_node(doc, child, out);
                }
                out.push_str("</");
                out.push_str(&elem.name.qualified());
                out.push('>');
            } else {
                out.push_str("/>");
            }
        }
        NodeData::Text(text) => out.push_str(&escape_text(text)),
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::ProcessingInstruction { target, data } => {
            out.push_str("<?");
            out.push_str(target);
            if !data.is_empty() {
                out.push(' ');
                out.push_str(data);
            }
            out.push_str("?>");
        }
    }
}

fn serialize_html_node(doc: &Document, id: NodeId, out: &mut String, raw_text: bool) {
    let Some(node) = doc.tree().get(id) else {
        return;
    };
    match &node.data {
        NodeData::Document => {}
        NodeData::Doctype { name, .. } => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        NodeData::Element(elem) => {
            let tag = elem.name.qualified();
            out.push('<');
            out.push_str(&tag);
            write_attrs(elem, out);
            out.push('>');
            if is_void_element(&tag) {
                return;
            }
            let raw = is_raw_text_element(&tag);
            for child in doc.tree().children(id) {
                serialize_html_node(doc, child, out, raw);
            }
            out.push_str("</");
            out.push_str(&tag);
            out.push('>');
        }
        NodeData::Text(text) => {
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::ProcessingInstruction { target, data } => {
            // HTML has no PI syntax; emit the bogus-comment form the parser
            // would produce for it.
            out.push_str("<!--?");
            out.push_str(target);
            out.push(' ');
            out.push_str(data);
            out.push_str("?-->");
        }
    }
}

fn write_attrs(elem: &ElementData, out: &mut String) {
    for attr in &elem.attrs {
        out.push(' ');
        out.push_str(&attr.name.qualified());
        out.push_str("=\"");
        out.push_str(&escape_attr(&attr.value));
        out.push('"');
    }
}

fn write_doctype(name: &str, public_id: &str, system_id: &str, out: &mut String) {
    out.push_str("<!DOCTYPE ");
    out.push_str(name);
    if !public_id.is_empty() {
        out.push_str(" PUBLIC \"");
        out.push_str(public_id);
        out.push('"');
        if !system_id.is_empty() {
            out.push_str(" \"");
            out.push_str(system_id);
            out.push('"');
        }
    } else if !system_id.is_empty() {
        out.push_str(" SYSTEM \"");
        out.push_str(system_id);
        out.push('"');
    }
    out.push('>');
}

/// Escape character data: `&`, `<`, `>`
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value: `&`, `<`, `"`
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
