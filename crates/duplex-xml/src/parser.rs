//! XML parser implementation
//!
//! Event loop over quick-xml's `NsReader`. The reader resolves namespace
//! prefixes against in-scope declarations as it goes (with the built-in
//! `xml` binding predeclared), so every element and attribute is stored
//! with its final namespace URI at parse time.

use duplex_dom::{Attribute, Document, ElementData, NodeData, NodeId, ParsingMode, QualName, ns};
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, QName, ResolveResult};

use crate::XmlParseError;

/// XML parser
pub struct XmlParser;

impl XmlParser {
    /// Create a new XML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse XML into a Document.
    ///
    /// Tag and attribute names are preserved byte-for-byte. A trailing `/>`
    /// always makes the element childless. Leading processing instructions
    /// become children of the document node ahead of the root element; the
    /// XML declaration itself (`<?xml version=...?>`) is consumed without
    /// producing a node.
    pub fn parse(&self, markup: &str, url: &str) -> Result<Document, XmlParseError> {
        tracing::debug!(url, "parsing XML document");

        let mut reader = NsReader::from_str(markup);
        let mut doc = Document::new(ParsingMode::Xml, url);
        // Open-element stack; the document node stays at the bottom.
        let mut stack: Vec<NodeId> = vec![doc.root()];

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let parent = current(&stack);
                    let id = append_element(&mut doc, &reader, &e, parent)?;
                    stack.push(id);
                }
                Event::Empty(e) => {
                    let parent = current(&stack);
                    append_element(&mut doc, &reader, &e, parent)?;
                }
                Event::End(_) => {
                    // Name mismatches are already rejected by the reader.
                    if stack.len() > 1 {
                        stack.pop();
                    }
                }
                Event::Text(t) => {
                    let text = t
                        .decode()
                        .map_err(|e| XmlParseError::Syntax(e.to_string()))?;
                    append_char_data(&mut doc, &stack, &text)?;
                }
                Event::CData(c) => {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    append_char_data(&mut doc, &stack, &text)?;
                }
                Event::GeneralRef(r) => {
                    let raw = r
                        .decode()
                        .map_err(|e| XmlParseError::Syntax(e.to_string()))?;
                    let resolved = resolve_reference(&raw)?;
                    append_char_data(&mut doc, &stack, &resolved)?;
                }
                Event::Comment(c) => {
                    let parent = current(&stack);
                    let text = String::from_utf8_lossy(&c).into_owned();
                    let id = doc.tree_mut().push(NodeData::Comment(text));
                    doc.tree_mut().append_child(parent, id);
                }
                Event::PI(pi) => {
                    let parent = current(&stack);
                    let target = String::from_utf8_lossy(pi.target()).into_owned();
                    let data = String::from_utf8_lossy(pi.content()).into_owned();
                    let id = doc
                        .tree_mut()
                        .push(NodeData::ProcessingInstruction { target, data });
                    doc.tree_mut().append_child(parent, id);
                }
                Event::DocType(dt) => {
                    let parent = current(&stack);
                    let (name, public_id, system_id) =
                        parse_doctype(&String::from_utf8_lossy(&dt));
                    let id = doc.tree_mut().push(NodeData::Doctype {
                        name,
                        public_id,
                        system_id,
                    });
                    doc.tree_mut().append_child(parent, id);
                }
                Event::Decl(_) => {
                    // The XML declaration carries parse metadata, not content.
                }
                Event::Eof => {
                    if stack.len() > 1 {
                        let open = current(&stack);
                        let name = doc
                            .element(open)
                            .map(|e| e.name.qualified())
                            .unwrap_or_default();
                        return Err(XmlParseError::UnclosedElement { name });
                    }
                    break;
                }
            }
        }

        if doc.document_element().is_none() {
            return Err(XmlParseError::Structure("no root element".to_string()));
        }

        tracing::debug!(nodes = doc.tree().len(), "parsed XML document");
        Ok(doc)
    }
}

impl Default for XmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse markup as XML into a Document
pub fn parse_xml(markup: &str, url: &str) -> Result<Document, XmlParseError> {
    XmlParser::new().parse(markup, url)
}

/// Innermost open element (the document node when none is open)
fn current(stack: &[NodeId]) -> NodeId {
    stack.last().copied().unwrap_or(NodeId::ROOT)
}

/// Append an element for a Start/Empty event and return its ID
fn append_element(
    doc: &mut Document,
    reader: &NsReader<&[u8]>,
    e: &BytesStart<'_>,
    parent: NodeId,
) -> Result<NodeId, XmlParseError> {
    if parent == doc.root() && doc.document_element().is_some() {
        return Err(XmlParseError::Structure(
            "more than one root element".to_string(),
        ));
    }

    let name = resolve_element_name(reader, e.name())?;
    let mut elem = ElementData::new(name);

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        let name = attribute_name(reader, attr.key)?;
        elem.attrs.push(Attribute { name, value });
    }

    let id = doc.tree_mut().push(NodeData::Element(elem));
    doc.tree_mut().append_child(parent, id);
    Ok(id)
}

fn resolve_element_name(
    reader: &NsReader<&[u8]>,
    qname: QName<'_>,
) -> Result<QualName, XmlParseError> {
    let (result, local) = reader.resolve_element(qname);
    let ns_uri = match result {
        ResolveResult::Bound(namespace) => String::from_utf8_lossy(namespace.as_ref()).into_owned(),
        ResolveResult::Unbound => String::new(),
        ResolveResult::Unknown(prefix) => {
            return Err(XmlParseError::UnboundPrefix {
                prefix: String::from_utf8_lossy(&prefix).into_owned(),
            });
        }
    };
    Ok(QualName::new(
        prefix_string(qname),
        String::from_utf8_lossy(local.as_ref()).into_owned(),
        ns_uri,
    ))
}

/// Qualified name for an attribute.
///
/// `xmlns` and `xmlns:p` declarations are kept in the attribute list (in the
/// xmlns namespace) so serialization re-emits them; ordinary unprefixed
/// attributes are in no namespace per the XML namespaces rules.
fn attribute_name(reader: &NsReader<&[u8]>, key: QName<'_>) -> Result<QualName, XmlParseError> {
    if let Some(decl) = key.as_namespace_binding() {
        return Ok(match decl {
            PrefixDeclaration::Default => QualName::new(None, "xmlns", ns::XMLNS),
            PrefixDeclaration::Named(prefix) => QualName::new(
                Some("xmlns".to_string()),
                String::from_utf8_lossy(prefix).into_owned(),
                ns::XMLNS,
            ),
        });
    }

    let (result, local) = reader.resolve_attribute(key);
    let ns_uri = match result {
        ResolveResult::Bound(namespace) => String::from_utf8_lossy(namespace.as_ref()).into_owned(),
        ResolveResult::Unbound => String::new(),
        ResolveResult::Unknown(prefix) => {
            return Err(XmlParseError::UnboundPrefix {
                prefix: String::from_utf8_lossy(&prefix).into_owned(),
            });
        }
    };
    Ok(QualName::new(
        prefix_string(key),
        String::from_utf8_lossy(local.as_ref()).into_owned(),
        ns_uri,
    ))
}

fn prefix_string(qname: QName<'_>) -> Option<String> {
    qname
        .prefix()
        .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned())
}

/// Append character data under the current open element.
///
/// Top-level whitespace (between the declaration, directives, and the root
/// element) is not part of the tree; any other character data outside the
/// root is a structural failure.
fn append_char_data(
    doc: &mut Document,
    stack: &[NodeId],
    text: &str,
) -> Result<(), XmlParseError> {
    if stack.len() == 1 {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(XmlParseError::Structure(
            "character data outside of root element".to_string(),
        ));
    }
    append_text(doc, current(stack), text);
    Ok(())
}

/// Append text, coalescing with an immediately preceding text node
fn append_text(doc: &mut Document, parent: NodeId, text: &str) {
    if text.is_empty() {
        return;
    }
    let tree = doc.tree_mut();
    let last = tree.get(parent).map(|n| n.last_child);
    if let Some(last) = last.filter(|id| id.is_valid()) {
        if let Some(node) = tree.get_mut(last) {
            if let NodeData::Text(existing) = &mut node.data {
                existing.push_str(text);
                return;
            }
        }
    }
    let id = tree.push(NodeData::Text(text.to_string()));
    tree.append_child(parent, id);
}

/// Resolve a general entity reference (`&name;`).
///
/// The five predefined entities and numeric character references resolve;
/// anything else is an unknown entity (no DTD-defined entities here).
fn resolve_reference(raw: &str) -> Result<String, XmlParseError> {
    let wrapped = format!("&{raw};");
    match quick_xml::escape::unescape(&wrapped) {
        Ok(resolved) => Ok(resolved.into_owned()),
        Err(_) => Err(XmlParseError::UnknownEntity {
            name: raw.to_string(),
        }),
    }
}

/// Split `<!DOCTYPE ...>` content into (name, public id, system id)
fn parse_doctype(text: &str) -> (String, String, String) {
    let text = text.trim();
    let name_end = text
        .find(|c: char| c.is_whitespace())
        .unwrap_or(text.len());
    let name = text[..name_end].to_string();
    let rest = text[name_end..].trim_start();

    let upper = rest.to_ascii_uppercase();
    if upper.starts_with("PUBLIC") {
        let mut remainder = &rest[6..];
        let public_id = next_quoted(&mut remainder).unwrap_or_default();
        let system_id = next_quoted(&mut remainder).unwrap_or_default();
        (name, public_id, system_id)
    } else if upper.starts_with("SYSTEM") {
        let mut remainder = &rest[6..];
        let system_id = next_quoted(&mut remainder).unwrap_or_default();
        (name, String::new(), system_id)
    } else {
        (name, String::new(), String::new())
    }
}

/// Extract the next single- or double-quoted string, advancing the slice
fn next_quoted(rest: &mut &str) -> Option<String> {
    let start = rest.find(['"', '\''])?;
    let quote = rest.as_bytes()[start] as char;
    let after = &rest[start + 1..];
    let end = after.find(quote)?;
    let value = after[..end].to_string();
    *rest = &after[end + 1..];
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_predefined_entities() {
        assert_eq!(resolve_reference("amp").unwrap(), "&");
        assert_eq!(resolve_reference("lt").unwrap(), "<");
        assert_eq!(resolve_reference("#169").unwrap(), "\u{a9}");
        assert_eq!(resolve_reference("#x41").unwrap(), "A");
        assert!(matches!(
            resolve_reference("nbsp"),
            Err(XmlParseError::UnknownEntity { name }) if name == "nbsp"
        ));
    }

    #[test]
    fn test_parse_doctype_forms() {
        assert_eq!(
            parse_doctype("greeting"),
            ("greeting".to_string(), String::new(), String::new())
        );
        assert_eq!(
            parse_doctype("greeting SYSTEM \"hello.dtd\""),
            ("greeting".to_string(), String::new(), "hello.dtd".to_string())
        );
        assert_eq!(
            parse_doctype("html PUBLIC '-//W3C//DTD XHTML 1.0 Strict//EN' 'xhtml1-strict.dtd'"),
            (
                "html".to_string(),
                "-//W3C//DTD XHTML 1.0 Strict//EN".to_string(),
                "xhtml1-strict.dtd".to_string()
            )
        );
    }

    #[test]
    fn test_parse_minimal_document() {
        let doc = parse_xml("<root/>", "about:blank").unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(doc.element(root).unwrap().name.local, "root");
        assert!(doc.tree().first_child(root).is_none());
    }

    #[test]
    fn test_empty_input_is_structural_failure() {
        assert!(matches!(
            parse_xml("", "about:blank"),
            Err(XmlParseError::Structure(_))
        ));
    }

    #[test]
    fn test_multiple_roots_rejected() {
        assert!(matches!(
            parse_xml("<a/><b/>", "about:blank"),
            Err(XmlParseError::Structure(_))
        ));
    }

    #[test]
    fn test_text_outside_root_rejected() {
        assert!(matches!(
            parse_xml("<a/>stray", "about:blank"),
            Err(XmlParseError::Structure(_))
        ));
    }
}
