//! HTML5 parser implementation
//!
//! Uses html5ever's built-in RcDom and converts to the duplex tree. This is
//! simpler and more reliable than implementing TreeSink directly.

use duplex_dom::{Attribute, Document, DomTree, ElementData, NodeData, NodeId, ParsingMode, QualName};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML into a Document.
    ///
    /// Never fails: the HTML5 algorithm defines a repair for every
    /// malformed input, including truncated or unterminated tags. Tag and
    /// attribute names arrive already lower-cased by the tokenizer, so
    /// HTML-mode case-insensitive lookups hold by construction. Self-closing
    /// syntax on non-void elements is ignored; following content still
    /// becomes children.
    pub fn parse(&self, markup: &str, url: &str) -> Document {
        tracing::debug!(url, "parsing HTML document");

        let dom = parse_document(RcDom::default(), Default::default()).one(markup);

        let mut document = Document::new(ParsingMode::Html, url);
        let root = document.root();
        convert_node(&dom.document, document.tree_mut(), root);

        tracing::debug!(nodes = document.tree().len(), "parsed HTML document");
        document
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert an RcDom node (and its subtree) into the arena tree
fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    match &handle.data {
        RcNodeData::Document => {
            for child in handle.children.borrow().iter() {
                convert_node(child, tree, parent);
            }
        }
        RcNodeData::Doctype {
            name,
            public_id,
            system_id,
        } => {
            let id = tree.push(NodeData::Doctype {
                name: name.to_string(),
                public_id: public_id.to_string(),
                system_id: system_id.to_string(),
            });
            tree.append_child(parent, id);
        }
        RcNodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            let id = tree.push(NodeData::Text(text));
            tree.append_child(parent, id);
        }
        RcNodeData::Comment { contents } => {
            let id = tree.push(NodeData::Comment(contents.to_string()));
            tree.append_child(parent, id);
        }
        RcNodeData::Element { name, attrs, .. } => {
            let qname = convert_name(name);
            let mut elem = ElementData::new(qname);
            for attr in attrs.borrow().iter() {
                elem.attrs.push(Attribute {
                    name: convert_name(&attr.name),
                    value: attr.value.to_string(),
                });
            }

            let id = tree.push(NodeData::Element(elem));
            tree.append_child(parent, id);

            for child in handle.children.borrow().iter() {
                convert_node(child, tree, id);
            }
        }
        RcNodeData::ProcessingInstruction { target, contents } => {
            let id = tree.push(NodeData::ProcessingInstruction {
                target: target.to_string(),
                data: contents.to_string(),
            });
            tree.append_child(parent, id);
        }
    }
}

fn convert_name(name: &html5ever::QualName) -> QualName {
    QualName::new(
        name.prefix.as_ref().map(|p| p.to_string()),
        name.local.to_string(),
        name.ns.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html, "about:blank");

        assert!(doc.tree().len() > 1, "expected more than 1 node, got {}", doc.tree().len());
        assert_eq!(doc.elements_by_tag_name("p").len(), 1);
    }

    #[test]
    fn test_tag_names_lowercased() {
        let doc = HtmlParser::new().parse("<DIV><SpAn>x</SpAn></DIV>", "about:blank");

        let div = doc.elements_by_tag_name("div");
        assert_eq!(div.len(), 1);
        assert_eq!(doc.element(div[0]).unwrap().name.local, "div");
        assert_eq!(doc.elements_by_tag_name("SPAN").len(), 1);
    }

    #[test]
    fn test_elements_in_xhtml_namespace() {
        let doc = HtmlParser::new().parse("<p>x</p>", "about:blank");
        let p = doc.elements_by_tag_name("p")[0];
        assert_eq!(doc.element(p).unwrap().name.ns, duplex_dom::ns::XHTML);
    }

    #[test]
    fn test_self_closing_ignored_on_unknown_element() {
        // `<customtag />` is not void, so the slash is ignored and the
        // following paragraph parses as its child.
        let doc = HtmlParser::new().parse(
            "<body><customtag /><p>inside</p></body>",
            "about:blank",
        );

        let custom = doc.elements_by_tag_name("customtag")[0];
        let p = doc.elements_by_tag_name("p")[0];
        assert_eq!(doc.tree().parent(p), Some(custom));
    }

    #[test]
    fn test_truncated_tag_does_not_panic() {
        let doc = HtmlParser::new().parse("<!DOCTYPE html><html</html>", "about:blank");
        assert!(doc.tree().len() >= 1);
    }
}
