//! Document - High-level document API

use crate::{DomTree, ElementData, NodeId, ParsingMode};

/// A parsed markup document.
///
/// Owns its tree exclusively; nothing is shared across loads. The parsing
/// mode is fixed at build time and drives casing rules for queries and the
/// serializer's output conventions.
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL (or a placeholder for inline/file sources)
    url: String,
    /// Grammar this tree was built with
    mode: ParsingMode,
}

impl Document {
    /// Create an empty document for the given mode
    pub fn new(mode: ParsingMode, url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            mode,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The grammar this document was parsed with
    pub fn mode(&self) -> ParsingMode {
        self.mode
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// First child of the document node (directive, doctype, or root element)
    pub fn first_child(&self) -> Option<NodeId> {
        self.tree.first_child(self.tree.root())
    }

    /// The root element (first element child of the document node)
    pub fn document_element(&self) -> Option<NodeId> {
        self.tree
            .children(self.tree.root())
            .find(|&id| self.tree.get(id).is_some_and(|n| n.is_element()))
    }

    /// Element data for a node, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.get(id)?.as_element()
    }

    /// All elements matching a tag name, in document order.
    ///
    /// Matching follows the document's mode: exact in XML, ASCII-case-
    /// insensitive in HTML (where stored names are already lower-cased).
    pub fn elements_by_tag_name(&self, name: &str) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&id| {
                self.element(id).is_some_and(|e| {
                    let tag = e.name.qualified();
                    match self.mode {
                        ParsingMode::Html => tag.eq_ignore_ascii_case(name),
                        ParsingMode::Xml => tag == name,
                    }
                })
            })
            .collect()
    }

    /// Attribute lookup honoring the document's casing rules
    pub fn attribute<'a>(&'a self, id: NodeId, name: &str) -> Option<&'a str> {
        let elem = self.element(id)?;
        match self.mode {
            ParsingMode::Html => elem.attribute_ignore_case(name),
            ParsingMode::Xml => elem.attribute(name),
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for desc in self.tree.descendants(id) {
            if let Some(text) = self.tree.get(desc).and_then(|n| n.as_text()) {
                out.push_str(text);
            }
        }
        out
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Structural equality: same mode and same tree shape/data, ignoring
    /// arena slot numbering.
    pub fn structurally_eq(&self, other: &Document) -> bool {
        self.mode == other.mode && nodes_eq(self, self.root(), other, other.root())
    }
}

fn nodes_eq(a: &Document, a_id: NodeId, b: &Document, b_id: NodeId) -> bool {
    let (Some(an), Some(bn)) = (a.tree.get(a_id), b.tree.get(b_id)) else {
        return false;
    };
    if an.data != bn.data {
        return false;
    }
    let a_children: Vec<NodeId> = a.tree.children(a_id).collect();
    let b_children: Vec<NodeId> = b.tree.children(b_id).collect();
    a_children.len() == b_children.len()
        && a_children
            .iter()
            .zip(&b_children)
            .all(|(&ac, &bc)| nodes_eq(a, ac, b, bc))
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("mode", &self.mode)
            .field("url", &self.url)
            .field("nodes", &self.tree.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeData, QualName};

    fn doc_with_elem(mode: ParsingMode, tag: &str) -> (Document, NodeId) {
        let mut doc = Document::new(mode, "about:blank");
        let id = doc
            .tree_mut()
            .push(NodeData::Element(ElementData::new(QualName::local_only(tag))));
        let root = doc.root();
        doc.tree_mut().append_child(root, id);
        (doc, id)
    }

    #[test]
    fn test_tag_lookup_html_case_insensitive() {
        let (doc, id) = doc_with_elem(ParsingMode::Html, "customtag");
        assert_eq!(doc.elements_by_tag_name("CUSTOMTAG"), vec![id]);
        assert_eq!(doc.elements_by_tag_name("customtag"), vec![id]);
    }

    #[test]
    fn test_tag_lookup_xml_case_sensitive() {
        let (doc, id) = doc_with_elem(ParsingMode::Xml, "CustomTag");
        assert_eq!(doc.elements_by_tag_name("CustomTag"), vec![id]);
        assert!(doc.elements_by_tag_name("customtag").is_empty());
    }

    #[test]
    fn test_document_element_skips_directives() {
        let mut doc = Document::new(ParsingMode::Xml, "about:blank");
        let root = doc.root();
        let pi = doc.tree_mut().push(NodeData::ProcessingInstruction {
            target: "xml-stylesheet".to_string(),
            data: "href='a.css'".to_string(),
        });
        doc.tree_mut().append_child(root, pi);
        let elem = doc
            .tree_mut()
            .push(NodeData::Element(ElementData::new(QualName::local_only("foo"))));
        doc.tree_mut().append_child(root, elem);

        assert_eq!(doc.first_child(), Some(pi));
        assert_eq!(doc.document_element(), Some(elem));
    }

    #[test]
    fn test_structural_equality() {
        let (a, _) = doc_with_elem(ParsingMode::Xml, "foo");
        let (b, _) = doc_with_elem(ParsingMode::Xml, "foo");
        let (c, _) = doc_with_elem(ParsingMode::Xml, "bar");
        let (d, _) = doc_with_elem(ParsingMode::Html, "foo");

        assert!(a.structurally_eq(&b));
        assert!(!a.structurally_eq(&c));
        assert!(!a.structurally_eq(&d), "mode is part of document identity");
    }
}
