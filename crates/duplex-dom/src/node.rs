//! DOM Node
//!
//! Arena entry: sibling/parent links are `NodeId` indices, never owning
//! references, so the `Vec` arena is the single owner of every node.

use crate::NodeId;

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Node name as exposed to callers: tag name for elements, PI target for
    /// processing instructions, `#text`/`#comment`/`#document` otherwise.
    pub fn node_name(&self) -> String {
        match &self.data {
            NodeData::Document => "#document".to_string(),
            NodeData::Doctype { name, .. } => name.clone(),
            NodeData::Element(e) => e.name.qualified(),
            NodeData::Text(_) => "#text".to_string(),
            NodeData::Comment(_) => "#comment".to_string(),
            NodeData::ProcessingInstruction { target, .. } => target.clone(),
        }
    }
}

/// Node-specific data
#[derive(Debug, PartialEq, Eq)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
    /// Processing instruction (`<?target data?>`)
    ProcessingInstruction { target: String, data: String },
}

/// Namespace-qualified name.
///
/// XML mode stores `local` (and `prefix`) byte-for-byte as written and `ns`
/// as the URI the prefix resolved to at parse time; it is never re-derived
/// by scanning ancestors. HTML mode stores the tokenizer's lower-cased names
/// with `ns` set to the XHTML namespace for elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualName {
    /// Namespace prefix as written (`foo` in `foo:bar`), if any
    pub prefix: Option<String>,
    /// Local name (`bar` in `foo:bar`)
    pub local: String,
    /// Resolved namespace URI (empty when the name is in no namespace)
    pub ns: String,
}

impl QualName {
    pub fn new(prefix: Option<String>, local: impl Into<String>, ns: impl Into<String>) -> Self {
        Self {
            prefix,
            local: local.into(),
            ns: ns.into(),
        }
    }

    /// Name with no prefix and no namespace
    pub fn local_only(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
            ns: String::new(),
        }
    }

    /// Qualified form as written in markup: `prefix:local` or bare `local`
    pub fn qualified(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local),
            None => self.local.clone(),
        }
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// Element-specific data
#[derive(Debug, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name (qualified)
    pub name: QualName,
    /// Attributes in source order
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    pub fn new(name: QualName) -> Self {
        Self {
            name,
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value by its qualified name, exact match.
    ///
    /// This is the XML-mode lookup: `caseSensitive` and `casesensitive` are
    /// distinct attributes.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.qualified() == name)
            .map(|a| a.value.as_str())
    }

    /// Get an attribute value by qualified name, ASCII-case-insensitive.
    ///
    /// HTML-mode lookup; stored names are already lower-cased by the
    /// tokenizer, so any casing of the query matches.
    pub fn attribute_ignore_case(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.qualified().eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Get an attribute value by (namespace URI, local name).
    ///
    /// Distinguishes `xml:lang` (in the XML namespace) from an unprefixed
    /// `lang` (in no namespace).
    pub fn attribute_ns(&self, ns: &str, local: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.ns == ns && a.name.local == local)
            .map(|a| a.value.as_str())
    }

    /// Append an attribute, replacing an existing one with the same
    /// (namespace, local name, prefix).
    pub fn set_attribute(&mut self, name: QualName, value: String) {
        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value;
                return;
            }
        }
        self.attrs.push(Attribute { name, value });
    }
}
