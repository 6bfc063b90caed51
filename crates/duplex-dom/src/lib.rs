//! duplex DOM - Unified markup tree
//!
//! One tree model shared by both parsing backends. Nodes live in an arena
//! (`Vec<Node>` addressed by `NodeId`), parent links are plain indices, and
//! the document records which grammar produced it so queries and
//! serialization can apply mode-correct semantics.

mod document;
mod mode;
mod node;
pub mod serialize;
mod tree;

pub use document::Document;
pub use mode::ParsingMode;
pub use node::{Attribute, ElementData, Node, NodeData, QualName};
pub use tree::{Children, DomTree};

/// Well-known namespace URIs.
pub mod ns {
    /// Namespace bound to the built-in `xml` prefix.
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    /// Namespace of `xmlns` declarations themselves.
    pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";
    /// Namespace of HTML elements.
    pub const XHTML: &str = "http://www.w3.org/1999/xhtml";
}

/// Node identifier (index into the arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Document node ID (the arena root is always slot 0)
    pub const ROOT: NodeId = NodeId(0);

    /// Check if this ID refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Index into the arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
