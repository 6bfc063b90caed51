//! duplex XML backend
//!
//! Drives quick-xml's namespace-resolving pull parser into the unified
//! duplex tree. XML mode is strict where HTML mode is forgiving: names keep
//! their exact case, `/>` always means "no children", and structural
//! violations abort the whole load instead of producing a partial tree.

mod parser;

pub use parser::{XmlParser, parse_xml};

/// Unrecoverable structural failure in XML input.
///
/// HTML mode has no counterpart to this type: the HTML5 algorithm repairs
/// everything. An XML document that trips any of these yields no tree at all.
#[derive(Debug, thiserror::Error)]
pub enum XmlParseError {
    /// The input ended while an element was still open
    #[error("unclosed element <{name}>")]
    UnclosedElement { name: String },

    /// A name used a prefix with no in-scope declaration
    #[error("unbound namespace prefix `{prefix}`")]
    UnboundPrefix { prefix: String },

    /// A reference to an entity this parser does not define
    #[error("unknown entity reference &{name};")]
    UnknownEntity { name: String },

    /// Content outside the single root element, or no root element at all
    #[error("ill-formed document structure: {0}")]
    Structure(String),

    /// Anything the underlying grammar rejects (mismatched end tags,
    /// broken syntax, bad attribute quoting, ...)
    #[error("malformed markup: {0}")]
    Syntax(String),
}

impl From<quick_xml::Error> for XmlParseError {
    fn from(err: quick_xml::Error) -> Self {
        XmlParseError::Syntax(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for XmlParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        XmlParseError::Syntax(err.to_string())
    }
}
