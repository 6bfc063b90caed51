//! duplex engine
//!
//! Loads a markup document from an inline string, a local file, or a URL,
//! decides whether the bytes are HTML or XML before any tree is built, and
//! parses them into a unified DOM-like tree with mode-correct semantics.
//!
//! Mode resolution is a strict precedence walk: an explicit option always
//! beats transport metadata, which beats the `.xml` filename heuristic,
//! which beats the HTML default.
//!
//! # Example
//! ```rust,ignore
//! use duplex_engine::{LoadConfig, load_document_blocking, serialize_document};
//!
//! let doc = load_document_blocking(
//!     LoadConfig::new().html("<foo><bar/></foo>").parsing_mode(duplex_engine::ParsingMode::Xml),
//! )?;
//! assert_eq!(serialize_document(&doc), "<foo><bar/></foo>");
//! ```

mod config;
mod error;
mod load;
pub mod sniff;

pub use config::LoadConfig;
pub use error::{ConfigError, FileError, LoadError};
pub use load::{load_document, load_document_blocking, serialize_document};

pub use duplex_dom::{Document, NodeData, NodeId, ParsingMode};

// Re-export sub-crates for advanced usage
pub use duplex_dom as dom;
pub use duplex_html as html;
pub use duplex_net as net;
pub use duplex_xml as xml;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
