//! duplex HTML backend
//!
//! Drives html5ever's spec-compliant tokenizer and tree construction, then
//! materializes the result into the unified duplex tree. HTML parsing is
//! maximally permissive: malformed input is repaired, never rejected, so
//! this backend has no error type.

mod parser;

pub use parser::HtmlParser;

use duplex_dom::Document;

/// Parse markup as HTML into a Document
pub fn parse_html(markup: &str, url: &str) -> Document {
    HtmlParser::new().parse(markup, url)
}
