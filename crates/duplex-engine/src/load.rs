//! Load orchestration
//!
//! Acquire text from the configured source, collect sniffing signals,
//! resolve the parsing mode, and hand off to the matching backend. One
//! load, one document; nothing is shared across loads.

use std::path::Path;

use duplex_dom::{Document, ParsingMode};
use url::Url;

use crate::config::{LoadConfig, Source};
use crate::error::{FileError, LoadError};
use crate::sniff::{collect_signals, resolve_mode};

/// Load a markup document per the given configuration.
///
/// The only await points are the I/O collaborators; sniffing and tree
/// building run synchronously once the text is in hand.
pub async fn load_document(config: LoadConfig) -> Result<Document, LoadError> {
    let (source, explicit) = config.into_source()?;
    match source {
        Source::Inline(markup) => build(&markup, explicit, None, None, "about:blank"),
        Source::File(path) => {
            let text = read_markup_file(&path)?;
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_string);
            let display = path.display().to_string();
            build(&text, explicit, None, extension.as_deref(), &display)
        }
        Source::Url(url) => {
            let fetched = duplex_net::fetch_markup(&url).await?;
            let extension = url_extension(&fetched.final_url);
            build(
                &fetched.text,
                explicit,
                fetched.content_type.as_deref(),
                extension.as_deref(),
                &fetched.final_url,
            )
        }
    }
}

/// Blocking convenience wrapper around [`load_document`]
pub fn load_document_blocking(config: LoadConfig) -> Result<Document, LoadError> {
    smol::block_on(load_document(config))
}

/// Serialize a document back to markup text, honoring its recorded mode
pub fn serialize_document(doc: &Document) -> String {
    duplex_dom::serialize::serialize(doc)
}

/// Resolve the mode from the collected signals and run the right backend
fn build(
    markup: &str,
    explicit: Option<ParsingMode>,
    content_type: Option<&str>,
    extension: Option<&str>,
    url: &str,
) -> Result<Document, LoadError> {
    let signals = collect_signals(explicit, content_type, extension);
    let mode = resolve_mode(&signals);
    tracing::debug!(%mode, ?signals, url, "resolved parsing mode");

    match mode {
        ParsingMode::Html => Ok(duplex_html::parse_html(markup, url)),
        ParsingMode::Xml => Ok(duplex_xml::parse_xml(markup, url)?),
    }
}

/// File collaborator: decoded text for a path
fn read_markup_file(path: &Path) -> Result<String, FileError> {
    std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            FileError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            FileError::Read {
                path: path.to_path_buf(),
                source: err,
            }
        }
    })
}

/// Trailing extension of a URL's path component (query and fragment never
/// count toward the extension)
fn url_extension(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let path = parsed.path();
    let (_, file) = path.rsplit_once('/')?;
    let (_, ext) = file.rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_string())
}
