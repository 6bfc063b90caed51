//! Mode sniffing: signal collection and precedence resolution.
//!
//! Deciding HTML vs XML happens before any tree is built, from whatever
//! signals the load carries: an explicit option, the transport's declared
//! content type, or the source's filename extension. Collection and
//! resolution are pure functions of already-retrieved data; no I/O happens
//! here.

use duplex_dom::ParsingMode;

/// A mode-determining signal, strongest first.
///
/// The collector emits signals in precedence order, and categories are
/// mutually exclusive by construction: an explicit option suppresses
/// everything else, and the filename extension is only consulted when no
/// content type was delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Caller forced a mode in the load config
    ExplicitMode(ParsingMode),
    /// Media type declared by the transport, normalized to lowercase with
    /// parameters stripped
    ContentType(String),
    /// Lower-cased trailing extension of the source path
    FilenameExtension(String),
}

/// Collect the signals available for one load.
///
/// `content_type` is the transport's declared type, verbatim; `extension`
/// is the source path's trailing extension, if the source had a path.
pub fn collect_signals(
    explicit: Option<ParsingMode>,
    content_type: Option<&str>,
    extension: Option<&str>,
) -> Vec<Signal> {
    if let Some(mode) = explicit {
        return vec![Signal::ExplicitMode(mode)];
    }
    if let Some(raw) = content_type {
        return vec![Signal::ContentType(normalize_media_type(raw))];
    }
    if let Some(ext) = extension {
        if ext.eq_ignore_ascii_case("xml") {
            return vec![Signal::FilenameExtension("xml".to_string())];
        }
    }
    Vec::new()
}

/// Resolve the collected signals to exactly one mode. Never fails: with no
/// usable signal the default is HTML.
///
/// Precedence is a strict total order, walked top-down with first match
/// winning: explicit option, then content type, then filename extension,
/// then the default.
pub fn resolve_mode(signals: &[Signal]) -> ParsingMode {
    for signal in signals {
        match signal {
            Signal::ExplicitMode(mode) => return *mode,
            Signal::ContentType(media_type) => {
                if let Some(mode) = mode_for_media_type(media_type) {
                    return mode;
                }
            }
            Signal::FilenameExtension(ext) if ext == "xml" => return ParsingMode::Xml,
            Signal::FilenameExtension(_) => {}
        }
    }
    ParsingMode::Html
}

/// Media types that parse as XML when declared exactly
const XML_MEDIA_TYPES: &[&str] = &["application/xml", "text/xml", "application/xhtml+xml"];

fn mode_for_media_type(media_type: &str) -> Option<ParsingMode> {
    if XML_MEDIA_TYPES.contains(&media_type) || media_type.ends_with("+xml") {
        Some(ParsingMode::Xml)
    } else if media_type == "text/html" {
        Some(ParsingMode::Html)
    } else {
        None
    }
}

/// Lowercase a media type and strip its parameters:
/// `Application/XML; charset=utf-8` becomes `application/xml`.
fn normalize_media_type(raw: &str) -> String {
    raw.split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParsingMode::{Html, Xml};

    fn resolved(
        explicit: Option<ParsingMode>,
        content_type: Option<&str>,
        extension: Option<&str>,
    ) -> ParsingMode {
        resolve_mode(&collect_signals(explicit, content_type, extension))
    }

    #[test]
    fn test_explicit_mode_always_wins() {
        assert_eq!(resolved(Some(Html), Some("text/xml"), Some("xml")), Html);
        assert_eq!(resolved(Some(Xml), Some("text/html"), None), Xml);
        assert_eq!(resolved(Some(Html), None, Some("xml")), Html);
    }

    #[test]
    fn test_explicit_mode_suppresses_other_signals() {
        let signals = collect_signals(Some(Xml), Some("text/html"), Some("html"));
        assert_eq!(signals, vec![Signal::ExplicitMode(Xml)]);
    }

    #[test]
    fn test_content_type_resolution() {
        assert_eq!(resolved(None, Some("text/html"), None), Html);
        assert_eq!(resolved(None, Some("application/xml"), None), Xml);
        assert_eq!(resolved(None, Some("text/xml"), None), Xml);
        assert_eq!(resolved(None, Some("application/xhtml+xml"), None), Xml);
        assert_eq!(resolved(None, Some("image/svg+xml"), None), Xml);
    }

    #[test]
    fn test_content_type_normalization() {
        assert_eq!(resolved(None, Some("Application/XML; charset=utf-8"), None), Xml);
        assert_eq!(resolved(None, Some("text/html;charset=iso-8859-1"), None), Html);
    }

    #[test]
    fn test_unrecognized_content_type_falls_through_to_default() {
        assert_eq!(resolved(None, Some("text/plain"), None), Html);
        assert_eq!(resolved(None, Some("application/json"), None), Html);
        assert_eq!(resolved(None, Some(""), None), Html);
    }

    #[test]
    fn test_content_type_suppresses_extension() {
        // A .xml resource served as text/html parses as HTML: the extension
        // signal is never even collected alongside a content type.
        let signals = collect_signals(None, Some("text/html"), Some("xml"));
        assert_eq!(signals, vec![Signal::ContentType("text/html".to_string())]);
        assert_eq!(resolve_mode(&signals), Html);
    }

    #[test]
    fn test_xml_extension_resolves_xml() {
        assert_eq!(resolved(None, None, Some("xml")), Xml);
        assert_eq!(resolved(None, None, Some("XML")), Xml);
        assert_eq!(resolved(None, None, Some("Xml")), Xml);
    }

    #[test]
    fn test_other_extensions_ignored() {
        assert_eq!(resolved(None, None, Some("html")), Html);
        assert_eq!(resolved(None, None, Some("txt")), Html);
    }

    #[test]
    fn test_no_signals_defaults_to_html() {
        assert_eq!(resolved(None, None, None), Html);
        assert_eq!(resolve_mode(&[]), Html);
    }
}
