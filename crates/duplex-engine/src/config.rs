//! Load configuration

use std::path::PathBuf;

use duplex_dom::ParsingMode;

use crate::error::ConfigError;

/// Configuration for one load operation.
///
/// Exactly one of `html`/`file`/`url` supplies the markup; `parsing_mode`
/// optionally forces the grammar regardless of any other signal.
#[derive(Debug, Default)]
pub struct LoadConfig {
    pub html: Option<String>,
    pub file: Option<PathBuf>,
    pub url: Option<String>,
    pub parsing_mode: Option<ParsingMode>,
}

/// The markup source a validated config settled on
#[derive(Debug)]
pub(crate) enum Source {
    Inline(String),
    File(PathBuf),
    Url(String),
}

impl LoadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an inline markup string as the source
    pub fn html(mut self, markup: impl Into<String>) -> Self {
        self.html = Some(markup.into());
        self
    }

    /// Use a local file as the source
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Use a remote URL as the source
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Force the parsing mode, overriding every sniffing signal
    pub fn parsing_mode(mut self, mode: ParsingMode) -> Self {
        self.parsing_mode = Some(mode);
        self
    }

    /// Check source exclusivity and extract the single source.
    ///
    /// Reported before any I/O starts; a conflicting config never touches
    /// the filesystem or network.
    pub(crate) fn into_source(self) -> Result<(Source, Option<ParsingMode>), ConfigError> {
        let mode = self.parsing_mode;
        let provided =
            usize::from(self.html.is_some()) + usize::from(self.file.is_some()) + usize::from(self.url.is_some());
        match provided {
            0 => Err(ConfigError::MissingSource),
            1 => {
                let source = if let Some(markup) = self.html {
                    Source::Inline(markup)
                } else if let Some(path) = self.file {
                    Source::File(path)
                } else {
                    Source::Url(self.url.unwrap_or_default())
                };
                Ok((source, mode))
            }
            _ => Err(ConfigError::ConflictingSources),
        }
    }
}
