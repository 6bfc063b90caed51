//! Load error taxonomy

use std::path::PathBuf;

/// Invalid load configuration; reported before any I/O starts
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no markup source given (expected one of html, file, url)")]
    MissingSource,

    #[error("conflicting markup sources (html, file, and url are mutually exclusive)")]
    ConflictingSources,
}

/// File collaborator failure
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can abort a load.
///
/// HTML markup itself never appears here: recoverable malformations are
/// repaired into the tree. Only configuration, I/O, and unrecoverable XML
/// structure abort a load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Net(#[from] duplex_net::NetError),

    #[error(transparent)]
    Xml(#[from] duplex_xml::XmlParseError),
}
