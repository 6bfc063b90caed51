//! Load a document from the command line and print its serialized form.
//!
//! Usage:
//!   cargo run --example load -- <file-or-url> [html|xml]
//!   RUST_LOG=debug cargo run --example load -- page.xml

use anyhow::{Context, Result};
use duplex_engine::{LoadConfig, ParsingMode, load_document_blocking, serialize_document};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let source = args.next().context("usage: load <file-or-url> [html|xml]")?;

    let mut config = if source.starts_with("http://") || source.starts_with("https://") {
        LoadConfig::new().url(&source)
    } else {
        LoadConfig::new().file(&source)
    };
    if let Some(mode) = args.next() {
        let mode = ParsingMode::from_option_str(&mode)
            .with_context(|| format!("unknown parsing mode: {mode}"))?;
        config = config.parsing_mode(mode);
    }

    let doc = load_document_blocking(config)?;
    println!(
        "loaded {} as {} ({} nodes)",
        doc.url(),
        doc.mode(),
        doc.tree().len()
    );
    println!("{}", serialize_document(&doc));
    Ok(())
}
