//! asp - Astro Script parser
//!
//! # Overview
//! Turns Astro Script (`.asx`) source into the pax3 code object: a list of
//! line-tagged statement records, led by a header record, that the
//! interpreter walks.
//!
//! The pipeline runs comment stripping and indentation measuring
//! ([`lexer`]), statement classification and block assembly ([`parser`]),
//! then record rendering ([`emitter`]).

pub mod config;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;

pub use config::ParserOptions;
pub use emitter::{Record, FORMAT};
pub use error::{AspError, Result};

use anyhow::Context;
use std::path::Path;
use tracing::debug;

/// Parse source lines into the typed statement tree
pub fn parse_to_tree<S: AsRef<str>>(lines: &[S], options: &ParserOptions) -> Result<Vec<parser::Node>> {
    // 1. Strip comments, measure indentation
    let records = lexer::tokenize(lines, options)?;

    // 2. Classify lines and fold blocks
    let tree = parser::parse(records)?;

    debug!(top_level = tree.len(), "assembled statement tree");
    Ok(tree)
}

/// Parse source lines into pax3 records
pub fn parse<S: AsRef<str>>(lines: &[S], options: &ParserOptions) -> Result<Vec<Record>> {
    let tree = parse_to_tree(lines, options)?;

    // 3. Render records
    Ok(emitter::emit(&tree, options))
}

/// Parse a whole source text
pub fn parse_source(source: &str, options: &ParserOptions) -> Result<Vec<Record>> {
    let lines: Vec<&str> = source.lines().collect();
    parse(&lines, options)
}

/// Parse a source text, reporting failures as diagnostics
pub fn parse_with_diagnostics(
    source: &str,
    file: Option<&Path>,
    options: &ParserOptions,
) -> std::result::Result<Vec<Record>, diagnostics::AspDiagnostics> {
    parse_source(source, options).map_err(|err| diagnostics::from_error(&err, file))
}

/// Parse an `.asx` file
pub fn parse_file(path: &Path, options: &ParserOptions) -> anyhow::Result<Vec<Record>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(parse_source(&source, options)?)
}
