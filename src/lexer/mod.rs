//! Lexer module - comment stripping and indentation tokenizing

mod indent;
mod preprocess;
mod token;

pub use indent::{indent_unit, DEFAULT_INDENT_UNIT};
pub use preprocess::{mask_strings, MASK};
pub use token::*;

use tracing::debug;

use crate::config::ParserOptions;
use crate::error::Result;

/// Tokenize raw source lines into `SourceLine` records.
///
/// Trailing line terminators are removed first. Blank lines are kept (with
/// empty text) so every record's position matches its physical line.
pub fn tokenize<S: AsRef<str>>(lines: &[S], options: &ParserOptions) -> Result<Vec<SourceLine>> {
    let mut buffer: Vec<String> = lines
        .iter()
        .map(|l| l.as_ref().trim_end_matches(&['\n', '\r'][..]).to_string())
        .collect();

    preprocess::strip_comments(&mut buffer, options.strict_comments)?;
    let records = indent::measure(&buffer)?;

    debug!(
        lines = records.len(),
        code_lines = records.iter().filter(|l| !l.is_blank()).count(),
        "tokenized source"
    );
    Ok(records)
}
