//! Comment stripping
//!
//! Two passes over the raw line buffer: block comments (`/-- ... --/`) are
//! blanked first, then every remaining line is cut at its first `--` that
//! does not sit inside a string literal.

use tracing::warn;

use crate::error::{AspError, Result};

/// Filler written over string literals by [`mask_strings`]
pub const MASK: char = '\0';

const BLOCK_OPEN: &str = "/--";
const BLOCK_CLOSE: &str = "--/";
const LINE_COMMENT: &str = "--";

/// Replace every `"..."` span (quotes included) with [`MASK`].
///
/// Byte offsets are preserved, so positions found in the masked text index
/// the unmasked line. A quote left without a partner is an
/// `Unterminated string` error on `line_num`.
pub fn mask_strings(text: &str, line_num: usize) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;

    for c in text.chars() {
        if c == '"' {
            in_string = !in_string;
            out.push(MASK);
            continue;
        }
        if in_string {
            for _ in 0..c.len_utf8() {
                out.push(MASK);
            }
        } else {
            out.push(c);
        }
    }

    if in_string {
        return Err(AspError::syntax(line_num, "Unterminated string"));
    }
    Ok(out)
}

/// Strip block and line comments in place
pub fn strip_comments(lines: &mut [String], strict: bool) -> Result<()> {
    strip_block_comments(lines, strict)?;

    for (index, line) in lines.iter_mut().enumerate() {
        let masked = mask_strings(line, index + 1)?;
        if let Some(pos) = masked.find(LINE_COMMENT) {
            line.truncate(pos);
        }
    }
    Ok(())
}

fn strip_block_comments(lines: &mut [String], strict: bool) -> Result<()> {
    let mut open_at: Option<usize> = None;

    for (index, line) in lines.iter_mut().enumerate() {
        let trimmed = line.trim();
        let mut commented = open_at.is_some();

        if open_at.is_none() && trimmed.starts_with(BLOCK_OPEN) {
            open_at = Some(index + 1);
            commented = true;
        }
        // the opening line may also close the region, `/--/` included
        if open_at.is_some() && trimmed.ends_with(BLOCK_CLOSE) {
            let opened_here = open_at == Some(index + 1);
            if !opened_here || trimmed.len() > BLOCK_OPEN.len() {
                open_at = None;
            }
        }

        if commented {
            line.clear();
        }
    }

    if let Some(line) = open_at {
        if strict {
            return Err(AspError::UnterminatedComment { line });
        }
        warn!(line, "block comment is never closed, ignoring the rest of the file");
    }
    Ok(())
}
