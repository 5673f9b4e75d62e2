//! Indentation measurement
//!
//! The indent unit is taken from the first indented line of the file and
//! every other line must indent by a whole number of units.

use tracing::debug;

use super::token::SourceLine;
use crate::error::{AspError, Result};

pub const DEFAULT_INDENT_UNIT: usize = 4;

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Width of one indent level, in spaces
pub fn indent_unit(lines: &[String]) -> usize {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_spaces(line))
        .find(|&spaces| spaces > 0)
        .unwrap_or(DEFAULT_INDENT_UNIT)
}

/// Turn comment-stripped lines into `SourceLine` records
pub fn measure(lines: &[String]) -> Result<Vec<SourceLine>> {
    let unit = indent_unit(lines);
    debug!(unit, "indent unit");

    let mut out = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let line_num = index + 1;
        let text = line.trim();
        if text.is_empty() {
            out.push(SourceLine::new(line_num, 0, ""));
            continue;
        }

        let spaces = leading_spaces(line);
        if line[spaces..].starts_with('\t') {
            return Err(AspError::indentation(
                line_num,
                "Tab characters are not allowed in indentation",
            ));
        }
        if spaces % unit != 0 {
            return Err(AspError::indentation(
                line_num,
                format!("Invalid tab size, expected a multiple of {unit} spaces, found {spaces}"),
            ));
        }

        out.push(SourceLine::new(line_num, spaces / unit, text));
    }
    Ok(out)
}
