//! Parser module - statement classification and block assembly
//!
//! Every non-blank line is matched against an ordered table of statement
//! shapes; the first shape that accepts the line decides which conversion
//! routine builds its `Stmt`. The classified lines are then folded into a
//! tree by [`blocks::assemble`].

mod ast;
mod blocks;
mod expr;
mod utils;

pub use ast::*;
pub use blocks::{assemble, ClassifiedLine};
pub use expr::{parse_args, parse_math, parse_number, parse_value, resolve_escapes};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{AspError, Result};
use crate::lexer::SourceLine;
use utils::{is_ident_char, is_identifier, split_call};

/// Grammatical form of a line, before conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Import,
    Delete,
    If,
    While,
    For,
    Elif,
    Else,
    Try,
    Function,
    Assignment,
    Call,
    Statement,
    Mixin,
}

/// Shape patterns in priority order, first match wins
static SHAPES: Lazy<Vec<(Shape, Regex)>> = Lazy::new(|| {
    [
        (Shape::Import, r"^import(\s|$)"),
        (Shape::Delete, r"^delete(\s|$)"),
        (Shape::If, r"^if\s.*:"),
        (Shape::While, r"^while\s.+:"),
        (Shape::For, r"^for\s.+:"),
        (Shape::Elif, r"^elif\s.*:"),
        (Shape::Else, r"^else\s*:"),
        (Shape::Try, r"^try\s*:"),
        (Shape::Function, r"^#[A-Za-z_][A-Za-z0-9_]*\(.*\)\s*:"),
        (Shape::Assignment, r"^[A-Za-z_][A-Za-z0-9_]*\s*=([^=]|$)"),
        (Shape::Call, r"^[A-Za-z_][A-Za-z0-9_]*\(.*\)$"),
        (Shape::Statement, r"^[A-Za-z_][A-Za-z0-9_]*(\s|$)"),
        (Shape::Mixin, r"^@mixin\s"),
    ]
    .into_iter()
    .map(|(shape, pattern)| (shape, Regex::new(pattern).unwrap()))
    .collect()
});

/// Find the shape of a trimmed, non-empty line
pub fn shape_of(text: &str) -> Option<Shape> {
    SHAPES
        .iter()
        .find(|(shape, regex)| regex.is_match(text) && accepts(*shape, text))
        .map(|(shape, _)| *shape)
}

/// Checks a regex cannot express
fn accepts(shape: Shape, text: &str) -> bool {
    match shape {
        // `f(1) + g(2)` looks like a call but is not one
        Shape::Call => split_call(text).is_some(),
        _ => true,
    }
}

/// Parse tokenized lines into a statement tree
pub fn parse(lines: Vec<SourceLine>) -> Result<Vec<Node>> {
    let classified = classify_lines(lines)?;
    debug!(statements = classified.len(), "classified source");
    assemble(classified)
}

/// Classify every non-blank line, dropping blank ones
pub fn classify_lines(lines: Vec<SourceLine>) -> Result<Vec<ClassifiedLine>> {
    lines
        .into_iter()
        .filter(|l| !l.is_blank())
        .map(|l| -> Result<ClassifiedLine> {
            let stmt = classify(&l.text, l.line)?;
            Ok(ClassifiedLine::new(l.line, l.indent, stmt))
        })
        .collect()
}

/// Convert one line of text into its statement
pub fn classify(text: &str, line: usize) -> Result<Stmt> {
    let shape = shape_of(text).ok_or_else(|| AspError::syntax(line, "Invalid syntax"))?;

    match shape {
        Shape::Import => Ok(Stmt::Import {
            name: target_word(text, line, "Import statement cannot be empty")?,
        }),
        Shape::Delete => Ok(Stmt::Delete {
            var: target_word(text, line, "Delete statement cannot be empty")?,
        }),
        Shape::If => Ok(Stmt::If {
            condition: parse_condition(text, "if", line)?,
        }),
        Shape::Elif => Ok(Stmt::Elif {
            condition: parse_condition(text, "elif", line)?,
        }),
        Shape::While => Ok(Stmt::While {
            condition: parse_condition(text, "while", line)?,
        }),
        Shape::For => {
            header_body(text, "for", line)?;
            warn!(line, "for loops are not implemented, emitting an inert node");
            Ok(Stmt::For)
        }
        Shape::Else => {
            bare_header(text, "else", line)?;
            Ok(Stmt::Else)
        }
        Shape::Try => {
            bare_header(text, "try", line)?;
            Ok(Stmt::Try)
        }
        Shape::Function => parse_function_header(text, line),
        Shape::Assignment => parse_assignment(text, line),
        Shape::Call => parse_call(text, line),
        Shape::Statement => parse_statement(text, line),
        Shape::Mixin => Ok(Stmt::Mixin {
            value: text["@mixin".len()..].trim().to_string(),
        }),
    }
}

fn target_word(text: &str, line: usize, message: &str) -> Result<String> {
    text.split_whitespace()
        .nth(1)
        .map(str::to_string)
        .ok_or_else(|| AspError::syntax(line, message))
}

/// Text between a header keyword and its closing colon
fn header_body<'a>(text: &'a str, keyword: &str, line: usize) -> Result<&'a str> {
    let rest = text[keyword.len()..].trim();
    rest.strip_suffix(':')
        .map(str::trim)
        .ok_or_else(|| AspError::syntax(line, "Expected ':' at the end of the header"))
}

fn bare_header(text: &str, keyword: &str, line: usize) -> Result<()> {
    if header_body(text, keyword, line)?.is_empty() {
        Ok(())
    } else {
        Err(AspError::syntax(line, format!("Unexpected text in {keyword} header")))
    }
}

fn parse_condition(text: &str, keyword: &str, line: usize) -> Result<Vec<MathToken>> {
    parse_math(header_body(text, keyword, line)?, line)
}

/// `#name(a, b):`
fn parse_function_header(text: &str, line: usize) -> Result<Stmt> {
    let signature = header_body(text, "#", line)?;
    let open = signature
        .find('(')
        .ok_or_else(|| AspError::syntax(line, "Missing opening parenthesis"))?;
    let params = signature[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| AspError::syntax(line, "Invalid function parameters"))?;

    if !params.chars().all(|c| is_ident_char(c) || c == ',' || c == ' ') {
        return Err(AspError::syntax(line, "Invalid function parameters"));
    }

    let parameters = if params.trim().is_empty() {
        Vec::new()
    } else {
        params
            .split(',')
            .map(|p| {
                let p = p.trim();
                if is_identifier(p) {
                    Ok(p.to_string())
                } else {
                    Err(AspError::syntax(line, "Invalid function parameters"))
                }
            })
            .collect::<Result<Vec<_>>>()?
    };

    Ok(Stmt::Function {
        name: signature[..open].to_string(),
        parameters,
    })
}

fn parse_assignment(text: &str, line: usize) -> Result<Stmt> {
    let (var, value) = text
        .split_once('=')
        .ok_or_else(|| AspError::syntax(line, "Invalid syntax"))?;
    Ok(Stmt::Assignment {
        var: var.trim().to_string(),
        value: parse_value(value, line)?,
    })
}

fn parse_call(text: &str, line: usize) -> Result<Stmt> {
    let (name, args) = split_call(text).ok_or_else(|| AspError::syntax(line, "Invalid syntax"))?;
    Ok(Stmt::Call {
        name: name.to_string(),
        params: parse_args(args, line)?,
    })
}

fn parse_statement(text: &str, line: usize) -> Result<Stmt> {
    let (name, params) = match text.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, parse_args(rest, line)?),
        None => (text, Vec::new()),
    };
    Ok(Stmt::Statement {
        name: name.to_string(),
        params,
    })
}

#[cfg(test)]
mod tests;
