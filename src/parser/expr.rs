//! Expression and argument parsing
//!
//! Expressions stay flat: `parse_math` returns the operator/operand stream
//! in source order and leaves precedence to whoever evaluates it.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ast::{MathToken, Operator, Value};
use super::utils::{encloses_all, is_ident_char, is_identifier, split_call, split_top_level};
use crate::error::{AspError, Result};
use crate::lexer::{mask_strings, MASK};

/// `var[3]`
static ELEMENT_ACCESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*\[\s*([0-9]+)\s*\]$").unwrap());

/// `module.name` or `module.name(...)`
static MODULE_ACCESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\.(.+)$").unwrap());

/// Tokenize an arithmetic/comparison expression.
///
/// Whitespace outside string literals is dropped. At least one operator is
/// required, so anything yielding fewer than two tokens is rejected.
pub fn parse_math(text: &str, line: usize) -> Result<Vec<MathToken>> {
    let mut tokens = Vec::new();
    let mut operand = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '"' {
            // string literals are a single operand
            let end = rest[1..].find('"').map(|i| i + 2).unwrap_or(rest.len());
            operand.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
            continue;
        }
        if let Some((op, len)) = Operator::match_prefix(rest) {
            flush_operand(&mut operand, &mut tokens, line)?;
            tokens.push(MathToken::Op(op));
            rest = &rest[len..];
            continue;
        }
        operand.push(c);
        rest = &rest[c.len_utf8()..];
    }
    flush_operand(&mut operand, &mut tokens, line)?;

    if tokens.len() <= 1 {
        return Err(AspError::syntax(line, "Invalid equation"));
    }
    Ok(tokens)
}

fn flush_operand(operand: &mut String, tokens: &mut Vec<MathToken>, line: usize) -> Result<()> {
    if operand.is_empty() {
        return Ok(());
    }
    let text = std::mem::take(operand);
    match checked_number(&text, line)? {
        Some(n) => tokens.push(MathToken::Num(n)),
        None => tokens.push(MathToken::Name(text)),
    }
    Ok(())
}

/// Numeric literal; words such as `inf` or `nan` are not numbers here,
/// and neither is anything that overflows to infinity
pub fn parse_number(text: &str) -> Option<f64> {
    numeric_literal(text).filter(|n| n.is_finite())
}

fn numeric_literal(text: &str) -> Option<f64> {
    let first = text.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '.' | '+' | '-')) {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Like [`parse_number`], but a literal that does not fit in an `f64`
/// (`1e999`) is an error instead of falling through to a name
fn checked_number(text: &str, line: usize) -> Result<Option<f64>> {
    match numeric_literal(text) {
        Some(n) if !n.is_finite() => Err(AspError::syntax(line, "Number out of range")),
        n => Ok(n),
    }
}

/// Parse a comma-separated argument list into values
pub fn parse_args(text: &str, line: usize) -> Result<Vec<Value>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let masked = mask_strings(text, line)?;
    split_top_level(text, &masked)
        .into_iter()
        .map(|arg| parse_value(arg, line))
        .collect()
}

/// Classify a single literal or reference
pub fn parse_value(text: &str, line: usize) -> Result<Value> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AspError::syntax(line, "Missing value"));
    }

    match text {
        "True" => return Ok(Value::Bool(true)),
        "False" => return Ok(Value::Bool(false)),
        _ => {}
    }
    if let Some(n) = checked_number(text, line)? {
        return Ok(Value::Num(n));
    }

    let masked = mask_strings(text, line)?;

    if encloses_all(&masked, '[', ']') {
        let elements = parse_args(&text[1..text.len() - 1], line)?;
        return Ok(Value::Array(elements));
    }

    if let Some(call) = parse_module_call(text, line)? {
        return Ok(call);
    }

    if let Some((name, args)) = split_call(text) {
        return Ok(Value::Call {
            module: None,
            name: name.to_string(),
            params: parse_args(args, line)?,
        });
    }

    if !text.contains('"') {
        if let Some(caps) = ELEMENT_ACCESS.captures(text) {
            let element = caps[2]
                .parse::<usize>()
                .map_err(|_| AspError::syntax(line, "Invalid element index"))?;
            return Ok(Value::Elm {
                var: caps[1].to_string(),
                element,
            });
        }
        if text.chars().all(is_ident_char) {
            return Ok(Value::Var(text.to_string()));
        }
        return parse_math(text, line)
            .map(Value::Math)
            .map_err(|_| AspError::syntax(line, "Invalid variable name"));
    }

    // quoted: the whole value must be string literal text
    if masked.chars().any(|c| c != MASK) {
        return Err(AspError::syntax(line, "Invalid variable format"));
    }
    Ok(Value::Str(resolve_escapes(&text[1..text.len() - 1])))
}

/// `module.name` (zero-argument call) or `module.name(args)`
fn parse_module_call(text: &str, line: usize) -> Result<Option<Value>> {
    let Some(caps) = MODULE_ACCESS.captures(text) else {
        return Ok(None);
    };
    let module = caps[1].to_string();
    let rest = caps.get(2).map_or("", |m| m.as_str());

    if is_identifier(rest) {
        return Ok(Some(Value::Call {
            module: Some(module),
            name: rest.to_string(),
            params: Vec::new(),
        }));
    }
    match split_call(rest) {
        Some((name, args)) => Ok(Some(Value::Call {
            module: Some(module),
            name: name.to_string(),
            params: parse_args(args, line)?,
        })),
        None => Ok(None),
    }
}

/// Resolve `\n \r \t \b \q`; other backslashes are kept as written
pub fn resolve_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let resolved = match chars.peek() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('b') => '\u{8}',
            Some('q') => '"',
            _ => {
                out.push(c);
                continue;
            }
        };
        chars.next();
        out.push(resolved);
    }
    out
}
