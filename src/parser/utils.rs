//! Parser utility functions - identifier checks, bracket matching, comma splitting
//!
//! Functions taking a `masked` argument expect the output of
//! [`crate::lexer::mask_strings`] for the same text, so quotes never count as
//! brackets or separators.

use crate::lexer::mask_strings;

pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => chars.all(is_ident_char),
        _ => false,
    }
}

/// Find matching bracket starting from a position (Left to Right)
pub fn find_matching_bracket(s: &str, start: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in s[start..].char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(start + i);
            }
        }
    }
    None
}

/// Whether the bracket opening at byte 0 closes on the last byte
pub fn encloses_all(masked: &str, open: char, close: char) -> bool {
    masked.starts_with(open)
        && find_matching_bracket(masked, 0, open, close) == Some(masked.len() - close.len_utf8())
}

/// Split `name(args)` into name and argument text.
///
/// The parenthesis after the name must close at the very end, so
/// `f(1) + g(2)` is not a call.
pub fn split_call(text: &str) -> Option<(&str, &str)> {
    let open = text.find('(')?;
    let name = text[..open].trim_end();
    if !is_identifier(name) || !text.ends_with(')') {
        return None;
    }
    let masked = mask_strings(text, 0).ok()?;
    if find_matching_bracket(&masked, open, '(', ')')? != text.len() - 1 {
        return None;
    }
    Some((name, &text[open + 1..text.len() - 1]))
}

/// Split on commas that are outside brackets, parentheses and strings
pub fn split_top_level<'a>(text: &'a str, masked: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut depth_bracket = 0i32;
    let mut depth_paren = 0i32;
    let mut start = 0;

    for (i, c) in masked.char_indices() {
        match c {
            '[' => depth_bracket += 1,
            ']' => depth_bracket -= 1,
            '(' => depth_paren += 1,
            ')' => depth_paren -= 1,
            ',' if depth_bracket <= 0 && depth_paren <= 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
