//! Parser options
//!
//! Options are built once per parse call and passed by reference through
//! every stage that needs them. Hosts that hand options over as loose JSON
//! (the CLI's `--options` file) go through [`ParserOptions::from_json`],
//! which rejects values of the wrong type.

use serde::Serialize;
use serde_json::Value;

use crate::error::{AspError, Result};

pub const DEFAULT_HEADER_TITLE: &str = "_HEADER";
pub const DEFAULT_ASSIGNMENT_KW: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParserOptions {
    /// `type` field of the synthetic header record
    pub header_title: String,
    /// Field name holding an assignment's value
    pub assignment_kw: String,
    /// Reject block comments that are never closed instead of
    /// extending them to the end of the file
    pub strict_comments: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            header_title: DEFAULT_HEADER_TITLE.to_string(),
            assignment_kw: DEFAULT_ASSIGNMENT_KW.to_string(),
            strict_comments: false,
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        if !title.is_empty() {
            self.header_title = title;
        }
        self
    }

    pub fn with_assignment_kw(mut self, kw: impl Into<String>) -> Self {
        let kw = kw.into();
        if !kw.is_empty() {
            self.assignment_kw = kw;
        }
        self
    }

    pub fn with_strict_comments(mut self, strict: bool) -> Self {
        self.strict_comments = strict;
        self
    }

    /// Build options from a JSON object, e.g.
    /// `{"header_title": "MAIN", "assignment_kw": "value"}`.
    ///
    /// Missing keys, `null` and empty strings keep the defaults.
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| AspError::config("opt: options must be an object"))?;

        let mut options = Self::default();

        if let Some(title) = string_option(map.get("header_title"), "header_title")? {
            options = options.with_header_title(title);
        }
        if let Some(kw) = string_option(map.get("assignment_kw"), "assignment_kw")? {
            options = options.with_assignment_kw(kw);
        }
        match map.get("strict_comments") {
            None | Some(Value::Null) => {}
            Some(Value::Bool(strict)) => options.strict_comments = *strict,
            Some(_) => return Err(AspError::config("opt: invalid strict_comments type")),
        }

        Ok(options)
    }
}

fn string_option<'a>(value: Option<&'a Value>, name: &str) -> Result<Option<&'a str>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(AspError::config(format!("opt: invalid {name} type"))),
    }
}
