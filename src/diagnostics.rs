//! AspDiagnostics - parse failure reporting for script authors and tools

use serde::Serialize;
use std::path::Path;

use crate::error::AspError;

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticSpan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct AspDiagnostic {
    pub code: String,
    pub message: String,
    pub severity: DiagnosticSeverity,
    pub span: DiagnosticSpan,
    pub phase: String,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct AspDiagnostics {
    pub diagnostics: Vec<AspDiagnostic>,
}

impl AspDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn add(&mut self, diag: AspDiagnostic) {
        self.diagnostics.push(diag);
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for diag in &self.diagnostics {
            let file = diag.span.file.as_deref().unwrap_or("<input>");
            out.push_str(&format!(
                "[{}] {}:{}:{} {}\n",
                diag.code, file, diag.span.line, diag.span.column, diag.message
            ));
        }
        out
    }
}

pub fn span_for_line(file: Option<&Path>, line: usize) -> DiagnosticSpan {
    DiagnosticSpan {
        file: file.map(|p| p.display().to_string()),
        line,
        column: 1,
    }
}

pub fn error_diag(code: &str, message: String, span: DiagnosticSpan, phase: &str) -> AspDiagnostic {
    AspDiagnostic {
        code: code.to_string(),
        message,
        severity: DiagnosticSeverity::Error,
        span,
        phase: phase.to_string(),
    }
}

/// Convert a parser error into a single diagnostic
pub fn from_error(err: &AspError, file: Option<&Path>) -> AspDiagnostics {
    let (code, message, phase) = match err {
        AspError::Config { message } => ("ASP-CONFIG-ERROR", message.clone(), "config"),
        AspError::Indentation { message, .. } => ("ASP-INDENT-ERROR", message.clone(), "lex"),
        AspError::Syntax { message, .. } => ("ASP-SYNTAX-ERROR", message.clone(), "parse"),
        AspError::UnterminatedComment { .. } => (
            "ASP-UNTERMINATED-COMMENT",
            "Block comment is never closed".to_string(),
            "lex",
        ),
        AspError::Internal { message, .. } => ("ASP-INTERNAL-ERROR", message.clone(), "assemble"),
    };

    let mut diags = AspDiagnostics::new();
    let span = span_for_line(file, err.line().unwrap_or(0));
    diags.add(error_diag(code, message, span, phase));
    diags
}
