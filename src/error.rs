//! Error types for the asp3 parser

use thiserror::Error;

/// Main error type for the parser
#[derive(Debug, Error)]
pub enum AspError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Indentation error @ line {line}: {message}")]
    Indentation { line: usize, message: String },

    #[error("Syntax error @ line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Unterminated block comment opened @ line {line}")]
    UnterminatedComment { line: usize },

    #[error("Internal parser error @ line {line}: {message}")]
    Internal { line: usize, message: String },
}

impl AspError {
    pub fn config(message: impl Into<String>) -> Self {
        AspError::Config {
            message: message.into(),
        }
    }

    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        AspError::Syntax {
            line,
            message: message.into(),
        }
    }

    pub fn indentation(line: usize, message: impl Into<String>) -> Self {
        AspError::Indentation {
            line,
            message: message.into(),
        }
    }

    /// 1-based source line the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            AspError::Indentation { line, .. }
            | AspError::Syntax { line, .. }
            | AspError::UnterminatedComment { line }
            | AspError::Internal { line, .. } => Some(*line),
            AspError::Config { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AspError>;
