//! Line records produced by the tokenizer

/// One physical source line after comment stripping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Line number (1-indexed)
    pub line: usize,
    /// Nesting depth in indent units, not raw spaces
    pub indent: usize,
    /// Trimmed text, empty for blank and comment-only lines
    pub text: String,
}

impl SourceLine {
    pub fn new(line: usize, indent: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            indent,
            text: text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}
