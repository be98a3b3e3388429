use crate::text::{slice_utf16, utf16_len};
use crate::token::Token;

/// Immutable snapshot of a source text, split into lines on `\n`.
///
/// No other normalization is applied: a `\r` before the newline stays part of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            return Self::default();
        }
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Index of the last line; a document always has at least one (possibly empty) line.
    pub fn last_line(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// Length of a line in UTF-16 units.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.line(line).map(utf16_len)
    }

    pub(crate) fn line_text(&self, line: usize) -> &str {
        &self.lines[line]
    }

    pub(crate) fn token_text(&self, line: usize, token: &Token) -> &str {
        slice_utf16(&self.lines[line], token.start_index, token.end_index)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }
}
