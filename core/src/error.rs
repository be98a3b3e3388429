use std::fmt;

use crate::position::Position;

/// The token source failed on a line; nothing from that line onward is cached.
#[derive(Debug)]
pub struct SourceError {
    pub line: usize,
    pub message: String,
}

impl SourceError {
    pub fn new(line: usize, message: String) -> Self {
        Self { line, message }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to tokenize line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for SourceError {}

/// A query referenced a line the document does not have.
#[derive(Debug)]
pub struct PositionError {
    pub position: Position,
    pub line_count: usize,
}

impl PositionError {
    pub fn new(position: Position, line_count: usize) -> Self {
        Self { position, line_count }
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "position {} is outside the document ({} lines)",
            self.position, self.line_count
        )
    }
}

impl std::error::Error for PositionError {}
