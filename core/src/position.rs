use std::fmt;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::cache::TokenCache;
use crate::error::PositionError;
use crate::token::{Token, TokenSource};

/// Zero-based line and UTF-16 column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Build a position from in-memory line and column offsets, which must fit in `u32`.
    pub fn from_offsets(line: usize, character: usize) -> Result<Self> {
        let line = u32::try_from(line).map_err(|_| anyhow!("line {line} does not fit in a position"))?;
        let character =
            u32::try_from(character).map_err(|_| anyhow!("column {character} does not fit in a position"))?;
        Ok(Self::new(line, character))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// Start/end pair; the end column is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn is_multiline(&self) -> bool {
        self.start.line != self.end.line
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multiline() {
            write!(f, "{}-{}", self.start, self.end)
        } else {
            write!(f, "{}-{}", self.start, self.end.character)
        }
    }
}

/// Index of the token the cursor sits in or right after.
///
/// Picks the last token starting at or before `character - 1`, so a cursor on a boundary selects
/// the token to its left. Falls back to 0 when nothing qualifies.
pub fn token_index_at(tokens: &[Token], character: u32) -> usize {
    let Some(column) = (character as usize).checked_sub(1) else {
        return 0;
    };
    tokens.iter().rposition(|token| token.start_index <= column).unwrap_or(0)
}

/// Resolve `position` against the cache, tokenizing up to its line first.
pub fn resolve<T: TokenSource>(cache: &mut TokenCache<T>, position: Position) -> Result<usize> {
    let line = position.line as usize;
    if line >= cache.document().line_count() {
        return Err(anyhow!(PositionError::new(position, cache.document().line_count())));
    }
    let entry = cache.line(line)?;
    Ok(token_index_at(&entry.tokens, position.character))
}
