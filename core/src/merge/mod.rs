//! Growing a seed token into the contiguous run of same-category tokens around it.
//!
//! Both directions share one scan: walk tokens away from the seed, pass over skippable tokens,
//! absorb matching ones, and stop at the first token that neither matches nor is skippable. When
//! a line runs out the scan moves to the neighbouring line, but only while it stays inside the
//! rule's [`LineWindow`]; lines outside the window are never tokenized.

pub mod collapse;


use anyhow::Result;
use tracing::trace;

use crate::cache::TokenCache;
use crate::position::{Position, Range};
use crate::scope;
use crate::token::{Token, TokenSource};

/// Inclusive bounds on the lines a merge may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWindow {
    pub min_line: usize,
    pub max_line: usize,
}

impl LineWindow {
    pub fn new(min_line: usize, max_line: usize) -> Self {
        Self { min_line, max_line }
    }

    pub fn single(line: usize) -> Self {
        Self::new(line, line)
    }

    pub fn contains(&self, line: usize) -> bool {
        self.min_line <= line && line <= self.max_line
    }
}

/// What to merge, what to pass over and how far to go.
#[derive(Debug, Clone, Copy)]
pub struct MergeRule {
    pub classify: fn(&[String]) -> bool,
    /// Checked against the most specific scope; matching tokens neither end the run nor add text.
    pub skip: Option<fn(&str) -> bool>,
    pub window: LineWindow,
    /// Rewrap lines with [`collapse::collapse_lines`] instead of keeping raw line breaks.
    pub collapse: bool,
}

impl MergeRule {
    /// String content and escapes, confined to one line and never rewrapped.
    pub fn string_literal(line: usize) -> Self {
        Self {
            classify: scope::is_string,
            skip: None,
            window: LineWindow::single(line),
            collapse: false,
        }
    }

    /// Comment tokens across `window`, passing over leading whitespace decoration.
    pub fn comment_block(window: LineWindow, collapse: bool) -> Self {
        Self {
            classify: scope::is_comment,
            skip: Some(scope::is_skippable),
            window,
            collapse,
        }
    }

    fn skips(&self, token: &Token) -> bool {
        match (self.skip, token.scope()) {
            (Some(skip), Some(scope)) => skip(scope),
            _ => false,
        }
    }
}

/// Token the merge grows from. It is assumed to satisfy the rule's `classify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub line: usize,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedSpan {
    pub text: String,
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

impl Direction {
    fn step(self, index: usize) -> Option<usize> {
        match self {
            Direction::Backward => index.checked_sub(1),
            Direction::Forward => index.checked_add(1),
        }
    }

    // first index to look at after entering a line with `len` tokens
    fn entry(self, len: usize) -> Option<usize> {
        match self {
            Direction::Backward => len.checked_sub(1),
            Direction::Forward => Some(0),
        }
    }

    fn next_line(self, line: usize, window: LineWindow) -> Option<usize> {
        match self {
            Direction::Backward => (line > window.min_line).then(|| line - 1),
            Direction::Forward => (line < window.max_line).then(|| line + 1),
        }
    }

    // the edge of a token that bounds the span in this direction
    fn edge(self, token: &Token) -> usize {
        match self {
            Direction::Backward => token.start_index,
            Direction::Forward => token.end_index,
        }
    }
}

// How far one direction got, with the absorbed text in scan order.
#[derive(Debug)]
struct Reach {
    line: usize,
    character: usize,
    pieces: Vec<String>,
    pending_breaks: usize,
}

impl Reach {
    fn new(line: usize, character: usize) -> Self {
        Self {
            line,
            character,
            pieces: Vec::new(),
            pending_breaks: 0,
        }
    }

    // Line breaks are only committed once a token of the new line is taken.
    fn absorb(&mut self, line: usize, character: usize, text: &str) {
        for _ in 0..self.pending_breaks {
            self.pieces.push("\n".to_string());
        }
        self.pending_breaks = 0;
        self.pieces.push(text.to_string());
        self.line = line;
        self.character = character;
    }

    fn position(&self) -> Result<Position> {
        Position::from_offsets(self.line, self.character)
    }
}

pub struct SpanMerger<'a, T: TokenSource> {
    cache: &'a mut TokenCache<T>,
}

impl<'a, T: TokenSource> SpanMerger<'a, T> {
    pub fn new(cache: &'a mut TokenCache<T>) -> Self {
        Self { cache }
    }

    pub fn merge(&mut self, seed: Seed, rule: &MergeRule) -> Result<MergedSpan> {
        debug_assert!(rule.window.contains(seed.line), "seed line outside merge window");
        self.cache.ensure_tokenized(seed.line)?;
        let token = self.cache.tokens(seed.line)[seed.index].clone();

        let before = self.reach(seed, &token, Direction::Backward, rule)?;
        let after = self.reach(seed, &token, Direction::Forward, rule)?;

        let mut raw = String::new();
        for piece in before.pieces.iter().rev() {
            raw.push_str(piece);
        }
        raw.push_str(self.cache.document().token_text(seed.line, &token));
        for piece in &after.pieces {
            raw.push_str(piece);
        }

        let text = if rule.collapse { collapse::collapse_lines(&raw) } else { raw };
        Ok(MergedSpan {
            text,
            range: Range::new(before.position()?, after.position()?),
        })
    }

    fn reach(&mut self, seed: Seed, token: &Token, direction: Direction, rule: &MergeRule) -> Result<Reach> {
        let mut reach = Reach::new(seed.line, direction.edge(token));
        let mut line = seed.line;
        let mut next = direction.step(seed.index);

        loop {
            let tokens = self.cache.tokens(line);
            while let Some(index) = next.filter(|&index| index < tokens.len()) {
                next = direction.step(index);
                let candidate = &tokens[index];
                if rule.skips(candidate) {
                    continue;
                }
                if !(rule.classify)(&candidate.scopes) {
                    return Ok(reach);
                }
                let text = self.cache.document().token_text(line, candidate);
                reach.absorb(line, direction.edge(candidate), text);
            }

            let Some(next_line) = direction.next_line(line, rule.window) else {
                return Ok(reach);
            };
            self.cache.ensure_tokenized(next_line)?;
            trace!(from = line, to = next_line, ?direction, "merge crossed line");
            line = next_line;
            reach.pending_breaks += 1;
            next = direction.entry(self.cache.tokens(line).len());
        }
    }
}
