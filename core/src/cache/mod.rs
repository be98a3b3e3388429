//! Lazily grown, append-only tokenization of a [`Document`].
//!
//! Line `k` is cached only once lines `0..k` are, because every line starts from the lexer state
//! the previous line ended with. Entries are never recomputed: the document is frozen for the
//! lifetime of the cache.


use anyhow::{Result, anyhow};
use tracing::debug;

use crate::document::Document;
use crate::error::SourceError;
use crate::token::{LineTokens, Token, TokenSource, Tokenized};

pub struct TokenCache<T: TokenSource> {
    document: Document,
    source: T,
    lines: Vec<LineTokens<T::State>>,
}

impl<T: TokenSource> TokenCache<T> {
    pub fn new(document: Document, source: T) -> Self {
        Self {
            document,
            source,
            lines: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    /// Number of lines tokenized so far.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Make sure lines `0..=up_to` are cached, resuming from the last cached end state.
    pub fn ensure_tokenized(&mut self, up_to: usize) -> Result<()> {
        if up_to < self.lines.len() {
            return Ok(());
        }
        if up_to >= self.document.line_count() {
            return Err(anyhow!(
                "cannot tokenize line {} of a {}-line document",
                up_to,
                self.document.line_count()
            ));
        }

        let first = self.lines.len();
        let mut state = self.lines.last().map(|entry| entry.end_state.clone());
        for line in first..=up_to {
            let text = self.document.line_text(line);
            let Tokenized { tokens, state: end_state } = self
                .source
                .tokenize_line(text, state.as_ref())
                .map_err(|err| anyhow!(SourceError::new(line, format!("{err:#}"))))?;
            self.lines.push(LineTokens {
                start_state: state,
                tokens,
                end_state: end_state.clone(),
            });
            state = Some(end_state);
        }
        debug!(first, last = up_to, "tokenized lines");
        Ok(())
    }

    /// Cached tokenization of `line`, tokenizing on demand.
    pub fn line(&mut self, line: usize) -> Result<&LineTokens<T::State>> {
        self.ensure_tokenized(line)?;
        Ok(&self.lines[line])
    }

    /// Cached tokenization of `line` without tokenizing anything.
    pub fn cached(&self, line: usize) -> Option<&LineTokens<T::State>> {
        self.lines.get(line)
    }

    // Callers must have run `ensure_tokenized` for `line`.
    pub(crate) fn tokens(&self, line: usize) -> &[Token] {
        &self.lines[line].tokens
    }
}
