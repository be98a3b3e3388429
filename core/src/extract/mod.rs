//! Cursor-to-span extraction: the entry point editor glue talks to.


use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::TokenCache;
use crate::config::ExtractorConfig;
use crate::document::Document;
use crate::merge::{LineWindow, MergeRule, MergedSpan, Seed, SpanMerger};
use crate::position::{self, Position, Range};
use crate::scope::{self, ScopeClass};
use crate::token::{Token, TokenSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpanKind {
    /// String content merged within its line.
    String,
    /// Comment run merged across lines.
    Comment,
    /// A single identifier-like token.
    Base,
    /// A single token of any other kind, returned because the caller asked for the full token.
    Token,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanResult {
    pub text: String,
    pub range: Range,
    /// Set for single-token results, which callers usually turn into words before translating.
    pub humanize: bool,
    pub kind: SpanKind,
}

/// Finds translatable spans in one frozen document.
///
/// Tokenization happens lazily and is cached for the extractor's lifetime; build a new extractor
/// when the text changes.
pub struct SpanExtractor<T: TokenSource> {
    cache: TokenCache<T>,
    config: ExtractorConfig,
}

impl<T: TokenSource> SpanExtractor<T> {
    pub fn new(text: &str, source: T, config: ExtractorConfig) -> Self {
        Self::with_document(Document::from_text(text), source, config)
    }

    pub fn with_document(document: Document, source: T, config: ExtractorConfig) -> Self {
        Self {
            cache: TokenCache::new(document, source),
            config,
        }
    }

    pub fn document(&self) -> &Document {
        self.cache.document()
    }

    pub fn cache(&self) -> &TokenCache<T> {
        &self.cache
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The span under `position`, or `None` when the token there is not translatable.
    ///
    /// Fails with [`PositionError`](crate::error::PositionError) when the line does not exist and
    /// with [`SourceError`](crate::error::SourceError) when the grammar fails on a line the query
    /// needs.
    ///
    /// Strings merge within their line, comments merge across the whole document, identifier-like
    /// tokens come back alone. With `full_token` any other token is returned alone as well.
    pub fn compute_span(&mut self, position: Position, full_token: bool) -> Result<Option<SpanResult>> {
        let line = position.line as usize;
        let index = position::resolve(&mut self.cache, position)?;
        let Some(token) = self.cache.tokens(line).get(index).cloned() else {
            debug!(%position, "no tokens on line");
            return Ok(None);
        };
        let seed = Seed { line, index };

        let class = scope::classify(&token.scopes);
        debug!(%position, ?class, scope = token.scope(), "classified token");
        let result = match class {
            Some(ScopeClass::String) => {
                let span = self.merge(seed, &MergeRule::string_literal(line))?;
                Some(merged(span, SpanKind::String))
            }
            Some(ScopeClass::Comment) => {
                let window = LineWindow::new(0, self.cache.document().last_line());
                let rule = MergeRule::comment_block(window, self.config.multi_line_merge);
                let span = self.merge(seed, &rule)?;
                Some(merged(span, SpanKind::Comment))
            }
            Some(ScopeClass::Base) => Some(self.single(line, &token, SpanKind::Base)?),
            None if full_token => Some(self.single(line, &token, SpanKind::Token)?),
            None => None,
        };
        Ok(result)
    }

    fn merge(&mut self, seed: Seed, rule: &MergeRule) -> Result<MergedSpan> {
        SpanMerger::new(&mut self.cache).merge(seed, rule)
    }

    fn single(&self, line: usize, token: &Token, kind: SpanKind) -> Result<SpanResult> {
        Ok(SpanResult {
            text: self.cache.document().token_text(line, token).to_string(),
            range: Range::new(
                Position::from_offsets(line, token.start_index)?,
                Position::from_offsets(line, token.end_index)?,
            ),
            humanize: true,
            kind,
        })
    }
}

fn merged(span: MergedSpan, kind: SpanKind) -> SpanResult {
    SpanResult {
        text: span.text,
        range: span.range,
        humanize: false,
        kind,
    }
}
