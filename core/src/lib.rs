//! Locate translatable spans (comments, string literals, identifier-like tokens) in a document
//! tokenized by a TextMate-style grammar engine.

pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod merge;
pub mod position;
pub mod scope;
pub mod token;

mod text;


pub use cache::TokenCache;
pub use config::ExtractorConfig;
pub use document::Document;
pub use error::{PositionError, SourceError};
pub use extract::{SpanExtractor, SpanKind, SpanResult};
pub use merge::{LineWindow, MergeRule, MergedSpan, Seed, SpanMerger};
pub use position::{Position, Range};
pub use scope::ScopeClass;
pub use token::{LineTokens, Token, TokenSource, Tokenized};
