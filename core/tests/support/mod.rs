// A small TextMate-flavoured lexer for a C-like toy language. Block comments carry state across
// lines, which is what the cache has to thread through.

#![allow(dead_code)]

use std::cell::Cell;

use anyhow::{Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use scopespan_core::{Token, TokenSource, Tokenized};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+").unwrap());
static IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+").unwrap());
static ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\\.?").unwrap());
static STRING_BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^[^"\\]+"#).unwrap());

const ROOT: &str = "source.toy";
const KEYWORDS: &[&str] = &["let", "fn", "return", "if", "else"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToyState {
    Code,
    BlockComment,
}

#[derive(Default)]
pub struct ToyLexer {
    calls: Cell<usize>,
    // lines containing this marker make the lexer fail
    poison: Option<&'static str>,
}

impl ToyLexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poisoned(marker: &'static str) -> Self {
        Self {
            poison: Some(marker),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl TokenSource for ToyLexer {
    type State = ToyState;

    fn tokenize_line(&self, line: &str, prior: Option<&ToyState>) -> Result<Tokenized<ToyState>> {
        self.calls.set(self.calls.get() + 1);
        if let Some(marker) = self.poison {
            if line.contains(marker) {
                bail!("grammar cannot handle {marker:?}");
            }
        }

        let mut scanner = Scanner::new(line);
        let mut state = prior.copied().unwrap_or(ToyState::Code);
        while !scanner.done() {
            state = match state {
                ToyState::Code => scanner.code(),
                ToyState::BlockComment => scanner.block_comment(),
            };
        }
        Ok(Tokenized {
            tokens: scanner.tokens,
            state,
        })
    }
}

struct Scanner<'a> {
    line: &'a str,
    pos: usize,
    after_fn: bool,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            line,
            pos: 0,
            after_fn: false,
            tokens: Vec::new(),
        }
    }

    fn done(&self) -> bool {
        self.pos >= self.line.len()
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    fn column(&self, byte: usize) -> usize {
        self.line[..byte].encode_utf16().count()
    }

    fn push(&mut self, len: usize, scopes: &[&str]) {
        let start = self.column(self.pos);
        self.pos += len;
        let end = self.column(self.pos);
        let stack = std::iter::once(ROOT).chain(scopes.iter().copied());
        self.tokens.push(Token::new(start, end, stack));
    }

    fn code(&mut self) -> ToyState {
        let rest = self.rest();
        if rest.starts_with("//") {
            self.push(2, &["comment.line.double-slash.toy", "punctuation.definition.comment.toy"]);
            let remaining = self.rest().len();
            if remaining > 0 {
                self.push(remaining, &["comment.line.double-slash.toy"]);
            }
            return ToyState::Code;
        }
        if rest.starts_with("/*") {
            self.push(2, &["comment.block.toy", "punctuation.definition.comment.toy"]);
            return ToyState::BlockComment;
        }
        if rest.starts_with('"') {
            self.string();
            return ToyState::Code;
        }
        if let Some(m) = WHITESPACE.find(rest) {
            if rest[m.end()..].starts_with("//") {
                self.push(m.end(), &["punctuation.whitespace.comment.leading.toy"]);
            } else {
                self.push(m.end(), &[]);
            }
            return ToyState::Code;
        }
        if let Some(m) = IDENT.find(rest) {
            let word = m.as_str();
            let scope = if KEYWORDS.contains(&word) {
                "keyword.control.toy"
            } else if self.after_fn {
                "entity.name.function.toy"
            } else {
                "variable.other.readwrite.toy"
            };
            self.after_fn = word == "fn";
            self.push(m.end(), &[scope]);
            return ToyState::Code;
        }
        self.after_fn = false;
        if let Some(m) = NUMBER.find(rest) {
            self.push(m.end(), &["constant.numeric.toy"]);
            return ToyState::Code;
        }
        let len = rest.chars().next().map_or(1, char::len_utf8);
        let scope = match &rest[..len] {
            ";" => "punctuation.terminator.statement.toy",
            "(" | ")" | "{" | "}" => "punctuation.section.toy",
            _ => "keyword.operator.toy",
        };
        self.push(len, &[scope]);
        ToyState::Code
    }

    fn block_comment(&mut self) -> ToyState {
        let rest = self.rest();
        match rest.find("*/") {
            Some(at) => {
                if at > 0 {
                    self.push(at, &["comment.block.toy"]);
                }
                self.push(2, &["comment.block.toy", "punctuation.definition.comment.toy"]);
                ToyState::Code
            }
            None => {
                self.push(rest.len(), &["comment.block.toy"]);
                ToyState::BlockComment
            }
        }
    }

    fn string(&mut self) {
        self.push(1, &["string.quoted.double.toy", "punctuation.definition.string.begin.toy"]);
        while !self.done() {
            let rest = self.rest();
            if rest.starts_with('"') {
                self.push(1, &["string.quoted.double.toy", "punctuation.definition.string.end.toy"]);
                return;
            }
            if let Some(m) = ESCAPE.find(rest) {
                self.push(m.end(), &["string.quoted.double.toy", "constant.character.escape.toy"]);
                continue;
            }
            let len = STRING_BODY.find(rest).map_or(rest.len(), |m| m.end());
            self.push(len, &["string.quoted.double.toy"]);
        }
    }
}

/// Install a test subscriber once so `RUST_LOG=scopespan_core=trace` shows merge traces.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
