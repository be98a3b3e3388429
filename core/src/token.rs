use std::fmt::Debug;

use anyhow::Result;

/// A run of characters on one line, tagged with the scope stack the grammar assigned to it.
///
/// `start_index`/`end_index` are UTF-16 columns into the owning line (end exclusive). Scopes are
/// ordered from the broadest (`source.*`) to the most specific, so the token's own scope is last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub start_index: usize,
    pub end_index: usize,
    pub scopes: Vec<String>,
}

impl Token {
    pub fn new<I, S>(start_index: usize, end_index: usize, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            start_index,
            end_index,
            scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    /// The most specific scope of the stack, if the grammar assigned any.
    pub fn scope(&self) -> Option<&str> {
        self.scopes.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of tokenizing one line: its tokens plus the lexer state to feed the next line.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenized<S> {
    pub tokens: Vec<Token>,
    pub state: S,
}

/// The grammar engine boundary.
///
/// Implementations must be deterministic for identical `(line, prior)` input; the state value is
/// threaded from one line to the next and never inspected by this crate.
pub trait TokenSource {
    type State: Clone + PartialEq + Debug;

    fn tokenize_line(&self, line: &str, prior: Option<&Self::State>) -> Result<Tokenized<Self::State>>;
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    type State = T::State;

    fn tokenize_line(&self, line: &str, prior: Option<&Self::State>) -> Result<Tokenized<Self::State>> {
        (**self).tokenize_line(line, prior)
    }
}

/// Cached tokenization of a single document line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTokens<S> {
    /// Lexer state before the line; `None` for the first line.
    pub start_state: Option<S>,
    pub tokens: Vec<Token>,
    pub end_state: S,
}
