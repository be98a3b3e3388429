//! Scope-stack predicates.
//!
//! Scope names are dotted and hierarchical, so every check is a prefix match: `comment.line`
//! covers `comment.line.double-slash.js`. Comments match on any scope of the stack, so a token
//! nested under a comment scope still counts. Strings and base tokens only look at the most
//! specific scope, so a string nested inside some unrelated broader scope is not picked up.


const COMMENT_SCOPES: &[&str] = &["punctuation.definition.comment", "comment.block", "comment.line"];

const STRING_SCOPES: &[&str] = &["string.quoted", "constant.character.escape"];

// object literal keys count as base text so key/value pairs can be picked up
const BASE_SCOPES: &[&str] = &["entity", "variable", "support", "meta.object-literal.key"];

const SKIP_SCOPE: &str = "punctuation.whitespace.comment";

const IGNORE_SCOPE: &str = "punctuation.definition.comment";

/// Category a token falls into, in the order the extractor checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeClass {
    String,
    Comment,
    Base,
}

fn has_prefix(scope: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| scope.starts_with(prefix))
}

fn most_specific<S: AsRef<str>>(scopes: &[S]) -> Option<&str> {
    scopes.last().map(|scope| scope.as_ref())
}

pub fn is_comment<S: AsRef<str>>(scopes: &[S]) -> bool {
    scopes.iter().any(|scope| has_prefix(scope.as_ref(), COMMENT_SCOPES))
}

/// Quoted string content or an escape sequence inside one.
pub fn is_string<S: AsRef<str>>(scopes: &[S]) -> bool {
    most_specific(scopes).is_some_and(|scope| has_prefix(scope, STRING_SCOPES))
}

/// Identifier-like tokens: entities, variables, support names and object literal keys.
pub fn is_base<S: AsRef<str>>(scopes: &[S]) -> bool {
    most_specific(scopes).is_some_and(|scope| has_prefix(scope, BASE_SCOPES))
}

/// Whitespace decoration in front of a comment, passed over while merging comments.
pub fn is_skippable(scope: &str) -> bool {
    scope.starts_with(SKIP_SCOPE)
}

/// Comment delimiter punctuation such as `//` or `/*`.
pub fn is_ignorable(scope: &str) -> bool {
    scope.starts_with(IGNORE_SCOPE)
}

pub fn classify<S: AsRef<str>>(scopes: &[S]) -> Option<ScopeClass> {
    if is_string(scopes) {
        Some(ScopeClass::String)
    } else if is_comment(scopes) {
        Some(ScopeClass::Comment)
    } else if is_base(scopes) {
        Some(ScopeClass::Base)
    } else {
        None
    }
}
