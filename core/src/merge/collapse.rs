//! Joining of merged comment lines.
//!
//! A line break is collapsed into a single space when the text so far ends with an upper-case-led
//! sentence carrying an end mark and the next line starts in lower case. The trigger is
//! deliberately narrow: it targets prose in documentation comments, everything else keeps its
//! line breaks.

const DECORATION: &[char] = &['/', ' ', '*'];

const END_MARKS: &[char] = &['.', '!', '?', '。', '！', '？'];

/// Drop the leading run of comment decoration (`/`, space, `*`).
pub fn strip_decoration(line: &str) -> &str {
    line.trim_start_matches(DECORATION)
}

fn is_upper_led(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_uppercase)
}

fn is_lower_led(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_lowercase)
}

fn has_end_mark(line: &str) -> bool {
    line.trim_end().ends_with(END_MARKS)
}

/// Drop only the comment delimiter of a line: leading whitespace, one `//`, `/*`, `*/` or `*` run,
/// a single following space and a closing `*/`. Content such as `/usr/bin` or `*emphasis*` stays.
pub fn strip_delimiter(line: &str) -> &str {
    let trimmed = line.trim_start();
    let body = if let Some(rest) = trimmed.strip_prefix("//") {
        rest.trim_start_matches('/')
    } else if let Some(rest) = trimmed.strip_prefix("/*") {
        rest.trim_start_matches('*')
    } else if let Some(rest) = trimmed.strip_prefix("*/") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix('*') {
        rest
    } else {
        trimmed
    };
    let body = body.strip_prefix(' ').unwrap_or(body);
    match body.trim_end().strip_suffix("*/") {
        Some(inner) => inner.trim_end(),
        None => body,
    }
}

/// Whether `next` reads as a continuation of the sentence ending `last`.
pub fn continues_sentence(last: &str, next: &str) -> bool {
    let last = strip_decoration(last);
    let next = strip_decoration(next);
    is_upper_led(last) && has_end_mark(last) && is_lower_led(next)
}

/// Append `next_line` to `merged`, either after a space or after a line break.
///
/// A joined line loses all of its decoration; a line kept after a break only loses its delimiter.
pub fn collapse(merged: &mut String, next_line: &str) {
    let last = merged.rsplit_once('\n').map_or(merged.as_str(), |(_, tail)| tail);
    if continues_sentence(last, next_line) {
        merged.push(' ');
        merged.push_str(strip_decoration(next_line));
    } else {
        merged.push('\n');
        merged.push_str(strip_delimiter(next_line));
    }
}

/// Rebuild merged comment text from raw lines.
///
/// Each line loses its delimiter; lines that are nothing but decoration (`/**`, ` */`) at either
/// end are dropped, blank lines in between are kept as paragraph breaks.
pub fn collapse_lines(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').collect();
    let Some(first) = lines.iter().position(|line| !strip_decoration(line).is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !strip_decoration(line).is_empty())
        .unwrap_or(first);

    let mut merged = strip_delimiter(lines[first]).to_string();
    for line in &lines[first + 1..=last] {
        collapse(&mut merged, line);
    }
    merged
}
