//! Line and token transforms over working buffers.
//!
//! Every function here is pure: it takes a buffer and returns the new one.
//! [`crate::TextUnit`] owns the buffers and decides when to call them.

use std::sync::OnceLock;

use regex::Regex;

/// Word runs (word characters, apostrophes, hyphens) or single punctuation marks.
static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"[\w'-]+|[[:punct:]\p{P}]")
            .expect("Invalid regex pattern - this is a compile-time constant")
    })
}

/// Split text into lines, each keeping its terminator.
///
/// The last line has no terminator when the text does not end with one.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// True for a line that is nothing but a line terminator.
pub fn is_blank_line(line: &str) -> bool {
    line == "\n" || line == "\r\n"
}

/// Drop every line containing `marker` anywhere, string literals included.
pub fn remove_comments(lines: Vec<String>, marker: &str) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| !line.contains(marker))
        .collect()
}

/// Drop lines that consist of a single line terminator.
pub fn remove_blank_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| !is_blank_line(line))
        .collect()
}

/// Whitespace-delimited tokens of every line, flattened in order.
pub fn split_by_space(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.split_whitespace().map(str::to_string))
        .collect()
}

/// Word runs and single punctuation characters of every line, flattened in order.
pub fn split_punctuation(lines: &[String]) -> Vec<String> {
    let re = token_regex();
    lines
        .iter()
        .flat_map(|line| re.find_iter(line).map(|m| m.as_str().to_string()))
        .collect()
}

/// One entry per character across all lines, terminators included.
pub fn split_characters(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.chars().map(String::from))
        .collect()
}
