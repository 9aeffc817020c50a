//! Markdown detection for bodies declared as plain text.
//!
//! This is a line-based heuristic, not a parser. A line counts once if it
//! starts with any of the recognised Markdown constructs; the body is
//! treated as Markdown when more than a fifth of its lines count, or when
//! more than three lines do.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Fraction of lines that must look like Markdown.
const MIN_MATCH_RATIO: f64 = 0.2;

/// Matched-line count that is enough on its own, regardless of length.
const MIN_MATCH_COUNT: usize = 3;

/// Pattern categories, tried in order against each trimmed line.
static MARKDOWN_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("heading", r"^#{1,6}\s+.+$"),
        ("emphasis", r"^\*{1,3}.+\*{1,3}$"),
        ("unordered list", r"^\s*[-*+]\s+"),
        ("ordered list", r"^\s*\d+\.\s+"),
        ("blockquote", r"^\s*>\s+"),
        ("code fence", r"^```"),
        ("link", r"^\[.+\]\(.+\)"),
        ("horizontal rule", r"^\s*---+\s*$"),
        ("bold", r"^\*\*.+\*\*"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("markdown pattern is valid")))
    .collect()
});

/// Which pattern category a single line falls into, if any.
pub fn line_category(line: &str) -> Option<&'static str> {
    let line = line.trim();
    MARKDOWN_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(line))
        .map(|(name, _)| *name)
}

/// Number of lines that match at least one Markdown pattern.
pub fn markdown_line_count(content: &str) -> usize {
    content
        .split('\n')
        .filter(|line| line_category(line).is_some())
        .count()
}

/// Decide whether plain-declared content is really Markdown.
pub fn is_markdown(content: &str) -> bool {
    let total = content.split('\n').count();
    let matched = markdown_line_count(content);

    let detected = matched as f64 > total as f64 * MIN_MATCH_RATIO || matched > MIN_MATCH_COUNT;
    debug!(matched, total, detected, "Markdown classification");
    detected
}
