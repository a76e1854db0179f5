//! Statement normalization for change detection.
//!
//! The warehouse does not round-trip statement text faithfully, so a
//! character-wise comparison reports drift that isn't there. Statements are
//! compared after collapsing runs of whitespace and ignoring case.
//!
//! This masks changes where case or whitespace is significant, such as inside
//! string literals.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex must compile"));

/// Collapses every run of whitespace to a single space and trims the ends.
pub fn normalize_statement(statement: &str) -> String {
    WHITESPACE_RE.replace_all(statement, " ").trim().to_string()
}

/// Returns true when `old` and `new` differ only in case or whitespace runs.
pub fn suppress_statement_diff(old: &str, new: &str) -> bool {
    normalize_statement(old).eq_ignore_ascii_case(&normalize_statement(new))
}
