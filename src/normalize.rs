//! Query cleaning shared by the scorer and the router.

use std::sync::LazyLock;

use regex::Regex;

/// Function words that carry no retrieval signal in Spanish queries.
pub const STOP_WORDS: &[&str] = &[
    "quiero", "saber", "como", "mi", "un", "una", "el", "la", "los", "las",
    "y", "o", "de", "del", "para", "con", "en", "por", "que", "es", "este",
    "esta", "estos", "estas", "a", "al", "lo", "me", "sobre", "mas", "más",
    "hay", "informacion", "información", "respecto",
];

/// Shortest token kept.
const MIN_TOKEN_CHARS: usize = 3;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid pattern"));

/// Lowercase, strip punctuation, and drop short tokens and stop-words.
///
/// The result is the surviving tokens joined by single spaces. The function
/// is pure and idempotent.
pub fn clean_query(query: &str) -> String {
    query_tokens(query).join(" ")
}

/// Same as [`clean_query`] but returns the tokens.
pub fn query_tokens(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Lowercased and trimmed form used for catalog keys and title comparison.
pub fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}
