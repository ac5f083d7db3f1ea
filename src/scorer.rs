use std::cmp::Reverse;

use crate::{
    catalog::{ProcedureCatalog, ProcedureId},
    normalize::query_tokens,
    record::ProcedureRecord,
    rules,
};

/// Weights for the generic term-overlap heuristics.
const TITLE_TOKEN_BONUS: i64 = 10;
const DESCRIPTION_TOKEN_BONUS: i64 = 4;
const TITLE_CONTAINS_QUERY_BONUS: i64 = 20;
const TITLE_PREFIX_BONUS: i64 = 15;
const ALL_TOKENS_IN_TITLE_BONUS: i64 = 25;
const ALL_TOKENS_IN_DESCRIPTION_BONUS: i64 = 8;

/// A user query prepared for scoring.
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    cleaned: String,
    tokens: Vec<String>,
}

impl Query {
    pub fn new(message: &str) -> Self {
        let raw = message.to_lowercase();
        let tokens = query_tokens(&raw);
        let cleaned = tokens.join(" ");
        Self {
            raw,
            cleaned,
            tokens,
        }
    }

    /// The lowercased message, stop-words and punctuation included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn cleaned(&self) -> &str {
        &self.cleaned
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// One record and its relevance to the current query.
#[derive(Debug, Clone, Copy)]
pub struct ScoredMatch<'a> {
    pub score: i64,
    pub id: ProcedureId,
    pub record: &'a ProcedureRecord,
}

/// Relevance of `record` to `query`. Zero or below means no match.
pub fn score_record(query: &Query, record: &ProcedureRecord) -> i64 {
    let title = record.title.trim().to_lowercase();
    let description = record.description.trim().to_lowercase();
    let cleaned = query.cleaned();
    let cleaned_chars = cleaned.chars().count();
    let tokens = query.tokens();

    let mut score = 0;
    for token in tokens {
        if title.contains(token.as_str()) {
            score += TITLE_TOKEN_BONUS;
        }
        if description.contains(token.as_str()) {
            score += DESCRIPTION_TOKEN_BONUS;
        }
    }

    if cleaned_chars > 5 && title.contains(cleaned) {
        score += TITLE_CONTAINS_QUERY_BONUS;
    }
    if cleaned_chars >= 3 && title.starts_with(cleaned) {
        score += TITLE_PREFIX_BONUS;
    }

    if tokens.len() > 1 {
        if tokens.iter().all(|t| title.contains(t.as_str())) {
            score += ALL_TOKENS_IN_TITLE_BONUS;
        } else if tokens.iter().all(|t| description.contains(t.as_str())) {
            score += ALL_TOKENS_IN_DESCRIPTION_BONUS;
        }
    }

    score + rules::total_delta(query.raw(), &title, &description)
}

/// Score every record and keep the positive ones.
///
/// Sorted by score descending, then by normalized title, then by load order,
/// so the ranking never depends on directory enumeration order.
pub fn score_all<'a>(
    catalog: &'a ProcedureCatalog,
    query: &Query,
) -> Vec<ScoredMatch<'a>> {
    let mut matches: Vec<ScoredMatch<'a>> = catalog
        .iter()
        .filter_map(|(id, record)| {
            let score = score_record(query, record);
            tracing::trace!(title = %record.title, score, "scored procedure");
            (score > 0).then_some(ScoredMatch { score, id, record })
        })
        .collect();

    matches.sort_by_cached_key(|m| {
        (Reverse(m.score), m.record.normalized_title(), m.id)
    });
    matches
}
