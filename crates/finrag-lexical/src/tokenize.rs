//! Deterministic tokenization shared by index construction and query
//! projection.
//!
//! The policy is fixed: lower-case, split on every non-alphanumeric
//! boundary, drop empty tokens, drop stop words. Retrieval quality and
//! reproducibility of ranked output both depend on this never changing
//! between building an index and querying it.

/// Fixed English stop-word list. Terms on this list never enter the
/// vocabulary, so they contribute nothing to any score.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with", "or", "but", "not", "this",
    "these", "they", "them", "their", "there", "then", "than", "so", "if", "when", "where", "why",
    "how", "what", "which", "who", "whom", "whose", "can", "could", "should", "would", "may",
    "might", "must", "shall", "do", "does", "did", "have", "had", "having",
];

pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty() && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}
