//! Rank fragments against a query using the lexical index.

use finrag_core::error::{Error, Result};
use finrag_core::types::{Fragment, ScoredFragment};

use crate::index::{LexicalIndex, SparseVector};

/// Cosine similarity with a zero-vector guard: any zero operand scores 0.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return 0.0;
    }
    a.dot(b) / (norm_a * norm_b)
}

/// Score every fragment against `query` and return the best `top_k` in
/// descending score order.
///
/// `fragments` must be the same sequence the index was built from. A
/// `top_k` beyond the corpus size clamps to the corpus size; `top_k == 0`
/// is a contract violation. Equal scores keep corpus order (stable sort),
/// so identical queries always cite identically. Pure: no shared state is
/// touched and repeated calls return identical output.
pub fn retrieve(
    index: &LexicalIndex,
    fragments: &[Fragment],
    query: &str,
    top_k: usize,
) -> Result<Vec<ScoredFragment>> {
    if top_k == 0 {
        return Err(Error::InvalidTopK(top_k));
    }

    let projected = index.project(query);
    let mut hits: Vec<ScoredFragment> = fragments
        .iter()
        .zip(index.vectors())
        .map(|(fragment, vector)| ScoredFragment {
            id: fragment.id.clone(),
            source: fragment.source.clone(),
            text: fragment.text.clone(),
            score: cosine(&projected, vector),
        })
        .collect();

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hits.truncate(top_k);

    tracing::debug!(query, returned = hits.len(), "retrieved fragments");
    Ok(hits)
}
