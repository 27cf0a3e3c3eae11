//! Domain types shared by the corpus store, the lexical engine and the
//! answer layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type FragmentId = String;
pub type Meta = HashMap<String, String>;

/// A retrievable unit of corpus text.
///
/// - `id`: stable identifier, unique within the loaded corpus
/// - `source`: originating document (e.g. a filename); many fragments
///   may share one source, which is what citation grouping keys on
/// - `text`: the fragment payload, never empty
/// - `meta`: extra input columns, passed through untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub id: FragmentId,
    pub source: String,
    pub text: String,
    #[serde(default)]
    pub meta: Meta,
}

/// One retrieval hit: a fragment paired with its similarity score.
///
/// `score` is only meaningful relative to the other hits of the same
/// query. Ordering within a result is descending by score, ties keep
/// corpus order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredFragment {
    pub id: FragmentId,
    pub source: String,
    pub text: String,
    pub score: f32,
}
