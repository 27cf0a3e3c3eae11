use crate::error::Result;
use crate::types::ScoredFragment;

/// The sole retrieval surface the rest of the system depends on.
pub trait FragmentRetriever: Send + Sync {
    fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredFragment>>;
}

/// Seam to the hosted chat model. Implementations own transport,
/// authentication and any retry policy; the engine only hands over a
/// fully assembled prompt.
pub trait ChatModel: Send + Sync {
    fn complete(&self, prompt: &str, temperature: f32) -> anyhow::Result<String>;
}
