//! finrag-answer
//!
//! Composes the corpus, the lexical index and a hosted chat model into
//! the question-answering flow: retrieve grounding fragments, assemble
//! the prompt, hand it to the model, return the answer together with the
//! citations it was grounded on.

pub mod prompt;

use std::sync::OnceLock;

use finrag_core::corpus::Corpus;
use finrag_core::error::{Error, Result};
use finrag_core::traits::{ChatModel, FragmentRetriever};
use finrag_core::types::ScoredFragment;
use finrag_lexical::{retrieve, LexicalIndex};

pub use prompt::build_prompt;

/// Default number of fragments forwarded to the model per question.
pub const DEFAULT_TOP_K: usize = 5;

const ANSWER_TEMPERATURE: f32 = 0.1;
const OVERVIEW_TEMPERATURE: f32 = 0.2;

/// A grounded model reply plus the fragments it was grounded on.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub retrieved: Vec<ScoredFragment>,
}

/// A short company profile plus the source documents behind it.
#[derive(Debug, Clone)]
pub struct Overview {
    pub text: String,
    pub sources: Vec<String>,
}

/// Session-scoped question answering over one company's disclosures.
///
/// Owns the immutable corpus and builds the lexical index exactly once;
/// after that, everything here is read-only and safe to share across
/// threads. Retrieval before [`AnswerEngine::build_index`] completes
/// fails with [`Error::IndexNotReady`].
pub struct AnswerEngine<M: ChatModel> {
    corpus: Corpus,
    index: OnceLock<LexicalIndex>,
    model: M,
    company: String,
    top_k: usize,
}

impl<M: ChatModel> AnswerEngine<M> {
    pub fn new(corpus: Corpus, model: M, company: impl Into<String>) -> Self {
        Self {
            corpus,
            index: OnceLock::new(),
            model,
            company: company.into(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// One-time blocking index build. Repeated calls are no-ops.
    pub fn build_index(&self) -> Result<()> {
        if self.index.get().is_some() {
            return Ok(());
        }
        let index = LexicalIndex::build(self.corpus.fragments())?;
        // A concurrent builder may have won the race; both values are
        // identical since construction is deterministic.
        let _ = self.index.set(index);
        Ok(())
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    fn index(&self) -> Result<&LexicalIndex> {
        self.index.get().ok_or(Error::IndexNotReady)
    }

    /// Answer a free-text question from the corpus, citing by chunk id.
    pub fn answer(&self, question: &str) -> anyhow::Result<Answer> {
        let retrieved = self.retrieve(question, self.top_k)?;
        let prompt = build_prompt(question, &retrieved);
        tracing::debug!(question, fragments = retrieved.len(), "answering");
        let text = self.model.complete(&prompt, ANSWER_TEMPERATURE)?;
        Ok(Answer { text, retrieved })
    }

    /// Generate a 3-4 sentence company profile grounded on the fragments
    /// that best describe the company itself.
    pub fn overview(&self) -> anyhow::Result<Overview> {
        let retrieved = self.retrieve(&format!("What is {}?", self.company), DEFAULT_TOP_K)?;
        let question = format!("Give a 3–4 sentence overview of {}.\n", self.company);
        let prompt = build_prompt(&question, &retrieved);
        let text = self.model.complete(&prompt, OVERVIEW_TEMPERATURE)?;

        let mut sources: Vec<String> = retrieved.iter().map(|h| h.source.clone()).collect();
        sources.sort();
        sources.dedup();
        Ok(Overview { text, sources })
    }
}

impl<M: ChatModel> FragmentRetriever for AnswerEngine<M> {
    fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<ScoredFragment>> {
        retrieve(self.index()?, self.corpus.fragments(), query, top_k)
    }
}
