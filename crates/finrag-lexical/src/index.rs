//! TF-IDF lexical index: a read-only, numeric representation of the
//! corpus built once per session.
//!
//! Each retained term gets a per-fragment weight of raw term count times
//! smoothed inverse document frequency, `ln((1 + N) / (1 + df)) + 1`, and
//! every fragment vector is L2-normalized. The vocabulary is ordered
//! alphabetically, so rebuilding from the same fragment sequence yields
//! bit-identical output.

use std::collections::{BTreeMap, HashMap, HashSet};

use finrag_core::error::{Error, Result};
use finrag_core::types::Fragment;

use crate::tokenize::tokenize;

/// Sparse weight vector over the index vocabulary: `(term id, weight)`
/// entries sorted by term id. Absent terms weigh 0.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product via merge join over the sorted entry lists.
    pub fn dot(&self, other: &Self) -> f32 {
        let mut sum = 0.0;
        let mut left = self.entries.iter().peekable();
        let mut right = other.entries.iter().peekable();
        while let (Some(&&(li, lw)), Some(&&(ri, rw))) = (left.peek(), right.peek()) {
            match li.cmp(&ri) {
                std::cmp::Ordering::Less => {
                    left.next();
                }
                std::cmp::Ordering::Greater => {
                    right.next();
                }
                std::cmp::Ordering::Equal => {
                    sum += lw * rw;
                    left.next();
                    right.next();
                }
            }
        }
        sum
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }
}

/// Term-weighted model over the corpus. Immutable after [`LexicalIndex::build`];
/// a new corpus requires a new index.
pub struct LexicalIndex {
    terms: Vec<String>,
    term_ids: HashMap<String, usize>,
    idf: Vec<f32>,
    vectors: Vec<SparseVector>,
}

impl LexicalIndex {
    /// Derive the index from the fragment sequence the session loaded.
    ///
    /// Fails with [`Error::EmptyCorpus`] on an empty sequence.
    pub fn build(fragments: &[Fragment]) -> Result<Self> {
        if fragments.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let tokenized: Vec<Vec<String>> = fragments.iter().map(|f| tokenize(&f.text)).collect();

        // Document frequency over the unique terms of each fragment. The
        // BTreeMap walk fixes the vocabulary order alphabetically.
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let terms: Vec<String> = df.keys().map(|t| (*t).to_string()).collect();
        let term_ids: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(id, term)| (term.clone(), id))
            .collect();
        let total = fragments.len() as f32;
        let idf: Vec<f32> = df
            .values()
            .map(|&d| ((1.0 + total) / (1.0 + d as f32)).ln() + 1.0)
            .collect();

        let vectors: Vec<SparseVector> = tokenized
            .iter()
            .map(|tokens| weigh(tokens, &term_ids, &idf))
            .collect();

        tracing::info!(
            vocabulary = terms.len(),
            fragments = fragments.len(),
            "built lexical index"
        );
        Ok(Self {
            terms,
            term_ids,
            idf,
            vectors,
        })
    }

    /// Vocabulary terms in id order (alphabetical).
    pub fn vocabulary(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.term_ids.get(term).map(|&id| self.idf[id])
    }

    /// Number of fragment vectors, which equals the corpus size.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn fragment_vector(&self, index: usize) -> Option<&SparseVector> {
        self.vectors.get(index)
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    /// Project a query into the weight space learned at build time.
    ///
    /// Terms unseen at build time are ignored; the vocabulary never grows
    /// after construction. A query of only unseen or stop-word terms
    /// projects to the zero vector.
    pub fn project(&self, query: &str) -> SparseVector {
        weigh(&tokenize(query), &self.term_ids, &self.idf)
    }
}

fn weigh(tokens: &[String], term_ids: &HashMap<String, usize>, idf: &[f32]) -> SparseVector {
    let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
    for token in tokens {
        if let Some(&id) = term_ids.get(token) {
            *counts.entry(id).or_insert(0.0) += 1.0;
        }
    }

    let mut entries: Vec<(usize, f32)> = counts
        .into_iter()
        .map(|(id, count)| (id, count * idf[id]))
        .collect();

    let norm: f32 = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for (_, weight) in &mut entries {
            *weight /= norm;
        }
    }
    SparseVector { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(id: &str, text: &str) -> Fragment {
        Fragment {
            id: id.to_string(),
            source: "doc.txt".to_string(),
            text: text.to_string(),
            meta: Default::default(),
        }
    }

    #[test]
    fn empty_corpus_is_rejected() {
        assert!(matches!(
            LexicalIndex::build(&[]),
            Err(Error::EmptyCorpus)
        ));
    }

    #[test]
    fn vocabulary_is_alphabetical_and_stop_free() {
        let fragments = vec![
            fragment("c1", "revenue grew and costs fell"),
            fragment("c2", "fuel costs"),
        ];
        let index = LexicalIndex::build(&fragments).expect("build");
        assert_eq!(
            index.vocabulary(),
            ["costs", "fell", "fuel", "grew", "revenue"]
        );
    }

    #[test]
    fn rarer_terms_get_higher_idf() {
        let fragments = vec![
            fragment("c1", "revenue revenue fuel"),
            fragment("c2", "revenue costs"),
            fragment("c3", "revenue growth"),
        ];
        let index = LexicalIndex::build(&fragments).expect("build");
        let common = index.idf("revenue").expect("in vocabulary");
        let rare = index.idf("growth").expect("in vocabulary");
        assert!(rare > common);
        assert_eq!(index.idf("emissions"), None);
    }

    #[test]
    fn fragment_vectors_are_unit_length() {
        let fragments = vec![fragment("c1", "revenue growth outlook")];
        let index = LexicalIndex::build(&fragments).expect("build");
        let norm = index.fragment_vector(0).expect("vector").norm();
        assert!((norm - 1.0).abs() < 1e-5, "expected unit norm, got {norm}");
    }

    #[test]
    fn rebuild_is_bit_identical() {
        let fragments = vec![
            fragment("c1", "Delta reported strong revenue growth this year"),
            fragment("c2", "Delta reported an increase in fuel costs"),
        ];
        let a = LexicalIndex::build(&fragments).expect("build");
        let b = LexicalIndex::build(&fragments).expect("build");
        assert_eq!(a.vocabulary(), b.vocabulary());
        assert_eq!(a.vectors(), b.vectors());
    }

    #[test]
    fn projection_ignores_unseen_terms() {
        let fragments = vec![fragment("c1", "revenue growth")];
        let index = LexicalIndex::build(&fragments).expect("build");
        let with_unseen = index.project("revenue growth emissions");
        let without = index.project("revenue growth");
        assert_eq!(with_unseen, without);
        assert!(index.project("emissions reduction").is_zero());
        assert!(index.project("the and of").is_zero());
        assert!(index.project("").is_zero());
    }
}
