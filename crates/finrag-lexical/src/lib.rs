//! finrag-lexical
//!
//! Hand-built TF-IDF indexing and cosine retrieval over the session
//! corpus. The index is derived once per corpus load and read-only
//! afterwards; retrieval is a pure function of (index, fragments, query).

pub mod index;
pub mod retrieve;
pub mod tokenize;

pub use index::{LexicalIndex, SparseVector};
pub use retrieve::{cosine, retrieve};
