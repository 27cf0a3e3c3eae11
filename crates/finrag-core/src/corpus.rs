//! Corpus store: the immutable, ordered fragment collection for a session.
//!
//! The input is a pre-chunked table with `chunk_id`, `source_file` and
//! `chunk_text` columns; any further columns are carried along as fragment
//! metadata. Row order is preserved exactly because it doubles as the
//! tie-break order during retrieval.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{Fragment, Meta};

pub const ID_COLUMN: &str = "chunk_id";
pub const SOURCE_COLUMN: &str = "source_file";
pub const TEXT_COLUMN: &str = "chunk_text";

/// The fixed fragment collection backing one session.
///
/// Loaded once, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Corpus {
    fragments: Vec<Fragment>,
}

impl Corpus {
    /// Wrap an already-assembled fragment sequence, applying the same
    /// validation as the file loaders.
    pub fn from_fragments(fragments: Vec<Fragment>) -> Result<Self> {
        validate(&fragments)?;
        Ok(Self { fragments })
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let corpus = Self::from_csv_reader(file)?;
        tracing::info!(
            fragments = corpus.len(),
            path = %path.display(),
            "loaded corpus"
        );
        Ok(corpus)
    }

    /// Parse a chunk table from any reader.
    ///
    /// Required columns map onto [`Fragment`] as `chunk_id` -> `id`,
    /// `source_file` -> `source`, `chunk_text` -> `text`; everything else
    /// lands in `meta` untouched.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|e| Error::MalformedCorpus(format!("unreadable header row: {e}")))?
            .clone();

        let column = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::MalformedCorpus(format!("missing required column '{name}'")))
        };
        let id_col = column(ID_COLUMN)?;
        let source_col = column(SOURCE_COLUMN)?;
        let text_col = column(TEXT_COLUMN)?;

        let mut fragments = Vec::new();
        for (row, record) in csv_reader.records().enumerate() {
            let record =
                record.map_err(|e| Error::MalformedCorpus(format!("row {}: {e}", row + 1)))?;
            let field = |col: usize, name: &str| -> Result<String> {
                record
                    .get(col)
                    .map(str::to_string)
                    .ok_or_else(|| Error::MalformedCorpus(format!("row {}: missing '{name}'", row + 1)))
            };
            let mut meta = Meta::new();
            for (col, value) in record.iter().enumerate() {
                if col == id_col || col == source_col || col == text_col {
                    continue;
                }
                if let Some(name) = headers.get(col) {
                    meta.insert(name.to_string(), value.to_string());
                }
            }
            fragments.push(Fragment {
                id: field(id_col, ID_COLUMN)?,
                source: field(source_col, SOURCE_COLUMN)?,
                text: field(text_col, TEXT_COLUMN)?,
                meta,
            });
        }

        Self::from_fragments(fragments)
    }

    /// Fragments in load order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.id == id)
    }

    /// Distinct source documents, sorted.
    pub fn sources(&self) -> Vec<String> {
        let mut sources: Vec<String> = self
            .fragments
            .iter()
            .map(|f| f.source.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        sources.sort();
        sources
    }
}

fn validate(fragments: &[Fragment]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for fragment in fragments {
        if fragment.id.trim().is_empty() {
            return Err(Error::MalformedCorpus("empty chunk_id".to_string()));
        }
        if fragment.text.trim().is_empty() {
            return Err(Error::MalformedCorpus(format!(
                "fragment '{}' has empty chunk_text",
                fragment.id
            )));
        }
        if !seen.insert(fragment.id.as_str()) {
            return Err(Error::MalformedCorpus(format!(
                "duplicate chunk_id '{}'",
                fragment.id
            )));
        }
    }
    Ok(())
}
