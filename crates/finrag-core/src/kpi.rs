//! Verified KPI summary — the curated figures shown next to the Q&A flow.
//!
//! These come from a hand-checked JSON document, not from retrieval, so the
//! engine never consults them. `value` stays a raw JSON value: most entries
//! are numbers or strings, the ESG-target entry carries a list.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiEntry {
    pub label: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub unit: Option<String>,
}

pub type KpiSummary = BTreeMap<String, KpiEntry>;

pub fn load_kpi_summary(path: &Path) -> Result<KpiSummary> {
    let raw = fs::read_to_string(path)?;
    let summary: KpiSummary = serde_json::from_str(&raw)?;
    tracing::info!(entries = summary.len(), path = %path.display(), "loaded KPI summary");
    Ok(summary)
}
