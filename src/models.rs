//! Core data models used throughout Manual Ingest.
//!
//! These types represent the candidates, entries, and stored records that
//! flow through the ingestion pipeline and out of the store.

use serde::Serialize;

/// A `{title, content}` pair produced by normalization, not yet validated
/// or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub content: String,
}

impl Candidate {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Attach the batch-wide category and source name.
    pub fn into_entry(self, category: &str, source_name: &str) -> ManualEntry {
        ManualEntry {
            title: self.title,
            content: self.content,
            category: category.to_string(),
            source_name: source_name.to_string(),
        }
    }
}

/// A validated, deduplicated record ready for the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManualEntry {
    pub title: String,
    pub content: String,
    pub category: String,
    pub source_name: String,
}

/// An entry read back from storage.
#[derive(Debug, Clone, Serialize)]
pub struct StoredEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub source_name: String,
    pub created_at: i64,
}

impl StoredEntry {
    /// Human-readable content size, e.g. `"1.2 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.content.len() as f64 / 1024.0)
    }
}

/// Per-source counts reported by `stats`.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub source_name: String,
    pub entry_count: i64,
    pub last_ingested_at: Option<i64>,
}

/// Filters for listing stored entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub source_name: Option<String>,
    pub category: Option<String>,
    /// Case-insensitive substring matched against title or content.
    pub search: Option<String>,
    pub limit: Option<i64>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &StoredEntry) -> bool {
        if let Some(ref source) = self.source_name {
            if &entry.source_name != source {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &entry.category != category {
                return false;
            }
        }
        if let Some(ref query) = self.search {
            let query = query.to_lowercase();
            return entry.title.to_lowercase().contains(&query)
                || entry.content.to_lowercase().contains(&query);
        }
        true
    }
}
