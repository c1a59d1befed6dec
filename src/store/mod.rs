//! Storage collaborators for the ingestion pipeline.
//!
//! The pipeline never talks to a database directly. It receives a
//! [`TitleLookup`] to learn which titles a source already has and a
//! [`RecordSink`] to persist the new batch. [`EntryReader`] backs the
//! listing and stats commands.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.
//!
//! | Implementation | Backing |
//! |----------------|---------|
//! | [`SqliteStore`](crate::sqlite_store::SqliteStore) | `manual_entries` table via `sqlx` |
//! | [`InMemoryStore`](memory::InMemoryStore) | `RwLock<Vec<StoredEntry>>` |

pub mod memory;

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{EntryFilter, ManualEntry, SourceSummary, StoredEntry};

/// Looks up titles already persisted for a source.
#[async_trait]
pub trait TitleLookup: Send + Sync {
    /// Titles stored under `source_name`. An unknown source yields an empty
    /// set, not an error.
    async fn existing_titles(&self, source_name: &str) -> Result<HashSet<String>>;
}

/// Persists a batch of validated, deduplicated entries.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Insert every entry or none of them. Returns the number inserted.
    async fn insert_entries(&self, entries: &[ManualEntry]) -> Result<u64>;
}

/// Read access for listing and reporting.
#[async_trait]
pub trait EntryReader: Send + Sync {
    /// Entries matching `filter`, oldest first.
    async fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<StoredEntry>>;

    /// Entry counts per source, largest first.
    async fn source_summaries(&self) -> Result<Vec<SourceSummary>>;

    /// Entry counts per category, largest first.
    async fn category_counts(&self) -> Result<Vec<(String, i64)>>;
}

/// Sort `(key, count)` pairs by count descending, then key.
pub(crate) fn sort_counts(counts: &mut [(String, i64)]) {
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
}
