//! In-memory store for tests and embedding.
//!
//! Keeps entries in a `Vec` behind `std::sync::RwLock`. Enforces the same
//! per-source title uniqueness as the SQLite schema, rejecting the whole
//! batch on a conflict.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{EntryFilter, ManualEntry, SourceSummary, StoredEntry};

use super::{sort_counts, EntryReader, RecordSink, TitleLookup};

/// In-memory entry store.
pub struct InMemoryStore {
    entries: RwLock<Vec<StoredEntry>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> anyhow::Error {
    anyhow!("in-memory store lock poisoned")
}

#[async_trait]
impl TitleLookup for InMemoryStore {
    async fn existing_titles(&self, source_name: &str) -> Result<HashSet<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .iter()
            .filter(|e| e.source_name == source_name)
            .map(|e| e.title.clone())
            .collect())
    }
}

#[async_trait]
impl RecordSink for InMemoryStore {
    async fn insert_entries(&self, entries: &[ManualEntry]) -> Result<u64> {
        let mut stored = self.entries.write().map_err(poisoned)?;

        let mut taken: HashSet<(String, String)> = stored
            .iter()
            .map(|e| (e.source_name.clone(), e.title.clone()))
            .collect();
        for entry in entries {
            if !taken.insert((entry.source_name.clone(), entry.title.clone())) {
                bail!(
                    "duplicate title '{}' for source '{}'",
                    entry.title,
                    entry.source_name
                );
            }
        }

        let now = chrono::Utc::now().timestamp();
        stored.extend(entries.iter().map(|entry| StoredEntry {
            id: Uuid::new_v4().to_string(),
            title: entry.title.clone(),
            content: entry.content.clone(),
            category: entry.category.clone(),
            source_name: entry.source_name.clone(),
            created_at: now,
        }));

        Ok(entries.len() as u64)
    }
}

#[async_trait]
impl EntryReader for InMemoryStore {
    async fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<StoredEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        let matching = entries.iter().filter(|e| filter.matches(e)).cloned();
        Ok(match filter.limit {
            Some(limit) if limit >= 0 => matching.take(limit as usize).collect(),
            _ => matching.collect(),
        })
    }

    async fn source_summaries(&self) -> Result<Vec<SourceSummary>> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut by_source: HashMap<&str, (i64, i64)> = HashMap::new();
        for e in entries.iter() {
            let slot = by_source.entry(e.source_name.as_str()).or_insert((0, e.created_at));
            slot.0 += 1;
            slot.1 = slot.1.max(e.created_at);
        }

        let mut summaries: Vec<SourceSummary> = by_source
            .into_iter()
            .map(|(source, (count, last))| SourceSummary {
                source_name: source.to_string(),
                entry_count: count,
                last_ingested_at: Some(last),
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.entry_count
                .cmp(&a.entry_count)
                .then_with(|| a.source_name.cmp(&b.source_name))
        });
        Ok(summaries)
    }

    async fn category_counts(&self) -> Result<Vec<(String, i64)>> {
        let entries = self.entries.read().map_err(poisoned)?;
        let mut by_category: HashMap<String, i64> = HashMap::new();
        for e in entries.iter() {
            *by_category.entry(e.category.clone()).or_insert(0) += 1;
        }
        let mut counts: Vec<(String, i64)> = by_category.into_iter().collect();
        sort_counts(&mut counts);
        Ok(counts)
    }
}
