//! Study-material listing.
//!
//! Prints stored entries filtered by source, category, or a
//! case-insensitive search over title and content. Used by
//! `manual-ingest list`.

use anyhow::Result;

use crate::config::Config;
use crate::db;
use crate::models::{EntryFilter, StoredEntry};
use crate::sqlite_store::SqliteStore;
use crate::store::EntryReader;

/// Characters of content shown per entry in table output.
const PREVIEW_CHARS: usize = 72;

/// Core list function returning structured data.
pub async fn list_entries(config: &Config, filter: &EntryFilter) -> Result<Vec<StoredEntry>> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool);
    let result = store.list_entries(filter).await;
    store.close().await;
    result
}

/// CLI entry point for `list`.
pub async fn run_list(config: &Config, filter: &EntryFilter, json: bool) -> Result<()> {
    let entries = list_entries(config, filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.title);
        println!(
            "  source: {}  category: {}  size: {}",
            entry.source_name,
            entry.category,
            entry.size_label()
        );
        println!("  {}", preview(&entry.content));
    }
    println!();
    println!("{} entries", entries.len());

    Ok(())
}

fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "a".repeat(100);
        let p = preview(&long);
        assert_eq!(p.len(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short"), "short");
        assert_eq!(preview(&"b".repeat(PREVIEW_CHARS)), "b".repeat(PREVIEW_CHARS));
    }
}
