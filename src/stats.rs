//! Database statistics.
//!
//! A quick summary of what's stored: entry totals, per-source counts with
//! the last ingestion time, and per-category counts.

use anyhow::Result;

use crate::config::Config;
use crate::db;
use crate::sqlite_store::SqliteStore;
use crate::store::EntryReader;

/// Run the stats command: query the database and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool);

    let sources = store.source_summaries().await?;
    let categories = store.category_counts().await?;
    store.close().await;

    let total: i64 = sources.iter().map(|s| s.entry_count).sum();
    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("Manual Ingest — Database Stats");
    println!("==============================");
    println!();
    println!("  Database:    {}", config.db.path.display());
    println!("  Size:        {}", format_bytes(db_size));
    println!("  Entries:     {}", total);
    println!("  Sources:     {}", sources.len());

    if !sources.is_empty() {
        println!();
        println!("  {:<32} {:>8}  LAST INGESTED", "SOURCE", "ENTRIES");
        for s in &sources {
            println!(
                "  {:<32} {:>8}  {}",
                s.source_name,
                s.entry_count,
                s.last_ingested_at
                    .map(format_ts)
                    .unwrap_or_else(|| "-".to_string())
            );
        }
    }

    if !categories.is_empty() {
        println!();
        println!("  {:<32} {:>8}", "CATEGORY", "ENTRIES");
        for (category, count) in &categories {
            println!("  {:<32} {:>8}", category, count);
        }
    }

    Ok(())
}

fn format_ts(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
