//! SQLite-backed store.
//!
//! Maps the storage traits onto the `manual_entries` table. Batch inserts
//! run in a single transaction so a rejected row rolls the whole batch back.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::{EntryFilter, ManualEntry, SourceSummary, StoredEntry};
use crate::store::{EntryReader, RecordSink, TitleLookup};

/// SQLite implementation of the storage traits.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TitleLookup for SqliteStore {
    async fn existing_titles(&self, source_name: &str) -> Result<HashSet<String>> {
        let titles: Vec<String> =
            sqlx::query_scalar("SELECT title FROM manual_entries WHERE source_name = ?")
                .bind(source_name)
                .fetch_all(&self.pool)
                .await?;

        Ok(titles.into_iter().collect())
    }
}

#[async_trait]
impl RecordSink for SqliteStore {
    async fn insert_entries(&self, entries: &[ManualEntry]) -> Result<u64> {
        let now = chrono::Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO manual_entries (id, title, content, category, source_name, created_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&entry.title)
            .bind(&entry.content)
            .bind(&entry.category)
            .bind(&entry.source_name)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(entries.len() as u64)
    }
}

#[async_trait]
impl EntryReader for SqliteStore {
    async fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<StoredEntry>> {
        let needle = filter.search.as_ref().map(|q| q.to_lowercase());

        let rows = sqlx::query(
            r#"
            SELECT id, title, content, category, source_name, created_at
            FROM manual_entries
            WHERE (?1 IS NULL OR source_name = ?1)
              AND (?2 IS NULL OR category = ?2)
              AND (?3 IS NULL OR instr(LOWER(title), ?3) > 0 OR instr(LOWER(content), ?3) > 0)
            ORDER BY created_at ASC, rowid ASC
            LIMIT ?4
            "#,
        )
        .bind(&filter.source_name)
        .bind(&filter.category)
        .bind(&needle)
        .bind(filter.limit.unwrap_or(-1))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| StoredEntry {
                id: row.get("id"),
                title: row.get("title"),
                content: row.get("content"),
                category: row.get("category"),
                source_name: row.get("source_name"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    async fn source_summaries(&self) -> Result<Vec<SourceSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT source_name, COUNT(*) AS entry_count, MAX(created_at) AS last_ingested_at
            FROM manual_entries
            GROUP BY source_name
            ORDER BY entry_count DESC, source_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| SourceSummary {
                source_name: row.get("source_name"),
                entry_count: row.get("entry_count"),
                last_ingested_at: row.get("last_ingested_at"),
            })
            .collect())
    }

    async fn category_counts(&self) -> Result<Vec<(String, i64)>> {
        let rows = sqlx::query(
            r#"
            SELECT category, COUNT(*) AS entry_count
            FROM manual_entries
            GROUP BY category
            ORDER BY entry_count DESC, category ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| (row.get("category"), row.get("entry_count")))
            .collect())
    }
}
