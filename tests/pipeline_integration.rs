//! Integration tests for the library pipeline against real and custom
//! storage collaborators.

use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use manual_ingest::config::Config;
use manual_ingest::models::{EntryFilter, ManualEntry};
use manual_ingest::source::TextSource;
use manual_ingest::sqlite_store::SqliteStore;
use manual_ingest::store::{EntryReader, RecordSink, TitleLookup};
use manual_ingest::{db, ingest, migrate, IngestOutcome, IngestRequest, InputFormat};
use tempfile::TempDir;

const MANUAL: &str = "1. Radio Protocol\n\
Use channel 4.\n\
Report every 10 minutes.\n\
2. Signals\n\
Red means stop at the signal.\n";

async fn sqlite_store(tmp: &TempDir) -> (Config, SqliteStore) {
    let cfg = Config::with_db_path(tmp.path().join("manuals.sqlite"));
    migrate::run_migrations(&cfg).await.unwrap();
    let pool = db::connect(&cfg).await.unwrap();
    (cfg, SqliteStore::new(pool))
}

/// Lookup backed by a fixed title list, sink that only records batches.
struct RecordingStore {
    known: HashSet<String>,
    batches: Mutex<Vec<Vec<ManualEntry>>>,
}

#[async_trait]
impl TitleLookup for RecordingStore {
    async fn existing_titles(&self, _source_name: &str) -> Result<HashSet<String>> {
        Ok(self.known.clone())
    }
}

#[async_trait]
impl RecordSink for RecordingStore {
    async fn insert_entries(&self, entries: &[ManualEntry]) -> Result<u64> {
        self.batches.lock().unwrap().push(entries.to_vec());
        Ok(entries.len() as u64)
    }
}

#[tokio::test]
async fn test_sqlite_rerun_yields_no_new_records() {
    let tmp = TempDir::new().unwrap();
    let (cfg, store) = sqlite_store(&tmp).await;
    let source = TextSource::Inline(MANUAL.to_string());
    let request = IngestRequest::new("manual1.pdf", &cfg.ingest);

    let first = ingest(&source, &request, &store, &store).await.unwrap();
    assert_eq!(first.outcome, IngestOutcome::Inserted { count: 2 });

    let second = ingest(&source, &request, &store, &store).await.unwrap();
    assert_eq!(second.outcome, IngestOutcome::NoNewRecords);

    let stored = store.list_entries(&EntryFilter::default()).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].title, "1. Radio Protocol");
    assert_eq!(stored[0].content, "Use channel 4. Report every 10 minutes.");
    store.close().await;
}

#[tokio::test]
async fn test_new_sections_added_on_rerun() {
    let tmp = TempDir::new().unwrap();
    let (cfg, store) = sqlite_store(&tmp).await;
    let request = IngestRequest::new("manual1.pdf", &cfg.ingest);

    ingest(&TextSource::Inline(MANUAL.to_string()), &request, &store, &store)
        .await
        .unwrap();

    let extended = format!("{}3. Fares\nExact change only on all routes.\n", MANUAL);
    let report = ingest(&TextSource::Inline(extended), &request, &store, &store)
        .await
        .unwrap();
    assert_eq!(report.outcome, IngestOutcome::Inserted { count: 1 });
    assert_eq!(report.duplicates_skipped, 2);
    assert_eq!(report.entries[0].title, "3. Fares");
    store.close().await;
}

#[tokio::test]
async fn test_custom_collaborators_receive_one_batch() {
    let store = RecordingStore {
        known: ["2. Signals".to_string()].into_iter().collect(),
        batches: Mutex::new(Vec::new()),
    };
    let mut request = IngestRequest::new("manual1.pdf", &Default::default());
    request.category = "Signals".to_string();
    request.format = InputFormat::Sections;

    let report = ingest(&TextSource::Inline(MANUAL.to_string()), &request, &store, &store)
        .await
        .unwrap();
    assert_eq!(report.outcome, IngestOutcome::Inserted { count: 1 });

    let batches = store.batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0][0].title, "1. Radio Protocol");
    assert_eq!(batches[0][0].category, "Signals");
    assert_eq!(batches[0][0].source_name, "manual1.pdf");
}
