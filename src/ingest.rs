//! Ingestion pipeline orchestration.
//!
//! Runs one batch end to end: read source text → split into candidates →
//! validate → drop titles the source already has → write the rest in one
//! batch. Every step runs to completion before the next starts; a failure
//! at the source, lookup, or sink aborts the run with nothing written.
//!
//! The storage collaborators are passed in, so the same flow runs against
//! SQLite from the CLI and against [`InMemoryStore`](crate::store::memory::InMemoryStore)
//! in tests.

use std::collections::HashSet;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info};

use crate::chunk::split_sections;
use crate::config::{Config, IngestConfig};
use crate::db;
use crate::error::IngestError;
use crate::models::{Candidate, ManualEntry};
use crate::normalize::{normalize_section, Limits};
use crate::quoted;
use crate::source::TextSource;
use crate::sqlite_store::SqliteStore;
use crate::store::{RecordSink, TitleLookup};

/// How raw text is turned into candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `quoted` for `.csv` files, `sections` for everything else.
    Auto,
    /// Manual text split on section headers.
    Sections,
    /// Two-column `"title","content"` lines with a header row.
    Quoted,
}

impl InputFormat {
    /// Resolve `Auto` against the source.
    pub fn resolve(self, source: &TextSource) -> InputFormat {
        match self {
            InputFormat::Auto if source.looks_quoted() => InputFormat::Quoted,
            InputFormat::Auto => InputFormat::Sections,
            other => other,
        }
    }
}

/// Per-run settings. `category` and `source_name` are stamped on every entry.
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub source_name: String,
    pub category: String,
    pub format: InputFormat,
    pub limits: Limits,
    pub untitled_label: String,
    /// Parse, validate and dedupe, but write nothing.
    pub dry_run: bool,
}

impl IngestRequest {
    pub fn new(source_name: impl Into<String>, cfg: &IngestConfig) -> Self {
        Self {
            source_name: source_name.into(),
            category: cfg.category.clone(),
            format: InputFormat::Auto,
            limits: Limits::from(cfg),
            untitled_label: cfg.untitled_label.clone(),
            dry_run: false,
        }
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IngestOutcome {
    /// New entries were written.
    Inserted { count: u64 },
    /// Every candidate was invalid or already stored; nothing written.
    NoNewRecords,
    /// Dry run; `count` entries would have been written.
    Preview { count: u64 },
}

/// Counts and results for one run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub source_name: String,
    pub format: InputFormat,
    /// Chunks (sections mode) or data lines (quoted mode) examined.
    pub scanned: usize,
    pub invalid_dropped: usize,
    pub duplicates_skipped: usize,
    /// The entries that were, or in a dry run would be, written.
    pub entries: Vec<ManualEntry>,
    pub outcome: IngestOutcome,
}

/// Candidates extracted from one text, before deduplication.
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    pub scanned: usize,
    pub valid: Vec<Candidate>,
    pub invalid_dropped: usize,
}

/// Split `text` into candidates and keep only valid ones.
pub fn parse_candidates(
    text: &str,
    format: InputFormat,
    limits: &Limits,
    untitled_label: &str,
) -> ParsedBatch {
    let (scanned, candidates) = match format {
        InputFormat::Quoted => {
            let scanned = text
                .lines()
                .skip(1)
                .filter(|l| !l.trim().is_empty())
                .count();
            (scanned, quoted::parse_batch(text, untitled_label))
        }
        InputFormat::Sections | InputFormat::Auto => {
            let mut scanned = 0;
            let candidates: Vec<Candidate> = split_sections(text)
                .inspect(|_| scanned += 1)
                .filter_map(|chunk| normalize_section(chunk, limits))
                .collect();
            (scanned, candidates)
        }
    };

    let mut batch = ParsedBatch {
        scanned,
        ..Default::default()
    };
    for candidate in candidates {
        if limits.is_valid(&candidate) {
            batch.valid.push(candidate);
        } else {
            debug!(title = %candidate.title, "dropping invalid candidate");
        }
    }
    batch.invalid_dropped = batch.scanned - batch.valid.len();
    batch
}

/// Keep candidates whose title is neither stored already nor repeated
/// earlier in the batch. Returns the survivors and the number skipped.
pub fn dedupe(candidates: Vec<Candidate>, existing: &HashSet<String>) -> (Vec<Candidate>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(candidates.len());
    let mut skipped = 0;

    for candidate in candidates {
        if existing.contains(&candidate.title) || !seen.insert(candidate.title.clone()) {
            debug!(title = %candidate.title, "skipping duplicate title");
            skipped += 1;
        } else {
            kept.push(candidate);
        }
    }

    (kept, skipped)
}

/// Run the pipeline against explicit storage collaborators.
pub async fn ingest(
    source: &TextSource,
    request: &IngestRequest,
    lookup: &dyn TitleLookup,
    sink: &dyn RecordSink,
) -> Result<IngestReport, IngestError> {
    let source_name = request.source_name.as_str();
    let format = request.format.resolve(source);
    info!(source = source_name, ?format, "starting ingestion");

    let text = source.read_text(source_name)?;
    let batch = parse_candidates(&text, format, &request.limits, &request.untitled_label);

    let existing = lookup
        .existing_titles(source_name)
        .await
        .map_err(|e| IngestError::LookupFailure {
            source_name: source_name.to_string(),
            source: e,
        })?;

    let (fresh, duplicates_skipped) = dedupe(batch.valid, &existing);
    let entries: Vec<ManualEntry> = fresh
        .into_iter()
        .map(|c| c.into_entry(&request.category, source_name))
        .collect();

    let outcome = if entries.is_empty() {
        IngestOutcome::NoNewRecords
    } else if request.dry_run {
        IngestOutcome::Preview {
            count: entries.len() as u64,
        }
    } else {
        let count = sink
            .insert_entries(&entries)
            .await
            .map_err(|e| IngestError::SinkFailure {
                source_name: source_name.to_string(),
                source: e,
            })?;
        IngestOutcome::Inserted { count }
    };

    info!(
        source = source_name,
        scanned = batch.scanned,
        invalid = batch.invalid_dropped,
        duplicates = duplicates_skipped,
        ?outcome,
        "ingestion finished"
    );

    Ok(IngestReport {
        source_name: source_name.to_string(),
        format,
        scanned: batch.scanned,
        invalid_dropped: batch.invalid_dropped,
        duplicates_skipped,
        entries,
        outcome,
    })
}

/// CLI entry point: ingest into the configured SQLite database and print a
/// summary.
pub async fn run_ingest(
    config: &Config,
    source: TextSource,
    source_name: Option<String>,
    category: Option<String>,
    format: InputFormat,
    dry_run: bool,
) -> Result<IngestReport> {
    let mut request = IngestRequest::new(
        source_name.unwrap_or_else(|| source.default_name()),
        &config.ingest,
    );
    if let Some(category) = category {
        request.category = category;
    }
    request.format = format;
    request.dry_run = dry_run;

    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool);
    let result = ingest(&source, &request, &store, &store).await;
    store.close().await;
    let report = result?;

    print_report(&report);
    Ok(report)
}

fn print_report(report: &IngestReport) {
    let label = match report.outcome {
        IngestOutcome::Preview { .. } => " (dry-run)",
        _ => "",
    };
    println!("ingest {}{}", report.source_name, label);
    println!("  format: {:?}", report.format);
    println!("  scanned: {}", report.scanned);
    println!("  invalid dropped: {}", report.invalid_dropped);
    println!("  duplicates skipped: {}", report.duplicates_skipped);

    match report.outcome {
        IngestOutcome::Inserted { count } => {
            println!("  inserted: {}", count);
            println!("ok");
        }
        IngestOutcome::NoNewRecords => {
            println!("  already up to date, no new entries");
        }
        IngestOutcome::Preview { count } => {
            println!("  would insert: {}", count);
            for entry in &report.entries {
                println!("    - {}", entry.title);
            }
        }
    }
}
