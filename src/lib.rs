//! # Manual Ingest
//!
//! Section-aware ingestion of training manuals into a local study-material
//! store.
//!
//! Manual Ingest reads raw manual text (plain text, PDF, DOCX, or a pasted
//! two-column `"title","content"` batch), splits it into sections, normalizes
//! each section into a title/content entry, drops entries the source already
//! has, and writes the rest to SQLite in one batch.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────────────┐   ┌──────────┐
//! │ TextSource  │──▶│ chunk → normalize →      │──▶│  SQLite   │
//! │ file/stdin  │   │ validate → dedupe        │   │ entries   │
//! └─────────────┘   └────────────┬─────────────┘   └────┬─────┘
//!                                │ existing titles      │
//!                                └──────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! manual-ingest init
//! manual-ingest ingest ./manual1.pdf --category "Dispatcher Training"
//! manual-ingest ingest ./batch.csv --dry-run
//! manual-ingest list --search radio
//! manual-ingest stats
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`chunk`] | Section-header chunking |
//! | [`normalize`] | Chunk → candidate normalization and validation |
//! | [`quoted`] | Two-column quoted-field parser |
//! | [`extract`] | PDF/DOCX text extraction |
//! | [`source`] | Raw text sources |
//! | [`ingest`] | Pipeline orchestration |
//! | [`store`] | Storage traits and in-memory store |
//! | [`sqlite_store`] | SQLite store |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |

pub mod chunk;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod list;
pub mod migrate;
pub mod models;
pub mod normalize;
pub mod quoted;
pub mod source;
pub mod sqlite_store;
pub mod stats;
pub mod store;

pub use error::IngestError;
pub use ingest::{ingest, IngestOutcome, IngestReport, IngestRequest, InputFormat};
pub use models::{Candidate, ManualEntry};
