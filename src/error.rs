//! Ingestion error taxonomy.
//!
//! Every variant is fatal to the run that raised it. A run that finds
//! nothing new to insert is not an error; see
//! [`IngestOutcome::NoNewRecords`](crate::ingest::IngestOutcome).

use thiserror::Error;

/// Errors that abort an ingestion run.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The raw text could not be read or was empty.
    #[error("source '{source_name}' is unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// The existing-title lookup failed; nothing was written.
    #[error("failed to look up existing titles for '{source_name}': {source}")]
    LookupFailure {
        source_name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The sink rejected the batch; nothing was written.
    #[error("failed to store entries for '{source_name}': {source}")]
    SinkFailure {
        source_name: String,
        #[source]
        source: anyhow::Error,
    },
}

impl IngestError {
    pub fn source_unavailable(source_name: &str, reason: impl Into<String>) -> Self {
        IngestError::SourceUnavailable {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}
