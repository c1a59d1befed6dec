//! Raw text sources.
//!
//! The pipeline only needs one string. A [`TextSource`] produces it from a
//! file on disk (plain text, CSV, PDF, DOCX), from standard input, or from
//! pasted text.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::IngestError;
use crate::extract::{self, MIME_DOCX, MIME_PDF};

/// Where an ingestion run reads its text from.
#[derive(Debug, Clone)]
pub enum TextSource {
    /// A file; binary formats are extracted by extension.
    File(PathBuf),
    /// Standard input, read to the end when the run starts.
    Stdin,
    /// Text already in memory, e.g. pasted.
    Inline(String),
}

impl TextSource {
    /// Default source name: the file name, or `stdin` otherwise.
    pub fn default_name(&self) -> String {
        match self {
            TextSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            TextSource::Stdin | TextSource::Inline(_) => "stdin".to_string(),
        }
    }

    /// Whether the text is a quoted-field batch rather than a manual.
    pub fn looks_quoted(&self) -> bool {
        match self {
            TextSource::File(path) => extract::content_type_for(path) == extract::MIME_CSV,
            TextSource::Stdin | TextSource::Inline(_) => false,
        }
    }

    /// Produce the full text. Empty or whitespace-only text counts as
    /// unavailable.
    pub fn read_text(&self, source_name: &str) -> Result<String, IngestError> {
        let text = match self {
            TextSource::File(path) => read_file(path, source_name)?,
            TextSource::Stdin => read_stream(std::io::stdin().lock(), source_name)?,
            TextSource::Inline(text) => text.clone(),
        };

        if text.trim().is_empty() {
            return Err(IngestError::source_unavailable(source_name, "no text content"));
        }
        debug!(source = source_name, bytes = text.len(), "read source text");
        Ok(text)
    }
}

/// Read a byte stream to the end as UTF-8 text.
fn read_stream(mut reader: impl Read, source_name: &str) -> Result<String, IngestError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| IngestError::source_unavailable(source_name, e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|_| IngestError::source_unavailable(source_name, "input is not valid UTF-8 text"))
}

fn read_file(path: &Path, source_name: &str) -> Result<String, IngestError> {
    if !path.exists() {
        return Err(IngestError::source_unavailable(
            source_name,
            format!("file not found at: {}", path.display()),
        ));
    }

    let bytes = std::fs::read(path).map_err(|e| {
        IngestError::source_unavailable(source_name, format!("{}: {}", path.display(), e))
    })?;

    match extract::content_type_for(path) {
        ct @ (MIME_PDF | MIME_DOCX) => extract::extract_text(&bytes, ct)
            .map_err(|e| IngestError::source_unavailable(source_name, e.to_string())),
        _ => String::from_utf8(bytes).map_err(|_| {
            IngestError::source_unavailable(
                source_name,
                format!("{} is not valid UTF-8 text", path.display()),
            )
        }),
    }
}
