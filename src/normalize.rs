//! Chunk normalization and candidate validation.
//!
//! Turns one section chunk into a [`Candidate`]: the first non-empty line
//! becomes the title, every following line is trimmed and joined with single
//! spaces to form the content. Blank body lines are kept, so a paragraph
//! break shows up as a double space.

use crate::config::IngestConfig;
use crate::models::Candidate;

/// Default maximum title length, in characters.
pub const DEFAULT_MAX_TITLE_CHARS: usize = 255;
/// Content must be strictly longer than this many characters.
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 15;

/// Limits applied when normalizing and validating candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_title_chars: usize,
    pub min_content_chars: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_title_chars: DEFAULT_MAX_TITLE_CHARS,
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
        }
    }
}

impl From<&IngestConfig> for Limits {
    fn from(cfg: &IngestConfig) -> Self {
        Self {
            max_title_chars: cfg.max_title_chars,
            min_content_chars: cfg.min_content_chars,
        }
    }
}

impl Limits {
    /// A candidate is valid when its title is non-empty and its content is
    /// strictly longer than `min_content_chars`.
    pub fn is_valid(&self, candidate: &Candidate) -> bool {
        !candidate.title.is_empty() && candidate.content.chars().count() > self.min_content_chars
    }
}

/// Normalize a raw section chunk into a candidate.
///
/// Returns `None` only when the chunk has no non-empty line at all; the
/// result is not validated, see [`Limits::is_valid`].
pub fn normalize_section(chunk: &str, limits: &Limits) -> Option<Candidate> {
    // `\r\n` is one break, not two.
    let text = chunk.trim().replace("\r\n", "\n");
    let mut lines = text.split(|c: char| c == '\n' || c == '\r').map(str::trim);

    let title_line = lines.find(|line| !line.is_empty())?;
    let title = truncate_chars(title_line, limits.max_title_chars);

    let content = lines.collect::<Vec<_>>().join(" ").trim().to_string();

    Some(Candidate { title, content })
}

/// Normalize and validate in one step, dropping invalid candidates.
pub fn valid_section(chunk: &str, limits: &Limits) -> Option<Candidate> {
    normalize_section(chunk, limits).filter(|c| limits.is_valid(c))
}

/// Keep the first `max` characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
