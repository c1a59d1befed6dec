//! Two-column quoted-field parser for pasted batches.
//!
//! Reads lines shaped like `"title","content"`. A field is either a
//! double-quoted run, where `""` stands for a literal quote, or a run of
//! characters that are neither commas, quotes nor whitespace. Fields are
//! separated by commas with optional surrounding whitespace.
//!
//! Inside a quoted field `""` is always an escaped quote. The field ends at
//! the first other quote that is followed, after optional whitespace, by a
//! comma or the end of the line, so commas can sit inside a field.
//!
//! Only the first two fields are used. The first line of a batch is a
//! header and is skipped.

use tracing::{debug, warn};

use crate::models::Candidate;

/// Title used when the first field is empty.
pub const DEFAULT_UNTITLED_LABEL: &str = "Untitled Protocol";

/// Split a line into raw field tokens, quotes still attached.
///
/// Returns `None` if the line does not resolve cleanly: an unterminated
/// quote, or text that is not part of a field, separator or whitespace.
pub fn tokenize(line: &str) -> Option<Vec<&str>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];
        let c = rest.chars().next()?;

        if c == ',' || c.is_whitespace() {
            pos += c.len_utf8();
            continue;
        }

        let len = if c == '"' {
            quoted_len(rest)?
        } else {
            bare_len(rest)?
        };
        tokens.push(&rest[..len]);
        pos += len;
    }

    Some(tokens)
}

/// Length of a quoted token at the start of `s`, closing quote included.
///
/// `""` is consumed as a pair. A lone quote closes the field only at a field
/// end; anywhere else it is kept as a literal character.
fn quoted_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == b'"' {
            if bytes.get(i + 1) == Some(&b'"') {
                i += 2;
                continue;
            }
            if at_field_end(&s[i + 1..]) {
                return Some(i + 1);
            }
        }
        i += 1;
    }
    None
}

/// Length of an unquoted token at the start of `s`.
fn bare_len(s: &str) -> Option<usize> {
    let end = s
        .find(|c: char| c == ',' || c == '"' || c.is_whitespace())
        .unwrap_or(s.len());
    at_field_end(&s[end..]).then_some(end)
}

/// True when only whitespace stands between here and a comma or line end.
fn at_field_end(rest: &str) -> bool {
    let rest = rest.trim_start();
    rest.is_empty() || rest.starts_with(',')
}

/// Strip one surrounding quote from each end and resolve doubled quotes.
pub fn unquote(token: &str) -> String {
    let token = token.strip_prefix('"').unwrap_or(token);
    let token = token.strip_suffix('"').unwrap_or(token);
    token.replace("\"\"", "\"")
}

/// Parse one line into a candidate, or `None` if it yields no record.
pub fn parse_line(line: &str, untitled_label: &str) -> Option<Candidate> {
    if line.trim().is_empty() {
        return None;
    }

    let tokens = tokenize(line)?;
    if tokens.len() < 2 {
        return None;
    }

    let title = unquote(tokens[0]);
    let content = unquote(tokens[1]);
    let title = if title.is_empty() {
        untitled_label.to_string()
    } else {
        title
    };

    Some(Candidate { title, content })
}

/// Parse a pasted batch, skipping the header line.
///
/// Lines are split on `\n` or `\r\n`. Lines that yield no record are
/// skipped, never reported as errors.
pub fn parse_batch(text: &str, untitled_label: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for (idx, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line, untitled_label) {
            Some(candidate) => candidates.push(candidate),
            None if tokenize(line).is_none() => {
                warn!(line = idx + 1, "skipping malformed quoted line");
            }
            None => {
                debug!(line = idx + 1, "skipping line with fewer than two fields");
            }
        }
    }

    candidates
}
