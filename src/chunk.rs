//! Section-boundary text chunker.
//!
//! Splits extracted manual text into chunks immediately before every line
//! that looks like a section header. A line is a header when, ignoring
//! leading whitespace, it starts with:
//!
//! - one or more digits followed by a period (`12.`),
//! - the word `Topic` (any case),
//! - the word `SECTION` (any case).
//!
//! The rule is a heuristic. A prose line that happens to start with `3.` is
//! treated as a header too; callers see that as an extra, usually short,
//! chunk that normalization may drop.
//!
//! Chunks borrow from the input and concatenate back to it exactly. Any text
//! before the first header comes out as its own leading chunk.

use regex::Regex;
use std::sync::OnceLock;

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*(?:\d+\.|topic\b|section\b)").expect("header pattern is valid")
    })
}

/// Returns true if `line` opens a new section.
pub fn is_section_header(line: &str) -> bool {
    header_pattern().is_match(line)
}

/// Lazily split `text` into section chunks.
pub fn split_sections(text: &str) -> Sections<'_> {
    Sections { text, pos: 0 }
}

/// One-pass iterator over the section chunks of a text.
///
/// Recognises `\n`, `\r\n` and a lone `\r` as line breaks. A fresh
/// [`split_sections`] call is needed to iterate again.
#[derive(Debug, Clone)]
pub struct Sections<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Sections<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.pos >= self.text.len() {
            return None;
        }

        let start = self.pos;
        let mut cursor = next_line_start(self.text, start);
        while let Some(line_start) = cursor {
            if is_section_header(line_at(self.text, line_start)) {
                break;
            }
            cursor = next_line_start(self.text, line_start);
        }

        let end = cursor.unwrap_or(self.text.len());
        self.pos = end;
        Some(&self.text[start..end])
    }
}

/// Byte offset of the line following the one containing `from`, if any.
fn next_line_start(text: &str, from: usize) -> Option<usize> {
    let rest = &text[from..];
    let idx = rest.find(|c: char| c == '\n' || c == '\r')?;
    let break_len = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
    let next = from + idx + break_len;
    (next < text.len()).then_some(next)
}

/// The line starting at `start`, without its terminator.
fn line_at(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    let end = rest
        .find(|c: char| c == '\n' || c == '\r')
        .unwrap_or(rest.len());
    &rest[..end]
}
