//! Canonical entry line grammar.
//!
//! # Responsibility
//! - Format an [`Entry`] into the one wire format this system owns: a bullet
//!   line inside a human-editable markdown document.
//! - Recover entries from such lines, totally (a mismatch is a skip, never an
//!   error).
//!
//! # Invariants
//! - `parse_line(format_line(entry))` reconstructs `entry` exactly, including
//!   attachment order.
//! - The timestamp pattern is derived from the configured format; the literal
//!   `HH:mm` shape is only the fallback for unusable configurations.
//! - Attachment paths ride in a trailing `%%att:a|b%%` markdown comment. The
//!   marker is anchored at end of line, so ordinary bullet or link text a
//!   user types cannot collide with it.

use crate::format::{pattern_to_regex, DEFAULT_TIMESTAMP_REGEX};
use crate::model::entry::Entry;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the trailing attachment marker and any whitespace before it.
static ATTACHMENT_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*%%att:([^%]*)%%\s*$").expect("valid attachment marker regex"));

/// Entry line matcher for the default `HH:mm` timestamp shape.
static DEFAULT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&line_pattern(DEFAULT_TIMESTAMP_REGEX)).expect("valid default line regex")
});

fn line_pattern(timestamp_fragment: &str) -> String {
    format!(r"^\s*-\s+({timestamp_fragment})(?:\s+(.*))?$")
}

/// Compiled matcher for one timestamp configuration.
///
/// Built once per writer/reader call site, not cached across calls; the
/// configuration may change between invocations.
#[derive(Debug, Clone)]
pub struct LineGrammar {
    line_re: Regex,
}

impl LineGrammar {
    /// Derives the line matcher from a moment-style timestamp pattern.
    ///
    /// An empty or uncompilable derivation falls back to the default
    /// `HH:mm` structural shape rather than failing.
    pub fn for_timestamp_pattern(pattern: &str) -> Self {
        let fragment = pattern_to_regex(pattern.trim());
        let line_re = if fragment.is_empty() {
            DEFAULT_LINE_RE.clone()
        } else {
            Regex::new(&line_pattern(&fragment)).unwrap_or_else(|_| DEFAULT_LINE_RE.clone())
        };
        Self { line_re }
    }

    /// Parses one document line into an entry.
    ///
    /// Returns `None` for prose, headings, malformed bullets, and lines that
    /// would decode to an empty entry. Never errors.
    pub fn parse_line(&self, line: &str) -> Option<Entry> {
        let caps = self.line_re.captures(line)?;
        let timestamp = caps.get(1)?.as_str().to_string();
        let rest = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        let (content, attachments) = split_attachments(rest);
        if content.is_empty() && attachments.is_empty() {
            return None;
        }
        Some(Entry {
            timestamp,
            content,
            attachments,
        })
    }
}

/// Formats an entry into its canonical line, without a trailing newline.
pub fn format_line(entry: &Entry) -> String {
    let mut line = format!("- {} {}", entry.timestamp, entry.content.trim());
    if entry.has_attachments() {
        if !entry.content.trim().is_empty() {
            line.push(' ');
        }
        line.push_str(&encode_attachments(&entry.attachments));
    }
    line
}

/// Encodes attachment paths as the trailing marker segment.
///
/// Paths are sanitized by dropping the `|` and `%` delimiter characters, so a
/// hostile file name degrades the reference instead of corrupting the line.
pub fn encode_attachments(paths: &[String]) -> String {
    let joined = paths
        .iter()
        .map(|path| sanitize_path(path))
        .collect::<Vec<_>>()
        .join("|");
    format!("%%att:{joined}%%")
}

fn sanitize_path(path: &str) -> String {
    path.chars().filter(|ch| *ch != '|' && *ch != '%').collect()
}

/// Splits a line remainder into trimmed human content and attachment paths.
fn split_attachments(rest: &str) -> (String, Vec<String>) {
    match ATTACHMENT_MARKER_RE.captures(rest) {
        Some(caps) => {
            let attachments = caps
                .get(1)
                .map(|m| m.as_str())
                .unwrap_or("")
                .split('|')
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(str::to_string)
                .collect();
            let content = ATTACHMENT_MARKER_RE.replace(rest, "").trim().to_string();
            (content, attachments)
        }
        None => (rest.trim().to_string(), Vec::new()),
    }
}
