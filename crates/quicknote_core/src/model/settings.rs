//! Capture settings and insertion-policy resolution.
//!
//! # Responsibility
//! - Carry the host-persisted configuration surface and its defaults.
//! - Resolve the effective insertion policy for one append call.
//!
//! # Invariants
//! - Unknown/missing JSON fields fall back to defaults (host merges settings
//!   over defaults, so every field is individually optional on the wire).
//! - Policy resolution is deterministic: bottom flag wins, then empty heading
//!   means top-of-file, otherwise insert-after-heading with bottom fallback.

use serde::{Deserialize, Serialize};

/// User-facing configuration consumed by writer and reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuickNoteSettings {
    /// Day-document lookup name pattern, moment-style (e.g. `YYYY-MM-DD`).
    pub date_format: String,
    /// Per-entry timestamp pattern, moment-style (e.g. `HH:mm`).
    pub timestamp_format: String,
    /// When true new entries are appended to the end of the day document.
    pub insert_at_bottom: bool,
    /// Heading line after which entries are spliced when `insert_at_bottom`
    /// is off. Empty means prepend at the top of the file.
    pub heading_to_insert_after: String,
}

impl Default for QuickNoteSettings {
    fn default() -> Self {
        Self {
            date_format: "YYYY-MM-DD".to_string(),
            timestamp_format: "HH:mm".to_string(),
            insert_at_bottom: true,
            heading_to_insert_after: String::new(),
        }
    }
}

impl QuickNoteSettings {
    /// Resolves the insertion policy effective for one append call.
    pub fn insertion_policy(&self) -> InsertionPolicy {
        InsertionPolicy::resolve(self.insert_at_bottom, &self.heading_to_insert_after)
    }
}

/// Where a new entry line lands within a day document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertionPolicy {
    /// Append after the last existing line.
    Bottom,
    /// Prepend before all existing content.
    TopOfFile,
    /// Splice immediately after the first line equal to the trimmed heading;
    /// falls back to `Bottom` semantics when no such line exists.
    AfterHeading(String),
}

impl InsertionPolicy {
    /// Maps the raw configuration pair to a policy.
    ///
    /// An empty configured heading with the bottom flag off always resolves
    /// to `TopOfFile`. Any non-empty configuration resolves to
    /// `AfterHeading` carrying the normalized text (escape tokens stripped,
    /// whitespace trimmed); when that normalization leaves nothing to match,
    /// the writer degrades to bottom insertion like any other missing
    /// heading.
    pub fn resolve(insert_at_bottom: bool, heading: &str) -> Self {
        if insert_at_bottom {
            return Self::Bottom;
        }
        if heading.is_empty() {
            return Self::TopOfFile;
        }
        Self::AfterHeading(normalize_heading(heading))
    }
}

/// Strips literal `\n` escape tokens and surrounding whitespace from a
/// configured heading. Hosts that persist the setting through a text box
/// sometimes store the two-character escape rather than a real newline.
pub fn normalize_heading(heading: &str) -> String {
    heading.replace("\\n", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{InsertionPolicy, QuickNoteSettings};

    #[test]
    fn defaults_match_host_configuration() {
        let settings = QuickNoteSettings::default();
        assert_eq!(settings.date_format, "YYYY-MM-DD");
        assert_eq!(settings.timestamp_format, "HH:mm");
        assert!(settings.insert_at_bottom);
        assert!(settings.heading_to_insert_after.is_empty());
    }

    #[test]
    fn missing_json_fields_fall_back_to_defaults() {
        let settings: QuickNoteSettings =
            serde_json::from_str(r#"{"insertAtBottom": false}"#).unwrap();
        assert!(!settings.insert_at_bottom);
        assert_eq!(settings.date_format, "YYYY-MM-DD");
    }

    #[test]
    fn bottom_flag_dominates_heading() {
        let policy = InsertionPolicy::resolve(true, "## Notes");
        assert_eq!(policy, InsertionPolicy::Bottom);
    }

    #[test]
    fn empty_heading_resolves_to_top_of_file() {
        assert_eq!(
            InsertionPolicy::resolve(false, ""),
            InsertionPolicy::TopOfFile
        );
    }

    #[test]
    fn whitespace_only_heading_stays_after_heading_with_blank_text() {
        // Non-empty configuration means insert-after-heading; the blank
        // normalized text later degrades to bottom insertion in the writer.
        assert_eq!(
            InsertionPolicy::resolve(false, "  \\n "),
            InsertionPolicy::AfterHeading(String::new())
        );
    }

    #[test]
    fn heading_is_normalized_before_use() {
        let policy = InsertionPolicy::resolve(false, " ## Notes\\n");
        assert_eq!(policy, InsertionPolicy::AfterHeading("## Notes".to_string()));
    }
}
