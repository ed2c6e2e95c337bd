//! Entry writer: deterministic insertion into a day document body.
//!
//! # Responsibility
//! - Compute the new full document text for one appended entry under the
//!   configured insertion policy.
//!
//! # Invariants
//! - Pure over its inputs; the caller owns the read-modify-write transaction.
//! - Existing lines are never altered or reordered, under any policy.
//! - A configured heading that cannot be found must degrade to bottom
//!   insertion, never drop the note.

use crate::grammar::format_line;
use crate::model::entry::Entry;
use crate::model::settings::{normalize_heading, InsertionPolicy};

/// Computes the new body after inserting `entry` per `policy`.
pub fn append(existing_body: &str, entry: &Entry, policy: &InsertionPolicy) -> String {
    let line = format_line(entry);
    match policy {
        InsertionPolicy::Bottom => append_bottom(existing_body, &line),
        InsertionPolicy::TopOfFile => format!("{line}\n{existing_body}"),
        InsertionPolicy::AfterHeading(heading) => {
            let heading = normalize_heading(heading);
            if heading.is_empty() {
                // A blank heading would otherwise match the first blank line.
                return append_bottom(existing_body, &line);
            }
            match splice_after_heading(existing_body, &heading, &line) {
                Some(body) => body,
                None => append_bottom(existing_body, &line),
            }
        }
    }
}

/// Appends the line at the end, normalizing to exactly one separating
/// newline when the body does not already end with one.
fn append_bottom(existing_body: &str, line: &str) -> String {
    let mut body = existing_body.to_string();
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    body.push_str(line);
    body.push('\n');
    body
}

/// Splices the line immediately after the first line whose trimmed text
/// equals `heading`. Returns `None` when no line matches exactly, even if the
/// heading occurs as a substring somewhere.
fn splice_after_heading(existing_body: &str, heading: &str, line: &str) -> Option<String> {
    let mut lines: Vec<&str> = existing_body.split('\n').collect();
    let position = lines.iter().position(|candidate| candidate.trim() == heading)?;
    lines.insert(position + 1, line);
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::append;
    use crate::model::entry::Entry;
    use crate::model::settings::InsertionPolicy;

    fn entry(timestamp: &str, content: &str) -> Entry {
        Entry::new(timestamp, content, Vec::new()).unwrap()
    }

    #[test]
    fn bottom_appends_with_newline_normalization() {
        let body = append(
            "- 09:00 wrote spec\n- 10:30 lunch",
            &entry("11:15", "done"),
            &InsertionPolicy::Bottom,
        );
        assert_eq!(body, "- 09:00 wrote spec\n- 10:30 lunch\n- 11:15 done\n");

        let already_terminated = append(
            "- 09:00 wrote spec\n",
            &entry("11:15", "done"),
            &InsertionPolicy::Bottom,
        );
        assert_eq!(already_terminated, "- 09:00 wrote spec\n- 11:15 done\n");
    }

    #[test]
    fn bottom_on_empty_body_yields_single_line() {
        let body = append("", &entry("07:45", "first"), &InsertionPolicy::Bottom);
        assert_eq!(body, "- 07:45 first\n");
    }

    #[test]
    fn top_of_file_prepends_unconditionally() {
        let body = append(
            "existing prose",
            &entry("07:45", "first"),
            &InsertionPolicy::TopOfFile,
        );
        assert_eq!(body, "- 07:45 first\nexisting prose");
    }

    #[test]
    fn after_heading_splices_directly_below_match() {
        let policy = InsertionPolicy::AfterHeading("## Notes".to_string());
        let body = append(
            "intro\n## Notes\n- 08:00 old\n",
            &entry("09:30", "new"),
            &policy,
        );
        assert_eq!(body, "intro\n## Notes\n- 09:30 new\n- 08:00 old\n");
    }

    #[test]
    fn substring_match_is_not_a_heading_match() {
        // "## Notes and more" contains the heading text but is not equal to
        // it after trimming, so insertion falls back to bottom.
        let policy = InsertionPolicy::AfterHeading("## Notes".to_string());
        let body = append("## Notes and more\n", &entry("09:30", "new"), &policy);
        assert_eq!(body, "## Notes and more\n- 09:30 new\n");
    }

    #[test]
    fn blank_heading_text_falls_back_to_bottom_not_first_blank_line() {
        let policy = InsertionPolicy::AfterHeading("  \\n ".to_string());
        let source = "first line\n\n- 08:00 old\n";
        let body = append(source, &entry("09:30", "new"), &policy);
        assert_eq!(body, "first line\n\n- 08:00 old\n- 09:30 new\n");
    }

    #[test]
    fn missing_heading_falls_back_to_bottom_exactly() {
        let policy = InsertionPolicy::AfterHeading("## Notes".to_string());
        let source = "no heading here";
        let via_fallback = append(source, &entry("09:30", "new"), &policy);
        let via_bottom = append(source, &entry("09:30", "new"), &InsertionPolicy::Bottom);
        assert_eq!(via_fallback, via_bottom);
    }
}
