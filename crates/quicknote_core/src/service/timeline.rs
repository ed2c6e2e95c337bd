//! Timeline reader: per-document parsing and multi-day aggregation.
//!
//! # Responsibility
//! - Recover structured entries from one day document's freeform text.
//! - Merge the last N days into a single reverse-chronological window.
//!
//! # Invariants
//! - Parsing is total: unmatched lines are prose, never errors.
//! - Window ordering is a function of day offset, not fetch completion order.
//! - Day boundary dominates entry-time ordering; entries are never
//!   interleaved across days by raw timestamp value.
//! - Per-day reversal applies only when the configured insertion policy
//!   appends at the bottom; top-inserted documents already read newest-first.

use crate::format::pattern_to_chrono;
use crate::grammar::LineGrammar;
use crate::model::entry::Entry;
use crate::model::settings::{InsertionPolicy, QuickNoteSettings};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Default aggregation window, matching the host timeline view.
pub const DEFAULT_TIMELINE_DAYS: u32 = 7;

/// One day's contribution to the window, newest entry first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineDay {
    /// Formatted lookup key of the day document.
    pub date_key: String,
    /// Entries in display order (latest appended first).
    pub entries: Vec<Entry>,
}

/// Aggregated view across the last N days, most recent day first.
///
/// Days with no parseable entries contribute nothing; there are no
/// empty-day placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimelineWindow {
    pub days: Vec<TimelineDay>,
}

impl TimelineWindow {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total entry count across all days.
    pub fn entry_count(&self) -> usize {
        self.days.iter().map(|day| day.entries.len()).sum()
    }
}

/// Extracts entries from one document body, in document order.
///
/// Lines that do not match the canonical grammar are ignored, so arbitrary
/// user prose and headings interleaved with entries are tolerated.
pub fn parse_entries(body: &str, grammar: &LineGrammar) -> Vec<Entry> {
    body.split('\n')
        .filter_map(|line| grammar.parse_line(line))
        .collect()
}

/// Builds the timeline window for `day_count` days ending at `today`.
///
/// `fetch` maps a formatted date key to the day document's body, or `None`
/// when the document is absent. Fetches are issued most-recent day first;
/// result ordering depends only on day offset.
pub fn build_timeline<F>(
    today: NaiveDate,
    day_count: u32,
    settings: &QuickNoteSettings,
    mut fetch: F,
) -> TimelineWindow
where
    F: FnMut(&str) -> Option<String>,
{
    let grammar = LineGrammar::for_timestamp_pattern(&settings.timestamp_format);
    let date_format = pattern_to_chrono(&settings.date_format);
    // Bottom-appended documents read oldest-first and need reversing for a
    // latest-first display; top-inserted documents are already newest-first.
    let reverse_for_display = settings.insertion_policy() == InsertionPolicy::Bottom;

    let mut days = Vec::new();
    for offset in 0..i64::from(day_count) {
        let date = today - Duration::days(offset);
        // Format through a midnight datetime so a date pattern carrying stray
        // time tokens still formats instead of erroring.
        let date_key = date.and_time(NaiveTime::MIN).format(&date_format).to_string();

        let Some(body) = fetch(&date_key) else {
            continue;
        };
        let mut entries = parse_entries(&body, &grammar);
        if entries.is_empty() {
            continue;
        }
        if reverse_for_display {
            entries.reverse();
        }
        days.push(TimelineDay { date_key, entries });
    }

    TimelineWindow { days }
}

/// Renders a human-relative label ("3 hours ago") for one timeline entry.
///
/// The full moment is reconstructed from `date_key + " " + timestamp`
/// against the configured formats. Reconstruction failure falls back to the
/// literal `date_key timestamp` text; this function never errors.
pub fn relative_display(
    date_key: &str,
    timestamp: &str,
    settings: &QuickNoteSettings,
    now: NaiveDateTime,
) -> String {
    let literal = format!("{date_key} {timestamp}");
    let format = format!(
        "{} {}",
        pattern_to_chrono(&settings.date_format),
        pattern_to_chrono(&settings.timestamp_format)
    );
    match NaiveDateTime::parse_from_str(&literal, &format) {
        Ok(moment) => humanize_since(moment, now).unwrap_or(literal),
        Err(_) => literal,
    }
}

/// Maps an elapsed duration to a coarse label. Returns `None` for moments in
/// the future, where a relative label would mislead.
fn humanize_since(moment: NaiveDateTime, now: NaiveDateTime) -> Option<String> {
    let elapsed = now.signed_duration_since(moment);
    if elapsed < Duration::zero() {
        return None;
    }
    let minutes = elapsed.num_minutes();
    let label = if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if elapsed.num_hours() < 24 {
        plural(elapsed.num_hours(), "hour")
    } else {
        plural(elapsed.num_days(), "day")
    };
    Some(label)
}

fn plural(amount: i64, unit: &str) -> String {
    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_entries, relative_display};
    use crate::grammar::LineGrammar;
    use crate::model::settings::QuickNoteSettings;
    use chrono::NaiveDateTime;

    fn grammar() -> LineGrammar {
        LineGrammar::for_timestamp_pattern("HH:mm")
    }

    #[test]
    fn parse_skips_prose_between_entries() {
        let body = "# Thursday\n\n- 09:00 wrote spec\nsome prose\n- 10:30 lunch\n";
        let entries = parse_entries(body, &grammar());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "wrote spec");
        assert_eq!(entries[1].timestamp, "10:30");
    }

    #[test]
    fn parse_of_garbage_is_empty_not_an_error() {
        assert!(parse_entries("::: %% random --- not entries", &grammar()).is_empty());
        assert!(parse_entries("", &grammar()).is_empty());
    }

    #[test]
    fn relative_display_humanizes_valid_moments() {
        let settings = QuickNoteSettings::default();
        let now = NaiveDateTime::parse_from_str("2026-08-28 14:00", "%Y-%m-%d %H:%M").unwrap();
        assert_eq!(
            relative_display("2026-08-28", "11:00", &settings, now),
            "3 hours ago"
        );
        assert_eq!(
            relative_display("2026-08-28", "13:59", &settings, now),
            "1 minute ago"
        );
        assert_eq!(
            relative_display("2026-08-26", "14:00", &settings, now),
            "2 days ago"
        );
    }

    #[test]
    fn relative_display_falls_back_to_literal() {
        let settings = QuickNoteSettings::default();
        let now = NaiveDateTime::parse_from_str("2026-08-28 14:00", "%Y-%m-%d %H:%M").unwrap();
        // Not a valid calendar moment.
        assert_eq!(
            relative_display("2026-13-99", "27:61", &settings, now),
            "2026-13-99 27:61"
        );
        // Future moments also render literally.
        assert_eq!(
            relative_display("2026-08-29", "09:00", &settings, now),
            "2026-08-29 09:00"
        );
    }
}
