//! Entry domain model.
//!
//! # Responsibility
//! - Define the canonical captured-note record shared by writer and reader.
//! - Enforce the never-empty invariant at construction time.
//!
//! # Invariants
//! - An entry never carries both empty content and zero attachments.
//! - `attachments` preserves attach order; order is significant for display.
//! - `timestamp` is pre-formatted text and is not globally unique.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One captured note: a pre-formatted timestamp, free text, and the storage
/// paths of any attachments saved alongside it.
///
/// The timestamp is kept as the already-formatted string the writer emitted,
/// not a parsed instant. Two entries in the same minute legitimately share a
/// timestamp; identity is positional within the day document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Formatted per the configured timestamp pattern (default `HH:mm`).
    pub timestamp: String,
    /// Free text. May be empty only when attachments exist.
    pub content: String,
    /// Storage paths in attach order.
    pub attachments: Vec<String>,
}

impl Entry {
    /// Creates a validated entry.
    ///
    /// # Errors
    /// - [`EntryValidationError::Empty`] when `content` trims to nothing and
    ///   `attachments` is empty. An empty entry must never be persisted.
    pub fn new(
        timestamp: impl Into<String>,
        content: impl Into<String>,
        attachments: Vec<String>,
    ) -> Result<Self, EntryValidationError> {
        let content = content.into();
        if content.trim().is_empty() && attachments.is_empty() {
            return Err(EntryValidationError::Empty);
        }
        Ok(Self {
            timestamp: timestamp.into(),
            content,
            attachments,
        })
    }

    /// Returns whether this entry carries at least one attachment.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// Validation errors for entry construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Both content and attachments are empty.
    Empty,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "entry must have content or at least one attachment"),
        }
    }
}

impl Error for EntryValidationError {}

#[cfg(test)]
mod tests {
    use super::{Entry, EntryValidationError};

    #[test]
    fn rejects_entry_with_no_content_and_no_attachments() {
        let err = Entry::new("09:00", "   ", Vec::new()).unwrap_err();
        assert_eq!(err, EntryValidationError::Empty);
    }

    #[test]
    fn accepts_attachment_only_entry() {
        let entry = Entry::new("09:00", "", vec!["attachments/a.png".to_string()]).unwrap();
        assert!(entry.content.is_empty());
        assert!(entry.has_attachments());
    }

    #[test]
    fn accepts_plain_text_entry() {
        let entry = Entry::new("21:40", "wrote spec", Vec::new()).unwrap();
        assert_eq!(entry.timestamp, "21:40");
        assert!(!entry.has_attachments());
    }
}
