//! Notification boundary.
//!
//! # Responsibility
//! - Report capture and attachment outcomes as user-visible transient
//!   messages. This crate only signals *that* an operation succeeded or
//!   failed; rendering belongs to the host.

use log::{info, warn};
use std::fmt::{Display, Formatter};

/// One user-visible operation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A note was appended to the named day document.
    NoteAdded { date_key: String },
    /// The append did not complete; partially written state is left as-is.
    NoteFailed { reason: String },
    /// An attachment blob was stored at the given path.
    AttachmentStored { path: String },
    /// The target path already existed; the existing file was reused, not
    /// overwritten.
    AttachmentReused { path: String },
    /// The attachment could not be stored.
    AttachmentFailed { reason: String },
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteAdded { date_key } => write!(f, "Note added to {date_key}"),
            Self::NoteFailed { reason } => write!(f, "Failed to add note: {reason}"),
            Self::AttachmentStored { path } => write!(f, "Attachment saved to {path}"),
            Self::AttachmentReused { path } => {
                write!(f, "Attachment already exists, reusing {path}")
            }
            Self::AttachmentFailed { reason } => write!(f, "Failed to save attachment: {reason}"),
        }
    }
}

impl Notice {
    /// Whether this notice reports a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::NoteFailed { .. } | Self::AttachmentFailed { .. })
    }
}

/// Sink for user-visible transient messages.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

/// Default sink routing notices into the structured log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        if notice.is_failure() {
            warn!("event=notice status=error message={notice}");
        } else {
            info!("event=notice status=ok message={notice}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Notice;

    #[test]
    fn failure_classification_matches_variants() {
        assert!(Notice::NoteFailed {
            reason: "disk full".to_string()
        }
        .is_failure());
        assert!(!Notice::AttachmentReused {
            path: "attachments/a.png".to_string()
        }
        .is_failure());
    }

    #[test]
    fn display_mentions_the_subject() {
        let notice = Notice::NoteAdded {
            date_key: "2026-08-28".to_string(),
        };
        assert_eq!(notice.to_string(), "Note added to 2026-08-28");
    }
}
