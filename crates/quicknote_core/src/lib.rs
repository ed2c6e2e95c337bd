//! Core domain logic for QuickNote daily capture.
//! This crate is the single source of truth for the entry line grammar and
//! the timeline ordering rules.

pub mod format;
pub mod grammar;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod vault;

pub use grammar::{format_line, LineGrammar};
pub use logging::{default_log_level, init_logging};
pub use model::entry::{Entry, EntryValidationError};
pub use model::settings::{InsertionPolicy, QuickNoteSettings};
pub use notify::{LogNotifier, Notice, Notifier};
pub use service::daily_note::{
    AttachmentOutcome, DailyNoteError, DailyNoteService, ATTACHMENT_FOLDER,
};
pub use service::timeline::{
    build_timeline, parse_entries, relative_display, TimelineDay, TimelineWindow,
    DEFAULT_TIMELINE_DAYS,
};
pub use service::writer::append;
pub use vault::{FsVault, Vault, VaultDocument, VaultError, VaultResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
