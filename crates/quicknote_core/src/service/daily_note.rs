//! Daily-note capture service.
//!
//! # Responsibility
//! - Orchestrate one capture: resolve the day document by date key, run the
//!   pure append over a snapshot of its text, persist, and report the
//!   outcome through the notification boundary.
//! - Store attachment blobs with lazy folder creation and collision reuse.
//!
//! # Invariants
//! - The read-modify-write sequence holds no lock; two concurrent captures
//!   against the same day document can lose one update. Accepted for the
//!   single-user, single-window host this serves.
//! - A successful attachment store followed by a failed append leaves the
//!   attachment on disk; there is no rollback of completed writes.
//! - An existing attachment path is reused, never overwritten.

use crate::format::pattern_to_chrono;
use crate::model::entry::{Entry, EntryValidationError};
use crate::model::settings::QuickNoteSettings;
use crate::notify::{Notice, Notifier};
use crate::service::timeline::{build_timeline, TimelineWindow};
use crate::service::writer::append;
use crate::vault::{Vault, VaultDocument, VaultError, VaultResult};
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};

/// Well-known folder for attachment blobs, relative to the vault root.
pub const ATTACHMENT_FOLDER: &str = "attachments";

/// Capture-layer error.
#[derive(Debug)]
pub enum DailyNoteError {
    /// The draft had neither content nor attachments; nothing was persisted.
    EmptyDraft(EntryValidationError),
    /// Storage failed; the single operation is aborted, partial state stays.
    Vault(VaultError),
}

impl std::fmt::Display for DailyNoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDraft(err) => write!(f, "{err}"),
            Self::Vault(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DailyNoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyDraft(err) => Some(err),
            Self::Vault(err) => Some(err),
        }
    }
}

impl From<EntryValidationError> for DailyNoteError {
    fn from(value: EntryValidationError) -> Self {
        Self::EmptyDraft(value)
    }
}

impl From<VaultError> for DailyNoteError {
    fn from(value: VaultError) -> Self {
        Self::Vault(value)
    }
}

/// How an attachment store resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentOutcome {
    /// Blob written at the path.
    Stored(String),
    /// Path already existed; the existing blob is referenced instead.
    Reused(String),
}

impl AttachmentOutcome {
    /// Vault-relative path to reference from the entry line.
    pub fn path(&self) -> &str {
        match self {
            Self::Stored(path) | Self::Reused(path) => path,
        }
    }
}

/// Capture and timeline facade over a storage backend and a notice sink.
pub struct DailyNoteService<V: Vault, N: Notifier> {
    vault: V,
    notifier: N,
    settings: QuickNoteSettings,
}

impl<V: Vault, N: Notifier> DailyNoteService<V, N> {
    pub fn new(vault: V, notifier: N, settings: QuickNoteSettings) -> Self {
        Self {
            vault,
            notifier,
            settings,
        }
    }

    pub fn settings(&self) -> &QuickNoteSettings {
        &self.settings
    }

    /// Captures one note into the day document for `now`.
    ///
    /// Returns the date key of the touched document. A storage failure
    /// aborts this capture only and is surfaced as a failure notice; no
    /// retry is attempted.
    pub fn capture(
        &self,
        content: &str,
        attachments: Vec<String>,
        now: NaiveDateTime,
    ) -> Result<String, DailyNoteError> {
        let timestamp = now
            .format(&pattern_to_chrono(&self.settings.timestamp_format))
            .to_string();
        let date_key = now
            .format(&pattern_to_chrono(&self.settings.date_format))
            .to_string();
        let entry = Entry::new(timestamp, content.trim(), attachments)?;

        match self.append_to_day(&date_key, &entry) {
            Ok(()) => {
                info!(
                    "event=note_captured status=ok date_key={date_key} attachments={}",
                    entry.attachments.len()
                );
                self.notifier.notify(&Notice::NoteAdded {
                    date_key: date_key.clone(),
                });
                Ok(date_key)
            }
            Err(err) => {
                warn!("event=note_captured status=error date_key={date_key} error={err}");
                self.notifier.notify(&Notice::NoteFailed {
                    reason: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    fn append_to_day(&self, date_key: &str, entry: &Entry) -> VaultResult<()> {
        let document = self.get_or_create_day_document(date_key)?;
        let body = self.vault.read_text(&document)?;
        let new_body = append(&body, entry, &self.settings.insertion_policy());
        self.vault.write_text(&document, &new_body)
    }

    /// Finds the day document by lookup-name equality, creating an empty one
    /// lazily on first capture of the day.
    fn get_or_create_day_document(&self, date_key: &str) -> VaultResult<VaultDocument> {
        if let Some(existing) = self.vault.find_document(date_key)? {
            return Ok(existing);
        }
        self.vault.create_document(date_key, "")
    }

    /// Stores one attachment blob under [`ATTACHMENT_FOLDER`].
    ///
    /// The folder is created lazily; an already-existing folder is success.
    /// A name collision reuses the existing blob and says so, rather than
    /// overwriting.
    pub fn store_attachment(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<AttachmentOutcome, DailyNoteError> {
        match self.store_attachment_inner(file_name, bytes) {
            Ok(outcome) => {
                let notice = match &outcome {
                    AttachmentOutcome::Stored(path) => Notice::AttachmentStored {
                        path: path.clone(),
                    },
                    AttachmentOutcome::Reused(path) => Notice::AttachmentReused {
                        path: path.clone(),
                    },
                };
                self.notifier.notify(&notice);
                Ok(outcome)
            }
            Err(err) => {
                warn!("event=attachment_store status=error file={file_name} error={err}");
                self.notifier.notify(&Notice::AttachmentFailed {
                    reason: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    fn store_attachment_inner(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> VaultResult<AttachmentOutcome> {
        self.vault.create_folder(ATTACHMENT_FOLDER)?;
        let path = format!("{ATTACHMENT_FOLDER}/{file_name}");
        if self.vault.path_exists(&path)?.is_some() {
            return Ok(AttachmentOutcome::Reused(path));
        }
        self.vault.create_binary(&path, bytes)?;
        Ok(AttachmentOutcome::Stored(path))
    }

    /// Builds the timeline window ending at `today`.
    ///
    /// A day whose document is missing or unreadable contributes nothing;
    /// read failures are logged, not raised, so one bad file cannot blank
    /// the whole view.
    pub fn timeline(&self, today: NaiveDate, day_count: u32) -> TimelineWindow {
        build_timeline(today, day_count, &self.settings, |date_key| {
            match self.fetch_day_body(date_key) {
                Ok(body) => body,
                Err(err) => {
                    warn!("event=timeline_fetch status=error date_key={date_key} error={err}");
                    None
                }
            }
        })
    }

    fn fetch_day_body(&self, date_key: &str) -> VaultResult<Option<String>> {
        let Some(document) = self.vault.find_document(date_key)? else {
            return Ok(None);
        };
        Ok(Some(self.vault.read_text(&document)?))
    }

    /// Resolves a preview URI for a stored attachment, when it exists.
    pub fn attachment_preview(&self, path: &str) -> Result<Option<String>, DailyNoteError> {
        let Some(document) = self.vault.path_exists(path)? else {
            return Ok(None);
        };
        Ok(Some(self.vault.resolve_displayable_path(&document)?))
    }
}
