//! Storage collaborator contract.
//!
//! # Responsibility
//! - Define the document-storage seam the capture and timeline services
//!   consume: flat text documents addressed by name, binary blobs addressed
//!   by path, idempotent folder creation.
//!
//! # Invariants
//! - Document content is exclusively owned by the backing store; services
//!   operate on transient in-memory copies per call and cache nothing.
//! - `create_folder` must treat "already exists" as success so concurrent
//!   first-attach calls cannot fail each other.

pub mod fs;

pub use fs::FsVault;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type VaultResult<T> = Result<T, VaultError>;

/// Storage-layer failure surfaced to exactly one caller, never retried.
#[derive(Debug)]
pub enum VaultError {
    /// Underlying I/O failure on a concrete path.
    Io {
        path: String,
        source: std::io::Error,
    },
    /// A document or blob name that the backend cannot address.
    InvalidName(String),
}

impl Display for VaultError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "storage I/O failure at `{path}`: {source}"),
            Self::InvalidName(name) => write!(f, "invalid document name: `{name}`"),
        }
    }
}

impl Error for VaultError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidName(_) => None,
        }
    }
}

/// Handle to one stored document, addressed by vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultDocument {
    /// Forward-slash path relative to the vault root.
    pub path: String,
}

impl VaultDocument {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Lookup name: the final path component without its extension.
    pub fn name(&self) -> &str {
        let file = self.path.rsplit('/').next().unwrap_or(&self.path);
        match file.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file,
        }
    }
}

/// Document-storage operations consumed by the services.
///
/// Read-modify-write sequences over this trait hold no lock between the read
/// and the write; two concurrent appends to the same document can lose one
/// update. Accepted for the single-user host this serves, see service docs.
pub trait Vault {
    /// Lists every markdown document in the vault.
    fn list_documents(&self) -> VaultResult<Vec<VaultDocument>>;

    /// Finds a markdown document whose lookup name equals `name`.
    fn find_document(&self, name: &str) -> VaultResult<Option<VaultDocument>>;

    /// Creates a markdown document with the given lookup name and text.
    fn create_document(&self, name: &str, initial_text: &str) -> VaultResult<VaultDocument>;

    /// Reads a document's full text.
    fn read_text(&self, document: &VaultDocument) -> VaultResult<String>;

    /// Replaces a document's full text.
    fn write_text(&self, document: &VaultDocument, text: &str) -> VaultResult<()>;

    /// Stores a binary blob at a vault-relative path.
    fn create_binary(&self, path: &str, bytes: &[u8]) -> VaultResult<VaultDocument>;

    /// Returns a handle when something already exists at `path`.
    fn path_exists(&self, path: &str) -> VaultResult<Option<VaultDocument>>;

    /// Creates a folder; succeeding when it already exists.
    fn create_folder(&self, path: &str) -> VaultResult<()>;

    /// Resolves a URI-like string usable for previewing a stored blob.
    fn resolve_displayable_path(&self, document: &VaultDocument) -> VaultResult<String>;
}

#[cfg(test)]
mod tests {
    use super::VaultDocument;

    #[test]
    fn name_strips_folder_and_extension() {
        assert_eq!(VaultDocument::new("2026-08-28.md").name(), "2026-08-28");
        assert_eq!(VaultDocument::new("daily/2026-08-28.md").name(), "2026-08-28");
        assert_eq!(VaultDocument::new("attachments/.hidden").name(), ".hidden");
        assert_eq!(VaultDocument::new("plain").name(), "plain");
    }
}
