//! Plain-filesystem vault backend.
//!
//! # Responsibility
//! - Implement the [`Vault`] contract over a root directory: markdown
//!   documents anywhere under the root, binary blobs at explicit relative
//!   paths.
//!
//! # Invariants
//! - Relative paths never escape the root (`..` components are rejected).
//! - Document lookup matches the original host's behavior: basename equality
//!   over all markdown files, wherever they live under the root.

use crate::vault::{Vault, VaultDocument, VaultError, VaultResult};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Filesystem-backed vault rooted at one directory.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, relative: &str) -> VaultResult<PathBuf> {
        let candidate = Path::new(relative);
        if relative.is_empty()
            || candidate.is_absolute()
            || candidate
                .components()
                .any(|part| matches!(part, Component::ParentDir))
        {
            return Err(VaultError::InvalidName(relative.to_string()));
        }
        Ok(self.root.join(candidate))
    }

    fn collect_markdown(&self, dir: &Path, out: &mut Vec<VaultDocument>) -> VaultResult<()> {
        let read_dir = fs::read_dir(dir).map_err(|source| io_error(dir, source))?;
        for item in read_dir {
            let item = item.map_err(|source| io_error(dir, source))?;
            let path = item.path();
            if path.is_dir() {
                self.collect_markdown(&path, out)?;
            } else if path.extension().is_some_and(|ext| ext == "md") {
                if let Some(relative) = self.relative_string(&path) {
                    out.push(VaultDocument::new(relative));
                }
            }
        }
        Ok(())
    }

    fn relative_string(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let text = relative
            .components()
            .filter_map(|part| part.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/");
        (!text.is_empty()).then_some(text)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> VaultError {
    VaultError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl Vault for FsVault {
    fn list_documents(&self) -> VaultResult<Vec<VaultDocument>> {
        let mut documents = Vec::new();
        self.collect_markdown(&self.root, &mut documents)?;
        documents.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(documents)
    }

    fn find_document(&self, name: &str) -> VaultResult<Option<VaultDocument>> {
        let documents = self.list_documents()?;
        Ok(documents.into_iter().find(|doc| doc.name() == name))
    }

    fn create_document(&self, name: &str, initial_text: &str) -> VaultResult<VaultDocument> {
        let relative = format!("{name}.md");
        let target = self.absolute(&relative)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }
        fs::write(&target, initial_text).map_err(|source| io_error(&target, source))?;
        Ok(VaultDocument::new(relative))
    }

    fn read_text(&self, document: &VaultDocument) -> VaultResult<String> {
        let target = self.absolute(&document.path)?;
        fs::read_to_string(&target).map_err(|source| io_error(&target, source))
    }

    fn write_text(&self, document: &VaultDocument, text: &str) -> VaultResult<()> {
        let target = self.absolute(&document.path)?;
        fs::write(&target, text).map_err(|source| io_error(&target, source))
    }

    fn create_binary(&self, path: &str, bytes: &[u8]) -> VaultResult<VaultDocument> {
        let target = self.absolute(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }
        fs::write(&target, bytes).map_err(|source| io_error(&target, source))?;
        Ok(VaultDocument::new(path))
    }

    fn path_exists(&self, path: &str) -> VaultResult<Option<VaultDocument>> {
        let target = self.absolute(path)?;
        Ok(target.exists().then(|| VaultDocument::new(path)))
    }

    fn create_folder(&self, path: &str) -> VaultResult<()> {
        let target = self.absolute(path)?;
        // create_dir_all succeeds when the folder already exists, which is
        // exactly the tolerance concurrent first-attach calls require.
        fs::create_dir_all(&target).map_err(|source| io_error(&target, source))
    }

    fn resolve_displayable_path(&self, document: &VaultDocument) -> VaultResult<String> {
        let target = self.absolute(&document.path)?;
        Ok(format!("file://{}", target.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::FsVault;
    use crate::vault::{Vault, VaultError};

    fn vault() -> (tempfile::TempDir, FsVault) {
        let dir = tempfile::tempdir().unwrap();
        let vault = FsVault::new(dir.path());
        (dir, vault)
    }

    #[test]
    fn create_then_find_by_lookup_name() {
        let (_dir, vault) = vault();
        vault.create_document("2026-08-28", "").unwrap();

        let found = vault.find_document("2026-08-28").unwrap().unwrap();
        assert_eq!(found.path, "2026-08-28.md");
        assert!(vault.find_document("2026-08-27").unwrap().is_none());
    }

    #[test]
    fn lists_markdown_in_nested_folders() {
        let (_dir, vault) = vault();
        vault.create_document("top", "a").unwrap();
        vault.create_folder("daily").unwrap();
        vault.create_document("daily/nested", "b").unwrap();
        vault.create_binary("blob.bin", b"x").unwrap();

        let names: Vec<String> = vault
            .list_documents()
            .unwrap()
            .iter()
            .map(|doc| doc.path.clone())
            .collect();
        assert_eq!(names, vec!["daily/nested.md", "top.md"]);
    }

    #[test]
    fn write_then_read_round_trip() {
        let (_dir, vault) = vault();
        let doc = vault.create_document("note", "first").unwrap();
        vault.write_text(&doc, "second").unwrap();
        assert_eq!(vault.read_text(&doc).unwrap(), "second");
    }

    #[test]
    fn create_folder_is_idempotent() {
        let (_dir, vault) = vault();
        vault.create_folder("attachments").unwrap();
        vault.create_folder("attachments").unwrap();
    }

    #[test]
    fn path_exists_reports_binary_blobs() {
        let (_dir, vault) = vault();
        assert!(vault.path_exists("attachments/a.png").unwrap().is_none());
        vault.create_binary("attachments/a.png", b"png").unwrap();
        assert!(vault.path_exists("attachments/a.png").unwrap().is_some());
    }

    #[test]
    fn rejects_paths_escaping_the_root() {
        let (_dir, vault) = vault();
        let err = vault.path_exists("../outside").unwrap_err();
        assert!(matches!(err, VaultError::InvalidName(_)));
    }

    #[test]
    fn displayable_path_is_a_file_uri() {
        let (_dir, vault) = vault();
        let doc = vault.create_binary("attachments/a.png", b"png").unwrap();
        let uri = vault.resolve_displayable_path(&doc).unwrap();
        assert!(uri.starts_with("file://"));
        assert!(uri.ends_with("attachments/a.png"));
    }
}
