// src/store.rs
//! Password-store traversal
//!
//! A store root holds one entry per website: either a directory with one
//! `.gpg` file per account, or a single `<website>.gpg` file. The walker
//! yields one [`WebsiteGroup`] per entry, lazily, sorted by file name.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::consts::{GPG_EXTENSION, GPG_SUFFIX};
use crate::error::StoreLayoutError;

pub type Result<T> = std::result::Result<T, StoreLayoutError>;

/// One encrypted file found in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCredential {
    pub website: String,
    /// Raw file name, used as the username fallback
    pub identifier: String,
    pub ciphertext_path: PathBuf,
}

impl RawCredential {
    /// Only `.gpg` files are handed to the decryptor
    pub fn is_decryptable(&self) -> bool {
        has_gpg_extension(&self.ciphertext_path)
    }
}

/// All credentials belonging to one website
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteGroup {
    pub website: String,
    pub credentials: Vec<RawCredential>,
}

pub struct StoreWalker {
    root: PathBuf,
}

impl StoreWalker {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Start walking the store. Fails up front if the root is unusable.
    pub fn walk(&self) -> Result<Websites> {
        ensure_directory(&self.root)?;
        Ok(Websites {
            entries: level_one(&self.root).into_iter(),
        })
    }
}

/// Lazy iterator over the websites of a store
pub struct Websites {
    entries: walkdir::IntoIter,
}

impl Iterator for Websites {
    type Item = Result<WebsiteGroup>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(unreadable(err))),
            };

            if is_hidden(&entry) {
                debug!("skipping hidden entry {}", entry.path().display());
                continue;
            }

            if entry.file_type().is_dir() {
                return Some(website_directory(&entry));
            }

            match website_file(&entry) {
                Some(group) => return Some(Ok(group)),
                None => {
                    debug!("skipping non-gpg file {}", entry.path().display());
                    continue;
                }
            }
        }
    }
}

/// `<root>/<website>/` — every file one level down is one credential
fn website_directory(entry: &DirEntry) -> Result<WebsiteGroup> {
    let website = file_name(entry);
    let mut credentials = Vec::new();

    for file in level_one(entry.path()) {
        let file = file.map_err(unreadable)?;
        if file.file_type().is_dir() || is_hidden(&file) {
            debug!("ignoring {}", file.path().display());
            continue;
        }
        credentials.push(RawCredential {
            website: website.clone(),
            identifier: file_name(&file),
            ciphertext_path: file.into_path(),
        });
    }

    Ok(WebsiteGroup {
        website,
        credentials,
    })
}

/// `<root>/<website>.gpg` — a single credential
fn website_file(entry: &DirEntry) -> Option<WebsiteGroup> {
    if !has_gpg_extension(entry.path()) {
        return None;
    }
    let identifier = file_name(entry);
    let website = identifier
        .strip_suffix(GPG_SUFFIX)
        .unwrap_or(&identifier)
        .to_string();

    Some(WebsiteGroup {
        website: website.clone(),
        credentials: vec![RawCredential {
            website,
            identifier,
            ciphertext_path: entry.path().to_path_buf(),
        }],
    })
}

fn level_one(dir: &Path) -> WalkDir {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
}

fn ensure_directory(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(StoreLayoutError::NotADirectory(path.to_path_buf())),
        Err(_) => Err(StoreLayoutError::NotFound(path.to_path_buf())),
    }
}

fn unreadable(err: walkdir::Error) -> StoreLayoutError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    StoreLayoutError::Unreadable { path, source: err }
}

fn has_gpg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext == GPG_EXTENSION)
        .unwrap_or(false)
}

fn file_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().into_owned()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn groups_directory_entries_by_website() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("example.com/bob.gpg"));
        touch(&dir.path().join("example.com/alice.gpg"));

        let groups: Vec<_> = StoreWalker::new(dir.path())
            .walk()
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].website, "example.com");
        let ids: Vec<_> = groups[0]
            .credentials
            .iter()
            .map(|c| c.identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["alice.gpg", "bob.gpg"]);
    }

    #[test]
    fn bare_file_strips_suffix() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("site.gpg"));

        let groups: Vec<_> = StoreWalker::new(dir.path())
            .walk()
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].website, "site");
        assert_eq!(groups[0].credentials[0].identifier, "site.gpg");
    }

    #[test]
    fn non_gpg_files_are_enumerated_but_not_decryptable() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("example.com/notes.txt"));

        let groups: Vec<_> = StoreWalker::new(dir.path())
            .walk()
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(groups[0].credentials.len(), 1);
        assert!(!groups[0].credentials[0].is_decryptable());
    }

    #[test]
    fn skips_hidden_and_stray_top_level_files() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join(".gpg-id"));
        touch(&dir.path().join(".git/config"));
        touch(&dir.path().join("README"));

        let count = StoreWalker::new(dir.path()).walk().unwrap().count();
        assert_eq!(count, 0);
    }

    #[test]
    fn missing_root_is_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = StoreWalker::new(&missing).walk().err().unwrap();
        assert!(matches!(err, StoreLayoutError::NotFound(p) if p == missing));
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("store.gpg");
        touch(&file);

        let err = StoreWalker::new(&file).walk().err().unwrap();
        assert!(matches!(err, StoreLayoutError::NotADirectory(_)));
    }
}
