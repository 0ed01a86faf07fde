// src/export/json.rs
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use super::bitwarden::{BitwardenFolder, BitwardenItem, CredentialRecord};
use crate::consts::JSON_INDENT;
use crate::error::CoreError;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Top-level Bitwarden import document
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub encrypted: bool,
    pub folders: Vec<BitwardenFolder>,
    pub items: Vec<BitwardenItem>,
}

/// `pass2bw` layout: website → username → password
pub type SimpleDocument = BTreeMap<String, BTreeMap<String, String>>;

pub fn assemble(records: &[CredentialRecord]) -> ExportDocument {
    ExportDocument {
        encrypted: false,
        folders: Vec::new(),
        items: records.iter().map(BitwardenItem::from).collect(),
    }
}

/// Later entries for the same website/username overwrite earlier ones.
pub fn assemble_simple(records: &[CredentialRecord]) -> SimpleDocument {
    let mut doc = SimpleDocument::new();
    for record in records {
        let username = record.username.clone().unwrap_or_default();
        doc.entry(record.name.clone())
            .or_default()
            .insert(username, record.password.clone());
    }
    doc
}

/// Serialize with 4-space indentation and struct-order keys.
pub fn to_json_bytes<T: Serialize>(doc: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    doc.serialize(&mut ser)?;
    Ok(out)
}

/// Write `bytes` to `path` atomically: a temp file next to the destination
/// is renamed over it only once fully written.
pub fn write_document(bytes: &[u8], path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ParsedCredential;
    use crate::export::bitwarden::map_to_record;
    use tempfile::tempdir;

    fn record(site: &str, user: &str, pw: &str) -> CredentialRecord {
        map_to_record(
            site,
            ParsedCredential {
                username: Some(user.into()),
                password: pw.into(),
            },
            "unused.gpg",
        )
    }

    #[test]
    fn empty_document() {
        let bytes = to_json_bytes(&assemble(&[])).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "{\n    \"encrypted\": false,\n    \"folders\": [],\n    \"items\": []\n}"
        );
    }

    #[test]
    fn item_keys_keep_declaration_order() {
        let bytes = to_json_bytes(&assemble(&[record("a.com", "u", "p")])).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let pos = |key: &str| text.find(&format!("\"{key}\"")).unwrap();
        assert!(pos("encrypted") < pos("folders"));
        assert!(pos("passwordHistory") < pos("revisionDate"));
        assert!(pos("creationDate") < pos("id"));
        assert!(pos("favorite") < pos("login"));
        assert!(pos("login") < pos("collectionIds"));
        assert!(text.contains("\n        {\n            \"passwordHistory\": null,"));
    }

    #[test]
    fn simple_document_groups_by_website() {
        let doc = assemble_simple(&[
            record("a.com", "alice", "1"),
            record("a.com", "bob", "2"),
            record("b.com", "alice", "3"),
            record("a.com", "alice", "4"),
        ]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc["a.com"]["alice"], "4");
        assert_eq!(doc["a.com"]["bob"], "2");
        assert_eq!(doc["b.com"]["alice"], "3");
    }

    #[test]
    fn assembling_borrows_the_records() {
        let records = vec![record("a.com", "alice", "1"), record("b.com", "bob", "2")];

        let doc = assemble(&records);
        let simple = assemble_simple(&records);

        assert_eq!(doc.items.len(), 2);
        assert_eq!(doc.items[0].id, records[0].id);
        assert_eq!(doc.items[1].login.password, records[1].password);
        assert_eq!(simple["a.com"]["alice"], records[0].password);
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pass.json");
        std::fs::write(&path, b"old").unwrap();

        write_document(b"{}", &path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing/pass.json");
        assert!(matches!(write_document(b"{}", &path), Err(CoreError::Io(_))));
    }
}
