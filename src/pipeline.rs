// src/pipeline.rs
//! Store → decrypt → parse → map, one credential at a time
//!
//! The output file is written only after every record has been collected,
//! so a failed run never leaves a partial document behind.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::crypto::Decryptor;
use crate::entry::parse_entry_lenient;
use crate::enums::{ErrorPolicy, ExportFormat};
use crate::error::CoreError;
use crate::export::{
    assemble, assemble_simple, map_to_record, to_json_bytes, write_document, CredentialRecord,
};
use crate::store::{RawCredential, StoreWalker};

pub type Result<T> = std::result::Result<T, CoreError>;

/// An entry left out under [`ErrorPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedEntry {
    pub website: String,
    pub identifier: String,
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub records: Vec<CredentialRecord>,
    pub failures: Vec<FailedEntry>,
    /// Files seen in the store that are not `.gpg`
    pub ignored: usize,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Walk `root` and turn every `.gpg` entry into a [`CredentialRecord`].
pub fn collect_records(
    root: &Path,
    decryptor: &dyn Decryptor,
    policy: ErrorPolicy,
) -> Result<ExportReport> {
    let mut report = ExportReport::default();

    for group in StoreWalker::new(root).walk()? {
        let group = group?;
        info!(
            "{}: {} entr{}",
            group.website,
            group.credentials.len(),
            if group.credentials.len() == 1 { "y" } else { "ies" }
        );

        for credential in group.credentials {
            if !credential.is_decryptable() {
                debug!("ignoring {}", credential.ciphertext_path.display());
                report.ignored += 1;
                continue;
            }

            match export_credential(&credential, decryptor) {
                Ok(record) => report.records.push(record),
                Err(err) if policy == ErrorPolicy::Skip => {
                    warn!("skipping {}: {err}", credential.ciphertext_path.display());
                    report.failures.push(FailedEntry {
                        website: credential.website,
                        identifier: credential.identifier,
                        path: credential.ciphertext_path,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }

    Ok(report)
}

/// Full run: collect every record, then serialize and write the document.
///
/// On any fatal error the destination is left untouched.
pub fn export_store(config: &Config, decryptor: &dyn Decryptor) -> Result<ExportReport> {
    let root = config.store_dir();
    info!("exporting password store at {}", root.display());

    let report = collect_records(&root, decryptor, config.output.on_error)?;
    let bytes = match config.output.format {
        ExportFormat::Bitwarden => to_json_bytes(&assemble(&report.records))?,
        ExportFormat::Simple => to_json_bytes(&assemble_simple(&report.records))?,
    };

    let output = config.output_path();
    write_document(&bytes, &output)?;
    info!(
        "wrote {} record(s) to {}",
        report.records.len(),
        output.display()
    );

    Ok(report)
}

fn export_credential(
    credential: &RawCredential,
    decryptor: &dyn Decryptor,
) -> Result<CredentialRecord> {
    let plaintext = decryptor
        .decrypt(&credential.ciphertext_path)
        .map_err(|source| CoreError::Decryption {
            website: credential.website.clone(),
            identifier: credential.identifier.clone(),
            source,
        })?;

    let parsed = parse_entry_lenient(&plaintext);
    let record = map_to_record(&credential.website, parsed, &credential.identifier);
    debug!(
        "{} → {}",
        credential.ciphertext_path.display(),
        record.username.as_deref().unwrap_or_default()
    );
    Ok(record)
}
