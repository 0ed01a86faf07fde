// src/lib.rs
//! pass-export — turn a pass/gopass password store into a Bitwarden import
//!
//! Features:
//! - Sorted, lazy walk of `<website>/<user>.gpg` and `<website>.gpg` entries
//! - Decryption through an external gpg binary (optionally via gpg-agent)
//! - Username lookup in gopass YAML metadata blocks
//! - Atomic write of the finished document

pub mod aliases;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod entry;
pub mod enums;
pub mod export;
pub mod pipeline;
pub mod store;

pub mod error;

// Re-export everything users need at the crate root
pub use config::load as load_config;
pub use config::Config;
pub use crypto::{Decryptor, GpgDecryptor};
pub use entry::{parse_entry, parse_entry_lenient, ParsedCredential};
pub use enums::{ErrorPolicy, ExportFormat};
pub use error::{CoreError, DecryptionError, MetadataParseError, StoreLayoutError};
pub use export::{format_url, map_to_record, CredentialRecord, ExportDocument};
pub use pipeline::{collect_records, export_store, ExportReport, FailedEntry};
pub use store::{RawCredential, StoreWalker, WebsiteGroup};
