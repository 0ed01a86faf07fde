// src/export/mod.rs
//! Export utilities for pass-export
//!
//! Record mapping lives in `bitwarden`, document assembly and writing in
//! `json`. Every export holds passwords in cleartext.

pub use bitwarden::{format_url, map_to_record, CredentialRecord};
pub use json::{assemble, assemble_simple, to_json_bytes, write_document, ExportDocument};

pub mod bitwarden;
pub mod json;
