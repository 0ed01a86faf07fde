// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the user-visible choices: output format and
//! what to do when a single entry cannot be decrypted.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Shape of the exported document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ExportFormat {
    /// Bitwarden unencrypted JSON import
    #[default]
    Bitwarden,
    /// Plain `{ website: { username: password } }` map
    Simple,
}

/// Policy applied when one credential fails to decrypt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop the whole run; nothing is written
    #[default]
    Abort,
    /// Log the entry, leave it out and keep going
    Skip,
}
