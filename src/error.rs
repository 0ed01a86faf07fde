// src/error.rs
//! Public error types for the entire crate

use std::path::PathBuf;

use thiserror::Error;

/// The credential store is missing or laid out in a way we cannot walk.
#[derive(Error, Debug)]
pub enum StoreLayoutError {
    #[error("password store not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("expected a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// The external decryptor failed on a single credential file.
#[derive(Error, Debug)]
pub enum DecryptionError {
    #[error("failed to launch {}: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("gpg exited with {status} for {}: {stderr}", path.display())]
    Failed {
        path: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("decrypted {} is not valid UTF-8", path.display())]
    InvalidUtf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("not a gpg file: {}", .0.display())]
    UnsupportedExtension(PathBuf),
}

/// A metadata block exists but is not a key/value document.
#[derive(Error, Debug)]
pub enum MetadataParseError {
    #[error("invalid YAML in metadata block: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("metadata block is not a key/value mapping")]
    NotAMapping,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Store layout error: {0}")]
    Layout(#[from] StoreLayoutError),

    #[error("Decryption failed for {website}/{identifier}: {source}")]
    Decryption {
        website: String,
        identifier: String,
        #[source]
        source: DecryptionError,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl CoreError {
    /// Process exit code for this error, as documented by `pass2bw --help`.
    pub fn exit_code(&self) -> u8 {
        match self {
            CoreError::Io(_) | CoreError::Serialization(_) | CoreError::Config(_) => 1,
            CoreError::Decryption { .. } => 2,
            CoreError::Layout(_) => 3,
        }
    }
}

impl From<tempfile::PersistError> for CoreError {
    fn from(err: tempfile::PersistError) -> Self {
        CoreError::Io(err.error)
    }
}
