// src/config/defaults.rs
use std::path::PathBuf;

use crate::config::app::{Gpg, Output, Store};
use crate::consts::{DEFAULT_GPG_BINARY, DEFAULT_OUTPUT_FILE, DEFAULT_STORE_DIR};
use crate::enums::{ErrorPolicy, ExportFormat};

pub fn default_store() -> Store {
    Store {
        directory: DEFAULT_STORE_DIR.into(),
    }
}

pub fn default_gpg() -> Gpg {
    Gpg {
        binary: DEFAULT_GPG_BINARY.into(),
        use_agent: false,
    }
}

pub fn default_output() -> Output {
    Output {
        file: DEFAULT_OUTPUT_FILE.into(),
        format: ExportFormat::default(),
        on_error: ErrorPolicy::default(),
    }
}

// <config_dir>/pass2bw/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pass2bw").join("config.toml"))
}

impl Default for Store {
    fn default() -> Self {
        default_store()
    }
}

impl Default for Gpg {
    fn default() -> Self {
        default_gpg()
    }
}

impl Default for Output {
    fn default() -> Self {
        default_output()
    }
}
