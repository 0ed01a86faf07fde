// src/config/app.rs
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::defaults::*;
use crate::consts::CONFIG_ENV_VAR;
use crate::enums::{ErrorPolicy, ExportFormat};
use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: Store,
    pub gpg: Gpg,
    pub output: Output,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Store {
    pub directory: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Gpg {
    pub binary: String,
    pub use_agent: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Output {
    pub file: String,
    pub format: ExportFormat,
    pub on_error: ErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store: default_store(),
            gpg: default_gpg(),
            output: default_output(),
        }
    }
}

impl Config {
    /// Store root with a leading `~` expanded
    pub fn store_dir(&self) -> PathBuf {
        expand_home(&self.store.directory)
    }

    /// Output file with a leading `~` expanded
    pub fn output_path(&self) -> PathBuf {
        expand_home(&self.output.file)
    }

    pub fn from_toml(content: &str) -> Result<Self, CoreError> {
        toml::from_str(content).map_err(|e| CoreError::Config(e.to_string()))
    }
}

/// Load config from `explicit`, else `$PASS2BW_CONFIG`, else the per-user
/// config dir. Only an explicitly named file is required to exist.
pub fn load(explicit: Option<&Path>) -> Result<Config, CoreError> {
    let (path, required) = match explicit {
        Some(path) => (Some(path.to_path_buf()), true),
        None => match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => (Some(PathBuf::from(path)), true),
            None => (default_config_path(), false),
        },
    };

    let Some(path) = path.filter(|p| required || p.exists()) else {
        debug!("no config file found, using built-in defaults");
        return Ok(Config::default());
    };

    debug!("loading config from {}", path.display());
    let content = std::fs::read_to_string(&path)
        .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
    Config::from_toml(&content)
}

pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
