// src/crypto/decrypt.rs
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::aliases::Plaintext;
use crate::consts::GPG_EXTENSION;
use crate::error::DecryptionError;

pub type Result<T> = std::result::Result<T, DecryptionError>;

/// Anything that can turn one encrypted store entry into plaintext
pub trait Decryptor {
    fn decrypt(&self, path: &Path) -> Result<Plaintext>;
}

/// Shells out to a gpg-compatible binary
#[derive(Debug, Clone)]
pub struct GpgDecryptor {
    binary: PathBuf,
    use_agent: bool,
}

impl GpgDecryptor {
    pub fn new(binary: impl Into<PathBuf>, use_agent: bool) -> Self {
        Self {
            binary: binary.into(),
            use_agent,
        }
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["--batch", "--quiet", "--no-tty"]);
        if self.use_agent {
            cmd.arg("--use-agent");
        }
        cmd.arg("--decrypt").arg(path);
        cmd
    }
}

impl Decryptor for GpgDecryptor {
    fn decrypt(&self, path: &Path) -> Result<Plaintext> {
        let is_gpg = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext == GPG_EXTENSION)
            .unwrap_or(false);
        if !is_gpg {
            return Err(DecryptionError::UnsupportedExtension(path.to_path_buf()));
        }

        debug!("decrypting {}", path.display());
        let output = self
            .command(path)
            .output()
            .map_err(|source| DecryptionError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DecryptionError::Failed {
                path: path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(output.stdout).map_err(|source| {
            DecryptionError::InvalidUtf8 {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Plaintext::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_gpg_files_without_spawning() {
        let gpg = GpgDecryptor::new("/definitely/not/a/binary", false);
        let err = gpg.decrypt(Path::new("notes.txt")).err().unwrap();
        assert!(matches!(err, DecryptionError::UnsupportedExtension(_)));
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let gpg = GpgDecryptor::new("/definitely/not/a/binary", true);
        let err = gpg.decrypt(Path::new("entry.gpg")).err().unwrap();
        assert!(matches!(err, DecryptionError::Spawn { .. }));
    }

    #[test]
    fn agent_flag_is_passed_through() {
        let args = |agent: bool| -> Vec<String> {
            GpgDecryptor::new("gpg", agent)
                .command(Path::new("a.gpg"))
                .get_args()
                .map(|a| a.to_string_lossy().into_owned())
                .collect()
        };
        assert!(args(true).contains(&"--use-agent".to_string()));
        assert!(!args(false).contains(&"--use-agent".to_string()));
        assert_eq!(args(false).last().unwrap(), "a.gpg");
    }
}
