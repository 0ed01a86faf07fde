// tests/common.rs
//! Shared test utilities — logging setup, fake stores and decryptors

use std::fs;
use std::path::{Path, PathBuf};

use pass_export::aliases::Plaintext;
use pass_export::{Decryptor, DecryptionError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize test-friendly logging; respects RUST_LOG, safe to call twice
#[allow(dead_code)]
pub fn setup() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

/// Write a store entry. The "ciphertext" is the plaintext itself.
#[allow(dead_code)]
pub fn write_entry(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Treats every file as already decrypted
#[allow(dead_code)]
pub struct PlainDecryptor;

impl Decryptor for PlainDecryptor {
    fn decrypt(&self, path: &Path) -> Result<Plaintext, DecryptionError> {
        let text = fs::read_to_string(path).unwrap();
        Ok(Plaintext::new(text))
    }
}

/// Fails on any file whose name contains `needle`
#[allow(dead_code)]
pub struct FailingDecryptor(pub &'static str);

impl Decryptor for FailingDecryptor {
    fn decrypt(&self, path: &Path) -> Result<Plaintext, DecryptionError> {
        if path.to_string_lossy().contains(self.0) {
            return Err(DecryptionError::Failed {
                path: path.to_path_buf(),
                status: "exit status: 2".into(),
                stderr: "No secret key".into(),
            });
        }
        PlainDecryptor.decrypt(path)
    }
}
