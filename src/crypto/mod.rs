// src/crypto/mod.rs
//! Decryption adapter — the only place that spawns external processes
//!
//! The pipeline only sees the [`Decryptor`] trait; [`GpgDecryptor`] is the
//! production implementation backed by a gpg binary.
mod decrypt;

pub use decrypt::{Decryptor, GpgDecryptor};
