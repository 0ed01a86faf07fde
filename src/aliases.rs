// src/aliases.rs
//! Secret wrappers
//!
//! Decrypted entries hold live passwords, so they are wiped on drop.

pub use zeroize::Zeroizing;

/// Full decrypted text of one store entry
pub type Plaintext = Zeroizing<String>;
