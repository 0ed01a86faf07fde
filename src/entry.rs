// src/entry.rs
//! Decrypted entry parsing
//!
//! A pass/gopass entry is the password on the first line, optionally
//! followed by free text and a YAML block opened by a `---` line:
//!
//! ```text
//! hunter2
//! ---
//! user: alice
//! url: https://example.com
//! ```

use serde_yaml::Value;
use tracing::warn;

use crate::consts::{METADATA_SEPARATOR, USERNAME_KEYS};
use crate::error::MetadataParseError;

pub type Result<T> = std::result::Result<T, MetadataParseError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCredential {
    pub username: Option<String>,
    pub password: String,
}

/// Split an entry into its password line and the metadata block, if any.
///
/// The password is everything before the first `\n` or `\r\n`. A `\r`
/// that is not followed by `\n` belongs to the password.
pub fn split_entry(plaintext: &str) -> (&str, Option<&str>) {
    match plaintext.split_once('\n') {
        Some((first, rest)) => {
            let password = first.strip_suffix('\r').unwrap_or(first);
            (password, metadata_block(rest))
        }
        None => (plaintext, None),
    }
}

/// Parse an entry. A malformed metadata block is an error.
pub fn parse_entry(plaintext: &str) -> Result<ParsedCredential> {
    let (password, metadata) = split_entry(plaintext);
    let username = match metadata {
        Some(block) => username_from_metadata(block)?,
        None => None,
    };
    Ok(ParsedCredential {
        username,
        password: password.to_string(),
    })
}

/// Parse an entry, treating a malformed metadata block as "no username".
///
/// The password line never depends on the metadata, so it is always kept.
pub fn parse_entry_lenient(plaintext: &str) -> ParsedCredential {
    let (password, metadata) = split_entry(plaintext);
    let username = metadata.and_then(|block| match username_from_metadata(block) {
        Ok(username) => username,
        Err(err) => {
            warn!("ignoring unreadable metadata block: {err}");
            None
        }
    });
    ParsedCredential {
        username,
        password: password.to_string(),
    }
}

/// Text after the first line that is exactly `---` (line break required)
fn metadata_block(rest: &str) -> Option<&str> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        offset += line.len();
        let Some(body) = line.strip_suffix('\n') else {
            break;
        };
        if body.strip_suffix('\r').unwrap_or(body) == METADATA_SEPARATOR {
            return Some(&rest[offset..]);
        }
    }
    None
}

fn username_from_metadata(block: &str) -> Result<Option<String>> {
    if block.trim().is_empty() {
        return Ok(None);
    }
    let mapping = match serde_yaml::from_str::<Value>(block)? {
        Value::Null => return Ok(None),
        Value::Mapping(mapping) => mapping,
        _ => return Err(MetadataParseError::NotAMapping),
    };
    Ok(USERNAME_KEYS
        .iter()
        .find_map(|key| mapping.get(*key).and_then(scalar_to_string)))
}

// Empty strings count as absent so the next key (or the file name) wins.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}
