// src/export/bitwarden.rs
//! Bitwarden unencrypted JSON import format
//!
//! [`CredentialRecord`] is what the pipeline produces; [`BitwardenItem`] is
//! its on-disk shape. Field declaration order is the serialized key order.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::consts::{BITWARDEN_LOGIN_TYPE, DEFAULT_URL_SCHEME, URL_SCHEMES};
use crate::entry::ParsedCredential;

/// One exported login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: Uuid,
    pub name: String,
    pub username: Option<String>,
    pub password: String,
    pub uri: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Build a record for one decrypted entry.
///
/// `fallback_identifier` is the entry's raw file name; it becomes the
/// username when the metadata did not name one.
pub fn map_to_record(
    website: &str,
    parsed: ParsedCredential,
    fallback_identifier: &str,
) -> CredentialRecord {
    let username = parsed
        .username
        .unwrap_or_else(|| fallback_identifier.to_string());
    let now = Utc::now();

    CredentialRecord {
        id: Uuid::new_v4(),
        name: website.to_string(),
        username: Some(username),
        password: parsed.password,
        uri: format_url(website),
        created_at: now,
        updated_at: now,
    }
}

/// Turn a store label into an absolute URL. Idempotent.
pub fn format_url(website: &str) -> String {
    if URL_SCHEMES.iter().any(|scheme| website.starts_with(scheme)) {
        website.to_string()
    } else {
        format!("{DEFAULT_URL_SCHEME}{website}")
    }
}

/// `2025-01-31T12:34:56.789Z`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_timestamp(ts))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BitwardenFolder {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BitwardenUri {
    #[serde(rename = "match")]
    pub match_type: Option<u8>,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BitwardenLogin {
    pub fido2_credentials: Vec<serde_json::Value>,
    pub uris: Vec<BitwardenUri>,
    pub username: Option<String>,
    pub password: String,
    pub totp: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BitwardenItem {
    pub password_history: Option<Vec<serde_json::Value>>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub revision_date: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub creation_date: DateTime<Utc>,
    pub deleted_date: Option<String>,
    pub id: Uuid,
    pub organization_id: Option<Uuid>,
    pub folder_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub item_type: u8,
    pub reprompt: u8,
    pub name: String,
    pub notes: Option<String>,
    pub favorite: bool,
    pub login: BitwardenLogin,
    pub collection_ids: Option<Vec<Uuid>>,
}

impl From<&CredentialRecord> for BitwardenItem {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            password_history: None,
            revision_date: record.updated_at,
            creation_date: record.created_at,
            deleted_date: None,
            id: record.id,
            organization_id: None,
            folder_id: None,
            item_type: BITWARDEN_LOGIN_TYPE,
            reprompt: 0,
            name: record.name.clone(),
            notes: None,
            favorite: false,
            login: BitwardenLogin {
                fido2_credentials: Vec::new(),
                uris: vec![BitwardenUri {
                    match_type: None,
                    uri: record.uri.clone(),
                }],
                username: record.username.clone(),
                password: record.password.clone(),
                totp: None,
            },
            collection_ids: None,
        }
    }
}
