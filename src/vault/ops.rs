//! Vault operations, independent of any transport.
//!
//! Each function is one stateless request: read-only operations load
//! the document once, mutating ones go through `VaultStore::transact`
//! (or `replace` for a full overwrite).  Errors come back as
//! `VaultError` variants; mapping them to HTTP status codes is the
//! server's job.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::errors::{VaultError, Result};

use super::document::{validate_secret_name, Secrets};
use super::store::{VaultStatus, VaultStore};

/// Result of `unlock`.
#[derive(Debug, Clone, PartialEq)]
pub struct Unlocked {
    pub secrets: Secrets,
    pub last_updated: Option<DateTime<Utc>>,
    pub count: usize,
}

/// Result of `save_all`.
#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Result of `get`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched {
    pub key: String,
    pub value: Value,
    pub timestamp: DateTime<Utc>,
}

/// Decrypt the vault and return every secret.
pub fn unlock(store: &VaultStore, password: &str) -> Result<Unlocked> {
    let document = store.load(password)?;
    let last_updated = document.last_updated();
    let secrets = document.into_secrets();

    tracing::info!(count = secrets.len(), "vault unlocked");
    Ok(Unlocked {
        count: secrets.len(),
        secrets,
        last_updated,
    })
}

/// Replace the entire vault with `secrets`.
pub fn save_all(store: &VaultStore, password: &str, secrets: Secrets) -> Result<Saved> {
    let count = secrets.len();
    let timestamp = store.replace(password, secrets)?;

    tracing::info!(count, "vault overwritten");
    Ok(Saved { count, timestamp })
}

/// Insert or overwrite one secret.
pub fn update(store: &VaultStore, password: &str, key: &str, value: Value) -> Result<DateTime<Utc>> {
    validate_secret_name(key)?;

    let ((), timestamp) = store.transact(password, |doc| doc.set(key, value))?;

    tracing::info!(key, "secret updated");
    Ok(timestamp)
}

/// Remove one secret.  Fails with `SecretNotFound` and leaves the vault
/// untouched when the key is absent.
pub fn delete(store: &VaultStore, password: &str, key: &str) -> Result<DateTime<Utc>> {
    let (_, timestamp) = store.transact(password, |doc| doc.remove(key))?;

    tracing::info!(key, "secret deleted");
    Ok(timestamp)
}

/// Fetch one secret's value.
pub fn get(store: &VaultStore, password: &str, key: &str) -> Result<Fetched> {
    let document = store.load(password)?;
    let value = document
        .get(key)
        .cloned()
        .ok_or_else(|| VaultError::SecretNotFound(key.to_string()))?;

    Ok(Fetched {
        key: key.to_string(),
        value,
        timestamp: Utc::now(),
    })
}

/// Report vault and salt presence.  Never decrypts.
pub fn status(store: &VaultStore) -> VaultStatus {
    store.status()
}
