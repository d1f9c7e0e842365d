//! The decrypted vault document.
//!
//! On disk (after decryption) the document is a single JSON object:
//! user secrets as top-level keys plus one reserved `_metadata` entry.
//! In memory the two are kept apart so the metadata can never leak
//! into a caller's view of the secrets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{VaultError, Result};

/// Secret name -> arbitrary JSON value.
pub type Secrets = Map<String, Value>;

/// Reserved top-level key holding bookkeeping data.
pub const METADATA_KEY: &str = "_metadata";

/// Document format version written into the metadata entry.
pub const FORMAT_VERSION: &str = "1.0";

/// Bookkeeping written alongside the secrets on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub last_updated: DateTime<Utc>,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VaultDocument {
    secrets: Secrets,
    metadata: Option<DocumentMetadata>,
}

impl VaultDocument {
    /// An empty document, as seen before the first save.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a caller-supplied secrets map.
    pub fn from_secrets(secrets: Secrets) -> Result<Self> {
        for name in secrets.keys() {
            validate_secret_name(name)?;
        }
        Ok(Self {
            secrets,
            metadata: None,
        })
    }

    /// Parse decrypted JSON text.
    ///
    /// Anything other than a JSON object, or an object with a malformed
    /// metadata entry, is a corruption error.
    pub fn parse(text: &str) -> Result<Self> {
        let mut secrets: Secrets = serde_json::from_str(text)
            .map_err(|e| VaultError::Corrupted(format!("vault is not a JSON object: {e}")))?;

        let metadata = secrets
            .remove(METADATA_KEY)
            .map(serde_json::from_value::<DocumentMetadata>)
            .transpose()
            .map_err(|e| VaultError::Corrupted(format!("malformed {METADATA_KEY} entry: {e}")))?;

        Ok(Self { secrets, metadata })
    }

    /// Stamp the metadata with `now` and serialize the whole document.
    pub fn to_json(&mut self, now: DateTime<Utc>) -> Result<String> {
        let metadata = DocumentMetadata {
            last_updated: now,
            version: FORMAT_VERSION.to_string(),
        };

        let mut object = self.secrets.clone();
        object.insert(
            METADATA_KEY.to_string(),
            serde_json::to_value(&metadata)
                .map_err(|e| VaultError::SerializationError(format!("metadata: {e}")))?,
        );
        self.metadata = Some(metadata);

        serde_json::to_string_pretty(&Value::Object(object))
            .map_err(|e| VaultError::SerializationError(format!("vault document: {e}")))
    }

    /// Secrets with the metadata already stripped.
    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    pub fn into_secrets(self) -> Secrets {
        self.secrets
    }

    pub fn metadata(&self) -> Option<&DocumentMetadata> {
        self.metadata.as_ref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.metadata.as_ref().map(|m| m.last_updated)
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.secrets.get(name)
    }

    /// Insert or overwrite a secret.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        validate_secret_name(name)?;
        self.secrets.insert(name.to_string(), value);
        Ok(())
    }

    /// Remove a secret, failing if it is not present.
    pub fn remove(&mut self, name: &str) -> Result<Value> {
        self.secrets
            .remove(name)
            .ok_or_else(|| VaultError::SecretNotFound(name.to_string()))
    }
}

/// Secret names must be non-empty and must not shadow the metadata entry.
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(VaultError::InvalidSecretName(
            "secret name cannot be empty".into(),
        ));
    }
    if name == METADATA_KEY {
        return Err(VaultError::InvalidSecretName(format!(
            "'{METADATA_KEY}' is reserved for vault metadata"
        )));
    }
    Ok(())
}
