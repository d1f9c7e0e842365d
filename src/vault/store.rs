//! Whole-document vault persistence.
//!
//! `VaultStore` ties the salt, the password cipher and the vault file
//! together.  It keeps no decrypted state between calls: every `load`
//! re-reads the file and re-derives the key, every `save` rewrites the
//! whole file.  Mutations go through `transact`, which holds the
//! store's write lock across the full load-mutate-save cycle.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Settings;
use crate::errors::Result;

use super::cipher::PasswordCipher;
use super::document::{Secrets, VaultDocument};
use super::format;
use super::salt::SaltStore;

/// What `status` reports.  Never requires a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultStatus {
    pub vault_exists: bool,
    pub salt_exists: bool,
    pub vault_size_bytes: u64,
    pub vault_encrypted: bool,
}

/// The main vault handle.  Build one per vault file and share it.
pub struct VaultStore {
    /// Path to the encrypted vault file.
    vault_path: PathBuf,

    /// Salt + KDF + envelope cipher.
    cipher: PasswordCipher,

    /// Serializes load-mutate-save cycles against this vault file.
    write_lock: Mutex<()>,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    pub fn new(
        vault_path: impl Into<PathBuf>,
        salt_path: impl Into<PathBuf>,
        iterations: u32,
    ) -> Self {
        Self {
            vault_path: vault_path.into(),
            cipher: PasswordCipher::new(SaltStore::new(salt_path), iterations),
            write_lock: Mutex::new(()),
        }
    }

    /// Build a store from the configured paths and KDF work factor.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.vault_path(),
            settings.salt_path(),
            settings.kdf_iterations,
        )
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Read and decrypt the full document.
    ///
    /// A missing or empty vault file yields an empty document.
    pub fn load(&self, password: &str) -> Result<VaultDocument> {
        self.ensure_vault_dir()?;

        let Some(encrypted) = format::read_vault_text(&self.vault_path)? else {
            tracing::debug!(path = %self.vault_path.display(), "no vault file yet, using empty document");
            return Ok(VaultDocument::new());
        };

        let plaintext = zeroize::Zeroizing::new(self.cipher.decrypt(&encrypted, password)?);
        let document = VaultDocument::parse(&plaintext)?;

        tracing::debug!(secrets = document.len(), "vault loaded");
        Ok(document)
    }

    /// Stamp, serialize, encrypt and atomically replace the vault file.
    ///
    /// Returns the timestamp written into the metadata entry.
    pub fn save(&self, document: &mut VaultDocument, password: &str) -> Result<DateTime<Utc>> {
        self.ensure_vault_dir()?;

        let now = Utc::now();
        let plaintext = zeroize::Zeroizing::new(document.to_json(now)?);
        let encrypted = self.cipher.encrypt(&plaintext, password)?;

        format::write_vault_text(&self.vault_path, &encrypted)?;

        tracing::debug!(secrets = document.len(), "vault saved");
        Ok(now)
    }

    /// Load, apply `mutation`, and save, holding the write lock throughout.
    ///
    /// If loading or the mutation fails, the vault file is left untouched.
    pub fn transact<T, F>(&self, password: &str, mutation: F) -> Result<(T, DateTime<Utc>)>
    where
        F: FnOnce(&mut VaultDocument) -> Result<T>,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut document = self.load(password)?;
        let output = mutation(&mut document)?;
        let saved_at = self.save(&mut document, password)?;

        Ok((output, saved_at))
    }

    /// Overwrite the vault with `secrets`, discarding whatever it held.
    ///
    /// The existing file is not decrypted first.
    pub fn replace(&self, password: &str, secrets: Secrets) -> Result<DateTime<Utc>> {
        let mut document = VaultDocument::from_secrets(secrets)?;

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.save(&mut document, password)
    }

    /// Report what is on disk without decrypting anything.
    pub fn status(&self) -> VaultStatus {
        let vault_exists = self.vault_path.is_file();
        let vault_size_bytes = if vault_exists {
            format::vault_size(&self.vault_path)
        } else {
            0
        };

        VaultStatus {
            vault_exists,
            salt_exists: self.cipher.salt_store().exists(),
            vault_size_bytes,
            vault_encrypted: vault_exists && vault_size_bytes > 0,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn vault_path(&self) -> &Path {
        &self.vault_path
    }

    /// Returns the path to the salt file.
    pub fn salt_path(&self) -> &Path {
        self.cipher.salt_store().path()
    }

    fn ensure_vault_dir(&self) -> Result<()> {
        if let Some(parent) = self.vault_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for VaultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultStore")
            .field("vault_path", &self.vault_path)
            .field("salt_path", &self.salt_path())
            .finish_non_exhaustive()
    }
}
