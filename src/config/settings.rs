use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{DEFAULT_ITERATIONS, MIN_ITERATIONS};
use crate::errors::{VaultError, Result};

/// Server and storage configuration, loaded from `.pwvault.toml`.
///
/// Every field has a sensible default so pwvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Address the HTTP API listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory holding the vault and salt files.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// File name of the encrypted vault inside `vault_dir`.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// File name of the KDF salt inside `vault_dir`.
    #[serde(default = "default_salt_file")]
    pub salt_file: String,

    /// PBKDF2 iteration count (default: 100 000).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Path prefix every vault route is mounted under.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_bind_addr() -> String {
    "127.0.0.1:8181".to_string()
}

fn default_vault_dir() -> String {
    "vault".to_string()
}

fn default_vault_file() -> String {
    "encrypted_secrets.vault".to_string()
}

fn default_salt_file() -> String {
    "salt.key".to_string()
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

fn default_api_prefix() -> String {
    "/api/vault".to_string()
}

fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1 MB
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            vault_dir: default_vault_dir(),
            vault_file: default_vault_file(),
            salt_file: default_salt_file(),
            kdf_iterations: default_kdf_iterations(),
            api_prefix: default_api_prefix(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    pub const FILE_NAME: &'static str = ".pwvault.toml";

    /// Load settings from `<dir>/.pwvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_file(&config_path)
    }

    /// Load settings from an explicit file.  A missing file is an error.
    pub fn load_file(config_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            VaultError::ConfigError(format!("Failed to read {}: {e}", config_path.display()))
        })?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would make the server unusable.
    pub fn validate(&self) -> Result<()> {
        if self.vault_file.is_empty() || self.salt_file.is_empty() {
            return Err(VaultError::ConfigError(
                "vault_file and salt_file cannot be empty".into(),
            ));
        }
        if self.vault_file == self.salt_file {
            return Err(VaultError::ConfigError(
                "vault_file and salt_file must be different files".into(),
            ));
        }
        if !self.api_prefix.starts_with('/') {
            return Err(VaultError::ConfigError(format!(
                "api_prefix '{}' must start with '/'",
                self.api_prefix
            )));
        }
        if self.kdf_iterations < MIN_ITERATIONS {
            return Err(VaultError::ConfigError(format!(
                "kdf_iterations must be at least {MIN_ITERATIONS} (got {})",
                self.kdf_iterations
            )));
        }
        Ok(())
    }

    /// Full path to the encrypted vault file.
    ///
    /// Example: `vault/encrypted_secrets.vault`
    pub fn vault_path(&self) -> PathBuf {
        Path::new(&self.vault_dir).join(&self.vault_file)
    }

    /// Full path to the salt file.
    pub fn salt_path(&self) -> PathBuf {
        Path::new(&self.vault_dir).join(&self.salt_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
