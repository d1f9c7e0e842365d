use thiserror::Error;

/// All errors that can occur in pwvault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Wrong password, truncated envelope, or tampered ciphertext.
    /// These are indistinguishable once the integrity check fails.
    #[error("Invalid password or corrupted data")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    /// The envelope authenticated but its plaintext is not a vault document.
    #[error("Vault data corruption: {0}")]
    Corrupted(String),

    #[error("Secret '{0}' not found")]
    SecretNotFound(String),

    #[error("Invalid secret name: {0}")]
    InvalidSecretName(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI / server errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

/// Convenience type alias for pwvault results.
pub type Result<T> = std::result::Result<T, VaultError>;
