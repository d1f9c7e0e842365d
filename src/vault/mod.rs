//! Vault module — the encrypted single-file secret document.
//!
//! This module provides:
//! - The persisted KDF salt (`salt`)
//! - Password-level encrypt/decrypt (`cipher`)
//! - The `VaultDocument` model and its metadata entry (`document`)
//! - Vault file reads and atomic writes (`format`)
//! - `VaultStore` for load / save / transact (`store`)
//! - Transport-agnostic request operations (`ops`)

pub mod cipher;
pub mod document;
pub mod format;
pub mod ops;
pub mod salt;
pub mod store;

// Re-export the most commonly used items.
pub use cipher::PasswordCipher;
pub use document::{DocumentMetadata, Secrets, VaultDocument, FORMAT_VERSION, METADATA_KEY};
pub use salt::SaltStore;
pub use store::{VaultStatus, VaultStore};
