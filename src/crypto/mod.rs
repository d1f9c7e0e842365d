//! Cryptographic primitives for pwvault.
//!
//! This module provides:
//! - AES-256-GCM envelope encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - The zeroizing `DerivedKey` wrapper and its text encoding (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt, issued_at};
pub use kdf::{derive_key, generate_salt, DEFAULT_ITERATIONS, MIN_ITERATIONS, SALT_LEN};
pub use keys::{DerivedKey, KEY_LEN};
