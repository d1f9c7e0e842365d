//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The work factor defaults to 100 000 iterations and can be raised
//! through `Settings::kdf_iterations`.  A vault must always be opened
//! with the iteration count it was written with, since nothing in the
//! envelope records it.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use super::keys::{DerivedKey, KEY_LEN};
use crate::errors::{VaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Lowest iteration count we accept, to prevent dangerously weak settings.
pub const MIN_ITERATIONS: u32 = 1_000;

/// Derive a 32-byte key from a password and salt.
///
/// The same password + salt + iterations will always produce the same key.
pub fn derive_key(password: &[u8], salt: &[u8], iterations: u32) -> Result<DerivedKey> {
    if iterations < MIN_ITERATIONS {
        return Err(VaultError::KeyDerivationFailed(format!(
            "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {iterations})"
        )));
    }
    if salt.is_empty() {
        return Err(VaultError::KeyDerivationFailed("salt is empty".into()));
    }

    let mut out = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out);

    Ok(DerivedKey::new(out))
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_sha256_vector() {
        // PBKDF2-HMAC-SHA256("password", "salt", 4096, 32)
        let key = derive_key(b"password", b"salt", 4096).unwrap();
        let expected: [u8; 32] = [
            0xc5, 0xe4, 0x78, 0xd5, 0x92, 0x88, 0xc8, 0x41, 0xaa, 0x53, 0x0d, 0xb6, 0x84, 0x5c,
            0x4c, 0x8d, 0x96, 0x28, 0x93, 0xa0, 0x01, 0xce, 0x4e, 0x11, 0xa4, 0x96, 0x38, 0x73,
            0xaa, 0x98, 0x13, 0x4a,
        ];
        assert_eq!(key.as_bytes(), &expected);
    }

    #[test]
    fn rejects_too_few_iterations() {
        let err = derive_key(b"pw", b"saltsaltsaltsalt", 10).unwrap_err();
        assert!(matches!(err, VaultError::KeyDerivationFailed(_)));
    }

    #[test]
    fn rejects_empty_salt() {
        assert!(derive_key(b"pw", b"", MIN_ITERATIONS).is_err());
    }

    #[test]
    fn generated_salts_differ() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
