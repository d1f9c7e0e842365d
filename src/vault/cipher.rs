//! Password-level encryption: salt + KDF + envelope, as one unit.
//!
//! `PasswordCipher` is what the document store talks to.  It never
//! sees keys from the outside; every call derives a fresh key from the
//! password and the persisted salt, uses it once, and drops it.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::encryption;
use crate::crypto::kdf;
use crate::crypto::keys::DerivedKey;
use crate::errors::{VaultError, Result};

use super::salt::SaltStore;

#[derive(Debug, Clone)]
pub struct PasswordCipher {
    salt: SaltStore,
    iterations: u32,
}

impl PasswordCipher {
    pub fn new(salt: SaltStore, iterations: u32) -> Self {
        Self { salt, iterations }
    }

    pub fn salt_store(&self) -> &SaltStore {
        &self.salt
    }

    /// Derive the vault key for `password`, URL-safe base64 encoded.
    ///
    /// Creates the salt on first use.
    pub fn derive_key(&self, password: &str) -> Result<Zeroizing<String>> {
        let salt = self.salt.get_or_create()?;
        let key = kdf::derive_key(password.as_bytes(), &salt, self.iterations)?;
        Ok(key.encode())
    }

    /// Encrypt `plaintext` and return the envelope as URL-safe base64 text.
    pub fn encrypt(&self, plaintext: &str, password: &str) -> Result<String> {
        let encoded_key = self.derive_key(password)?;
        let key = DerivedKey::from_encoded(&encoded_key)?;

        let envelope = encryption::encrypt(&key, plaintext.as_bytes())?;
        Ok(URL_SAFE.encode(envelope))
    }

    /// Decode, verify and decrypt text produced by `encrypt`.
    ///
    /// Text that is not valid base64 fails the same way as a wrong
    /// password.  Plaintext that is not UTF-8 is reported as corruption.
    pub fn decrypt(&self, encoded: &str, password: &str) -> Result<String> {
        let envelope = URL_SAFE
            .decode(encoded.trim().as_bytes())
            .map_err(|_| VaultError::AuthenticationFailed)?;

        let encoded_key = self.derive_key(password)?;
        let key = DerivedKey::from_encoded(&encoded_key)?;

        let plaintext = encryption::decrypt(&key, &envelope)?;

        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            VaultError::Corrupted("decrypted vault is not valid UTF-8".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::MIN_ITERATIONS;
    use tempfile::TempDir;

    fn cipher(tmp: &TempDir) -> PasswordCipher {
        PasswordCipher::new(SaltStore::new(tmp.path().join("salt.key")), MIN_ITERATIONS)
    }

    #[test]
    fn derive_key_is_deterministic_for_same_salt() {
        let tmp = TempDir::new().unwrap();
        let c = cipher(&tmp);
        assert_eq!(*c.derive_key("pw").unwrap(), *c.derive_key("pw").unwrap());
        assert_ne!(*c.derive_key("pw").unwrap(), *c.derive_key("pw2").unwrap());
    }

    #[test]
    fn derive_key_creates_salt() {
        let tmp = TempDir::new().unwrap();
        let c = cipher(&tmp);
        assert!(!c.salt_store().exists());
        c.derive_key("pw").unwrap();
        assert!(c.salt_store().exists());
    }

    #[test]
    fn output_is_url_safe_text() {
        let tmp = TempDir::new().unwrap();
        let token = cipher(&tmp).encrypt("hello world", "pw").unwrap();
        assert!(token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'='));
    }

    #[test]
    fn non_base64_input_is_an_authentication_error() {
        let tmp = TempDir::new().unwrap();
        let err = cipher(&tmp).decrypt("%%%not-base64%%%", "pw").unwrap_err();
        assert!(matches!(err, VaultError::AuthenticationFailed));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let c = cipher(&tmp);
        let token = c.encrypt("data", "pw").unwrap();
        assert_eq!(c.decrypt(&format!("{token}\n"), "pw").unwrap(), "data");
    }
}
