//! The derived vault key and its text encoding.
//!
//! A `DerivedKey` is the 32-byte output of the password KDF.  It is
//! handed to the cipher in URL-safe base64 text form, the same shape
//! the envelope itself is stored in, so a key can be passed around as
//! a string without ever touching the filesystem.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{VaultError, Result};

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A wrapper around a 32-byte key that automatically zeroes its
/// memory when dropped.
///
/// Keys are never persisted; one lives only for the duration of a
/// single encrypt or decrypt call.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new `DerivedKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build the AES cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Encode the key with the URL-safe base64 alphabet.
    pub fn encode(&self) -> Zeroizing<String> {
        Zeroizing::new(URL_SAFE.encode(self.bytes))
    }

    /// Parse a key previously produced by `encode`.
    ///
    /// The text must decode to exactly 32 bytes.
    pub fn from_encoded(encoded: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            URL_SAFE
                .decode(encoded.as_bytes())
                .map_err(|e| VaultError::KeyDerivationFailed(format!("key is not base64: {e}")))?,
        );

        let bytes: [u8; KEY_LEN] = decoded.as_slice().try_into().map_err(|_| {
            VaultError::KeyDerivationFailed(format!(
                "key must be {KEY_LEN} bytes (got {})",
                decoded.len()
            ))
        })?;

        Ok(Self::new(bytes))
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}
