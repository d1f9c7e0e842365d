//! AES-256-GCM authenticated envelope encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! stamps the envelope with the current time.  The version byte and
//! timestamp are fed to GCM as associated data, so they are covered by
//! the same auth tag as the ciphertext.
//!
//! Layout of the returned byte buffer:
//!   [ 0x80 | 8-byte BE unix seconds | 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng, Payload};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use chrono::Utc;

use super::keys::DerivedKey;
use crate::errors::{VaultError, Result};

/// Leading byte identifying the envelope format.
pub const ENVELOPE_VERSION: u8 = 0x80;

/// Size of the issued-at timestamp in bytes.
const TIMESTAMP_LEN: usize = 8;

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the GCM auth tag in bytes.
const TAG_LEN: usize = 16;

/// Version byte + timestamp.  This is the associated data.
const HEADER_LEN: usize = 1 + TIMESTAMP_LEN;

/// Encrypt `plaintext` with `key`, producing a self-contained envelope.
pub fn encrypt(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let issued_at = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
    let mut header = [0u8; HEADER_LEN];
    header[0] = ENVELOPE_VERSION;
    header[1..].copy_from_slice(&issued_at.to_be_bytes());

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(
            &nonce,
            Payload {
                msg: plaintext,
                aad: &header,
            },
        )
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(HEADER_LEN + NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&header);
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Verify and decrypt an envelope produced by `encrypt`.
///
/// Every failure is reported as `AuthenticationFailed`: a short buffer,
/// an unknown version, and a bad tag all look the same to the caller.
pub fn decrypt(key: &DerivedKey, envelope: &[u8]) -> Result<Vec<u8>> {
    if envelope.len() < HEADER_LEN + NONCE_LEN + TAG_LEN {
        return Err(VaultError::AuthenticationFailed);
    }
    if envelope[0] != ENVELOPE_VERSION {
        return Err(VaultError::AuthenticationFailed);
    }

    let (header, rest) = envelope.split_at(HEADER_LEN);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| VaultError::AuthenticationFailed)?;

    cipher
        .decrypt(
            nonce,
            Payload {
                msg: ciphertext,
                aad: header,
            },
        )
        .map_err(|_| VaultError::AuthenticationFailed)
}

/// Read the issued-at timestamp (unix seconds) from an envelope.
///
/// This does not authenticate anything; call `decrypt` for that.
pub fn issued_at(envelope: &[u8]) -> Option<u64> {
    if envelope.len() < HEADER_LEN || envelope[0] != ENVELOPE_VERSION {
        return None;
    }
    let bytes: [u8; TIMESTAMP_LEN] = envelope[1..HEADER_LEN].try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}
