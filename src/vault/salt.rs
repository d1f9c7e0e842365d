//! The persisted KDF salt.
//!
//! One salt per installation, written once as 16 raw bytes and never
//! changed afterwards.  Losing or replacing it makes the vault
//! undecryptable, even with the right password.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::crypto::kdf::{generate_salt, SALT_LEN};
use crate::errors::Result;

/// Handle on the salt file.  Cheap to clone; holds only the path.
#[derive(Debug, Clone)]
pub struct SaltStore {
    path: PathBuf,
}

impl SaltStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the salt file is present on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Return the stored salt, generating and persisting one first if
    /// none exists yet.
    ///
    /// A new salt is fully written to a private temp file and then
    /// hard-linked into place.  Linking never replaces an existing file,
    /// so when two callers race on first use exactly one salt wins and
    /// both return it, and no reader ever sees a partial salt.
    pub fn get_or_create(&self) -> Result<Vec<u8>> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent)?;

        if self.path.exists() {
            return self.read();
        }

        let salt = generate_salt();
        let tmp_path = parent.join(format!(
            ".{}.{:016x}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy(),
            rand::random::<u64>()
        ));

        if let Err(e) = write_synced(&tmp_path, &salt) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        let linked = fs::hard_link(&tmp_path, &self.path);
        let _ = fs::remove_file(&tmp_path);

        match linked {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "created new vault salt");
                Ok(salt.to_vec())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => self.read(),
            Err(e) => Err(e.into()),
        }
    }

    /// Read the salt file, refusing anything shorter than a full salt.
    fn read(&self) -> Result<Vec<u8>> {
        let salt = fs::read(&self.path)?;
        if salt.len() < SALT_LEN {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!(
                    "salt file {} is truncated ({} of {SALT_LEN} bytes)",
                    self.path.display(),
                    salt.len()
                ),
            )
            .into());
        }
        Ok(salt)
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::VaultError;
    use tempfile::TempDir;

    #[test]
    fn creates_salt_and_parent_directory() {
        let tmp = TempDir::new().unwrap();
        let store = SaltStore::new(tmp.path().join("nested/dir/salt.key"));
        assert!(!store.exists());

        let salt = store.get_or_create().unwrap();
        assert_eq!(salt.len(), SALT_LEN);
        assert!(store.exists());
        assert_eq!(fs::read(store.path()).unwrap(), salt);
    }

    #[test]
    fn returns_existing_contents_exactly() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("salt.key");
        fs::write(&path, b"precomputed-salt").unwrap();

        let store = SaltStore::new(&path);
        assert_eq!(store.get_or_create().unwrap(), b"precomputed-salt");
    }

    #[test]
    fn propagates_filesystem_errors() {
        let tmp = TempDir::new().unwrap();
        // A regular file where a directory is expected.
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let store = SaltStore::new(blocker.join("salt.key"));
        assert!(store.get_or_create().is_err());
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let tmp = TempDir::new().unwrap();
        let store = SaltStore::new(tmp.path().join("salt.key"));
        store.get_or_create().unwrap();
        store.get_or_create().unwrap();

        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["salt.key".to_string()]);
    }

    #[test]
    fn truncated_salt_is_a_storage_error_naming_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("salt.key");
        fs::write(&path, b"").unwrap();

        let store = SaltStore::new(&path);
        let err = store.get_or_create().unwrap_err();
        assert!(matches!(err, VaultError::Io(_)));
        assert!(err.to_string().contains("salt.key"));

        // The short file is reported, never silently replaced.
        assert_eq!(fs::read(&path).unwrap(), b"");
    }
}
