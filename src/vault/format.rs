//! On-disk vault file handling.
//!
//! A vault file is plain UTF-8 text holding one URL-safe base64
//! envelope (see `crypto::encryption`).  An absent or empty file means
//! the vault has no secrets yet.

use std::fs;
use std::path::Path;

use crate::errors::Result;

/// Read the stored envelope text.
///
/// Returns `None` when the file does not exist or holds only whitespace.
pub fn read_vault_text(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let text = fs::read_to_string(path)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Ok(Some(trimmed.to_string()))
}

/// Write the envelope text to disk **atomically**.
///
/// The text goes to a temp file in the same directory, which is then
/// renamed over the target, so readers never see a half-written file.
pub fn write_vault_text(path: &Path, text: &str) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    if let Err(e) = fs::write(&tmp_path, text).and_then(|()| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Size of the vault file in bytes, or 0 when it does not exist.
pub fn vault_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_vault_text(&tmp.path().join("x.vault")).unwrap(), None);
    }

    #[test]
    fn whitespace_only_file_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("x.vault");
        fs::write(&path, "  \n").unwrap();
        assert_eq!(read_vault_text(&path).unwrap(), None);
    }

    #[test]
    fn write_replaces_contents_and_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sub/x.vault");

        write_vault_text(&path, "first-envelope-that-is-long").unwrap();
        write_vault_text(&path, "second").unwrap();

        assert_eq!(read_vault_text(&path).unwrap().as_deref(), Some("second"));
        assert!(!tmp.path().join("sub/.x.vault.tmp").exists());
        assert_eq!(vault_size(&path), 6);
    }

    #[test]
    fn failed_replace_cleans_up_temp_file() {
        let tmp = TempDir::new().unwrap();
        // A non-empty directory at the target path makes the rename fail
        // after the temp file has been written.
        let path = tmp.path().join("x.vault");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), b"").unwrap();

        assert!(write_vault_text(&path, "envelope").is_err());
        assert!(!tmp.path().join(".x.vault.tmp").exists());
    }

    #[test]
    fn failed_temp_write_leaves_nothing_behind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("x.vault");
        // The temp path is occupied by a directory, so the write itself fails.
        fs::create_dir(tmp.path().join(".x.vault.tmp")).unwrap();

        assert!(write_vault_text(&path, "envelope").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn vault_size_of_missing_file_is_zero() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(vault_size(&tmp.path().join("none")), 0);
    }
}
