//! store::file
//!
//! Atomic file writes with restrictive permissions.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::StoreError;

/// Write a file atomically with 0600 permissions.
///
/// The content goes to a sibling temp file first; permissions are set
/// before any bytes land, then the temp file is renamed into place.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| StoreError::Write(format!("cannot create directory: {}", e)))?;
    }

    let temp_path = path.with_extension("tmp");
    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| StoreError::Write(format!("cannot create temp file: {}", e)))?;

        #[cfg(unix)]
        {
            let permissions = fs::Permissions::from_mode(0o600);
            file.set_permissions(permissions)
                .map_err(|e| StoreError::Write(format!("cannot set permissions: {}", e)))?;
        }

        file.write_all(content)
            .map_err(|e| StoreError::Write(format!("cannot write file: {}", e)))?;
        file.sync_all()
            .map_err(|e| StoreError::Write(format!("cannot sync to disk: {}", e)))?;
    }

    fs::rename(&temp_path, path)
        .map_err(|e| StoreError::Write(format!("cannot rename temp file: {}", e)))?;
    Ok(())
}

/// Read a file's contents, `None` when it does not exist.
pub fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| StoreError::Read(format!("cannot read {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_create_parent_directories() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("a").join("b.toml");
        write_atomic(&path, b"x = 1\n").expect("write");
        assert_eq!(read_optional(&path).expect("read"), Some("x = 1\n".into()));
    }

    #[cfg(unix)]
    #[test]
    fn permissions_0600_on_unix() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("key.json");
        write_atomic(&path, b"{}").expect("write");

        let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn read_missing_is_none() {
        let temp = TempDir::new().expect("create temp dir");
        assert!(read_optional(&temp.path().join("missing"))
            .expect("read")
            .is_none());
    }
}
