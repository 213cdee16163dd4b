//! File-backed key-value store
//!
//! Each key maps to one `<key>.json` file under a config directory. Writes
//! go to a temporary file first and are renamed into place, so a crash
//! mid-write never leaves a truncated record behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StorageError;
use crate::kv::KeyValueStore;

/// File system based key-value store
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory, creating it if needed
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref().to_path_buf();

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                StorageError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create storage directory: {}", e),
                ))
            })?;
        }

        Ok(FileStore { dir })
    }

    /// Create a store at the platform's config location for quickbind
    pub fn with_default_location() -> Result<Self, StorageError> {
        let base = dirs::config_dir().ok_or_else(|| {
            StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no config directory for this platform",
            ))
        })?;
        FileStore::new(base.join("quickbind"))
    }

    /// The directory this store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

/// Keys become file names, so restrict them to a filename-safe subset
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => Err(
                StorageError::PermissionDenied(path.to_string_lossy().to_string()),
            ),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{}.tmp", key));

        fs::write(&tmp, value).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                StorageError::PermissionDenied(tmp.to_string_lossy().to_string())
            } else {
                StorageError::Io(e)
            }
        })?;

        fs::rename(&tmp, &path).map_err(StorageError::Io)?;

        debug!(key = key, "wrote storage record");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => Err(
                StorageError::PermissionDenied(path.to_string_lossy().to_string()),
            ),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();

        let entries = fs::read_dir(&self.dir).map_err(|e| {
            StorageError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read storage directory: {}", e),
            ))
        })?;

        for entry in entries {
            let entry = entry.map_err(StorageError::Io)?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(name) = path.file_stem().and_then(|n| n.to_str()) {
                    if !name.starts_with('.') {
                        keys.push(name.to_string());
                    }
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}
