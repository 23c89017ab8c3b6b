//! Directory-backed storage
//!
//! Each key is a `<key>.json` file in the storage directory. Writes go to a
//! temporary file first and are renamed into place.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::trace;

use super::{Storage, StorageError, StorageKey};

/// Storage persisted to a directory on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();

        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            path: root.clone(),
            source,
        })?;

        Ok(Self { root })
    }

    /// The storage directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        let path = self.path(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&self, key: StorageKey, value: String) -> Result<(), StorageError> {
        let path = self.path(key);
        let staging = path.with_extension("json.tmp");

        fs::write(&staging, value).map_err(|source| StorageError::Io {
            path: staging.clone(),
            source,
        })?;

        fs::rename(&staging, &path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        trace!(%key, path = %path.display(), "stored value");

        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        let path = self.path(key);

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn values_survive_reopening() -> TestResult {
        let dir = tempdir()?;

        FileStorage::open(dir.path())?.set(StorageKey::Orders, "[]".to_string())?;

        let reopened = FileStorage::open(dir.path())?;

        assert_eq!(reopened.get(StorageKey::Orders)?, Some("[]".to_string()));
        assert!(dir.path().join("orders.json").exists());
        assert!(!dir.path().join("orders.json.tmp").exists());

        Ok(())
    }

    #[test]
    fn missing_key_reads_as_none() -> TestResult {
        let dir = tempdir()?;
        let storage = FileStorage::open(dir.path().join("nested"))?;

        assert_eq!(storage.get(StorageKey::Cart)?, None);

        Ok(())
    }

    #[test]
    fn remove_is_idempotent() -> TestResult {
        let dir = tempdir()?;
        let storage = FileStorage::open(dir.path())?;

        storage.set(StorageKey::User, "{}".to_string())?;
        storage.remove(StorageKey::User)?;
        storage.remove(StorageKey::User)?;

        assert_eq!(storage.get(StorageKey::User)?, None);

        Ok(())
    }
}
