//! In-memory storage

use std::sync::{PoisonError, RwLock};

use rustc_hash::FxHashMap;

use super::{Storage, StorageError, StorageKey};

/// Storage that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<FxHashMap<StorageKey, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);

        Ok(values.get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: String) -> Result<(), StorageError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);

        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_get_remove() -> TestResult {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get(StorageKey::User)?, None);

        storage.set(StorageKey::User, "{}".to_string())?;
        assert_eq!(storage.get(StorageKey::User)?, Some("{}".to_string()));

        storage.remove(StorageKey::User)?;
        storage.remove(StorageKey::User)?;
        assert_eq!(storage.get(StorageKey::User)?, None);

        Ok(())
    }
}
