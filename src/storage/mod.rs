//! Storage
//!
//! Key-value persistence standing in for browser local storage. Values are JSON
//! strings, one entry per logical record type.

use std::{fmt, io, path::PathBuf};

use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O failed at {path}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A value could not be serialized.
    #[error("failed to encode value for key {key}")]
    Encode {
        /// Key being written
        key: StorageKey,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Keys under which the storefront persists its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Signed-in user profile
    User,

    /// Cart lines
    Cart,

    /// Order history
    Orders,

    /// Wishlist product ids
    Wishlist,
}

impl StorageKey {
    /// Every key, in a stable order.
    pub const ALL: [StorageKey; 4] = [Self::User, Self::Cart, Self::Orders, Self::Wishlist];

    /// The key's string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Cart => "cart",
            Self::Orders => "orders",
            Self::Wishlist => "wishlist",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String key-value store.
#[automock]
pub trait Storage: fmt::Debug + Send + Sync {
    /// Read the raw value stored under `key`, if any.
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: StorageKey, value: String) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    fn remove(&self, key: StorageKey) -> Result<(), StorageError>;
}

/// Load and decode the value under `key`.
///
/// Missing, unreadable or corrupt values all yield `T::default()`.
pub(crate) fn load_or_default<T>(storage: &dyn Storage, key: StorageKey) -> T
where
    T: DeserializeOwned + Default,
{
    match storage.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(%key, %error, "discarding unparseable stored value");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(error) => {
            warn!(%key, %error, "failed to read stored value");
            T::default()
        }
    }
}

/// Encode and store `value` under `key`.
pub(crate) fn save<T>(storage: &dyn Storage, key: StorageKey, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode { key, source })?;

    storage.set(key, raw)
}
