//! Persistent storage for the mode preference.
//!
//! - [`PreferenceStore`]: key/value string storage, the shape of a browser's
//!   local storage
//! - [`MemoryStore`]: in-memory store for tests and server-side rendering
//! - [`FileStore`]: a YAML file of key/value pairs on disk

mod file;
mod memory;

pub use file::{default_preferences_path, FileStore};
pub use memory::MemoryStore;

use crate::error::StorageError;

/// The default key the mode preference is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "themeMode";

/// Key/value string storage.
pub trait PreferenceStore {
    /// Reads a value; `Ok(None)` when the key was never written.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}
