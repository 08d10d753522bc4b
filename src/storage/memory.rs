//! In-memory preference storage.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::PreferenceStore;
use crate::error::StorageError;

/// A [`PreferenceStore`] backed by a shared map.
///
/// Clones share the same map, so a test can keep a handle and inspect
/// what the theme store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.load("themeMode").unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        store.save("themeMode", "dark").unwrap();
        store.save("themeMode", "system").unwrap();
        assert_eq!(store.load("themeMode").unwrap().as_deref(), Some("system"));
    }

    #[test]
    fn test_clones_share_values() {
        let handle = MemoryStore::new();
        let mut writer = handle.clone();
        writer.save("themeMode", "light").unwrap();
        assert_eq!(handle.get("themeMode").as_deref(), Some("light"));
    }
}
