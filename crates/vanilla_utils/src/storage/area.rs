//! Key-value text storage contracts and in-memory adapters.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Host key-value text store (`localStorage` / `sessionStorage` semantics).
pub trait StorageArea {
    /// Reads the raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the area is unavailable.
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;

    /// Stores raw text under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the area is unavailable or the write exceeds its quota.
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;

    /// Deletes `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the area is unavailable.
    fn remove_item(&self, key: &str) -> Result<(), String>;

    /// Deletes every key.
    ///
    /// # Errors
    ///
    /// Returns an error when the area is unavailable.
    fn clear(&self) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Storage area that is always unavailable, for unsupported targets and failure-path tests.
pub struct UnavailableStorageArea;

impl StorageArea for UnavailableStorageArea {
    fn get_item(&self, _key: &str) -> Result<Option<String>, String> {
        Err("storage unavailable".to_string())
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), String> {
        Err("storage unavailable".to_string())
    }

    fn remove_item(&self, _key: &str) -> Result<(), String> {
        Err("storage unavailable".to_string())
    }

    fn clear(&self) -> Result<(), String> {
        Err("storage unavailable".to_string())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory storage area with an optional quota on total stored bytes.
pub struct MemoryStorageArea {
    inner: Rc<RefCell<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryStorageArea {
    /// Creates an area that rejects writes once keys plus values exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            inner: Rc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.inner
            .borrow()
            .iter()
            .filter(|(stored_key, _)| stored_key.as_str() != key)
            .map(|(stored_key, value)| stored_key.len() + value.len())
            .sum()
    }
}

impl StorageArea for MemoryStorageArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(format!("storage quota exceeded ({needed} > {quota})"));
            }
        }
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), String> {
        self.inner.borrow_mut().clear();
        Ok(())
    }
}
