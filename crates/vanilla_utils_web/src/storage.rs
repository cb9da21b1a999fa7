//! `localStorage` / `sessionStorage` JSON helpers.
//!
//! Reads fall back and writes are dropped when the area is unavailable; every failure is logged
//! through `leptos::logging::warn!` instead of being returned.

use serde::{de::DeserializeOwned, Serialize};
use vanilla_utils::{
    clear_with, get_json_or_with, get_json_with, remove_json_with, set_json_with, StorageArea,
};

use crate::bridge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// One of the two browser web-storage areas.
pub enum BrowserStorage {
    /// `window.localStorage`.
    Local,
    /// `window.sessionStorage`.
    Session,
}

impl BrowserStorage {
    /// JavaScript name of the area, used in error messages.
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        }
    }
}

impl StorageArea for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        bridge::storage_get_item(*self, key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        bridge::storage_set_item(*self, key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        bridge::storage_remove_item(*self, key)
    }

    fn clear(&self) -> Result<(), String> {
        bridge::storage_clear(*self)
    }
}

/// Stores `value` as JSON text under `key` in `localStorage`.
pub fn set_local_storage<T: Serialize + ?Sized>(key: &str, value: &T) {
    set_json_with(&BrowserStorage::Local, key, value);
}

/// Reads `key` from `localStorage`; `None` when absent, unparsable or unavailable.
pub fn get_local_storage<T: DeserializeOwned>(key: &str) -> Option<T> {
    get_json_with(&BrowserStorage::Local, key)
}

/// Reads `key` from `localStorage`, or returns `fallback`.
pub fn get_local_storage_or<T: DeserializeOwned>(key: &str, fallback: T) -> T {
    get_json_or_with(&BrowserStorage::Local, key, fallback)
}

/// Deletes `key` from `localStorage`.
pub fn remove_local_storage(key: &str) {
    remove_json_with(&BrowserStorage::Local, key);
}

/// Deletes every key in `localStorage`.
pub fn clear_local_storage() {
    clear_with(&BrowserStorage::Local);
}

/// Stores `value` as JSON text under `key` in `sessionStorage`.
pub fn set_session_storage<T: Serialize + ?Sized>(key: &str, value: &T) {
    set_json_with(&BrowserStorage::Session, key, value);
}

/// Reads `key` from `sessionStorage`; `None` when absent, unparsable or unavailable.
pub fn get_session_storage<T: DeserializeOwned>(key: &str) -> Option<T> {
    get_json_with(&BrowserStorage::Session, key)
}

/// Reads `key` from `sessionStorage`, or returns `fallback`.
pub fn get_session_storage_or<T: DeserializeOwned>(key: &str, fallback: T) -> T {
    get_json_or_with(&BrowserStorage::Session, key, fallback)
}

/// Deletes `key` from `sessionStorage`.
pub fn remove_session_storage(key: &str) {
    remove_json_with(&BrowserStorage::Session, key);
}

/// Deletes every key in `sessionStorage`.
pub fn clear_session_storage() {
    clear_with(&BrowserStorage::Session);
}
