//! JSON values over a [`StorageArea`], with failures masked behind fallbacks.
//!
//! None of these helpers return errors: storage failures are logged and the caller sees the
//! fallback value (reads) or nothing at all (writes and deletes).

mod area;

pub use area::{MemoryStorageArea, StorageArea, UnavailableStorageArea};

use serde::{de::DeserializeOwned, Serialize};

/// Serializes `value` to JSON text and stores it under `key`.
pub fn set_json_with<S: StorageArea + ?Sized, T: Serialize + ?Sized>(
    area: &S,
    key: &str,
    value: &T,
) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            leptos::logging::warn!("storage serialize for `{key}` failed: {err}");
            return;
        }
    };
    if let Err(err) = area.set_item(key, &raw) {
        leptos::logging::warn!("storage write for `{key}` failed: {err}");
    }
}

/// Reads and deserializes the value under `key`.
///
/// Returns `None` when the key is absent, the stored text does not parse as `T`, or the area
/// fails.
pub fn get_json_with<S: StorageArea + ?Sized, T: DeserializeOwned>(
    area: &S,
    key: &str,
) -> Option<T> {
    let raw = match area.get_item(key) {
        Ok(raw) => raw?,
        Err(err) => {
            leptos::logging::warn!("storage read for `{key}` failed: {err}");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            leptos::logging::warn!("storage parse for `{key}` failed: {err}");
            None
        }
    }
}

/// Like [`get_json_with`], returning `fallback` whenever no value can be produced.
pub fn get_json_or_with<S: StorageArea + ?Sized, T: DeserializeOwned>(
    area: &S,
    key: &str,
    fallback: T,
) -> T {
    get_json_with(area, key).unwrap_or(fallback)
}

/// Deletes `key`.
pub fn remove_json_with<S: StorageArea + ?Sized>(area: &S, key: &str) {
    if let Err(err) = area.remove_item(key) {
        leptos::logging::warn!("storage delete for `{key}` failed: {err}");
    }
}

/// Deletes every key in the area.
pub fn clear_with<S: StorageArea + ?Sized>(area: &S) {
    if let Err(err) = area.clear() {
        leptos::logging::warn!("storage clear failed: {err}");
    }
}
