//! Browser host bridge for DOM, cookie, storage, timer and fetch primitives.
//!
//! Calls are routed to a `wasm32` implementation over `web-sys`, or to a non-wasm shim that keeps
//! the crate compiling and testable natively.

use std::{cell::RefCell, collections::HashMap};

use futures::task::LocalFutureObj;
use vanilla_utils::{FetchError, FetchRequest, FetchResponse};

use crate::storage::BrowserStorage;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub fn create_element(
    tag: &str,
    attributes: &[(String, String)],
) -> Result<web_sys::Element, String> {
    imp::create_element(tag, attributes)
}

pub fn click_temporary_anchor(attributes: &[(&str, &str)]) -> Result<(), String> {
    imp::click_temporary_anchor(attributes)
}

pub fn download_bytes(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), String> {
    imp::download_bytes(bytes, file_name, mime_type)
}

pub fn run_when_ready(callback: Box<dyn FnOnce()>) -> Result<(), String> {
    imp::run_when_ready(callback)
}

pub fn location_search() -> Result<String, String> {
    imp::location_search()
}

pub fn read_document_cookie() -> Result<String, String> {
    imp::read_document_cookie()
}

pub fn write_document_cookie(directive: &str) -> Result<(), String> {
    imp::write_document_cookie(directive)
}

pub fn storage_get_item(area: BrowserStorage, key: &str) -> Result<Option<String>, String> {
    imp::storage_get_item(area, key)
}

pub fn storage_set_item(area: BrowserStorage, key: &str, value: &str) -> Result<(), String> {
    imp::storage_set_item(area, key, value)
}

pub fn storage_remove_item(area: BrowserStorage, key: &str) -> Result<(), String> {
    imp::storage_remove_item(area, key)
}

pub fn storage_clear(area: BrowserStorage) -> Result<(), String> {
    imp::storage_clear(area)
}

pub fn set_timeout(delay_ms: u32, callback: Box<dyn FnOnce()>) -> Result<i32, String> {
    imp::set_timeout(delay_ms, callback)
}

pub fn clear_timeout(handle: i32) {
    imp::clear_timeout(handle)
}

pub fn spawn_local(future: LocalFutureObj<'static, ()>) -> Result<(), String> {
    imp::spawn_local(future)
}

/// Host callbacks kept alive by timer handle until they fire or are cleared.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) struct PendingCallbacks<T> {
    entries: RefCell<HashMap<i32, T>>,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl<T> PendingCallbacks<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) fn hold(&self, handle: i32, callback: T) {
        self.entries.borrow_mut().insert(handle, callback);
    }

    /// Hands back the callback for `handle` so the caller decides when it drops.
    pub(crate) fn release(&self, handle: i32) -> Option<T> {
        self.entries.borrow_mut().remove(&handle)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

pub async fn fetch(request: &FetchRequest) -> Result<FetchResponse, FetchError> {
    imp::fetch(request).await
}
