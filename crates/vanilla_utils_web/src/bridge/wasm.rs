use std::{cell::Cell, rc::Rc};

use indexmap::IndexMap;
use js_sys::{Array, Uint8Array};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use vanilla_utils::{
    ReferrerPolicy, RequestBody, RequestCache, RequestCredentials, RequestMode, RequestRedirect,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlAnchorElement, HtmlDocument};

use super::*;

fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or_else(|| "window unavailable".to_string())
}

fn document() -> Result<Document, String> {
    window()?
        .document()
        .ok_or_else(|| "document unavailable".to_string())
}

pub fn create_element(
    tag: &str,
    attributes: &[(String, String)],
) -> Result<web_sys::Element, String> {
    let element = document()?
        .create_element(tag)
        .map_err(|err| format!("create_element `{tag}` failed: {}", js_error_to_string(err)))?;
    for (name, value) in attributes {
        element
            .set_attribute(name, value)
            .map_err(|err| format!("set_attribute `{name}` failed: {}", js_error_to_string(err)))?;
    }
    Ok(element)
}

pub fn click_temporary_anchor(attributes: &[(&str, &str)]) -> Result<(), String> {
    let document = document()?;
    let anchor = document
        .create_element("a")
        .map_err(|err| format!("failed to create anchor: {}", js_error_to_string(err)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| "failed to cast anchor".to_string())?;
    for (name, value) in attributes {
        anchor
            .set_attribute(name, value)
            .map_err(|err| format!("set_attribute `{name}` failed: {}", js_error_to_string(err)))?;
    }

    let body = document
        .body()
        .ok_or_else(|| "document body unavailable".to_string())?;
    body.append_child(&anchor)
        .map_err(|err| format!("failed to attach anchor: {}", js_error_to_string(err)))?;
    anchor.click();
    anchor.remove();
    Ok(())
}

pub fn download_bytes(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), String> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|err| format!("blob creation failed: {}", js_error_to_string(err)))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|err| format!("create_object_url failed: {}", js_error_to_string(err)))?;

    let clicked = click_temporary_anchor(&[("href", url.as_str()), ("download", file_name)]);
    let revoked = web_sys::Url::revoke_object_url(&url)
        .map_err(|err| format!("revoke_object_url failed: {}", js_error_to_string(err)));
    clicked.and(revoked)
}

pub fn run_when_ready(callback: Box<dyn FnOnce()>) -> Result<(), String> {
    let document = document()?;
    let ready_state = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default();
    if ready_state != "loading" {
        callback();
        return Ok(());
    }

    let listener = Closure::once_into_js(move || callback());
    document
        .add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref())
        .map_err(|err| format!("DOMContentLoaded listener failed: {}", js_error_to_string(err)))
}

pub fn location_search() -> Result<String, String> {
    window()?
        .location()
        .search()
        .map_err(|err| format!("location.search read failed: {}", js_error_to_string(err)))
}

fn html_document() -> Result<HtmlDocument, String> {
    document()?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| "document is not an HTML document".to_string())
}

pub fn read_document_cookie() -> Result<String, String> {
    html_document()?
        .cookie()
        .map_err(|err| format!("document.cookie read failed: {}", js_error_to_string(err)))
}

pub fn write_document_cookie(directive: &str) -> Result<(), String> {
    html_document()?
        .set_cookie(directive)
        .map_err(|err| format!("document.cookie write failed: {}", js_error_to_string(err)))
}

fn storage_area(area: BrowserStorage) -> Result<web_sys::Storage, String> {
    let window = window()?;
    let storage = match area {
        BrowserStorage::Local => window.local_storage(),
        BrowserStorage::Session => window.session_storage(),
    };
    storage
        .map_err(|err| format!("{} access failed: {}", area.api_name(), js_error_to_string(err)))?
        .ok_or_else(|| format!("{} unavailable", area.api_name()))
}

pub fn storage_get_item(area: BrowserStorage, key: &str) -> Result<Option<String>, String> {
    storage_area(area)?
        .get_item(key)
        .map_err(|err| format!("{} get_item failed: {}", area.api_name(), js_error_to_string(err)))
}

pub fn storage_set_item(area: BrowserStorage, key: &str, value: &str) -> Result<(), String> {
    storage_area(area)?
        .set_item(key, value)
        .map_err(|err| format!("{} set_item failed: {}", area.api_name(), js_error_to_string(err)))
}

pub fn storage_remove_item(area: BrowserStorage, key: &str) -> Result<(), String> {
    storage_area(area)?.remove_item(key).map_err(|err| {
        format!(
            "{} remove_item failed: {}",
            area.api_name(),
            js_error_to_string(err)
        )
    })
}

pub fn storage_clear(area: BrowserStorage) -> Result<(), String> {
    storage_area(area)?
        .clear()
        .map_err(|err| format!("{} clear failed: {}", area.api_name(), js_error_to_string(err)))
}

thread_local! {
    static PENDING_TIMERS: PendingCallbacks<Closure<dyn FnMut()>> = PendingCallbacks::new();
}

pub fn set_timeout(delay_ms: u32, callback: Box<dyn FnOnce()>) -> Result<i32, String> {
    let window = window()?;
    let own_handle = Rc::new(Cell::new(0));
    let handle_slot = Rc::clone(&own_handle);
    let mut callback = Some(callback);
    let closure = Closure::<dyn FnMut()>::new(move || {
        if let Some(callback) = callback.take() {
            callback();
        }
        // wasm-bindgen defers freeing a closure that is dropped mid-call
        let fired = PENDING_TIMERS.with(|pending| pending.release(handle_slot.get()));
        drop(fired);
    });
    let handle = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            i32::try_from(delay_ms).unwrap_or(i32::MAX),
        )
        .map_err(|err| format!("setTimeout failed: {}", js_error_to_string(err)))?;
    own_handle.set(handle);
    PENDING_TIMERS.with(|pending| pending.hold(handle, closure));
    Ok(handle)
}

pub fn clear_timeout(handle: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(handle);
    }
    let cleared = PENDING_TIMERS.with(|pending| pending.release(handle));
    drop(cleared);
}

pub fn spawn_local(future: LocalFutureObj<'static, ()>) -> Result<(), String> {
    wasm_bindgen_futures::spawn_local(future);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FetchInit<'a> {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credentials: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    referrer_policy: Option<&'static str>,
    headers: &'a IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

impl<'a> FetchInit<'a> {
    fn from_request(request: &'a FetchRequest) -> Self {
        let config = &request.config;
        Self {
            method: request.method.as_str(),
            mode: config.mode.map(RequestMode::as_str),
            cache: config.cache.map(RequestCache::as_str),
            credentials: config.credentials.map(RequestCredentials::as_str),
            redirect: config.redirect.map(RequestRedirect::as_str),
            referrer_policy: config.referrer_policy.map(ReferrerPolicy::as_str),
            headers: &config.headers,
            body: config.body.as_ref().map(RequestBody::to_text),
        }
    }
}

fn read_headers(headers: &web_sys::Headers) -> IndexMap<String, String> {
    let mut collected = IndexMap::new();
    let Ok(Some(entries)) = js_sys::try_iter(headers) else {
        return collected;
    };
    for entry in entries.flatten() {
        let pair = Array::from(&entry);
        if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            collected.insert(name.to_ascii_lowercase(), value);
        }
    }
    collected
}

pub async fn fetch(request: &FetchRequest) -> Result<FetchResponse, FetchError> {
    let init = FetchInit::from_request(request)
        .serialize(&Serializer::json_compatible())
        .map_err(|err| FetchError::Network(format!("fetch init encode failed: {err}")))?;
    let window = window().map_err(FetchError::Network)?;

    let response = JsFuture::from(window.fetch_with_str_and_init(&request.url, init.unchecked_ref()))
        .await
        .map_err(|err| FetchError::Network(js_error_to_string(err)))?
        .dyn_into::<web_sys::Response>()
        .map_err(|_| FetchError::Network("fetch resolved to a non-Response value".to_string()))?;

    let buffer = response
        .array_buffer()
        .map_err(|err| FetchError::Network(format!("body read failed: {}", js_error_to_string(err))))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|err| FetchError::Network(format!("body read failed: {}", js_error_to_string(err))))?;

    Ok(FetchResponse {
        status: response.status(),
        status_text: response.status_text(),
        url: response.url(),
        headers: read_headers(&response.headers()),
        body: Uint8Array::new(&buffer).to_vec(),
    })
}
