use super::*;

fn unsupported() -> String {
    "Browser APIs are only available when compiled for wasm32".to_string()
}

pub fn create_element(
    _tag: &str,
    _attributes: &[(String, String)],
) -> Result<web_sys::Element, String> {
    Err(unsupported())
}

pub fn click_temporary_anchor(_attributes: &[(&str, &str)]) -> Result<(), String> {
    Err(unsupported())
}

pub fn download_bytes(_bytes: &[u8], _file_name: &str, _mime_type: &str) -> Result<(), String> {
    Err(unsupported())
}

pub fn run_when_ready(_callback: Box<dyn FnOnce()>) -> Result<(), String> {
    Err(unsupported())
}

pub fn location_search() -> Result<String, String> {
    Err(unsupported())
}

pub fn read_document_cookie() -> Result<String, String> {
    Err(unsupported())
}

pub fn write_document_cookie(_directive: &str) -> Result<(), String> {
    Err(unsupported())
}

pub fn storage_get_item(_area: BrowserStorage, _key: &str) -> Result<Option<String>, String> {
    Err(unsupported())
}

pub fn storage_set_item(_area: BrowserStorage, _key: &str, _value: &str) -> Result<(), String> {
    Err(unsupported())
}

pub fn storage_remove_item(_area: BrowserStorage, _key: &str) -> Result<(), String> {
    Err(unsupported())
}

pub fn storage_clear(_area: BrowserStorage) -> Result<(), String> {
    Err(unsupported())
}

pub fn set_timeout(_delay_ms: u32, _callback: Box<dyn FnOnce()>) -> Result<i32, String> {
    Err(unsupported())
}

pub fn clear_timeout(_handle: i32) {}

pub fn spawn_local(_future: LocalFutureObj<'static, ()>) -> Result<(), String> {
    Err(unsupported())
}

pub async fn fetch(_request: &FetchRequest) -> Result<FetchResponse, FetchError> {
    Err(FetchError::Unsupported(unsupported()))
}
