//! Element creation, link navigation, downloads and document readiness.

use indexmap::IndexMap;
use vanilla_utils::{file_name_from_url, get_query_params, guess_mime_type};

use crate::bridge;

/// Creates a detached `tag` element with every attribute applied verbatim.
///
/// # Errors
///
/// Returns the platform's error for an invalid tag or attribute name.
pub fn create_element<I, K, V>(tag: &str, attributes: I) -> Result<web_sys::Element, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    let attributes: Vec<(String, String)> = attributes
        .into_iter()
        .map(|(name, value)| (name.as_ref().to_string(), value.to_string()))
        .collect();
    bridge::create_element(tag, &attributes)
}

/// Navigates to `url` through a throwaway anchor, in a new tab when `new_tab` is set.
///
/// # Errors
///
/// Returns an error when the document or its body is unavailable.
pub fn open_link(url: &str, new_tab: bool) -> Result<(), String> {
    let target = if new_tab { "_blank" } else { "_self" };
    bridge::click_temporary_anchor(&[("href", url), ("target", target)])
}

/// Downloads `url`, suggesting its last path segment as the file name.
///
/// # Errors
///
/// Returns an error when the document or its body is unavailable.
pub fn download_link(url: &str) -> Result<(), String> {
    bridge::click_temporary_anchor(&[("href", url), ("download", file_name_from_url(url))])
}

/// Downloads `bytes` as `file_name` through a temporary object URL.
///
/// The blob is typed with `mime_type`, or with the sniffed type when `None`. The object URL is
/// revoked right after the click is dispatched.
///
/// # Errors
///
/// Returns an error when the blob, object URL or anchor cannot be created.
pub fn download_file_from_bytes(
    bytes: &[u8],
    file_name: &str,
    mime_type: Option<&str>,
) -> Result<(), String> {
    let mime_type = mime_type.unwrap_or_else(|| guess_mime_type(bytes));
    bridge::download_bytes(bytes, file_name, mime_type)
}

/// Runs `callback` once the DOM is parsed: now, or on `DOMContentLoaded` while still loading.
///
/// # Errors
///
/// Returns an error when the document is unavailable or the listener cannot be attached.
pub fn ready<F: FnOnce() + 'static>(callback: F) -> Result<(), String> {
    bridge::run_when_ready(Box::new(callback))
}

/// Parses the current page's query string.
///
/// # Errors
///
/// Returns an error when `window.location` cannot be read.
pub fn location_query_params() -> Result<IndexMap<String, String>, String> {
    bridge::location_search().map(|search| get_query_params(&search))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn dom_helpers_non_wasm_parity() {
        let expected = "Browser APIs are only available when compiled for wasm32".to_string();

        assert_eq!(
            create_element("img", [("src", "a.png"), ("width", "10")])
                .expect_err("create should fail"),
            expected
        );
        assert_eq!(
            create_element("div", Vec::<(String, u32)>::new()).expect_err("create should fail"),
            expected
        );
        assert_eq!(
            open_link("https://example.com", true).expect_err("open should fail"),
            expected
        );
        assert_eq!(
            download_link("https://example.com/files/report.pdf")
                .expect_err("download should fail"),
            expected
        );
        assert_eq!(
            download_file_from_bytes(b"%PDF-1.7", "report.pdf", None)
                .expect_err("download should fail"),
            expected
        );
        assert_eq!(ready(|| {}).expect_err("ready should fail"), expected);
        assert_eq!(
            location_query_params().expect_err("query should fail"),
            expected
        );
    }
}
