//! `document.cookie` access.

use vanilla_utils::{
    cookie_value_with, get_cookie_with, remove_cookie_with, set_cookie_with, CookieConfig,
    CookieJar,
};

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Cookie jar backed by the current HTML document.
pub struct DocumentCookieJar;

impl CookieJar for DocumentCookieJar {
    fn read_cookies(&self) -> Result<String, String> {
        bridge::read_document_cookie()
    }

    fn write_cookie(&self, directive: &str) -> Result<(), String> {
        bridge::write_document_cookie(directive)
    }
}

/// Sets a document cookie.
///
/// # Errors
///
/// Returns an error when `document.cookie` is not writable.
pub fn set_cookie(key: &str, value: &str, config: &CookieConfig) -> Result<(), String> {
    set_cookie_with(&DocumentCookieJar, key, value, config)
}

/// Returns the document cookie `key`, or an empty string when absent.
pub fn get_cookie(key: &str) -> String {
    get_cookie_with(&DocumentCookieJar, key)
}

/// Returns the document cookie `key`, or `None` when absent.
pub fn cookie_value(key: &str) -> Option<String> {
    cookie_value_with(&DocumentCookieJar, key)
}

/// Expires the document cookie `key`.
///
/// # Errors
///
/// Returns an error when `document.cookie` is not writable.
pub fn remove_cookie(key: &str) -> Result<(), String> {
    remove_cookie_with(&DocumentCookieJar, key)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn document_cookies_non_wasm_parity() {
        let expected = "Browser APIs are only available when compiled for wasm32".to_string();
        let config = CookieConfig::default().expires_in_days(30.0).with_path("/");

        assert_eq!(
            set_cookie("theme", "dark", &config).expect_err("set should fail"),
            expected
        );
        assert_eq!(get_cookie("theme"), "");
        assert_eq!(cookie_value("theme"), None);
        assert_eq!(remove_cookie("theme").expect_err("remove should fail"), expected);
    }
}
