//! Cookie management over any [`CookieJar`].

mod directive;
mod jar;

pub use directive::{
    compose_directive, find_cookie, removal_directive, CookieConfig, SameSite, EXPIRED_HTTP_DATE,
};
pub use jar::{CookieJar, MemoryCookieJar};

use crate::time::unix_time_ms_now;

/// Writes `key=value` with the clauses from `config` in a single jar write.
///
/// # Errors
///
/// Returns an error when the jar rejects the write.
pub fn set_cookie_with<J: CookieJar + ?Sized>(
    jar: &J,
    key: &str,
    value: &str,
    config: &CookieConfig,
) -> Result<(), String> {
    jar.write_cookie(&compose_directive(key, value, config, unix_time_ms_now()))
}

/// Returns the value stored under `key`, or `None` when absent or the jar is unreadable.
pub fn cookie_value_with<J: CookieJar + ?Sized>(jar: &J, key: &str) -> Option<String> {
    match jar.read_cookies() {
        Ok(cookies) => find_cookie(&cookies, key),
        Err(err) => {
            leptos::logging::warn!("cookie read failed: {err}");
            None
        }
    }
}

/// Returns the value stored under `key`, or an empty string when absent.
///
/// An empty result is indistinguishable from a cookie explicitly set to `""`; use
/// [`cookie_value_with`] when that matters.
pub fn get_cookie_with<J: CookieJar + ?Sized>(jar: &J, key: &str) -> String {
    cookie_value_with(jar, key).unwrap_or_default()
}

/// Expires `key` at the root path.
///
/// # Errors
///
/// Returns an error when the jar rejects the write.
pub fn remove_cookie_with<J: CookieJar + ?Sized>(jar: &J, key: &str) -> Result<(), String> {
    jar.write_cookie(&removal_directive(key))
}
