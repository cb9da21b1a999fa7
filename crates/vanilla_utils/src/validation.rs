//! Permissive input validators.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Checks `local@domain.tld` shape only; not RFC 5322 complete.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(&email.to_lowercase())
}

/// Returns `true` when the WHATWG URL parser accepts `url` as an absolute URL.
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}
