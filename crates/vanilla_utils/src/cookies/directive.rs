//! Cookie directive composition and cookie-string lookup.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::time::{days_after, http_date};

/// Expiry written by [`removal_directive`]; any past date makes the browser drop the cookie.
pub const EXPIRED_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// `SameSite` restriction for a cookie.
pub enum SameSite {
    /// Never sent with cross-site requests.
    Strict,
    /// Sent with top-level cross-site navigations only.
    Lax,
    /// No restriction (requires `secure` in modern browsers).
    None,
}

impl SameSite {
    /// Directive spelling of the restriction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lax => "lax",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Optional clauses appended to a cookie directive.
pub struct CookieConfig {
    /// Lifetime in days from now. `None` makes a session cookie.
    pub expires: Option<f64>,
    /// Path the cookie is scoped to. `None` uses the current document path.
    pub path: Option<String>,
    /// Cross-site restriction. `None` leaves the browser default.
    pub samesite: Option<SameSite>,
    /// `Some(false)` omits the `secure` flag; anything else sets it.
    pub secure: Option<bool>,
}

impl CookieConfig {
    /// Sets the lifetime in days.
    pub fn expires_in_days(mut self, days: f64) -> Self {
        self.expires = Some(days);
        self
    }

    /// Sets the cookie path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the `SameSite` restriction.
    pub fn with_samesite(mut self, samesite: SameSite) -> Self {
        self.samesite = Some(samesite);
        self
    }

    /// Sets or clears the `secure` flag explicitly.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }
}

/// Builds `key=value` followed by `expires`, `path`, `samesite` and `secure` clauses, in that
/// order. `now_ms` anchors the expiry computation.
pub fn compose_directive(key: &str, value: &str, config: &CookieConfig, now_ms: u64) -> String {
    let mut directive = format!("{key}={value}");
    if let Some(days) = config.expires {
        directive.push_str(";expires=");
        directive.push_str(&http_date(days_after(now_ms, days)));
    }
    if let Some(path) = &config.path {
        directive.push_str(";path=");
        directive.push_str(path);
    }
    if let Some(samesite) = config.samesite {
        directive.push_str(";samesite=");
        directive.push_str(samesite.as_str());
    }
    if config.secure != Some(false) {
        directive.push_str(";secure");
    }
    directive
}

/// Directive that expires `key` immediately at the root path.
pub fn removal_directive(key: &str) -> String {
    format!("{key}=;expires={EXPIRED_HTTP_DATE};path=/")
}

/// Finds the value of `key` in a `document.cookie` style string (`a=1; b=2`).
///
/// The whole string is percent-decoded first; the first entry starting with `key=` wins.
pub fn find_cookie(cookie_string: &str, key: &str) -> Option<String> {
    let decoded = percent_decode_str(cookie_string).decode_utf8_lossy();
    let prefix = format!("{key}=");
    decoded
        .split(';')
        .map(str::trim)
        .find(|entry| entry.starts_with(&prefix))
        .map(|entry| entry[prefix.len()..].to_string())
}
