//! Cookie-jar host contract and an in-memory jar.

use std::{cell::RefCell, rc::Rc};

use indexmap::IndexMap;

use crate::time::{parse_http_date, unix_time_ms_now};

/// Host cookie store with `document.cookie` semantics.
pub trait CookieJar {
    /// Reads every visible cookie as one `a=1; b=2` string.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cookie store is unreachable.
    fn read_cookies(&self) -> Result<String, String>;

    /// Writes one `key=value;attr...` directive; the host merges it by name.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cookie store rejects the write.
    fn write_cookie(&self, directive: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Default)]
/// In-memory cookie jar that merges directives by name and drops expired cookies.
///
/// Path, `SameSite` and `secure` attributes are accepted but not used for visibility.
pub struct MemoryCookieJar {
    inner: Rc<RefCell<IndexMap<String, String>>>,
}

impl MemoryCookieJar {
    /// Number of live cookies.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when the jar holds no cookies.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl CookieJar for MemoryCookieJar {
    fn read_cookies(&self) -> Result<String, String> {
        Ok(self
            .inner
            .borrow()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn write_cookie(&self, directive: &str) -> Result<(), String> {
        let mut clauses = directive.split(';');
        let pair = clauses.next().unwrap_or_default();
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("malformed cookie directive: {directive}"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("malformed cookie directive: {directive}"));
        }

        let expired = clauses
            .filter_map(|clause| clause.trim().split_once('='))
            .filter(|(name, _)| name.trim().eq_ignore_ascii_case("expires"))
            .filter_map(|(_, raw)| parse_http_date(raw))
            .any(|expires_ms| expires_ms <= unix_time_ms_now() as i64);

        let mut cookies = self.inner.borrow_mut();
        if expired {
            cookies.shift_remove(key);
        } else {
            cookies.insert(key.to_string(), value.trim().to_string());
        }
        Ok(())
    }
}
