//! Query-string and URL path helpers.

use indexmap::IndexMap;
use url::form_urlencoded;

/// Parses a query string (leading `?` optional) into an insertion-ordered map.
///
/// Keys and values are form-decoded. A repeated key keeps its first position and its last value.
pub fn get_query_params(search: &str) -> IndexMap<String, String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Serializes key/value pairs as a form-encoded query string without a leading `?`.
pub fn build_query_string<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: ToString,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key.as_ref(), &value.to_string());
    }
    serializer.finish()
}

/// Returns the final `/`-separated segment of `url`, used as a download file name.
pub fn file_name_from_url(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
