//! `window.fetch` wrapper with response-type negotiation.

use vanilla_utils::{decode_response, prepare_request, FetchBody, FetchConfig, FetchError};

use crate::bridge;

/// Issues one request and decodes the body per `config.response_type`.
///
/// `config` is copied, so the caller's value is never modified; an unset method means `GET`.
/// There are no retries and no deadline: compose with [`crate::timers::retry`] and
/// [`crate::timers::timeout`].
///
/// # Errors
///
/// - [`FetchError::MissingUrl`] for a blank `url`, without issuing a request.
/// - [`FetchError::Status`] with the raw response for non-2xx statuses.
/// - [`FetchError::Network`] when the host request fails.
/// - [`FetchError::Decode`] when a JSON body does not parse.
pub async fn fetch_request(url: &str, config: &FetchConfig) -> Result<FetchBody, FetchError> {
    let request = prepare_request(url, config)?;
    let response = bridge::fetch(&request).await?;
    decode_response(response, request.config.response_type)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_url_fails_as_an_outcome() {
        let config = FetchConfig::default();
        let pending = fetch_request("", &config);
        assert_eq!(block_on(pending), Err(FetchError::MissingUrl));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn fetch_non_wasm_parity() {
        let config = FetchConfig::default();
        assert_eq!(
            block_on(fetch_request("https://example.com", &config)),
            Err(FetchError::Unsupported(
                "Browser APIs are only available when compiled for wasm32".to_string()
            ))
        );
    }
}
