//! Fetch request configuration, response model and body decoding.
//!
//! The transport lives in the browser crate; everything that does not need a network stack
//! (validation, defaults, content negotiation, decoding) is here so it can be tested natively.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::mime::guess_mime_type;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $(#[$meta])*
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Wire string passed to the host `fetch` init object.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }
    };
}

wire_enum! {
    #[derive(Default)]
    /// HTTP method. Defaults to `GET`.
    FetchMethod {
        #[default]
        /// `GET`
        Get => "GET",
        /// `POST`
        Post => "POST",
        /// `PUT`
        Put => "PUT",
        /// `DELETE`
        Delete => "DELETE",
    }
}

wire_enum! {
    /// Cross-origin mode.
    RequestMode {
        /// `no-cors`
        NoCors => "no-cors",
        /// `cors`
        Cors => "cors",
        /// `navigate`
        Navigate => "navigate",
        /// `websocket`
        Websocket => "websocket",
        /// `same-origin`
        SameOrigin => "same-origin",
    }
}

wire_enum! {
    /// HTTP cache policy.
    RequestCache {
        /// `default`
        Default => "default",
        /// `no-cache`
        NoCache => "no-cache",
        /// `reload`
        Reload => "reload",
        /// `force-cache`
        ForceCache => "force-cache",
        /// `only-if-cached`
        OnlyIfCached => "only-if-cached",
    }
}

wire_enum! {
    /// Credentials policy.
    RequestCredentials {
        /// `include`
        Include => "include",
        /// `same-origin`
        SameOrigin => "same-origin",
        /// `omit`
        Omit => "omit",
    }
}

wire_enum! {
    /// Redirect policy.
    RequestRedirect {
        /// `manual`
        Manual => "manual",
        /// `follow`
        Follow => "follow",
        /// `error`
        Error => "error",
    }
}

wire_enum! {
    /// Referrer policy.
    ReferrerPolicy {
        /// `no-referrer`
        NoReferrer => "no-referrer",
        /// `no-referrer-when-downgrade`
        NoReferrerWhenDowngrade => "no-referrer-when-downgrade",
        /// `origin`
        Origin => "origin",
        /// `origin-when-cross-origin`
        OriginWhenCrossOrigin => "origin-when-cross-origin",
        /// `same-origin`
        SameOrigin => "same-origin",
        /// `strict-origin`
        StrictOrigin => "strict-origin",
        /// `strict-origin-when-cross-origin`
        StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
        /// `unsafe-url`
        UnsafeUrl => "unsafe-url",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// How a successful response body is decoded.
pub enum ResponseType {
    /// Pick a decoder from the `Content-Type` header.
    #[default]
    Auto,
    /// Parse the body as JSON.
    Json,
    /// Decode the body as UTF-8 text.
    Text,
    /// Keep the bytes together with their MIME type.
    Blob,
    /// Keep the raw bytes.
    ArrayBuffer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
/// Request body. JSON values are serialized to text before sending.
pub enum RequestBody {
    /// Sent verbatim.
    Text(String),
    /// Sent as its JSON text.
    Json(Value),
}

impl RequestBody {
    /// Body text as it goes on the wire.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Json(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Options for one fetch call. Unset enums are left to the host's own defaults.
pub struct FetchConfig {
    /// HTTP method; `GET` when unset.
    pub method: Option<FetchMethod>,
    /// Cross-origin mode.
    pub mode: Option<RequestMode>,
    /// Cache policy.
    pub cache: Option<RequestCache>,
    /// Credentials policy.
    pub credentials: Option<RequestCredentials>,
    /// Redirect policy.
    pub redirect: Option<RequestRedirect>,
    /// Referrer policy.
    pub referrer_policy: Option<ReferrerPolicy>,
    /// Request headers, sent in insertion order.
    pub headers: IndexMap<String, String>,
    /// Request body.
    pub body: Option<RequestBody>,
    /// Body decoder for successful responses.
    pub response_type: ResponseType,
}

impl FetchConfig {
    /// Sets the method.
    pub fn with_method(mut self, method: FetchMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Adds or replaces one header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets a JSON body and the matching `Content-Type` header.
    pub fn with_json_body(self, value: Value) -> Self {
        let mut config = self.with_header("Content-Type", "application/json");
        config.body = Some(RequestBody::Json(value));
        config
    }

    /// Sets the response decoder.
    pub fn with_response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Validated request ready for a transport.
pub struct FetchRequest {
    /// Target URL.
    pub url: String,
    /// Resolved method.
    pub method: FetchMethod,
    /// Copy of the caller's configuration.
    pub config: FetchConfig,
}

/// Validates `url` and resolves config defaults without touching the caller's config.
///
/// # Errors
///
/// Returns [`FetchError::MissingUrl`] when `url` is empty or whitespace.
pub fn prepare_request(url: &str, config: &FetchConfig) -> Result<FetchRequest, FetchError> {
    if url.trim().is_empty() {
        return Err(FetchError::MissingUrl);
    }
    let config = config.clone();
    Ok(FetchRequest {
        url: url.to_string(),
        method: config.method.unwrap_or_default(),
        config,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Raw response as read from the transport.
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// HTTP status text.
    pub status_text: String,
    /// Final URL after redirects.
    pub url: String,
    /// Response headers with lowercase names.
    pub headers: IndexMap<String, String>,
    /// Undecoded body bytes.
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// `true` for 2xx statuses.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The `Content-Type` header, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Decoded body of a successful response.
pub enum FetchBody {
    /// Parsed JSON.
    Json(Value),
    /// UTF-8 text. Invalid sequences are replaced.
    Text(String),
    /// Bytes with the response's MIME type, or a sniffed one when the header is absent.
    Blob {
        /// MIME type of the bytes.
        mime_type: String,
        /// Body bytes.
        bytes: Vec<u8>,
    },
    /// Raw bytes.
    ArrayBuffer(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Error)]
/// Failure outcome of a fetch call.
pub enum FetchError {
    /// The URL was empty.
    #[error("improper request: a url is required")]
    MissingUrl,
    /// The server answered with a non-2xx status; the raw response is kept for inspection.
    #[error("request failed with status {} {}", .0.status, .0.status_text)]
    Status(Box<FetchResponse>),
    /// The host could not complete the request.
    #[error("network request failed: {0}")]
    Network(String),
    /// The body did not match the requested decoder.
    #[error("response decode failed: {0}")]
    Decode(String),
    /// No transport on this target.
    #[error("{0}")]
    Unsupported(String),
}

fn media_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Chooses a concrete decoder from a `Content-Type` value. Never returns [`ResponseType::Auto`].
///
/// JSON types map to `Json`, textual types to `Text`, binary media to `Blob`; anything else,
/// including a missing header, falls back to `Text`.
pub fn negotiate_response_type(content_type: Option<&str>) -> ResponseType {
    let Some(essence) = content_type.map(media_essence) else {
        return ResponseType::Text;
    };
    if essence == "application/json" || essence.ends_with("+json") {
        return ResponseType::Json;
    }
    if essence.starts_with("text/") || essence.ends_with("+xml") {
        return ResponseType::Text;
    }
    match essence.as_str() {
        "application/xml"
        | "application/javascript"
        | "application/ecmascript"
        | "application/x-www-form-urlencoded" => return ResponseType::Text,
        "application/octet-stream"
        | "application/pdf"
        | "application/zip"
        | "application/gzip"
        | "application/wasm"
        | "application/x-7z-compressed" => return ResponseType::Blob,
        _ => {}
    }
    let binary_prefixes = ["image/", "audio/", "video/", "font/", "application/vnd."];
    if binary_prefixes
        .iter()
        .any(|prefix| essence.starts_with(prefix))
    {
        ResponseType::Blob
    } else {
        ResponseType::Text
    }
}

/// Turns a raw response into the caller's outcome.
///
/// # Errors
///
/// Returns [`FetchError::Status`] for non-2xx responses and [`FetchError::Decode`] when a JSON
/// body does not parse.
pub fn decode_response(
    response: FetchResponse,
    response_type: ResponseType,
) -> Result<FetchBody, FetchError> {
    if !response.is_ok() {
        return Err(FetchError::Status(Box::new(response)));
    }
    let decoder = match response_type {
        ResponseType::Auto => negotiate_response_type(response.content_type()),
        explicit => explicit,
    };
    match decoder {
        ResponseType::Json => serde_json::from_slice(&response.body)
            .map(FetchBody::Json)
            .map_err(|err| FetchError::Decode(err.to_string())),
        ResponseType::Blob => {
            let mime_type = match response.content_type() {
                Some(content_type) if !content_type.trim().is_empty() => content_type.to_string(),
                _ => guess_mime_type(&response.body).to_string(),
            };
            Ok(FetchBody::Blob {
                mime_type,
                bytes: response.body,
            })
        }
        ResponseType::ArrayBuffer => Ok(FetchBody::ArrayBuffer(response.body)),
        ResponseType::Auto | ResponseType::Text => Ok(FetchBody::Text(
            String::from_utf8_lossy(&response.body).into_owned(),
        )),
    }
}
