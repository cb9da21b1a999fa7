//! Host-agnostic frontend helpers: data transforms, MIME sniffing, query strings, cookie and
//! storage logic, timing wrappers and fetch models.
//!
//! Everything that touches a host (cookie jar, storage area, timers) goes through a small trait
//! with an in-memory adapter here, so the logic builds and is tested on every target. Browser
//! adapters and the fetch transport live in `vanilla_utils_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod arrays;
pub mod cookies;
pub mod ext;
pub mod fetch;
pub mod mime;
pub mod numbers;
pub mod objects;
pub mod query;
pub mod random;
pub mod storage;
pub mod strings;
pub mod time;
pub mod timing;
pub mod validation;

pub use cookies::{
    compose_directive, cookie_value_with, find_cookie, get_cookie_with, removal_directive,
    remove_cookie_with, set_cookie_with, CookieConfig, CookieJar, MemoryCookieJar, SameSite,
    EXPIRED_HTTP_DATE,
};
pub use ext::{GroupByExt, NumericSliceExt};
pub use fetch::{
    decode_response, negotiate_response_type, prepare_request, FetchBody, FetchConfig, FetchError,
    FetchMethod, FetchRequest, FetchResponse, ReferrerPolicy, RequestBody, RequestCache,
    RequestCredentials, RequestMode, RequestRedirect, ResponseType,
};
pub use mime::{guess_mime_type, FALLBACK_MIME_TYPE};
pub use query::{build_query_string, file_name_from_url, get_query_params};
pub use storage::{
    clear_with, get_json_or_with, get_json_with, remove_json_with, set_json_with,
    MemoryStorageArea, StorageArea, UnavailableStorageArea,
};
pub use strings::PadSide;
pub use time::unix_time_ms_now;
pub use timing::{
    debounce, retry, sleep, throttle, timeout, to_future, DebounceOptions, Debounced,
    RetryOptions, ThrottleOptions, Throttled, TimeoutError, TimerCallback, TimerHost, TimerId,
    VirtualTimers,
};
