//! Browser (`wasm32`) bindings for [`vanilla_utils`].
//!
//! DOM helpers, the `document.cookie` jar, `localStorage`/`sessionStorage` areas, the
//! `setTimeout` timer host and the `fetch` transport. Host calls go through `bridge`, which
//! routes to `web-sys` on `wasm32` and to a shim that reports the API as unavailable elsewhere.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod bridge;
pub mod cookies;
pub mod dom;
pub mod fetch;
pub mod storage;
pub mod timers;

pub use cookies::{cookie_value, get_cookie, remove_cookie, set_cookie, DocumentCookieJar};
pub use dom::{
    create_element, download_file_from_bytes, download_link, location_query_params, open_link,
    ready,
};
pub use fetch::fetch_request;
pub use storage::{
    clear_local_storage, clear_session_storage, get_local_storage, get_local_storage_or,
    get_session_storage, get_session_storage_or, remove_local_storage, remove_session_storage,
    set_local_storage, set_session_storage, BrowserStorage,
};
pub use timers::{debounce, retry, sleep, throttle, timeout, BrowserSpawner, BrowserTimers};
