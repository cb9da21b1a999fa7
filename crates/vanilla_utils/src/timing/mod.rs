//! Timer-driven helpers over a pluggable [`TimerHost`].
//!
//! Everything here is host-agnostic: the browser crate supplies a `setTimeout`-backed host and
//! tests drive [`VirtualTimers`] by hand.

mod debounce;
mod deferred;
mod throttle;
mod timers;

pub use debounce::{debounce, DebounceOptions, Debounced};
pub use deferred::{retry, sleep, timeout, to_future, RetryOptions, TimeoutError};
pub use throttle::{throttle, ThrottleOptions, Throttled};
pub use timers::{TimerCallback, TimerHost, TimerId, VirtualTimers};
