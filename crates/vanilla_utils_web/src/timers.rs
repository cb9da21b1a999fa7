//! `setTimeout`-backed timer host and browser-default timing wrappers.

use std::future::Future;

use futures::task::{LocalFutureObj, LocalSpawn, SpawnError};
use vanilla_utils::{
    timing, unix_time_ms_now, DebounceOptions, Debounced, RetryOptions, ThrottleOptions,
    Throttled, TimeoutError, TimerCallback, TimerHost, TimerId,
};

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Timer host backed by `window.setTimeout` / `window.clearTimeout` and `Date.now()`.
pub struct BrowserTimers;

impl TimerHost for BrowserTimers {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerId, String> {
        bridge::set_timeout(delay_ms, callback).map(TimerId)
    }

    fn clear_timeout(&self, id: TimerId) {
        bridge::clear_timeout(id.0);
    }

    fn now_ms(&self) -> u64 {
        unix_time_ms_now()
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Spawner backed by the browser microtask queue (`wasm_bindgen_futures::spawn_local`).
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        bridge::spawn_local(future).map_err(|_| SpawnError::shutdown())
    }
}

/// [`timing::debounce`] on browser timers.
pub fn debounce<A, F>(
    callback: F,
    delay_ms: u32,
    options: DebounceOptions,
) -> Debounced<BrowserTimers, A>
where
    A: 'static,
    F: Fn(A) + 'static,
{
    timing::debounce(BrowserTimers, callback, delay_ms, options)
}

/// [`timing::throttle`] on browser timers.
pub fn throttle<A, F>(
    callback: F,
    delay_ms: u32,
    options: ThrottleOptions,
) -> Throttled<BrowserTimers, A>
where
    A: 'static,
    F: Fn(A) + 'static,
{
    timing::throttle(BrowserTimers, callback, delay_ms, options)
}

/// [`timing::sleep`] on browser timers.
pub fn sleep(ms: u32) -> impl Future<Output = ()> {
    timing::sleep(&BrowserTimers, ms)
}

/// [`timing::retry`] on browser timers.
///
/// # Errors
///
/// Returns the error of the final attempt when every attempt fails.
pub async fn retry<F, Fut, T, E>(operation: F, options: RetryOptions) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    timing::retry(&BrowserTimers, operation, options).await
}

/// [`timing::timeout`] on browser timers.
///
/// A timed-out `operation` keeps running on [`BrowserSpawner`].
///
/// # Errors
///
/// Returns [`TimeoutError`] when `ms` elapses before `operation` completes.
pub async fn timeout<Fut>(operation: Fut, ms: u32) -> Result<Fut::Output, TimeoutError>
where
    Fut: Future + 'static,
    Fut::Output: 'static,
{
    timing::timeout(&BrowserTimers, &BrowserSpawner, operation, ms).await
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use futures::{executor::block_on, future, task::LocalSpawnExt};
    use pretty_assertions::assert_eq;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn timer_host_non_wasm_parity() {
        let err = BrowserTimers
            .set_timeout(10, Box::new(|| {}))
            .expect_err("schedule should fail");
        assert_eq!(err, "Browser APIs are only available when compiled for wasm32");
        BrowserTimers.clear_timeout(TimerId(1));
        assert!(BrowserTimers.now_ms() > 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn spawner_non_wasm_parity() {
        let err = BrowserSpawner
            .spawn_local(async {})
            .expect_err("spawn should fail");
        assert!(err.is_shutdown());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn deferred_helpers_complete_without_timers() {
        block_on(sleep(1_000));
        assert_eq!(block_on(timeout(future::ready("done"), 50)), Ok("done"));

        let attempts = RefCell::new(0);
        let result: Result<u32, &str> = block_on(retry(
            || {
                *attempts.borrow_mut() += 1;
                future::ready(if *attempts.borrow() < 3 { Err("flaky") } else { Ok(7) })
            },
            RetryOptions {
                attempts: 3,
                delay_ms: 1_000,
            },
        ));
        assert_eq!(result, Ok(7));
        assert_eq!(*attempts.borrow(), 3);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn wrappers_without_timers_never_fire_late() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let record = move |value: u32| sink.borrow_mut().push(value);
        let debounced = debounce(record, 10, DebounceOptions::default());
        debounced.call(1);
        assert!(!debounced.is_pending());
        assert!(calls.borrow().is_empty());

        let sink = Rc::clone(&calls);
        let record = move |value: u32| sink.borrow_mut().push(value);
        let throttled = throttle(record, 60_000, ThrottleOptions::default());
        throttled.call(2);
        throttled.call(3);
        assert_eq!(*calls.borrow(), vec![2]);
        assert!(!throttled.is_pending());
    }
}
