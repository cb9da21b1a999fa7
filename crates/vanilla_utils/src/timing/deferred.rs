//! Timer-backed futures: sleep, retry with a fixed delay, and deadlines.

use std::future::Future;

use futures::{
    channel::oneshot,
    future::{self, Either, Ready},
    task::{LocalSpawn, LocalSpawnExt},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::timers::TimerHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Options for [`retry`].
pub struct RetryOptions {
    /// Total number of calls, including the first. `0` is treated as `1`. Defaults to `3`.
    pub attempts: u32,
    /// Pause between a failure and the next call. Defaults to `1000`.
    #[serde(rename = "delay")]
    pub delay_ms: u32,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation timed out")]
/// Error returned by [`timeout`] when the deadline passes first.
pub struct TimeoutError {
    /// The deadline that elapsed, in milliseconds.
    pub ms: u32,
}

fn wake_after<H: TimerHost + ?Sized>(
    host: &H,
    ms: u32,
) -> Result<oneshot::Receiver<()>, String> {
    let (tx, rx) = oneshot::channel();
    host.set_timeout(
        ms,
        Box::new(move || {
            let _ = tx.send(());
        }),
    )?;
    Ok(rx)
}

/// Completes after `ms` milliseconds. Never fails.
///
/// The timer starts when `sleep` is called, not when the future is first polled. If the host
/// cannot schedule a timer the failure is logged and the future completes immediately.
pub fn sleep<H: TimerHost + ?Sized>(host: &H, ms: u32) -> impl Future<Output = ()> {
    let wake = wake_after(host, ms);
    async move {
        match wake {
            Ok(rx) => {
                let _ = rx.await;
            }
            Err(err) => leptos::logging::warn!("sleep timer schedule failed: {err}"),
        }
    }
}

/// Calls `operation` until it succeeds or `options.attempts` calls have failed.
///
/// Sleeps `options.delay_ms` between failures. The last failure is returned unchanged.
///
/// # Errors
///
/// Returns the error of the final attempt when every attempt fails.
pub async fn retry<H, F, Fut, T, E>(
    host: &H,
    mut operation: F,
    options: RetryOptions,
) -> Result<T, E>
where
    H: TimerHost + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = options.attempts.max(1);
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= attempts => return Err(err),
            Err(_) => {
                attempt += 1;
                sleep(host, options.delay_ms).await;
            }
        }
    }
}

/// Races `operation` against a `ms` millisecond deadline.
///
/// When the deadline wins, `operation` is not cancelled: it is handed to `spawner` and keeps
/// running to completion, with its output discarded. If the host cannot schedule the deadline,
/// the failure is logged and `operation` runs without one. If `spawner` refuses the leftover
/// operation, the refusal is logged and the operation is dropped.
///
/// # Errors
///
/// Returns [`TimeoutError`] when the deadline passes before `operation` completes.
pub async fn timeout<H, S, Fut>(
    host: &H,
    spawner: &S,
    operation: Fut,
    ms: u32,
) -> Result<Fut::Output, TimeoutError>
where
    H: TimerHost + ?Sized,
    S: LocalSpawn + ?Sized,
    Fut: Future + 'static,
    Fut::Output: 'static,
{
    let deadline = match wake_after(host, ms) {
        Ok(rx) => rx,
        Err(err) => {
            leptos::logging::warn!("timeout timer schedule failed: {err}");
            return Ok(operation.await);
        }
    };
    match future::select(Box::pin(operation), deadline).await {
        Either::Left((value, _)) => Ok(value),
        Either::Right((_, unfinished)) => {
            let detached = async move {
                let _ = unfinished.await;
            };
            if let Err(err) = spawner.spawn_local(detached) {
                leptos::logging::warn!("timed-out operation could not keep running: {err}");
            }
            Err(TimeoutError { ms })
        }
    }
}

/// Runs a synchronous call now and hands back its result as an already-completed future.
pub fn to_future<A, R>(operation: impl FnOnce(A) -> R, args: A) -> Ready<R> {
    future::ready(operation(args))
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use std::cell::Cell;

    use futures::executor::{block_on, LocalPool};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::timing::{TimerCallback, TimerId, VirtualTimers};

    #[derive(Debug, Clone, Copy, Default)]
    struct RefusingTimers;

    impl TimerHost for RefusingTimers {
        fn set_timeout(&self, _delay_ms: u32, _callback: TimerCallback) -> Result<TimerId, String> {
            Err("timers unavailable".to_string())
        }

        fn clear_timeout(&self, _id: TimerId) {}

        fn now_ms(&self) -> u64 {
            0
        }
    }

    fn spawn_capture<T: 'static>(
        pool: &LocalPool,
        fut: impl Future<Output = T> + 'static,
    ) -> Rc<RefCell<Option<T>>> {
        let slot = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&slot);
        pool.spawner()
            .spawn_local(async move {
                let value = fut.await;
                *sink.borrow_mut() = Some(value);
            })
            .expect("spawn");
        slot
    }

    #[test]
    fn sleep_completes_only_after_delay() {
        let timers = VirtualTimers::default();
        let mut pool = LocalPool::new();
        let done = spawn_capture(&pool, sleep(&timers, 50));

        pool.run_until_stalled();
        assert!(done.borrow().is_none());
        timers.advance(49);
        pool.run_until_stalled();
        assert!(done.borrow().is_none());
        timers.advance(1);
        pool.run_until_stalled();
        assert_eq!(*done.borrow(), Some(()));
    }

    #[test]
    fn retry_stops_at_first_success() {
        let timers = VirtualTimers::default();
        let mut pool = LocalPool::new();
        let attempts = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&attempts);
        let host = timers.clone();
        let result = spawn_capture(&pool, async move {
            retry(
                &host,
                || {
                    *counter.borrow_mut() += 1;
                    let attempt = *counter.borrow();
                    async move {
                        if attempt < 2 {
                            Err("fail")
                        } else {
                            Ok("success")
                        }
                    }
                },
                RetryOptions {
                    attempts: 3,
                    delay_ms: 5,
                },
            )
            .await
        });

        pool.run_until_stalled();
        assert_eq!(*attempts.borrow(), 1);
        timers.advance(5);
        pool.run_until_stalled();
        assert_eq!(*result.borrow(), Some(Ok("success")));
        assert_eq!(*attempts.borrow(), 2);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn retry_propagates_last_failure() {
        let timers = VirtualTimers::default();
        let mut pool = LocalPool::new();
        let attempts = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&attempts);
        let host = timers.clone();
        let result = spawn_capture(&pool, async move {
            retry(
                &host,
                || {
                    *counter.borrow_mut() += 1;
                    let attempt = *counter.borrow();
                    async move { Err::<(), _>(format!("fail #{attempt}")) }
                },
                RetryOptions {
                    attempts: 2,
                    delay_ms: 5,
                },
            )
            .await
        });

        pool.run_until_stalled();
        timers.run_all();
        pool.run_until_stalled();
        assert_eq!(*result.borrow(), Some(Err("fail #2".to_string())));
        assert_eq!(*attempts.borrow(), 2);
    }

    #[test]
    fn retry_with_zero_attempts_still_calls_once() {
        let timers = VirtualTimers::default();
        let mut calls = 0;
        let result: Result<(), &str> = block_on(retry(
            &timers,
            || {
                calls += 1;
                future::ready(Err("nope"))
            },
            RetryOptions {
                attempts: 0,
                delay_ms: 0,
            },
        ));
        assert_eq!(result, Err("nope"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn timeout_passes_through_fast_results() {
        let timers = VirtualTimers::default();
        let pool = LocalPool::new();
        let result = block_on(timeout(
            &timers,
            &pool.spawner(),
            future::ready("success"),
            1000,
        ));
        assert_eq!(result, Ok("success"));
    }

    #[test]
    fn timeout_rejects_slow_operations() {
        let timers = VirtualTimers::default();
        let mut pool = LocalPool::new();
        let host = timers.clone();
        let spawner = pool.spawner();
        let result = spawn_capture(&pool, async move {
            let slow = sleep(&host, 200);
            let operation = async move {
                slow.await;
                "late"
            };
            timeout(&host, &spawner, operation, 50).await
        });

        pool.run_until_stalled();
        timers.advance(50);
        pool.run_until_stalled();
        let outcome = result.borrow_mut().take().expect("settled");
        let err = outcome.expect_err("should time out");
        assert_eq!(err, TimeoutError { ms: 50 });
        assert_eq!(err.to_string(), "operation timed out");
    }

    #[test]
    fn timed_out_operations_keep_running_to_completion() {
        let timers = VirtualTimers::default();
        let mut pool = LocalPool::new();
        let finished = Rc::new(Cell::new(false));
        let host = timers.clone();
        let spawner = pool.spawner();
        let flag = Rc::clone(&finished);
        let result = spawn_capture(&pool, async move {
            let operation = {
                let host = host.clone();
                async move {
                    sleep(&host, 100).await;
                    flag.set(true);
                }
            };
            timeout(&host, &spawner, operation, 50).await
        });

        pool.run_until_stalled();
        timers.advance(50);
        pool.run_until_stalled();
        assert_eq!(*result.borrow(), Some(Err(TimeoutError { ms: 50 })));
        assert!(!finished.get());

        timers.advance(200);
        pool.run_until_stalled();
        assert!(finished.get());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn unschedulable_hosts_degrade_without_hanging() {
        block_on(sleep(&RefusingTimers, 1_000));
        let pool = LocalPool::new();
        let result = block_on(timeout(
            &RefusingTimers,
            &pool.spawner(),
            future::ready(7),
            10,
        ));
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn to_future_carries_value_or_error() {
        assert_eq!(block_on(to_future(|a: i32| a + 1, 1)), 2);
        let failed = block_on(to_future(|raw: &str| raw.parse::<i32>(), "x"));
        assert!(failed.is_err());
    }

    #[test]
    fn retry_options_accept_js_field_names() {
        let options: RetryOptions = serde_json::from_str(r#"{"delay": 5}"#).expect("options");
        assert_eq!(
            options,
            RetryOptions {
                attempts: 3,
                delay_ms: 5,
            }
        );
    }
}
