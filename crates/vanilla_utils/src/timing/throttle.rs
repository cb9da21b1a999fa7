//! Throttled callbacks: at most one invocation per window.

use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};

use super::timers::{TimerHost, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Options for [`throttle`]. Both edges are enabled by default.
pub struct ThrottleOptions {
    /// Invoke on the call that opens a window.
    pub leading: bool,
    /// Invoke once at the end of a window when calls arrived during it.
    pub trailing: bool,
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            leading: true,
            trailing: true,
        }
    }
}

struct ThrottleState<A> {
    last_invoke_ms: Option<u64>,
    timer: Option<TimerId>,
    pending_args: Option<A>,
}

/// Wrapper returned by [`throttle`].
pub struct Throttled<H, A> {
    host: H,
    callback: Rc<dyn Fn(A)>,
    delay_ms: u32,
    options: ThrottleOptions,
    state: Rc<RefCell<ThrottleState<A>>>,
}

impl<H: Clone, A> Clone for Throttled<H, A> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            callback: Rc::clone(&self.callback),
            delay_ms: self.delay_ms,
            options: self.options,
            state: Rc::clone(&self.state),
        }
    }
}

impl<H, A> fmt::Debug for Throttled<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Throttled")
            .field("delay_ms", &self.delay_ms)
            .field("options", &self.options)
            .field("last_invoke_ms", &state.last_invoke_ms)
            .field("timer", &state.timer)
            .finish_non_exhaustive()
    }
}

/// Wraps `callback` so it runs at most once per `delay_ms` window.
///
/// A call arriving when no window is open starts one and, with `leading`, invokes right away.
/// Calls inside an open window schedule a single trailing invocation (with `trailing`) for the
/// rest of the window; later calls only replace the arguments it will use.
pub fn throttle<H, A, F>(
    host: H,
    callback: F,
    delay_ms: u32,
    options: ThrottleOptions,
) -> Throttled<H, A>
where
    H: TimerHost + Clone + 'static,
    A: 'static,
    F: Fn(A) + 'static,
{
    Throttled {
        host,
        callback: Rc::new(callback),
        delay_ms,
        options,
        state: Rc::new(RefCell::new(ThrottleState {
            last_invoke_ms: None,
            timer: None,
            pending_args: None,
        })),
    }
}

impl<H, A> Throttled<H, A>
where
    H: TimerHost + Clone + 'static,
    A: 'static,
{
    /// Registers one call.
    pub fn call(&self, args: A) {
        let now = self.host.now_ms();
        let delay = u64::from(self.delay_ms);
        let mut state = self.state.borrow_mut();

        let window_closed = state
            .last_invoke_ms
            .map_or(true, |last| now.saturating_sub(last) >= delay);
        if window_closed {
            if let Some(id) = state.timer.take() {
                self.host.clear_timeout(id);
            }
            state.pending_args = None;
            state.last_invoke_ms = Some(now);
            if self.options.leading {
                drop(state);
                (self.callback)(args);
                return;
            }
        }

        if !self.options.trailing {
            return;
        }
        state.pending_args = Some(args);
        if state.timer.is_some() {
            return;
        }

        let elapsed = state.last_invoke_ms.map_or(0, |last| now.saturating_sub(last));
        let remaining = delay.saturating_sub(elapsed);
        let shared = Rc::clone(&self.state);
        let callback = Rc::clone(&self.callback);
        let host = self.host.clone();
        let scheduled = self.host.set_timeout(
            u32::try_from(remaining).unwrap_or(u32::MAX),
            Box::new(move || {
                let args = {
                    let mut state = shared.borrow_mut();
                    state.timer = None;
                    let args = state.pending_args.take();
                    if args.is_some() {
                        state.last_invoke_ms = Some(host.now_ms());
                    }
                    args
                };
                if let Some(args) = args {
                    callback(args);
                }
            }),
        );
        match scheduled {
            Ok(id) => state.timer = Some(id),
            Err(err) => leptos::logging::warn!("throttle timer schedule failed: {err}"),
        }
    }

    /// Returns `true` while a trailing invocation is scheduled.
    pub fn is_pending(&self) -> bool {
        self.state.borrow().timer.is_some()
    }
}
