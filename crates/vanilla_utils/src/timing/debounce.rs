//! Debounced callbacks: fire once after a quiet period.

use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};

use super::timers::{TimerHost, TimerId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Options for [`debounce`].
pub struct DebounceOptions {
    /// Fire on the first call of a quiet window instead of after it. Defaults to `false`.
    pub immediate: bool,
}

/// Wrapper returned by [`debounce`].
///
/// Dropping every clone of the wrapper does not cancel an already scheduled invocation.
pub struct Debounced<H, A> {
    host: H,
    callback: Rc<dyn Fn(A)>,
    delay_ms: u32,
    options: DebounceOptions,
    timer: Rc<RefCell<Option<TimerId>>>,
}

impl<H: Clone, A> Clone for Debounced<H, A> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            callback: Rc::clone(&self.callback),
            delay_ms: self.delay_ms,
            options: self.options,
            timer: Rc::clone(&self.timer),
        }
    }
}

impl<H, A> fmt::Debug for Debounced<H, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("delay_ms", &self.delay_ms)
            .field("options", &self.options)
            .field("timer", &self.timer.borrow())
            .finish_non_exhaustive()
    }
}

/// Wraps `callback` so bursts of calls collapse into one invocation.
///
/// Each call cancels the pending timer and starts a new `delay_ms` window; when the window
/// closes, `callback` runs with the last call's arguments. With
/// [`DebounceOptions::immediate`], the first call of a window runs at once and the rest of the
/// window is swallowed with no trailing run.
pub fn debounce<H, A, F>(
    host: H,
    callback: F,
    delay_ms: u32,
    options: DebounceOptions,
) -> Debounced<H, A>
where
    H: TimerHost,
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounced {
        host,
        callback: Rc::new(callback),
        delay_ms,
        options,
        timer: Rc::new(RefCell::new(None)),
    }
}

impl<H: TimerHost, A: 'static> Debounced<H, A> {
    /// Registers one call.
    pub fn call(&self, args: A) {
        let previous = self.timer.borrow_mut().take();
        if let Some(id) = previous {
            self.host.clear_timeout(id);
        }

        let (trailing_args, immediate_args) = if self.options.immediate {
            (None, previous.is_none().then_some(args))
        } else {
            (Some(args), None)
        };

        let timer = Rc::clone(&self.timer);
        let callback = Rc::clone(&self.callback);
        let scheduled = self.host.set_timeout(
            self.delay_ms,
            Box::new(move || {
                timer.borrow_mut().take();
                if let Some(args) = trailing_args {
                    callback(args);
                }
            }),
        );
        match scheduled {
            Ok(id) => *self.timer.borrow_mut() = Some(id),
            Err(err) => leptos::logging::warn!("debounce timer schedule failed: {err}"),
        }

        if let Some(args) = immediate_args {
            (self.callback)(args);
        }
    }

    /// Returns `true` while a window is open.
    pub fn is_pending(&self) -> bool {
        self.timer.borrow().is_some()
    }
}
