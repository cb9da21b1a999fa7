//! Timer host contract and a manually driven virtual clock.

use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Handle returned by [`TimerHost::set_timeout`].
pub struct TimerId(pub i32);

/// Callback scheduled on a [`TimerHost`].
pub type TimerCallback = Box<dyn FnOnce() + 'static>;

/// Host schedule-once/cancel primitives plus a millisecond clock.
pub trait TimerHost {
    /// Schedules `callback` to run once after `delay_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot schedule timers.
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerId, String>;

    /// Cancels a pending timer. Unknown or already-fired ids are ignored.
    fn clear_timeout(&self, id: TimerId);

    /// Current time in milliseconds on the host clock.
    fn now_ms(&self) -> u64;
}

impl<H: TimerHost + ?Sized> TimerHost for Rc<H> {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerId, String> {
        (**self).set_timeout(delay_ms, callback)
    }

    fn clear_timeout(&self, id: TimerId) {
        (**self).clear_timeout(id)
    }

    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

#[derive(Default)]
struct VirtualTimersState {
    now_ms: u64,
    next_id: i32,
    // (due, id) keeps same-deadline timers in scheduling order
    pending: BTreeMap<(u64, TimerId), TimerCallback>,
}

#[derive(Clone, Default)]
/// Manually advanced timer host.
///
/// Time only moves through [`VirtualTimers::advance`] and [`VirtualTimers::run_all`]; due
/// callbacks fire in deadline order with the clock set to their deadline. Callbacks may schedule
/// or cancel further timers.
pub struct VirtualTimers {
    inner: Rc<RefCell<VirtualTimersState>>,
}

impl fmt::Debug for VirtualTimers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("VirtualTimers")
            .field("now_ms", &state.now_ms)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl VirtualTimers {
    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Moves the clock forward by `ms`, firing every timer due on the way.
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now_ms.saturating_add(ms);
        while let Some(callback) = self.pop_due(target) {
            callback();
        }
        self.inner.borrow_mut().now_ms = target;
    }

    /// Fires timers until none are left, including ones scheduled by fired callbacks.
    pub fn run_all(&self) {
        while let Some(callback) = self.pop_due(u64::MAX) {
            callback();
        }
    }

    fn pop_due(&self, limit: u64) -> Option<TimerCallback> {
        let mut state = self.inner.borrow_mut();
        let (&(due, id), _) = state.pending.first_key_value()?;
        if due > limit {
            return None;
        }
        let callback = state.pending.remove(&(due, id))?;
        state.now_ms = state.now_ms.max(due);
        Some(callback)
    }
}

impl TimerHost for VirtualTimers {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerId, String> {
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let due = state.now_ms + u64::from(delay_ms);
        state.pending.insert((due, id), callback);
        Ok(id)
    }

    fn clear_timeout(&self, id: TimerId) {
        self.inner
            .borrow_mut()
            .pending
            .retain(|(_, pending_id), _| *pending_id != id);
    }

    fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> TimerCallback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_for_make = log.clone();
        let make = move |label: &'static str| -> TimerCallback {
            let log = log_for_make.clone();
            Box::new(move || log.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn advance_fires_due_timers_in_deadline_order() {
        let timers = VirtualTimers::default();
        let (log, make) = recorder();
        timers.set_timeout(30, make("c")).expect("schedule");
        timers.set_timeout(10, make("a")).expect("schedule");
        timers.set_timeout(10, make("b")).expect("schedule");

        timers.advance(9);
        assert!(log.borrow().is_empty());
        timers.advance(1);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(timers.now_ms(), 10);
        timers.advance(100);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(timers.now_ms(), 110);
    }

    #[test]
    fn cleared_timers_never_fire() {
        let timers = VirtualTimers::default();
        let (log, make) = recorder();
        let id = timers.set_timeout(5, make("cancelled")).expect("schedule");
        timers.clear_timeout(id);
        timers.run_all();
        assert!(log.borrow().is_empty());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn callbacks_can_schedule_more_timers() {
        let timers = VirtualTimers::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        let (inner_log, inner_timers) = (log.clone(), timers.clone());
        timers
            .set_timeout(
                5,
                Box::new(move || {
                    inner_log.borrow_mut().push(inner_timers.now_ms());
                    let nested_log = inner_log.clone();
                    let nested_timers = inner_timers.clone();
                    inner_timers
                        .set_timeout(
                            5,
                            Box::new(move || nested_log.borrow_mut().push(nested_timers.now_ms())),
                        )
                        .expect("nested schedule");
                }),
            )
            .expect("schedule");

        timers.run_all();
        assert_eq!(*log.borrow(), vec![5, 10]);
    }
}
