//! Rate limiting for high-frequency input
//!
//! - [`Throttle`] - leading-edge gate: the first call passes, then calls are
//!   dropped until the interval has elapsed. Nothing is queued, so there is
//!   never a trailing invocation.
//! - [`Throttled`] - a callback wrapped in a [`Throttle`] with its own clock
//! - [`RateLimiter`] - "strictly more than N ms since the last accepted call"

use crate::clock::{Clock, Millis};

/// Leading-edge throttle gate
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    interval: Millis,
    /// Earliest time the next call may pass
    open_at: Option<Millis>,
}

impl Throttle {
    pub fn new(interval: Millis) -> Self {
        Self {
            interval,
            open_at: None,
        }
    }

    pub fn interval(&self) -> Millis {
        self.interval
    }

    /// Returns true if a call at `now` may run, and starts a new suppression
    /// window if so
    pub fn try_acquire(&mut self, now: Millis) -> bool {
        match self.open_at {
            Some(open_at) if now < open_at => false,
            _ => {
                self.open_at = Some(now.saturating_add(self.interval));
                true
            }
        }
    }

    /// Whether a call at `now` would currently be suppressed
    pub fn is_suppressed(&self, now: Millis) -> bool {
        matches!(self.open_at, Some(open_at) if now < open_at)
    }

    pub fn reset(&mut self) {
        self.open_at = None;
    }
}

/// A callback that runs at most once per interval
pub struct Throttled<C, F> {
    clock: C,
    gate: Throttle,
    callback: F,
}

/// Wrap `callback` so it executes at most once per `interval` milliseconds
pub fn throttle<C, F>(clock: C, interval: Millis, callback: F) -> Throttled<C, F>
where
    C: Clock,
{
    Throttled {
        clock,
        gate: Throttle::new(interval),
        callback,
    }
}

impl<C: Clock, F> Throttled<C, F> {
    /// Invoke the callback if the throttle window is open
    ///
    /// Returns `None` when the call was dropped.
    pub fn call<A, R>(&mut self, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        if self.gate.try_acquire(self.clock.now()) {
            Some((self.callback)(arg))
        } else {
            None
        }
    }

    pub fn gate(&self) -> &Throttle {
        &self.gate
    }
}

/// Accepts a call only if strictly more than `min_gap` ms have passed since
/// the last accepted one
#[derive(Clone, Copy, Debug)]
pub struct RateLimiter {
    min_gap: Millis,
    last: Option<Millis>,
}

impl RateLimiter {
    pub fn new(min_gap: Millis) -> Self {
        Self {
            min_gap,
            last: None,
        }
    }

    pub fn allow(&mut self, now: Millis) -> bool {
        let allowed = match self.last {
            Some(last) => now.saturating_sub(last) > self.min_gap,
            None => true,
        };
        if allowed {
            self.last = Some(now);
        }
        allowed
    }
}
