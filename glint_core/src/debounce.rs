// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-slot debounce deadline.
//!
//! [`Debounce`] holds at most one pending deadline. Every
//! [`trigger`](Debounce::trigger) replaces it, so only the last event of a
//! burst survives. The platform timer is just a wake-up: when it fires, the
//! owner calls [`poll`](Debounce::poll) with the current time and acts on
//! [`DebouncePoll::Ready`], or re-arms the timer for the reported remainder.
//!
//! Times are milliseconds on the host's monotonic clock
//! (`performance.now()` on the web).

/// Outcome of [`Debounce::poll`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DebouncePoll {
    /// Nothing is pending.
    Idle,
    /// A deadline is pending but not yet reached.
    Pending {
        /// Milliseconds until the deadline.
        remaining_ms: f64,
    },
    /// The quiet period elapsed. The slot has been cleared.
    Ready,
}

/// A single-slot, last-write-wins debounce timer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Debounce {
    interval_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    /// Creates an idle debouncer with the given quiet period.
    #[must_use]
    pub const fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            deadline: None,
        }
    }

    /// Returns the quiet period.
    #[must_use]
    pub const fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Records an event at `now_ms`, replacing any pending deadline.
    ///
    /// Returns the new deadline.
    pub fn trigger(&mut self, now_ms: f64) -> f64 {
        let deadline = now_ms + self.interval_ms;
        self.deadline = Some(deadline);
        deadline
    }

    /// Checks the slot at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> DebouncePoll {
        match self.deadline {
            None => DebouncePoll::Idle,
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                DebouncePoll::Ready
            }
            Some(deadline) => DebouncePoll::Pending {
                remaining_ms: deadline - now_ms,
            },
        }
    }

    /// Drops any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` while a deadline is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_triggered() {
        let mut d = Debounce::new(120.0);
        assert_eq!(d.poll(0.0), DebouncePoll::Idle);
        assert!(!d.is_pending());
    }

    #[test]
    fn burst_collapses_to_last_event() {
        let mut d = Debounce::new(120.0);
        for i in 0..10 {
            d.trigger(f64::from(i) * 5.0);
        }
        // Last event at 45ms: a wake-up scheduled by the first event is early.
        assert_eq!(
            d.poll(120.0),
            DebouncePoll::Pending {
                remaining_ms: 45.0
            },
            "deadline follows the last trigger"
        );
        assert_eq!(d.poll(165.0), DebouncePoll::Ready);
        assert_eq!(d.poll(400.0), DebouncePoll::Idle, "ready clears the slot");
    }

    #[test]
    fn cancel_clears_pending() {
        let mut d = Debounce::new(120.0);
        d.trigger(10.0);
        d.cancel();
        assert_eq!(d.poll(1_000.0), DebouncePoll::Idle);
    }
}
