#![forbid(unsafe_code)]

//! Leading-edge throttle with a trailing catch-up call.
//!
//! Scroll and resize events can arrive far faster than a viewport sample is
//! worth running. [`Throttle`] bounds the rate:
//!
//! - The first call after a quiet period fires immediately (leading edge).
//! - Calls inside the interval are absorbed; one trailing call is armed.
//! - The trailing call fires from [`Throttle::poll`] once the interval has
//!   elapsed since the last fire.
//!
//! Time is supplied by the caller as a monotonic [`Duration`] since some
//! fixed origin, so the throttle is deterministic under a host clock.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use spy_core::throttle::Throttle;
//!
//! let mut throttle = Throttle::new(Duration::from_millis(100));
//!
//! assert!(throttle.call(Duration::from_millis(0)));   // leading edge
//! assert!(!throttle.call(Duration::from_millis(40))); // absorbed, trailing armed
//! assert!(!throttle.poll(Duration::from_millis(90))); // not yet
//! assert!(throttle.poll(Duration::from_millis(100))); // trailing fires
//! ```
//!
//! # Invariants
//!
//! - Two fires are never closer than `interval` apart.
//! - A burst of calls never loses its last call: a trailing fire follows.

use std::time::Duration;

/// Rate limiter for host-driven handlers.
///
/// Not thread-safe; drive it from the single event loop that owns it.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_fire: Option<Duration>,
    pending: bool,
    absorbed: u64,
}

impl Throttle {
    /// Create a throttle that fires at most once per `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
            pending: false,
            absorbed: 0,
        }
    }

    /// Minimum spacing between fires.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Attempt a call at `now`.
    ///
    /// Returns `true` if the handler should run immediately. Otherwise the
    /// call is absorbed and a trailing fire is armed.
    pub fn call(&mut self, now: Duration) -> bool {
        if self.ready(now) {
            self.fire(now);
            return true;
        }
        self.pending = true;
        self.absorbed = self.absorbed.saturating_add(1);
        crate::trace!(
            absorbed = self.absorbed,
            interval_ms = self.interval.as_millis() as u64,
            "throttle absorbed call"
        );
        false
    }

    /// Fire the armed trailing call if its interval has elapsed.
    pub fn poll(&mut self, now: Duration) -> bool {
        if self.pending && self.ready(now) {
            self.fire(now);
            return true;
        }
        false
    }

    /// Whether a trailing call is armed.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending
    }

    /// When the armed trailing call becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        if !self.pending {
            return None;
        }
        self.last_fire
            .map(|last| last.saturating_add(self.interval))
    }

    /// Total calls absorbed since creation or the last reset.
    #[must_use]
    pub const fn absorbed(&self) -> u64 {
        self.absorbed
    }

    /// Forget all history and drop any armed trailing call.
    pub fn reset(&mut self) {
        self.last_fire = None;
        self.pending = false;
        self.absorbed = 0;
    }

    fn ready(&self, now: Duration) -> bool {
        match self.last_fire {
            None => true,
            // A clock that went backwards counts as "not yet".
            Some(last) => now
                .checked_sub(last)
                .is_some_and(|elapsed| elapsed >= self.interval),
        }
    }

    fn fire(&mut self, now: Duration) {
        self.last_fire = Some(now);
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_call_fires() {
        let mut throttle = Throttle::new(ms(100));
        assert!(throttle.call(ms(0)));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn calls_inside_interval_are_absorbed() {
        let mut throttle = Throttle::new(ms(100));
        assert!(throttle.call(ms(0)));
        assert!(!throttle.call(ms(10)));
        assert!(!throttle.call(ms(99)));
        assert!(throttle.has_pending());
        assert_eq!(throttle.absorbed(), 2);
        assert_eq!(throttle.deadline(), Some(ms(100)));
    }

    #[test]
    fn call_after_interval_fires_and_clears_pending() {
        let mut throttle = Throttle::new(ms(100));
        throttle.call(ms(0));
        throttle.call(ms(50));
        assert!(throttle.call(ms(150)));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn trailing_fires_once() {
        let mut throttle = Throttle::new(ms(100));
        throttle.call(ms(0));
        throttle.call(ms(30));
        assert!(!throttle.poll(ms(60)));
        assert!(throttle.poll(ms(100)));
        assert!(!throttle.poll(ms(300)));
    }

    #[test]
    fn trailing_fire_restarts_interval() {
        let mut throttle = Throttle::new(ms(100));
        throttle.call(ms(0));
        throttle.call(ms(30));
        assert!(throttle.poll(ms(120)));
        assert!(!throttle.call(ms(150)));
        assert_eq!(throttle.deadline(), Some(ms(220)));
    }

    #[test]
    fn poll_without_pending_is_noop() {
        let mut throttle = Throttle::new(ms(100));
        assert!(!throttle.poll(ms(0)));
        throttle.call(ms(0));
        assert!(!throttle.poll(ms(500)));
    }

    #[test]
    fn clock_going_backwards_does_not_fire() {
        let mut throttle = Throttle::new(ms(100));
        throttle.call(ms(500));
        assert!(!throttle.call(ms(400)));
    }

    #[test]
    fn zero_interval_always_fires() {
        let mut throttle = Throttle::new(Duration::ZERO);
        assert!(throttle.call(ms(0)));
        assert!(throttle.call(ms(0)));
        assert_eq!(throttle.absorbed(), 0);
    }

    #[test]
    fn reset_forgets_history() {
        let mut throttle = Throttle::new(ms(100));
        throttle.call(ms(0));
        throttle.call(ms(10));
        throttle.reset();
        assert!(!throttle.has_pending());
        assert!(throttle.call(ms(20)));
    }
}
