#![forbid(unsafe_code)]

//! `spy-web` is a host-driven document backend for scrollspy.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment pushes scroll, resize, and
//!   click events and mirrors page geometry into a [`Document`].
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: everything runs inside [`WebSession::step`].
//!
//! The crate does not bind to `wasm-bindgen`. It provides the pieces a
//! browser binding would wrap, and a synthetic page for tests.

pub mod document;
pub mod host;
pub mod selector;
pub mod session;

use core::time::Duration;
use std::collections::VecDeque;

use spy_core::event::HostEvent;

pub use document::{Document, Element, ElementSpec};
pub use host::{ListenerStats, WebElement, WebHost};
pub use selector::{Selector, SelectorError};
pub use session::{SessionError, StepReport, WebSession};

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

/// Host-driven event queue.
#[derive(Debug, Clone, Default)]
pub struct WebEventSource {
    queue: VecDeque<HostEvent>,
}

impl WebEventSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event into the queue.
    pub fn push_event(&mut self, event: HostEvent) {
        self.queue.push_back(event);
    }

    /// Drain all pending events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = HostEvent> + '_ {
        self.queue.drain(..)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
