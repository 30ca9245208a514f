#![forbid(unsafe_code)]

//! One spy plus its host, clock, and event queue.
//!
//! [`WebSession::step`] is the host's frame callback: advance time, move any
//! in-flight scroll animation, deliver queued events, then fire throttled
//! trailing samples that came due.

use core::fmt;
use std::time::Duration;

use spy_core::event::{ClickTarget, HostEvent};
use spy_runtime::{
    DispatchError, DispatchOutcome, EventOutcome, Invocation, ScrollSpy, SpyConfig, SpyId,
    Transition,
};
use tracing::warn;

use crate::document::Document;
use crate::host::WebHost;
use crate::selector::SelectorError;
use crate::{DeterministicClock, WebEventSource};

/// Failures on the session's string-keyed surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Selector(SelectorError),
    Dispatch(DispatchError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(err) => write!(f, "selector error: {err}"),
            Self::Dispatch(err) => write!(f, "dispatch error: {err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Selector(err) => Some(err),
            Self::Dispatch(err) => Some(err),
        }
    }
}

impl From<SelectorError> for SessionError {
    fn from(err: SelectorError) -> Self {
        Self::Selector(err)
    }
}

impl From<DispatchError> for SessionError {
    fn from(err: DispatchError) -> Self {
        Self::Dispatch(err)
    }
}

/// What one [`WebSession::step`] did.
#[derive(Debug, Default)]
pub struct StepReport {
    /// Outcome for each delivered event, in queue order.
    pub events: Vec<EventOutcome>,
    /// Transitions from a trailing sample, if one fired.
    pub trailing: Option<Vec<Transition>>,
}

impl StepReport {
    /// Every transition produced during the step, in order.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.events
            .iter()
            .filter_map(|outcome| match outcome {
                EventOutcome::Sampled(t) => Some(t.as_slice()),
                _ => None,
            })
            .chain(self.trailing.as_deref())
            .flatten()
            .copied()
    }
}

/// Deterministic, host-driven scroll-spy session.
#[derive(Debug)]
pub struct WebSession {
    spy: ScrollSpy<WebHost>,
    clock: DeterministicClock,
    events: WebEventSource,
}

impl WebSession {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            spy: ScrollSpy::new(WebHost::new(document)),
            clock: DeterministicClock::new(),
            events: WebEventSource::new(),
        }
    }

    pub fn spy(&self) -> &ScrollSpy<WebHost> {
        &self.spy
    }

    pub fn spy_mut(&mut self) -> &mut ScrollSpy<WebHost> {
        &mut self.spy
    }

    pub fn host(&self) -> &WebHost {
        self.spy.host()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn events_mut(&mut self) -> &mut WebEventSource {
        &mut self.events
    }

    /// Register every element matching `selector`.
    pub fn init(&mut self, selector: &str, config: &SpyConfig) -> Result<Vec<SpyId>, SelectorError> {
        let targets = self.spy.host().select(selector)?;
        Ok(self.spy.init_all(targets, config))
    }

    /// String-keyed entry point: `None` initializes with defaults.
    pub fn invoke(
        &mut self,
        selector: &str,
        method: Option<&str>,
    ) -> Result<DispatchOutcome, SessionError> {
        let invocation = Invocation::parse(method)?;
        let targets = self.spy.host().select(selector)?;
        Ok(self.spy.dispatch(targets, invocation))
    }

    /// Move the window and queue a scroll event.
    pub fn scroll_to(&mut self, top: f64) {
        self.spy.host().document_mut().scroll_to(top);
        self.events.push_event(HostEvent::Scroll);
    }

    /// Resize the window and queue a resize event.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.spy.host().document_mut().resize(width, height);
        self.events.push_event(HostEvent::Resize { width, height });
    }

    /// Queue a document click.
    pub fn click(&mut self, target: ClickTarget) {
        self.events.push_event(HostEvent::Click(target));
    }

    /// Advance time by `dt` and process everything that became due.
    pub fn step(&mut self, dt: Duration) -> StepReport {
        self.clock.advance(dt);
        let now = self.clock.now();

        if self.spy.host_mut().tick_scroll(dt) {
            self.events.push_event(HostEvent::Scroll);
        }

        let mut report = StepReport::default();
        for event in self.events.drain_events() {
            report.events.push(self.spy.handle_event(&event, now));
        }
        report.trailing = self.spy.poll(now);
        report
    }

    /// Step in `frame` increments until nothing is animating or pending.
    ///
    /// A zero `frame` never advances the clock, so it steps nothing and
    /// returns an empty list.
    pub fn settle(&mut self, frame: Duration) -> Vec<Transition> {
        if frame.is_zero() {
            warn!("settle called with a zero frame; nothing stepped");
            return Vec::new();
        }
        let mut transitions = Vec::new();
        loop {
            let report = self.step(frame);
            transitions.extend(report.transitions());
            if self.spy.host().scroll_target().is_none()
                && self.events.is_empty()
                && self.spy.next_deadline().is_none()
            {
                return transitions;
            }
        }
    }
}
