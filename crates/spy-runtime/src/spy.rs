#![forbid(unsafe_code)]

//! The scroll-spy service.
//!
//! [`ScrollSpy`] owns everything that would otherwise be process-global: the
//! section registry, the tick counter and previous hit set, the visible list,
//! and the shared listener state. Create one per document and drive it from
//! the host's event loop.
//!
//! # Data flow
//!
//! ```text
//! HostEvent ─▶ Throttle ─▶ viewport::sample ─▶ detector::find_hits
//!                                                    │
//!        ActiveSet::{enter,exit} ◀── Transition ◀── VisibilityTracker::advance
//! ```
//!
//! # Listener lifecycle
//!
//! Listeners attach when the first section registers and detach when the
//! last one is destroyed. The scroll throttle interval is taken from the
//! section whose registration attached them. Events delivered while detached
//! are ignored.

use std::fmt;
use std::time::Duration;

use spy_core::event::HostEvent;
use spy_core::throttle::Throttle;
use tracing::{debug, trace};

use crate::active_set::ActiveSet;
use crate::config::SpyConfig;
use crate::detector::find_hits;
use crate::dispatch::{DispatchError, DispatchOutcome, Invocation, Method};
use crate::navigator::{Navigation, resolve_click};
use crate::registry::{ListenerChange, Registry, Section, SpyId};
use crate::target::{ElementHandle, SpyHost, SpyTarget};
use crate::tracker::{Transition, VisibilityTracker};
use crate::viewport;

/// Fixed throttle for resize-driven samples.
pub const RESIZE_THROTTLE: Duration = Duration::from_millis(200);

/// What handling one host event did.
#[derive(Debug, Clone)]
pub enum EventOutcome {
    /// No listeners are attached.
    Ignored,
    /// A sample ran, producing these transitions.
    Sampled(Vec<Transition>),
    /// The sample was deferred by the throttle.
    Throttled,
    /// A click matched a section: default navigation is suppressed and a
    /// scroll animation was requested.
    Navigated(Navigation),
    /// A click matched nothing.
    Unhandled,
}

impl EventOutcome {
    /// Whether the host must suppress the event's default action.
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::Navigated(_))
    }
}

/// Scroll-position tracker for one document.
pub struct ScrollSpy<H: SpyHost> {
    host: H,
    registry: Registry<H::Target>,
    tracker: VisibilityTracker,
    active: ActiveSet,
    scroll_throttle: Throttle,
    resize_throttle: Throttle,
    listening: bool,
}

impl<H: SpyHost + fmt::Debug> fmt::Debug for ScrollSpy<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSpy")
            .field("host", &self.host)
            .field("sections", &self.registry.len())
            .field("tick", &self.tracker.tick())
            .field("visible", &self.active.visible())
            .field("listening", &self.listening)
            .finish()
    }
}

impl<H: SpyHost> ScrollSpy<H> {
    /// Create a spy with no sections over `host`.
    pub fn new(host: H) -> Self {
        Self {
            host,
            registry: Registry::new(),
            tracker: VisibilityTracker::new(),
            active: ActiveSet::new(),
            scroll_throttle: Throttle::new(SpyConfig::default().throttle),
            resize_throttle: Throttle::new(RESIZE_THROTTLE),
            listening: false,
        }
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to move its scroll position.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the spy and return its host.
    pub fn into_host(self) -> H {
        self.host
    }

    // ── Registration ────────────────────────────────────────────────────

    /// Register `target` and sample immediately.
    ///
    /// A section already bound to the same element is destroyed first.
    pub fn create(&mut self, target: H::Target, config: SpyConfig) -> SpyId {
        if let Some(existing) = self.registry.find_by_handle(target.handle()) {
            debug!(existing = %existing, "re-registering element; tearing down previous section");
            self.destroy(existing);
        }

        let throttle = config.throttle;
        let (id, change) = self.registry.register(target, config);
        if change == ListenerChange::Attach {
            self.scroll_throttle = Throttle::new(throttle);
            self.resize_throttle.reset();
            self.host.attach_listeners();
            self.listening = true;
            debug!(throttle_ms = throttle.as_millis() as u64, "listeners attached");
        }
        debug!(id = %id, live = self.registry.len(), "section registered");

        self.sample();
        id
    }

    /// Register every target with one shared configuration.
    pub fn init_all<I>(&mut self, targets: I, config: &SpyConfig) -> Vec<SpyId>
    where
        I: IntoIterator<Item = H::Target>,
    {
        targets
            .into_iter()
            .map(|target| self.create(target, config.clone()))
            .collect()
    }

    /// Tear down a section. Returns `false` if `id` was not live.
    pub fn destroy(&mut self, id: SpyId) -> bool {
        if self.registry.get(id).is_none() {
            return false;
        }
        self.active.forget(id, &self.registry, &mut self.host);
        self.tracker.forget(id);

        let Some((_, change)) = self.registry.unregister(id) else {
            return false;
        };
        debug!(id = %id, live = self.registry.len(), "section destroyed");

        if change == ListenerChange::Detach {
            self.detach();
        }
        true
    }

    /// Section bound to `handle`, if any.
    pub fn instance(&self, handle: ElementHandle) -> Option<SpyId> {
        self.registry.find_by_handle(handle)
    }

    /// Drop every section and return to the freshly constructed state.
    ///
    /// The active marker is removed from the current head; ids restart at 1.
    pub fn reset(&mut self) {
        if let Some(head) = self.active.head()
            && let Some(section) = self.registry.get(head)
            && let Some(selector) = section.active_selector()
        {
            self.host
                .remove_class(&selector, &section.config().active_class);
        }
        if self.listening {
            self.detach();
        }
        self.registry.clear();
        self.tracker.reset();
        self.active.clear();
        self.scroll_throttle = Throttle::new(SpyConfig::default().throttle);
    }

    fn detach(&mut self) {
        self.host.detach_listeners();
        self.listening = false;
        self.scroll_throttle.reset();
        self.resize_throttle.reset();
        debug!("listeners detached");
    }

    // ── Sampling ────────────────────────────────────────────────────────

    /// Take one viewport sample and apply its transitions.
    pub fn sample(&mut self) -> Vec<Transition> {
        let vp = viewport::sample(&self.host);
        let hits = find_hits(&self.registry, &vp);
        let hit_count = hits.len();
        let transitions = self.tracker.advance(&mut self.registry, hits);
        trace!(
            tick = self.tracker.tick(),
            hits = hit_count,
            transitions = transitions.len(),
            "viewport sampled"
        );

        for &transition in &transitions {
            match transition {
                Transition::Enter(id) => self.active.enter(id, &self.registry, &mut self.host),
                Transition::Exit(id) => self.active.exit(id, &self.registry, &mut self.host),
            }
        }
        transitions
    }

    /// Handle a host event at monotonic time `now`.
    pub fn handle_event(&mut self, event: &HostEvent, now: Duration) -> EventOutcome {
        if !self.listening {
            return EventOutcome::Ignored;
        }
        match event {
            HostEvent::Scroll => {
                if self.scroll_throttle.call(now) {
                    EventOutcome::Sampled(self.sample())
                } else {
                    EventOutcome::Throttled
                }
            }
            HostEvent::Resize { .. } => {
                if self.resize_throttle.call(now) {
                    EventOutcome::Sampled(self.sample())
                } else {
                    EventOutcome::Throttled
                }
            }
            HostEvent::Click(click) => match resolve_click(&self.registry, click) {
                Some(navigation) => {
                    debug!(
                        section = %navigation.section,
                        scroll_to = navigation.request.target,
                        "navigation click"
                    );
                    self.host.animate_scroll(navigation.request);
                    EventOutcome::Navigated(navigation)
                }
                None => EventOutcome::Unhandled,
            },
        }
    }

    /// Fire throttled trailing samples that have come due.
    ///
    /// Scroll and resize trailing calls due at the same time share a sample.
    pub fn poll(&mut self, now: Duration) -> Option<Vec<Transition>> {
        if !self.listening {
            return None;
        }
        let scroll_due = self.scroll_throttle.poll(now);
        let resize_due = self.resize_throttle.poll(now);
        (scroll_due || resize_due).then(|| self.sample())
    }

    /// Earliest time a trailing sample is due, if any is armed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        match (
            self.scroll_throttle.deadline(),
            self.resize_throttle.deadline(),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ── Dispatch ────────────────────────────────────────────────────────

    /// Run a typed invocation over a collection of targets.
    pub fn dispatch(&mut self, targets: Vec<H::Target>, invocation: Invocation) -> DispatchOutcome {
        match invocation {
            Invocation::Init(config) => DispatchOutcome::Initialized(self.init_all(targets, &config)),
            Invocation::Call(Method::GetInstance) => DispatchOutcome::Instance(
                targets.first().and_then(|t| self.instance(t.handle())),
            ),
            Invocation::Call(Method::Destroy) => {
                let ids: Vec<SpyId> = targets
                    .iter()
                    .filter_map(|t| self.instance(t.handle()))
                    .collect();
                let applied = ids.into_iter().filter(|&id| self.destroy(id)).count();
                DispatchOutcome::Applied(applied)
            }
        }
    }

    /// Parse a method name and dispatch it; `None` initializes with defaults.
    pub fn dispatch_named(
        &mut self,
        targets: Vec<H::Target>,
        method: Option<&str>,
    ) -> Result<DispatchOutcome, DispatchError> {
        let invocation = Invocation::parse(method)?;
        Ok(self.dispatch(targets, invocation))
    }

    // ── Introspection ───────────────────────────────────────────────────

    /// Samples taken so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tracker.tick()
    }

    /// Visible sections, head first.
    pub fn visible(&self) -> &[SpyId] {
        self.active.visible()
    }

    /// Section currently carrying the active marker.
    #[must_use]
    pub fn active(&self) -> Option<SpyId> {
        self.active.head()
    }

    /// Look up a live section.
    pub fn section(&self, id: SpyId) -> Option<&Section<H::Target>> {
        self.registry.get(id)
    }

    /// Live sections in registration order.
    pub fn sections(&self) -> impl DoubleEndedIterator<Item = &Section<H::Target>> {
        self.registry.iter()
    }

    /// Hit set of the most recent sample.
    pub fn previous_hits(&self) -> &[SpyId] {
        self.tracker.previous_hits()
    }

    /// Whether the shared listeners are attached.
    #[must_use]
    pub fn listeners_attached(&self) -> bool {
        self.listening
    }
}
