#![forbid(unsafe_code)]

//! Section registry.
//!
//! Holds live sections in registration order and hands out ids.
//!
//! # Invariants
//!
//! - Ids are strictly increasing over the registry's lifetime and never reused,
//!   even after the section holding one is removed.
//! - Iteration order is registration order.
//! - [`ListenerChange::Attach`] is reported only on the empty → one transition,
//!   [`ListenerChange::Detach`] only on one → empty.

use std::fmt;

use crate::config::SpyConfig;
use crate::target::{ElementHandle, SpyTarget};

/// Identifier assigned to a section at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpyId(u64);

impl SpyId {
    /// Raw numeric id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SpyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spy#{}", self.0)
    }
}

/// Per-section visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    /// Not in the most recent hit set.
    #[default]
    NotInView,
    /// In the hit set of sample `tick`.
    InView { tick: u64 },
}

impl VisibilityState {
    /// Whether the section is in view.
    #[must_use]
    pub const fn is_in_view(self) -> bool {
        matches!(self, Self::InView { .. })
    }

    /// Tick of the last sample that hit this section, if in view.
    #[must_use]
    pub const fn tick(self) -> Option<u64> {
        match self {
            Self::InView { tick } => Some(tick),
            Self::NotInView => None,
        }
    }
}

/// One registered section.
#[derive(Debug)]
pub struct Section<T> {
    id: SpyId,
    target: T,
    config: SpyConfig,
    pub(crate) state: VisibilityState,
}

impl<T: SpyTarget> Section<T> {
    /// Id assigned at registration.
    pub fn id(&self) -> SpyId {
        self.id
    }

    /// Backing element.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Options this section was registered with.
    pub fn config(&self) -> &SpyConfig {
        &self.config
    }

    /// Current visibility.
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Identity of the backing element.
    pub fn handle(&self) -> ElementHandle {
        self.target.handle()
    }

    /// Navigation selector for this section, resolved with its own config.
    ///
    /// `None` when the element has no anchor id; such sections never mark a link.
    pub fn active_selector(&self) -> Option<String> {
        let anchor = self.target.anchor_id();
        (!anchor.is_empty()).then(|| self.config.selector_for(&anchor))
    }
}

/// Whether shared listeners must change after a registry mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerChange {
    Attach,
    Detach,
    Unchanged,
}

/// Ordered set of live sections.
#[derive(Debug)]
pub struct Registry<T> {
    sections: Vec<Section<T>>,
    last_id: u64,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T: SpyTarget> Registry<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section and assign it the next id.
    pub fn register(&mut self, target: T, config: SpyConfig) -> (SpyId, ListenerChange) {
        self.last_id += 1;
        let id = SpyId(self.last_id);
        self.sections.push(Section {
            id,
            target,
            config,
            state: VisibilityState::NotInView,
        });
        let change = if self.sections.len() == 1 {
            ListenerChange::Attach
        } else {
            ListenerChange::Unchanged
        };
        (id, change)
    }

    /// Remove a section. Returns `None` if `id` is not live.
    pub fn unregister(&mut self, id: SpyId) -> Option<(Section<T>, ListenerChange)> {
        let index = self.sections.iter().position(|s| s.id == id)?;
        let section = self.sections.remove(index);
        let change = if self.sections.is_empty() {
            ListenerChange::Detach
        } else {
            ListenerChange::Unchanged
        };
        Some((section, change))
    }

    /// Live section bound to `handle`, if any.
    pub fn find_by_handle(&self, handle: ElementHandle) -> Option<SpyId> {
        self.sections
            .iter()
            .find(|s| s.handle() == handle)
            .map(|s| s.id)
    }

    /// Look up a live section.
    pub fn get(&self, id: SpyId) -> Option<&Section<T>> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: SpyId) -> Option<&mut Section<T>> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Sections in registration order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Section<T>> {
        self.sections.iter()
    }

    /// Number of live sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether no section is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Highest id issued so far (0 if none).
    #[must_use]
    pub fn last_issued(&self) -> u64 {
        self.last_id
    }

    /// Drop all sections and restart ids from 1.
    pub fn clear(&mut self) {
        self.sections.clear();
        self.last_id = 0;
    }
}
