#![forbid(unsafe_code)]

//! Visibility state machine.
//!
//! Each section is either `NotInView` or `InView { tick }`. Every sample
//! bumps a global tick and diffs the new hit set against the previous one:
//!
//! ```text
//!            hit, was NotInView           hit again
//!   NotInView ─────────────────▶ InView ◀──────────┐
//!       ▲        (emit Enter)        │   (tick = now)┘
//!       └────────────────────────────┘
//!        in previous hits, stale tick (emit Exit)
//! ```
//!
//! Enters are emitted in hit order, then exits in previous-hit order.
//!
//! # Invariants
//!
//! - After [`VisibilityTracker::advance`], a section is `InView` iff it is in
//!   the hit set just passed in.
//! - Per section, `Enter` and `Exit` strictly alternate, starting with `Enter`.

use crate::registry::{Registry, SpyId, VisibilityState};
use crate::target::SpyTarget;

/// A visibility change produced by one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Enter(SpyId),
    Exit(SpyId),
}

impl Transition {
    /// Section the transition applies to.
    #[must_use]
    pub const fn id(self) -> SpyId {
        match self {
            Self::Enter(id) | Self::Exit(id) => id,
        }
    }
}

/// Tick counter plus the previous hit set.
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    tick: u64,
    previous: Vec<SpyId>,
}

impl VisibilityTracker {
    /// Create a tracker at tick 0 with no previous hits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of samples taken.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Hit set of the most recent sample.
    pub fn previous_hits(&self) -> &[SpyId] {
        &self.previous
    }

    /// Apply one sample's hit set and return the resulting transitions.
    pub fn advance<T: SpyTarget>(
        &mut self,
        registry: &mut Registry<T>,
        hits: Vec<SpyId>,
    ) -> Vec<Transition> {
        self.tick += 1;
        let tick = self.tick;
        let mut transitions = Vec::new();

        for &id in &hits {
            let Some(section) = registry.get_mut(id) else {
                continue;
            };
            if !section.state.is_in_view() {
                transitions.push(Transition::Enter(id));
            }
            section.state = VisibilityState::InView { tick };
        }

        for &id in &self.previous {
            let Some(section) = registry.get_mut(id) else {
                continue;
            };
            if let VisibilityState::InView { tick: last } = section.state
                && last != tick
            {
                transitions.push(Transition::Exit(id));
                section.state = VisibilityState::NotInView;
            }
        }

        self.previous = hits;
        transitions
    }

    /// Drop a destroyed section from the previous hit set.
    pub fn forget(&mut self, id: SpyId) {
        self.previous.retain(|&p| p != id);
    }

    /// Return to tick 0 with no previous hits.
    pub fn reset(&mut self) {
        self.tick = 0;
        self.previous.clear();
    }
}
