#![forbid(unsafe_code)]

//! Active-set controller.
//!
//! Keeps the ordered list of visible sections and moves the active marker so
//! that only the head's navigation element carries it.
//!
//! # Ordering
//!
//! On enter, the new section is compared against the current head only: a
//! smaller id goes to the front, anything else to the back. Entries behind
//! the head are therefore not globally sorted. This is the observed
//! behavior and is kept as-is.
//!
//! # Selectors
//!
//! Class name and selector mapping come from the transitioning section's
//! config, including when resolving the head's selector.
//!
//! # Invariants
//!
//! - No id appears twice in the visible list.
//! - After every operation at most one selector carries the marker, and it
//!   belongs to the head (none when the list is empty).

use tracing::debug;

use crate::registry::{Registry, SpyId};
use crate::target::{SpyHost, SpyTarget};

/// Ordered visible sections; the head is active.
#[derive(Debug, Clone, Default)]
pub struct ActiveSet {
    visible: Vec<SpyId>,
}

impl ActiveSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible sections, head first.
    pub fn visible(&self) -> &[SpyId] {
        &self.visible
    }

    /// The section carrying the active marker.
    #[must_use]
    pub fn head(&self) -> Option<SpyId> {
        self.visible.first().copied()
    }

    /// Section `id` entered the viewport.
    pub fn enter<H: SpyHost>(&mut self, id: SpyId, registry: &Registry<H::Target>, host: &mut H) {
        let Some(section) = registry.get(id) else {
            return;
        };
        let config = section.config();
        self.prune(registry);
        self.visible.retain(|&v| v != id);

        match self.head() {
            Some(head) => {
                if let Some(selector) = head_selector(registry, head, |a| config.selector_for(a)) {
                    host.remove_class(&selector, &config.active_class);
                }
                if id < head {
                    self.visible.insert(0, id);
                } else {
                    self.visible.push(id);
                }
            }
            None => self.visible.push(id),
        }

        if let Some(head) = self.head()
            && let Some(selector) = head_selector(registry, head, |a| config.selector_for(a))
        {
            debug!(entered = %id, head = %head, selector = %selector, "active marker applied");
            host.add_class(&selector, &config.active_class);
        }
    }

    /// Section `id` left the viewport.
    pub fn exit<H: SpyHost>(&mut self, id: SpyId, registry: &Registry<H::Target>, host: &mut H) {
        let Some(section) = registry.get(id) else {
            self.visible.retain(|&v| v != id);
            return;
        };
        let config = section.config();
        self.prune(registry);

        let Some(head) = self.head() else {
            return;
        };
        if let Some(selector) = head_selector(registry, head, |a| config.selector_for(a)) {
            host.remove_class(&selector, &config.active_class);
        }
        self.visible.retain(|&v| v != id);

        match self.head() {
            Some(head) => {
                if let Some(selector) = head_selector(registry, head, |a| config.selector_for(a)) {
                    debug!(exited = %id, head = %head, selector = %selector, "active marker moved");
                    host.add_class(&selector, &config.active_class);
                }
            }
            None => debug!(exited = %id, "no visible sections remain"),
        }
    }

    /// Drop `id` ahead of its destruction, moving the marker if it was the head.
    ///
    /// Must be called while `id` is still registered.
    pub fn forget<H: SpyHost>(&mut self, id: SpyId, registry: &Registry<H::Target>, host: &mut H) {
        if self.head() == Some(id) {
            self.exit(id, registry, host);
        } else {
            self.visible.retain(|&v| v != id);
        }
    }

    /// Forget every entry without touching markers.
    pub fn clear(&mut self) {
        self.visible.clear();
    }

    /// Drop entries that collapsed to zero height or are no longer registered.
    fn prune<T: SpyTarget>(&mut self, registry: &Registry<T>) {
        self.visible.retain(|&v| {
            registry
                .get(v)
                .is_some_and(|s| s.target().rendered_height() > 0.0)
        });
    }
}

fn head_selector<T: SpyTarget>(
    registry: &Registry<T>,
    head: SpyId,
    resolve: impl Fn(&str) -> String,
) -> Option<String> {
    let anchor = registry.get(head)?.target().anchor_id();
    (!anchor.is_empty()).then(|| resolve(&anchor))
}
