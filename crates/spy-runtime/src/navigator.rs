#![forbid(unsafe_code)]

//! Click navigation to registered sections.

use std::time::Duration;

use spy_core::animation::{ScrollRequest, ease_out_cubic};
use spy_core::event::ClickTarget;

use crate::registry::{Registry, SpyId};
use crate::target::SpyTarget;

/// Duration of the scroll animation started by a navigation click.
pub const NAVIGATION_DURATION: Duration = Duration::from_millis(400);

/// What a document click resolved to.
#[derive(Debug, Clone, Copy)]
pub struct Navigation {
    /// Section the click navigates to.
    pub section: SpyId,
    /// Scroll animation to hand to the host.
    pub request: ScrollRequest,
}

/// Resolve a click against the registry.
///
/// Sections are checked from most recently registered to oldest; the first
/// whose anchor `a[href="#<id>"]` matches the click target wins. The scroll
/// target lands one pixel inside the section, minus its scroll offset.
pub fn resolve_click<T: SpyTarget>(registry: &Registry<T>, click: &ClickTarget) -> Option<Navigation> {
    registry
        .iter()
        .rev()
        .find(|section| click.is_anchor_to(&section.target().anchor_id()))
        .map(|section| {
            let top = section.target().rect().top() + 1.0;
            Navigation {
                section: section.id(),
                request: ScrollRequest::new(top - section.config().scroll_offset, NAVIGATION_DURATION)
                    .easing(ease_out_cubic),
            }
        })
}
