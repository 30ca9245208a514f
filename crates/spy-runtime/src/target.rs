#![forbid(unsafe_code)]

//! Capabilities the spy needs from its environment.
//!
//! The spy never touches a rendering surface directly. A host supplies:
//!
//! - [`SpyTarget`]: per-element geometry and identity for a registered section.
//! - [`SpyHost`]: document scroll state, class toggling on selector results,
//!   scroll animation requests, and shared listener attachment.
//!
//! Both are infallible by contract; the spy defines no retry policy for them.

use spy_core::animation::ScrollRequest;
use spy_core::geometry::{Rect, Size};

/// Opaque identity of a host element.
///
/// Two targets with the same handle refer to the same element; registering
/// a second section on an already-bound handle replaces the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u64);

/// A scrollable section element the spy can observe.
pub trait SpyTarget {
    /// Stable identity of the backing element.
    fn handle(&self) -> ElementHandle;

    /// The element's `id` attribute; navigation links reference `#<anchor_id>`.
    fn anchor_id(&self) -> String;

    /// Current rectangle in document coordinates.
    fn rect(&self) -> Rect;

    /// Current rendered height. Zero for hidden or collapsed elements.
    fn rendered_height(&self) -> f64 {
        self.rect().height
    }
}

/// The document and window the spy runs in.
pub trait SpyHost {
    /// Element type handed to the spy at registration.
    type Target: SpyTarget;

    /// Document scroll offsets as `(left, top)`.
    fn scroll_position(&self) -> (f64, f64);

    /// Window inner size.
    fn inner_size(&self) -> Size;

    /// Add `class` to every element matching `selector`.
    fn add_class(&mut self, selector: &str, class: &str);

    /// Remove `class` from every element matching `selector`.
    fn remove_class(&mut self, selector: &str, class: &str);

    /// Start a smooth scroll. Fire-and-forget.
    fn animate_scroll(&mut self, request: ScrollRequest);

    /// Attach the shared scroll, resize, and document-click listeners.
    fn attach_listeners(&mut self);

    /// Detach the shared listeners.
    fn detach_listeners(&mut self);
}
