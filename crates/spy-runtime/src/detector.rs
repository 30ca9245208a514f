#![forbid(unsafe_code)]

//! Intersection detection.
//!
//! A section is a hit when its rectangle overlaps the viewport after the
//! viewport's top edge is pushed down by that section's `scroll_offset`.
//! Only the top edge moves, so a section is dropped once its bottom scrolls
//! above `scroll_top + scroll_offset`, while sections entering from below are
//! picked up as soon as they touch the real bottom edge.
//!
//! Sections with a rendered height of zero are never hits.

use spy_core::geometry::ViewportRect;

use crate::registry::{Registry, SpyId};
use crate::target::SpyTarget;

/// Ids of sections intersecting `viewport`, in registration order.
pub fn find_hits<T: SpyTarget>(registry: &Registry<T>, viewport: &ViewportRect) -> Vec<SpyId> {
    registry
        .iter()
        .filter(|section| section.target().rendered_height() > 0.0)
        .filter(|section| {
            viewport
                .with_top_offset(section.config().scroll_offset)
                .overlaps(&section.target().rect())
        })
        .map(|section| section.id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpyConfig;
    use crate::testing::FakeTarget;
    use spy_core::geometry::Size;

    fn viewport(top: f64) -> ViewportRect {
        ViewportRect::from_scroll(0.0, top, Size::new(1000.0, 600.0))
    }

    fn stacked() -> (Registry<FakeTarget>, SpyId, SpyId) {
        let mut registry = Registry::new();
        let (a, _) = registry.register(FakeTarget::new(1, "a", 0.0, 500.0), SpyConfig::default());
        let (b, _) = registry.register(FakeTarget::new(2, "b", 500.0, 500.0), SpyConfig::default());
        (registry, a, b)
    }

    #[test]
    fn top_of_page_hits_first_section() {
        let (registry, a, b) = stacked();
        // Offset top = 200: A (0..500) overlaps, B (500..1000) overlaps the real bottom 600.
        assert_eq!(find_hits(&registry, &viewport(0.0)), vec![a, b]);
    }

    #[test]
    fn offset_drops_section_scrolled_past() {
        let (registry, _, b) = stacked();
        // Offset top = 350 + 200 = 550, past A's bottom at 500.
        assert_eq!(find_hits(&registry, &viewport(350.0)), vec![b]);
    }

    #[test]
    fn bottom_edge_is_not_offset() {
        let mut registry = Registry::new();
        let (a, _) = registry.register(FakeTarget::new(1, "a", 600.0, 100.0), SpyConfig::default());
        // Touches the unadjusted bottom edge (600) exactly.
        assert_eq!(find_hits(&registry, &viewport(0.0)), vec![a]);
    }

    #[test]
    fn each_section_uses_its_own_offset() {
        let mut registry = Registry::new();
        let (_, _) = registry.register(
            FakeTarget::new(1, "a", 0.0, 100.0),
            SpyConfig::default().with_scroll_offset(200.0),
        );
        let (b, _) = registry.register(
            FakeTarget::new(2, "b", 0.0, 100.0),
            SpyConfig::default().with_scroll_offset(0.0),
        );
        assert_eq!(find_hits(&registry, &viewport(0.0)), vec![b]);
    }

    #[test]
    fn zero_height_is_excluded() {
        let (registry, a, b) = stacked();
        registry.get(a).expect("a").target().set_height(0.0);
        assert_eq!(find_hits(&registry, &viewport(0.0)), vec![b]);
    }

    #[test]
    fn hits_keep_registration_order() {
        let mut registry = Registry::new();
        let (low, _) = registry.register(FakeTarget::new(1, "low", 400.0, 100.0), SpyConfig::default());
        let (high, _) = registry.register(FakeTarget::new(2, "high", 250.0, 100.0), SpyConfig::default());
        assert_eq!(find_hits(&registry, &viewport(0.0)), vec![low, high]);
    }

    #[test]
    fn empty_registry_has_no_hits() {
        let registry: Registry<FakeTarget> = Registry::new();
        assert!(find_hits(&registry, &viewport(0.0)).is_empty());
    }
}
