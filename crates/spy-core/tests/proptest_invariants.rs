//! Property-based invariant tests for viewport geometry and throttling.
//!
//! 1. Overlap is inclusive and agrees with the edge predicate.
//! 2. Moving the top edge down never adds overlaps.
//! 3. Throttle fires are never closer than the interval.
//! 4. A burst always ends with a fire (leading or trailing).

use proptest::prelude::*;
use spy_core::geometry::{Rect, Size, ViewportRect};
use spy_core::throttle::Throttle;
use std::time::Duration;

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0u32..5_000, 0u32..20_000, 0u32..2_000, 0u32..2_000)
        .prop_map(|(x, y, w, h)| Rect::new(x as f64, y as f64, w as f64, h as f64))
}

fn viewport_strategy() -> impl Strategy<Value = ViewportRect> {
    (0u32..5_000, 0u32..20_000, 1u32..2_000, 1u32..2_000).prop_map(|(x, y, w, h)| {
        ViewportRect::from_scroll(x as f64, y as f64, Size::new(w as f64, h as f64))
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Overlap agrees with interval overlap on both axes
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overlap_matches_axis_intervals(vp in viewport_strategy(), rect in rect_strategy()) {
        let horizontal = rect.left() <= vp.right && rect.right() >= vp.left;
        let vertical = rect.top() <= vp.bottom && rect.bottom() >= vp.top;
        prop_assert_eq!(vp.overlaps(&rect), horizontal && vertical);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Top offset is monotone
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn top_offset_never_adds_overlaps(
        vp in viewport_strategy(),
        rect in rect_strategy(),
        offset in 0u32..1_000,
    ) {
        let adjusted = vp.with_top_offset(offset as f64);
        if adjusted.overlaps(&rect) {
            prop_assert!(vp.overlaps(&rect));
        }
        prop_assert_eq!(adjusted.bottom, vp.bottom);
        prop_assert_eq!(adjusted.left, vp.left);
        prop_assert_eq!(adjusted.right, vp.right);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Throttle spacing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fires_respect_interval(
        interval_ms in 1u64..500,
        gaps in proptest::collection::vec(0u64..300, 1..60),
    ) {
        let interval = Duration::from_millis(interval_ms);
        let mut throttle = Throttle::new(interval);
        let mut now = Duration::ZERO;
        let mut fires = Vec::new();
        for gap in gaps {
            now += Duration::from_millis(gap);
            if throttle.poll(now) {
                fires.push(now);
            }
            if throttle.call(now) {
                fires.push(now);
            }
        }
        for pair in fires.windows(2) {
            prop_assert!(pair[1] - pair[0] >= interval, "fires too close: {:?}", pair);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. The last call in a burst is never lost
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn burst_ends_with_fire(
        interval_ms in 1u64..500,
        gaps in proptest::collection::vec(0u64..300, 1..60),
    ) {
        let mut throttle = Throttle::new(Duration::from_millis(interval_ms));
        let mut now = Duration::ZERO;
        let mut last_call = Duration::ZERO;
        let mut last_fire = None;
        for gap in gaps {
            now += Duration::from_millis(gap);
            if throttle.poll(now) {
                last_fire = Some(now);
            }
            last_call = now;
            if throttle.call(now) {
                last_fire = Some(now);
            }
        }
        if let Some(deadline) = throttle.deadline() {
            prop_assert!(throttle.poll(deadline));
            last_fire = Some(deadline);
        }
        let last_fire = last_fire.expect("at least one fire");
        prop_assert!(last_fire >= last_call);
    }
}
