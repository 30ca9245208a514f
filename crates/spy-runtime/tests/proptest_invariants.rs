//! Property-based invariant tests for the registry, tracker, and active set.
//!
//! 1. After every sample a section is `InView` iff it is in the hit set.
//! 2. Enter/exit strictly alternate per section, starting with enter.
//! 3. At most one selector carries the marker and it is the head's.
//! 4. Ids strictly increase across register/unregister churn.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use spy_core::animation::ScrollRequest;
use spy_core::geometry::{Rect, Size};
use spy_runtime::active_set::ActiveSet;
use spy_runtime::registry::Registry;
use spy_runtime::{ElementHandle, SpyConfig, SpyHost, SpyId, SpyTarget, Transition, VisibilityTracker};

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Target(u64);

impl SpyTarget for Target {
    fn handle(&self) -> ElementHandle {
        ElementHandle(self.0)
    }

    fn anchor_id(&self) -> String {
        format!("s{}", self.0)
    }

    fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }
}

#[derive(Debug, Default)]
struct Recorder {
    marked: BTreeSet<String>,
}

impl SpyHost for Recorder {
    type Target = Target;

    fn scroll_position(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    fn inner_size(&self) -> Size {
        Size::new(100.0, 100.0)
    }

    fn add_class(&mut self, selector: &str, _class: &str) {
        self.marked.insert(selector.to_owned());
    }

    fn remove_class(&mut self, selector: &str, _class: &str) {
        self.marked.remove(selector);
    }

    fn animate_scroll(&mut self, _request: ScrollRequest) {}

    fn attach_listeners(&mut self) {}

    fn detach_listeners(&mut self) {}
}

/// Each sample is a bitmask over the registered sections.
fn samples_strategy() -> impl Strategy<Value = (usize, Vec<u32>)> {
    (1usize..8).prop_flat_map(|n| {
        let max = 1u32 << n;
        (Just(n), prop::collection::vec(0..max, 1..40))
    })
}

fn setup(n: usize) -> (Registry<Target>, Vec<SpyId>) {
    let mut registry = Registry::new();
    let ids = (1..=n as u64)
        .map(|h| registry.register(Target(h), SpyConfig::default()).0)
        .collect();
    (registry, ids)
}

fn hits_for(ids: &[SpyId], mask: u32) -> Vec<SpyId> {
    ids.iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, &id)| id)
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 2. State mirrors the hit set; transitions alternate
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn state_tracks_hits_and_transitions_alternate((n, masks) in samples_strategy()) {
        let (mut registry, ids) = setup(n);
        let mut tracker = VisibilityTracker::new();
        let mut last: BTreeMap<SpyId, Transition> = BTreeMap::new();

        for mask in masks {
            let hits = hits_for(&ids, mask);
            for transition in tracker.advance(&mut registry, hits.clone()) {
                let id = transition.id();
                match (last.get(&id), transition) {
                    (None | Some(Transition::Exit(_)), Transition::Enter(_)) => {}
                    (Some(Transition::Enter(_)), Transition::Exit(_)) => {}
                    (prev, next) => prop_assert!(false, "{:?} followed {:?}", next, prev),
                }
                last.insert(id, transition);
            }
            for section in registry.iter() {
                prop_assert_eq!(section.state().is_in_view(), hits.contains(&section.id()));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Marker uniqueness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn only_the_head_is_marked((n, masks) in samples_strategy()) {
        let (mut registry, ids) = setup(n);
        let mut tracker = VisibilityTracker::new();
        let mut active = ActiveSet::new();
        let mut host = Recorder::default();

        for mask in masks {
            let hits = hits_for(&ids, mask);
            for transition in tracker.advance(&mut registry, hits) {
                match transition {
                    Transition::Enter(id) => active.enter(id, &registry, &mut host),
                    Transition::Exit(id) => active.exit(id, &registry, &mut host),
                }
            }
            let expected: BTreeSet<String> = active
                .head()
                .and_then(|head| registry.get(head))
                .and_then(|s| s.active_selector())
                .into_iter()
                .collect();
            prop_assert_eq!(&host.marked, &expected);

            let unique: BTreeSet<SpyId> = active.visible().iter().copied().collect();
            prop_assert_eq!(unique.len(), active.visible().len());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Ids strictly increase under churn
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ids_strictly_increase(ops in prop::collection::vec((any::<bool>(), 0u64..6), 1..80)) {
        let mut registry = Registry::new();
        let mut highest = 0;
        for (register, handle) in ops {
            if register {
                let (id, _) = registry.register(Target(handle), SpyConfig::default());
                prop_assert!(id.get() > highest);
                highest = id.get();
            } else if let Some(id) = registry.find_by_handle(ElementHandle(handle)) {
                prop_assert!(registry.unregister(id).is_some());
            }
        }
        let order: Vec<u64> = registry.iter().map(|s| s.id().get()).collect();
        prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
    }
}
