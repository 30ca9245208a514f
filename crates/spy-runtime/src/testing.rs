//! Synthetic host and targets for unit tests.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use spy_core::animation::ScrollRequest;
use spy_core::geometry::{Rect, Size};

use crate::target::{ElementHandle, SpyHost, SpyTarget};

/// Target whose rectangle can be changed after registration.
#[derive(Debug, Clone)]
pub(crate) struct FakeTarget {
    handle: ElementHandle,
    anchor: String,
    rect: Rc<Cell<Rect>>,
}

impl FakeTarget {
    /// Full-width (1000px) section at `top` with `height`.
    pub(crate) fn new(handle: u64, anchor: &str, top: f64, height: f64) -> Self {
        Self {
            handle: ElementHandle(handle),
            anchor: anchor.to_owned(),
            rect: Rc::new(Cell::new(Rect::new(0.0, top, 1000.0, height))),
        }
    }

    pub(crate) fn set_height(&self, height: f64) {
        let mut rect = self.rect.get();
        rect.height = height;
        self.rect.set(rect);
    }
}

impl SpyTarget for FakeTarget {
    fn handle(&self) -> ElementHandle {
        self.handle
    }

    fn anchor_id(&self) -> String {
        self.anchor.clone()
    }

    fn rect(&self) -> Rect {
        self.rect.get()
    }
}

/// Host that records class state per selector instead of matching elements.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    pub(crate) scroll_top: f64,
    pub(crate) inner: Size,
    pub(crate) classes: BTreeMap<String, Vec<String>>,
    pub(crate) scrolls: Vec<ScrollRequest>,
    pub(crate) attached: u32,
    pub(crate) detached: u32,
}

impl FakeHost {
    pub(crate) fn new(width: f64, height: f64) -> Self {
        Self {
            inner: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Selectors currently carrying `class`.
    pub(crate) fn marked(&self, class: &str) -> Vec<String> {
        self.classes
            .iter()
            .filter(|(_, classes)| classes.iter().any(|c| c == class))
            .map(|(selector, _)| selector.clone())
            .collect()
    }
}

impl SpyHost for FakeHost {
    type Target = FakeTarget;

    fn scroll_position(&self) -> (f64, f64) {
        (0.0, self.scroll_top)
    }

    fn inner_size(&self) -> Size {
        self.inner
    }

    fn add_class(&mut self, selector: &str, class: &str) {
        let classes = self.classes.entry(selector.to_owned()).or_default();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, selector: &str, class: &str) {
        if let Some(classes) = self.classes.get_mut(selector) {
            classes.retain(|c| c != class);
        }
    }

    fn animate_scroll(&mut self, request: ScrollRequest) {
        self.scrolls.push(request);
    }

    fn attach_listeners(&mut self) {
        self.attached += 1;
    }

    fn detach_listeners(&mut self) {
        self.detached += 1;
    }
}

/// Selector the default config produces for `anchor`.
pub(crate) fn link(anchor: &str) -> String {
    format!("a[href=\"#{anchor}\"]")
}
