#![forbid(unsafe_code)]

//! [`SpyHost`] / [`SpyTarget`] over the synthetic [`Document`].
//!
//! The document is shared between the host and every element it hands out
//! (`Rc<RefCell<_>>`), so targets always report current geometry.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::Duration;

use spy_core::animation::{Animation, ScrollRequest, ScrollTween};
use spy_core::geometry::{Rect, Size};
use spy_runtime::{ElementHandle, SpyHost, SpyTarget};
use tracing::{trace, warn};

use crate::document::Document;
use crate::selector::SelectorError;

/// A section element living in a shared [`Document`].
#[derive(Debug, Clone)]
pub struct WebElement {
    document: Rc<RefCell<Document>>,
    handle: ElementHandle,
}

impl SpyTarget for WebElement {
    fn handle(&self) -> ElementHandle {
        self.handle
    }

    fn anchor_id(&self) -> String {
        self.document
            .borrow()
            .element(self.handle)
            .and_then(|e| e.id.clone())
            .unwrap_or_default()
    }

    // Removed elements report an empty rect and drop out of hit testing.
    fn rect(&self) -> Rect {
        self.document
            .borrow()
            .element(self.handle)
            .map(|e| e.rect)
            .unwrap_or_default()
    }
}

/// Listener bookkeeping, observable by tests and embedders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    pub attached: u32,
    pub detached: u32,
}

impl ListenerStats {
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached > self.detached
    }
}

/// Host over a shared synthetic document.
#[derive(Debug)]
pub struct WebHost {
    document: Rc<RefCell<Document>>,
    listeners: ListenerStats,
    scroll: Option<ScrollTween>,
}

impl WebHost {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document: Rc::new(RefCell::new(document)),
            listeners: ListenerStats::default(),
            scroll: None,
        }
    }

    pub fn document(&self) -> Ref<'_, Document> {
        self.document.borrow()
    }

    pub fn document_mut(&self) -> RefMut<'_, Document> {
        self.document.borrow_mut()
    }

    /// Wrap an element of this document as a spy target.
    #[must_use]
    pub fn element(&self, handle: ElementHandle) -> WebElement {
        WebElement {
            document: Rc::clone(&self.document),
            handle,
        }
    }

    /// Every element matching `selector`, as spy targets.
    pub fn select(&self, selector: &str) -> Result<Vec<WebElement>, SelectorError> {
        let handles = self.document.borrow().query(selector)?;
        Ok(handles.into_iter().map(|h| self.element(h)).collect())
    }

    #[must_use]
    pub fn listeners(&self) -> ListenerStats {
        self.listeners
    }

    /// Target of the in-flight scroll animation.
    #[must_use]
    pub fn scroll_target(&self) -> Option<f64> {
        self.scroll.as_ref().map(ScrollTween::target)
    }

    /// Advance the scroll animation by `dt`. Returns `true` if the window moved.
    pub fn tick_scroll(&mut self, dt: Duration) -> bool {
        let Some(tween) = self.scroll.as_mut() else {
            return false;
        };
        tween.tick(dt);
        let position = tween.position();
        let done = tween.is_complete();

        let mut document = self.document.borrow_mut();
        let (_, before) = document.scroll_position();
        document.scroll_to(position);
        let (_, after) = document.scroll_position();
        drop(document);

        if done {
            trace!(offset = position, "scroll animation finished");
            self.scroll = None;
        }
        after != before
    }
}

impl SpyHost for WebHost {
    type Target = WebElement;

    fn scroll_position(&self) -> (f64, f64) {
        self.document.borrow().scroll_position()
    }

    fn inner_size(&self) -> Size {
        self.document.borrow().inner_size()
    }

    fn add_class(&mut self, selector: &str, class: &str) {
        if let Err(err) = self.document.borrow_mut().add_class(selector, class) {
            warn!(%err, class, "malformed active selector; nothing marked");
        }
    }

    fn remove_class(&mut self, selector: &str, class: &str) {
        if let Err(err) = self.document.borrow_mut().remove_class(selector, class) {
            warn!(%err, class, "malformed active selector; nothing marked");
        }
    }

    fn animate_scroll(&mut self, request: ScrollRequest) {
        let (_, from) = self.document.borrow().scroll_position();
        self.scroll = Some(request.tween_from(from));
    }

    fn attach_listeners(&mut self) {
        self.listeners.attached += 1;
    }

    fn detach_listeners(&mut self) {
        self.listeners.detached += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementSpec;
    use pretty_assertions::assert_eq;

    fn host() -> (WebHost, ElementHandle) {
        let mut doc = Document::new(800.0, 400.0);
        let a = doc.insert(ElementSpec::section("a", Rect::new(0.0, 0.0, 800.0, 500.0)));
        doc.insert(ElementSpec::section("b", Rect::new(0.0, 500.0, 800.0, 500.0)));
        doc.insert(ElementSpec::link("#a"));
        (WebHost::new(doc), a)
    }

    #[test]
    fn element_reads_live_geometry() {
        let (host, a) = host();
        let el = host.element(a);
        assert_eq!(el.anchor_id(), "a");
        assert_eq!(el.rendered_height(), 500.0);
        host.document_mut().set_height(a, 0.0);
        assert_eq!(el.rendered_height(), 0.0);
    }

    #[test]
    fn removed_element_reports_empty_rect() {
        let (host, a) = host();
        let el = host.element(a);
        host.document_mut().remove(a);
        assert_eq!(el.rect(), Rect::default());
        assert_eq!(el.anchor_id(), "");
    }

    #[test]
    fn select_wraps_matches() {
        let (host, _) = host();
        let sections = host.select("section").expect("selector");
        let ids: Vec<String> = sections.iter().map(SpyTarget::anchor_id).collect();
        assert_eq!(ids, vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn class_changes_reach_document() {
        let (mut host, _) = host();
        host.add_class(r##"a[href="#a"]"##, "active");
        assert_eq!(host.document().with_class("active").len(), 1);
        host.remove_class(r##"a[href="#a"]"##, "active");
        assert!(host.document().with_class("active").is_empty());
    }

    #[test]
    fn malformed_selector_changes_nothing() {
        let (mut host, _) = host();
        host.add_class("nav a", "active");
        assert!(host.document().with_class("active").is_empty());
    }

    #[test]
    fn scroll_animation_runs_to_target() {
        let (mut host, _) = host();
        host.animate_scroll(ScrollRequest::new(300.0, Duration::from_millis(400)));
        assert_eq!(host.scroll_target(), Some(300.0));

        assert!(host.tick_scroll(Duration::from_millis(200)));
        let (_, mid) = host.scroll_position();
        assert!(mid > 0.0 && mid < 300.0, "{mid}");

        assert!(host.tick_scroll(Duration::from_millis(200)));
        assert_eq!(host.scroll_position(), (0.0, 300.0));
        assert_eq!(host.scroll_target(), None);
        assert!(!host.tick_scroll(Duration::from_millis(16)));
    }

    #[test]
    fn listener_counts() {
        let (mut host, _) = host();
        host.attach_listeners();
        assert!(host.listeners().is_attached());
        host.detach_listeners();
        assert_eq!(
            host.listeners(),
            ListenerStats {
                attached: 1,
                detached: 1
            }
        );
    }
}
