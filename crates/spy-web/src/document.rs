#![forbid(unsafe_code)]

//! Host-driven synthetic document.
//!
//! A flat list of elements with document-space rectangles, class lists, and
//! a window (scroll offsets plus inner size). The embedding host mirrors the
//! real page into it; tests build pages directly.

use spy_core::geometry::{Rect, Size};
use spy_runtime::ElementHandle;

use crate::selector::{Matchable, Selector, SelectorError};

/// One element in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub handle: ElementHandle,
    pub tag: String,
    pub id: Option<String>,
    pub href: Option<String>,
    pub classes: Vec<String>,
    pub rect: Rect,
}

impl Matchable for Element {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            "href" => self.href.as_deref(),
            _ => None,
        }
    }
}

/// Builder-style description of an element to insert.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    href: Option<String>,
    classes: Vec<String>,
    rect: Rect,
}

impl ElementSpec {
    /// A `<section id="...">` occupying `rect`.
    pub fn section(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            tag: "section".to_owned(),
            id: Some(id.into()),
            rect,
            ..Self::default()
        }
    }

    /// An `<a href="...">`.
    pub fn link(href: impl Into<String>) -> Self {
        Self {
            tag: "a".to_owned(),
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// An arbitrary tag.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }
}

/// Elements plus window state.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    next_handle: u64,
    scroll_left: f64,
    scroll_top: f64,
    inner: Size,
}

impl Document {
    /// Create an empty document with the given window size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            next_handle: 0,
            scroll_left: 0.0,
            scroll_top: 0.0,
            inner: Size::new(width, height),
        }
    }

    /// Insert an element and return its handle.
    pub fn insert(&mut self, new: ElementSpec) -> ElementHandle {
        self.next_handle += 1;
        let handle = ElementHandle(self.next_handle);
        self.elements.push(Element {
            handle,
            tag: new.tag,
            id: new.id,
            href: new.href,
            classes: new.classes,
            rect: new.rect,
        });
        handle
    }

    /// Remove an element. Returns `false` if it was not present.
    pub fn remove(&mut self, handle: ElementHandle) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.handle != handle);
        self.elements.len() != before
    }

    pub fn element(&self, handle: ElementHandle) -> Option<&Element> {
        self.elements.iter().find(|e| e.handle == handle)
    }

    fn element_mut(&mut self, handle: ElementHandle) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.handle == handle)
    }

    /// Move or resize an element.
    pub fn set_rect(&mut self, handle: ElementHandle, rect: Rect) {
        if let Some(element) = self.element_mut(handle) {
            element.rect = rect;
        }
    }

    /// Collapse (height 0) or restore an element's height.
    pub fn set_height(&mut self, handle: ElementHandle, height: f64) {
        if let Some(element) = self.element_mut(handle) {
            element.rect.height = height;
        }
    }

    /// Current `(left, top)` scroll offsets.
    #[must_use]
    pub fn scroll_position(&self) -> (f64, f64) {
        (self.scroll_left, self.scroll_top)
    }

    /// Set the vertical scroll offset, clamped to the scrollable range.
    pub fn scroll_to(&mut self, top: f64) {
        self.scroll_top = top.clamp(0.0, self.max_scroll_top());
    }

    /// Set the horizontal scroll offset (not clamped).
    pub fn scroll_left_to(&mut self, left: f64) {
        self.scroll_left = left;
    }

    /// Bottom of the lowest element.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.elements
            .iter()
            .map(|e| e.rect.bottom())
            .fold(0.0, f64::max)
    }

    /// Largest reachable scroll offset.
    #[must_use]
    pub fn max_scroll_top(&self) -> f64 {
        (self.content_height() - self.inner.height).max(0.0)
    }

    #[must_use]
    pub fn inner_size(&self) -> Size {
        self.inner
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.inner = Size::new(width, height);
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll_top());
    }

    /// Handles of elements matching `selector`, in document order.
    pub fn query(&self, selector: &str) -> Result<Vec<ElementHandle>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .elements
            .iter()
            .filter(|e| selector.matches(*e))
            .map(|e| e.handle)
            .collect())
    }

    /// Add `class` to matching elements; returns how many changed.
    pub fn add_class(&mut self, selector: &str, class: &str) -> Result<usize, SelectorError> {
        let selector = Selector::parse(selector)?;
        let mut changed = 0;
        for element in &mut self.elements {
            if selector.matches(&*element) && !element.has_class(class) {
                element.classes.push(class.to_owned());
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Remove `class` from matching elements; returns how many changed.
    pub fn remove_class(&mut self, selector: &str, class: &str) -> Result<usize, SelectorError> {
        let selector = Selector::parse(selector)?;
        let mut changed = 0;
        for element in &mut self.elements {
            if !selector.matches(&*element) {
                continue;
            }
            let before = element.classes.len();
            element.classes.retain(|c| c != class);
            changed += before - element.classes.len();
        }
        Ok(changed)
    }

    /// Handles of elements currently carrying `class`, in document order.
    pub fn with_class(&self, class: &str) -> Vec<ElementHandle> {
        self.elements
            .iter()
            .filter(|e| e.has_class(class))
            .map(|e| e.handle)
            .collect()
    }
}
