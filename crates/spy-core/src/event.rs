#![forbid(unsafe_code)]

//! Canonical host event types.
//!
//! The embedding host (browser glue, a test harness, a simulator) pushes
//! these into the spy. All events derive `Clone` and `PartialEq` for use in
//! tests and pattern matching.

/// Canonical host event.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The document scroll position changed.
    Scroll,

    /// The window was resized.
    Resize {
        /// New inner width in pixels.
        width: f64,
        /// New inner height in pixels.
        height: f64,
    },

    /// A click landed somewhere in the document.
    Click(ClickTarget),
}

/// The element a click landed on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClickTarget {
    /// Lower-case tag name (`"a"`, `"div"`, ...).
    pub tag: String,
    /// Raw `href` attribute, if present.
    pub href: Option<String>,
}

impl ClickTarget {
    /// A click on an `<a href="...">`.
    pub fn anchor(href: impl Into<String>) -> Self {
        Self {
            tag: "a".to_owned(),
            href: Some(href.into()),
        }
    }

    /// A click on a plain element with no `href`.
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            href: None,
        }
    }

    /// Whether this target matches `a[href="#<fragment>"]`.
    ///
    /// An empty fragment never matches, so bare `href="#"` links are left alone.
    pub fn is_anchor_to(&self, fragment: &str) -> bool {
        !fragment.is_empty()
            && self.tag.eq_ignore_ascii_case("a")
            && self
                .href
                .as_deref()
                .and_then(|href| href.strip_prefix('#'))
                .is_some_and(|f| f == fragment)
    }
}
