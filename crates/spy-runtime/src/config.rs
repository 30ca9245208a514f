#![forbid(unsafe_code)]

//! Per-section configuration.
//!
//! [`SpyConfig`] is the typed options set a section is created with. Its
//! `Default` impl is the shared default set. With the `serde` feature,
//! [`SpyOptions`] accepts a partially specified JSON options object and
//! merges it over those defaults.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default scroll handler throttle.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

/// Default distance, in pixels, the viewport top is pushed down by when
/// testing intersection, and subtracted from click-navigation targets.
pub const DEFAULT_SCROLL_OFFSET: f64 = 200.0;

/// Default marker class.
pub const DEFAULT_ACTIVE_CLASS: &str = "active";

/// Maps a section's anchor identifier to the selector of the navigation
/// element that should carry the active marker.
#[derive(Clone)]
pub struct ActiveSelector(Arc<dyn Fn(&str) -> String>);

impl ActiveSelector {
    /// Wrap an arbitrary mapping.
    pub fn new(f: impl Fn(&str) -> String + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Build a selector from a template where every `{id}` is replaced.
    pub fn template(template: impl Into<String>) -> Self {
        let template = template.into();
        Self::new(move |id| template.replace("{id}", id))
    }

    /// Resolve the selector for `id`.
    pub fn resolve(&self, id: &str) -> String {
        (self.0)(id)
    }
}

impl Default for ActiveSelector {
    /// `a[href="#<id>"]`
    fn default() -> Self {
        Self::new(|id| format!("a[href=\"#{id}\"]"))
    }
}

impl fmt::Debug for ActiveSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActiveSelector")
            .field(&self.resolve("{id}"))
            .finish()
    }
}

/// Options a section is registered with.
#[derive(Debug, Clone)]
pub struct SpyConfig {
    /// Minimum spacing between scroll-driven samples.
    pub throttle: Duration,
    /// Pixels added to the viewport top for this section's hit test.
    pub scroll_offset: f64,
    /// Class applied to the active navigation element.
    pub active_class: String,
    /// Maps an anchor id to the navigation element selector.
    pub active_selector: ActiveSelector,
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            throttle: DEFAULT_THROTTLE,
            scroll_offset: DEFAULT_SCROLL_OFFSET,
            active_class: DEFAULT_ACTIVE_CLASS.to_owned(),
            active_selector: ActiveSelector::default(),
        }
    }
}

impl SpyConfig {
    /// Set the scroll throttle interval.
    #[must_use]
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Set the scroll offset.
    #[must_use]
    pub fn with_scroll_offset(mut self, offset: f64) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Set the marker class.
    #[must_use]
    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    /// Set the anchor-id-to-selector mapping.
    #[must_use]
    pub fn with_active_selector(mut self, selector: ActiveSelector) -> Self {
        self.active_selector = selector;
        self
    }

    /// Selector of the navigation element for `anchor_id`.
    pub fn selector_for(&self, anchor_id: &str) -> String {
        self.active_selector.resolve(anchor_id)
    }
}

#[cfg(feature = "serde")]
pub use options::SpyOptions;

#[cfg(feature = "serde")]
mod options {
    use super::{ActiveSelector, SpyConfig};
    use serde::Deserialize;
    use std::time::Duration;

    /// A partially specified options object; absent fields keep defaults.
    ///
    /// ```json
    /// { "throttle": 50, "scrollOffset": 120, "activeClass": "current",
    ///   "activeSelector": "nav a[href=\"#{id}\"]" }
    /// ```
    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    pub struct SpyOptions {
        /// Throttle interval in milliseconds.
        pub throttle: Option<u64>,
        pub scroll_offset: Option<f64>,
        pub active_class: Option<String>,
        /// Selector template; `{id}` is replaced by the anchor id.
        pub active_selector: Option<String>,
    }

    impl SpyOptions {
        /// Parse an options object from JSON text.
        pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
            serde_json::from_str(text)
        }

        /// Merge these options over `base`.
        pub fn merge_into(self, mut base: SpyConfig) -> SpyConfig {
            if let Some(ms) = self.throttle {
                base.throttle = Duration::from_millis(ms);
            }
            if let Some(offset) = self.scroll_offset {
                base.scroll_offset = offset;
            }
            if let Some(class) = self.active_class {
                base.active_class = class;
            }
            if let Some(template) = self.active_selector {
                base.active_selector = ActiveSelector::template(template);
            }
            base
        }
    }

    impl From<SpyOptions> for SpyConfig {
        fn from(options: SpyOptions) -> Self {
            options.merge_into(SpyConfig::default())
        }
    }
}
