#![forbid(unsafe_code)]

//! ScrollSpy runtime
//!
//! Keeps the active marker on navigation links in step with whichever
//! registered page section is scrolled into view.
//!
//! # Key Components
//!
//! - [`ScrollSpy`] - Service object owning registry, tick state, and the visible list
//! - [`SpyTarget`] / [`SpyHost`] - Capabilities the host provides (geometry, classes, scrolling)
//! - [`VisibilityTracker`] - Per-tick enter/exit diffing
//! - [`ActiveSet`] - Ordered visible list and marker placement
//! - [`Invocation`] - Typed command surface with unknown-method rejection
//!
//! # How it fits
//! `spy-core` supplies geometry, events, easing, and throttling. This crate
//! turns host events into viewport samples and marker changes. `spy-web`
//! provides a host-driven document for embedding and tests.

pub mod active_set;
pub mod config;
pub mod detector;
pub mod dispatch;
pub mod navigator;
pub mod registry;
pub mod spy;
pub mod target;
pub mod tracker;
pub mod viewport;

#[cfg(test)]
pub(crate) mod testing;

pub use active_set::ActiveSet;
#[cfg(feature = "serde")]
pub use config::SpyOptions;
pub use config::{ActiveSelector, SpyConfig};
pub use dispatch::{DispatchError, DispatchOutcome, Invocation, Method};
pub use navigator::{NAVIGATION_DURATION, Navigation};
pub use registry::{Section, SpyId, VisibilityState};
pub use spy::{EventOutcome, RESIZE_THROTTLE, ScrollSpy};
pub use target::{ElementHandle, SpyHost, SpyTarget};
pub use tracker::{Transition, VisibilityTracker};
