#![forbid(unsafe_code)]

//! Core: geometry, easing, host events, and throttling for ScrollSpy.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod throttle;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
