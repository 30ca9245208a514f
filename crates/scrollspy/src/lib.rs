#![forbid(unsafe_code)]

//! ScrollSpy public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use spy_core::animation::{ScrollRequest, ScrollTween};
pub use spy_core::event::{ClickTarget, HostEvent};
pub use spy_core::geometry::{Rect, Size, ViewportRect};
pub use spy_core::throttle::Throttle;

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "serde")]
pub use spy_runtime::SpyOptions;
pub use spy_runtime::{
    ActiveSelector, DispatchError, DispatchOutcome, ElementHandle, EventOutcome, Invocation,
    Method, Navigation, ScrollSpy, Section, SpyConfig, SpyHost, SpyId, SpyTarget, Transition,
    VisibilityState,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use spy_web::{
    DeterministicClock, Document, ElementSpec, SelectorError, SessionError, StepReport,
    WebElement, WebEventSource, WebHost, WebSession,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for scrollspy embedders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The invoked method is not part of the dispatch surface.
    Dispatch(DispatchError),
    /// A selector could not be parsed.
    #[cfg(feature = "web")]
    Selector(SelectorError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Selector(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<DispatchError> for Error {
    fn from(err: DispatchError) -> Self {
        Self::Dispatch(err)
    }
}

#[cfg(feature = "web")]
impl From<SelectorError> for Error {
    fn from(err: SelectorError) -> Self {
        Self::Selector(err)
    }
}

#[cfg(feature = "web")]
impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Selector(err) => Self::Selector(err),
            SessionError::Dispatch(err) => Self::Dispatch(err),
        }
    }
}

/// Standard result type for scrollspy APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ClickTarget, Error, EventOutcome, HostEvent, Rect, Result, ScrollSpy, SpyConfig, SpyHost,
        SpyId, SpyTarget, Transition,
    };

    #[cfg(feature = "web")]
    pub use crate::{Document, ElementSpec, WebSession};

    pub use crate::{core, runtime};
}

pub use spy_core as core;
pub use spy_runtime as runtime;
#[cfg(feature = "web")]
pub use spy_web as web;
