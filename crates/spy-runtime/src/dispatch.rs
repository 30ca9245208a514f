#![forbid(unsafe_code)]

//! Typed command surface.
//!
//! Hosts that expose a string-keyed entry point (`scrollSpy("destroy")`,
//! `scrollSpy({...})`) parse it into an [`Invocation`] here. Unknown names
//! are rejected with [`DispatchError::UnknownMethod`] before anything runs.

use std::fmt;
use std::str::FromStr;

use crate::config::SpyConfig;
use crate::registry::SpyId;

/// Instance methods callable through dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Tear down the section bound to each target. Void.
    Destroy,
    /// Identity accessor for the first target.
    GetInstance,
}

impl Method {
    /// Name as exposed on the string surface.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Destroy => "destroy",
            Self::GetInstance => "getInstance",
        }
    }

    /// Accessors read from the first target; void methods act on every target.
    #[must_use]
    pub const fn is_accessor(self) -> bool {
        matches!(self, Self::GetInstance)
    }
}

impl FromStr for Method {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "destroy" => Ok(Self::Destroy),
            "getInstance" => Ok(Self::GetInstance),
            other => Err(DispatchError::UnknownMethod(other.to_owned())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed call on the dispatch surface.
#[derive(Debug, Clone)]
pub enum Invocation {
    /// Register every target with one shared configuration.
    Init(SpyConfig),
    /// Invoke an instance method.
    Call(Method),
}

impl Invocation {
    /// Parse a method name; `None` means "initialize with defaults".
    pub fn parse(method: Option<&str>) -> Result<Self, DispatchError> {
        match method {
            None => Ok(Self::Init(SpyConfig::default())),
            Some(name) => name.parse().map(Self::Call),
        }
    }
}

impl From<SpyConfig> for Invocation {
    fn from(config: SpyConfig) -> Self {
        Self::Init(config)
    }
}

/// Result of a dispatched invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Sections created by `Init`, in target order.
    Initialized(Vec<SpyId>),
    /// Accessor result for the first target (`None` if it has no section).
    Instance(Option<SpyId>),
    /// A void method ran on this many targets that had a section.
    Applied(usize),
}

/// Dispatch failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The method name is not part of the surface.
    UnknownMethod(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMethod(name) => {
                write!(f, "method `{name}` does not exist on scrollSpy")
            }
        }
    }
}

impl std::error::Error for DispatchError {}
