//! State identifiers and change names.
//!
//! States are opaque tokens: the engine never inspects them beyond equality.
//! Changes are either one of the two core lifecycle changes (`enter`,
//! `leave`) or a caller-defined custom name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a machine state.
///
/// # Example
///
/// ```rust
/// use handlerstate::core::StateId;
///
/// let off = StateId::from("off");
/// assert_eq!(off.as_str(), "off");
/// assert_eq!(off, StateId::new("off"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Name of a change (transition event).
///
/// `Enter` and `Leave` are core changes fired implicitly as part of every
/// transition. They cannot be triggered by callers.
///
/// # Example
///
/// ```rust
/// use handlerstate::core::ChangeName;
///
/// assert_eq!(ChangeName::parse("enter"), ChangeName::Enter);
/// assert_eq!(ChangeName::parse("switch"), ChangeName::Custom("switch".into()));
/// assert!(ChangeName::Leave.is_core());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ChangeName {
    Enter,
    Leave,
    Custom(String),
}

impl ChangeName {
    pub const ENTER: &'static str = "enter";
    pub const LEAVE: &'static str = "leave";

    /// Map a raw name onto the tagged form. Never fails: any name that is
    /// not reserved is a custom change.
    pub fn parse(name: &str) -> Self {
        match name {
            Self::ENTER => Self::Enter,
            Self::LEAVE => Self::Leave,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self::parse(&name.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Enter => Self::ENTER,
            Self::Leave => Self::LEAVE,
            Self::Custom(name) => name,
        }
    }

    pub fn is_core(&self) -> bool {
        matches!(self, Self::Enter | Self::Leave)
    }

    /// Priority a handler for this change gets when none is supplied.
    pub fn default_priority(&self) -> f64 {
        match self {
            Self::Leave => 0.0,
            Self::Enter => 1.0,
            Self::Custom(_) => -1.0,
        }
    }
}

impl fmt::Display for ChangeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ChangeName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for ChangeName {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<ChangeName> for String {
    fn from(change: ChangeName) -> Self {
        match change {
            ChangeName::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}
