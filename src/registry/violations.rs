//! Reasons a registry operation is refused.

use crate::core::{ChangeName, StateId};
use serde::Serialize;
use thiserror::Error;

/// Rule violated by a handler registration.
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RegistrationError {
    #[error(
        "invalid destination {requested:?} for \"{change}\" from {from:?}: already bound to {existing:?}"
    )]
    DestinationConflict {
        change: ChangeName,
        from: Option<StateId>,
        existing: Option<StateId>,
        requested: Option<StateId>,
    },

    #[error("\"{change}\" handler needs a source state")]
    MissingSource { change: ChangeName },

    #[error("\"{change}\" handler needs a destination state")]
    MissingDestination { change: ChangeName },
}

/// Reason a removal request did nothing.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RemovalError {
    #[error("no criteria provided to remove any state handler")]
    EmptyCriteria,
}
