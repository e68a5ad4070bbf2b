//! Core state machine types.
//!
//! This module contains the data the engine works on:
//! - State identifiers and change names
//! - Handler records, callbacks and removal criteria
//! - Bounded state history
//!
//! Nothing in here runs callbacks; execution lives in [`crate::engine`].

mod handler;
mod history;
mod state;

pub use handler::{
    Callback, CallbackError, Handler, HandlerCriteria, HandlerId, HandlerSpec, HandlerSummary,
};
pub use history::StateHistory;
pub use state::{ChangeName, StateId};
