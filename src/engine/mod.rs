//! Transition machinery.
//!
//! - [`TransitionResolver`] decides whether a change is legal from the
//!   current state and where it leads
//! - [`HandlerExecutor`] orders the applicable handlers and runs them,
//!   isolating failures
//! - [`Engine`] ties registry, history and tracing together

mod executor;
mod machine;
mod resolver;

pub use executor::{HandlerExecutor, HandlerOutcome, OutcomeStatus, TransitionReport};
pub use machine::{Engine, Trigger};
pub use resolver::{PlannedTransition, Resolution, TransitionResolver};
