//! Builder for constructing handler specs.

use crate::builder::error::BuildError;
use crate::core::{Callback, CallbackError, ChangeName, HandlerSpec, StateId};

/// Builder for [`HandlerSpec`] with a fluent API.
///
/// Only the change and the callback are checked here. Whether the
/// source/destination fit the change is decided by the registry when the
/// spec is added, so both entry points share one rule set.
#[derive(Default)]
pub struct HandlerBuilder {
    change: Option<ChangeName>,
    from: Option<StateId>,
    to: Option<StateId>,
    callback: Option<Callback>,
    priority: Option<f64>,
    comment: Option<String>,
}

impl HandlerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the change name (required).
    pub fn change(mut self, change: impl Into<ChangeName>) -> Self {
        self.change = Some(change.into());
        self
    }

    pub fn from(mut self, state: impl Into<StateId>) -> Self {
        self.from = Some(state.into());
        self
    }

    pub fn to(mut self, state: impl Into<StateId>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Use an existing callback, keeping its identity for later removal.
    pub fn callback(mut self, callback: Callback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Set an action that cannot fail.
    pub fn action<F>(self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callback(Callback::infallible(f))
    }

    /// Set an action that may report failure.
    pub fn fallible<F>(self, f: F) -> Self
    where
        F: Fn() -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.callback(Callback::new(f))
    }

    pub fn priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn build(self) -> Result<HandlerSpec, BuildError> {
        let change = self.change.ok_or(BuildError::MissingChange)?;
        let callback = self.callback.ok_or(BuildError::MissingCallback)?;

        Ok(HandlerSpec {
            change,
            from: self.from,
            to: self.to,
            callback,
            priority: self.priority,
            comment: self.comment,
        })
    }
}
