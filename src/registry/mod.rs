//! Handler registry: owns every registered handler.
//!
//! Additions are checked against the registration rules in [`rules`]; a
//! refused handler is never stored. Lookups are linear scans and always
//! yield handlers in registration order, which the executor relies on to
//! break priority ties.

pub mod rules;
pub mod violations;

pub use violations::{RegistrationError, RemovalError};

use crate::core::{ChangeName, Handler, HandlerCriteria, HandlerId, HandlerSpec, StateId};
use stillwater::validation::Validation;

/// Owned, ordered collection of handlers.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Handler>,
    next_id: u64,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a handler.
    ///
    /// On refusal the registry is left untouched and every violated rule is
    /// returned.
    pub fn add(&mut self, spec: HandlerSpec) -> Result<&Handler, Vec<RegistrationError>> {
        if let Validation::Failure(errors) = rules::validate(&spec, &self.handlers) {
            return Err(errors.iter().cloned().collect());
        }

        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push(Handler::from_spec(id, spec));
        Ok(&self.handlers[self.handlers.len() - 1])
    }

    /// Remove every handler matching all supplied criteria fields.
    ///
    /// Returns the removed handlers in registration order.
    pub fn remove(&mut self, criteria: &HandlerCriteria) -> Result<Vec<Handler>, RemovalError> {
        if criteria.is_empty() {
            return Err(RemovalError::EmptyCriteria);
        }

        let (removed, keep): (Vec<_>, Vec<_>) = std::mem::take(&mut self.handlers)
            .into_iter()
            .partition(|h| criteria.matches(h));
        self.handlers = keep;
        Ok(removed)
    }

    /// First handler registered for `change` from `from`.
    pub fn find_change(&self, change: &ChangeName, from: &StateId) -> Option<&Handler> {
        self.handlers
            .iter()
            .find(|h| h.change == *change && h.from.as_ref() == Some(from))
    }

    pub fn leave_handlers<'a>(&'a self, from: &'a StateId) -> impl Iterator<Item = &'a Handler> {
        self.handlers
            .iter()
            .filter(move |h| h.change == ChangeName::Leave && h.from.as_ref() == Some(from))
    }

    pub fn enter_handlers<'a>(&'a self, to: &'a StateId) -> impl Iterator<Item = &'a Handler> {
        self.handlers
            .iter()
            .filter(move |h| h.change == ChangeName::Enter && h.to.as_ref() == Some(to))
    }

    /// Handlers that fire for `change` taking `from` to `to`: the matching
    /// change handlers, the leave handlers of `from` and the enter handlers
    /// of `to`, in registration order.
    pub fn applicable(&self, change: &ChangeName, from: &StateId, to: &StateId) -> Vec<&Handler> {
        self.handlers
            .iter()
            .filter(|h| match &h.change {
                ChangeName::Leave => h.from.as_ref() == Some(from),
                ChangeName::Enter => h.to.as_ref() == Some(to),
                custom => custom == change && h.from.as_ref() == Some(from),
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handler> {
        self.handlers.iter()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
