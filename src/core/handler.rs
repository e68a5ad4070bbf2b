//! Handler records: what callers register and what the registry stores.

use super::state::{ChangeName, StateId};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a handler callback.
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallbackError {
    #[error("callback failed: {message}")]
    Failed { message: String },

    #[error("callback panicked: {message}")]
    Panicked { message: String },
}

impl CallbackError {
    pub fn failed(message: impl fmt::Display) -> Self {
        Self::Failed {
            message: message.to_string(),
        }
    }
}

type CallbackFn = dyn Fn() -> Result<(), CallbackError> + Send + Sync;

/// Zero-argument action run when a handler fires.
///
/// Clones share one allocation; two callbacks are the same callback only if
/// one was cloned from the other. This identity is what removal by callback
/// compares.
///
/// # Example
///
/// ```rust
/// use handlerstate::core::{Callback, CallbackError};
///
/// let ok = Callback::infallible(|| {});
/// let failing = Callback::new(|| Err(CallbackError::failed("boom")));
///
/// assert!(ok.same_as(&ok.clone()));
/// assert!(!ok.same_as(&Callback::infallible(|| {})));
/// assert!(failing.call().is_err());
/// ```
#[derive(Clone)]
pub struct Callback(Arc<CallbackFn>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wrap an action that cannot report failure.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(move || {
            f();
            Ok(())
        })
    }

    pub fn call(&self) -> Result<(), CallbackError> {
        (self.0)()
    }

    pub fn same_as(&self, other: &Callback) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// Registration order of a stored handler. Ids are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HandlerId(pub(crate) u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Caller-supplied description of a handler.
///
/// `from` is ignored for `enter` and `to` is ignored for `leave`.
#[derive(Clone, Debug)]
pub struct HandlerSpec {
    pub change: ChangeName,
    pub from: Option<StateId>,
    pub to: Option<StateId>,
    pub callback: Callback,
    pub priority: Option<f64>,
    pub comment: Option<String>,
}

impl HandlerSpec {
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Handler as stored by the registry, after normalization.
#[derive(Clone, Debug)]
pub struct Handler {
    pub id: HandlerId,
    pub change: ChangeName,
    pub from: Option<StateId>,
    pub to: Option<StateId>,
    pub callback: Callback,
    pub priority: f64,
    pub comment: Option<String>,
}

impl Handler {
    /// Normalize a spec: `enter` drops its source, `leave` drops its
    /// destination, and a missing priority takes the change's default.
    /// A priority of `-0.0` is stored as `0.0`.
    pub(crate) fn from_spec(id: HandlerId, spec: HandlerSpec) -> Self {
        let HandlerSpec {
            change,
            from,
            to,
            callback,
            priority,
            comment,
        } = spec;

        let (from, to) = match change {
            ChangeName::Enter => (None, to),
            ChangeName::Leave => (from, None),
            ChangeName::Custom(_) => (from, to),
        };
        let priority = priority.unwrap_or_else(|| change.default_priority());
        // -0.0 ties with 0.0, so it must not sort ahead of it.
        let priority = if priority == 0.0 { 0.0 } else { priority };

        Self {
            id,
            change,
            from,
            to,
            callback,
            priority,
            comment,
        }
    }

    pub fn summary(&self) -> HandlerSummary {
        HandlerSummary {
            id: self.id,
            change: self.change.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            priority: self.priority,
            comment: self.comment.clone(),
        }
    }
}

/// Handler without its callback, for trace output and reports.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HandlerSummary {
    pub id: HandlerId,
    pub change: ChangeName,
    pub from: Option<StateId>,
    pub to: Option<StateId>,
    pub priority: f64,
    pub comment: Option<String>,
}

impl fmt::Display for HandlerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from = self.from.as_ref().map_or("-", StateId::as_str);
        let to = self.to.as_ref().map_or("-", StateId::as_str);
        write!(
            f,
            "{} on \"{}\": {} --> {} (priority {:.2})",
            self.id, self.change, from, to, self.priority
        )?;
        if let Some(comment) = &self.comment {
            write!(f, " comment \"{}\"", comment)?;
        }
        Ok(())
    }
}

/// Partial handler shape used for bulk removal.
///
/// A handler matches when every supplied field equals the handler's value.
/// Callbacks are compared by identity.
#[derive(Clone, Debug, Default)]
pub struct HandlerCriteria {
    pub change: Option<ChangeName>,
    pub from: Option<StateId>,
    pub to: Option<StateId>,
    pub callback: Option<Callback>,
    pub priority: Option<f64>,
    pub comment: Option<String>,
}

impl HandlerCriteria {
    pub fn new() -> Self {
        Self::default()
    }

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

    pub fn callback(mut self, callback: &Callback) -> Self {
        self.callback = Some(callback.clone());
        self
    }

    pub fn priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.change.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.callback.is_none()
            && self.priority.is_none()
            && self.comment.is_none()
    }

    pub fn matches(&self, handler: &Handler) -> bool {
        self.change.as_ref().is_none_or(|c| *c == handler.change)
            && self
                .from
                .as_ref()
                .is_none_or(|s| handler.from.as_ref() == Some(s))
            && self
                .to
                .as_ref()
                .is_none_or(|s| handler.to.as_ref() == Some(s))
            && self
                .callback
                .as_ref()
                .is_none_or(|cb| cb.same_as(&handler.callback))
            && self.priority.is_none_or(|p| p == handler.priority)
            && self
                .comment
                .as_ref()
                .is_none_or(|c| handler.comment.as_ref() == Some(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(change: &str, from: Option<&str>, to: Option<&str>) -> HandlerSpec {
        HandlerSpec {
            change: ChangeName::parse(change),
            from: from.map(StateId::from),
            to: to.map(StateId::from),
            callback: Callback::infallible(|| {}),
            priority: None,
            comment: None,
        }
    }

    #[test]
    fn enter_handlers_drop_source() {
        let handler = Handler::from_spec(HandlerId(0), spec("enter", Some("a"), Some("b")));
        assert_eq!(handler.from, None);
        assert_eq!(handler.to, Some(StateId::from("b")));
        assert_eq!(handler.priority, 1.0);
    }

    #[test]
    fn leave_handlers_drop_destination() {
        let handler = Handler::from_spec(HandlerId(0), spec("leave", Some("a"), Some("b")));
        assert_eq!(handler.from, Some(StateId::from("a")));
        assert_eq!(handler.to, None);
        assert_eq!(handler.priority, 0.0);
    }

    #[test]
    fn custom_handlers_keep_both_ends() {
        let handler = Handler::from_spec(HandlerId(0), spec("switch", Some("a"), Some("b")));
        assert_eq!(handler.from, Some(StateId::from("a")));
        assert_eq!(handler.to, Some(StateId::from("b")));
        assert_eq!(handler.priority, -1.0);
    }

    #[test]
    fn explicit_priority_wins_over_default() {
        let mut with_priority = spec("enter", None, Some("b"));
        with_priority.priority = Some(-5.0);
        let handler = Handler::from_spec(HandlerId(0), with_priority);
        assert_eq!(handler.priority, -5.0);
    }

    #[test]
    fn negative_zero_priority_is_stored_as_zero() {
        let mut negative_zero = spec("enter", None, Some("b"));
        negative_zero.priority = Some(-0.0);
        let handler = Handler::from_spec(HandlerId(0), negative_zero);
        assert!(handler.priority.is_sign_positive());
        assert_eq!(handler.priority.total_cmp(&0.0), std::cmp::Ordering::Equal);
    }

    #[test]
    fn callback_identity_survives_clone() {
        let cb = Callback::infallible(|| {});
        let other = Callback::infallible(|| {});
        assert!(cb.same_as(&cb.clone()));
        assert!(!cb.same_as(&other));
    }

    #[test]
    fn empty_criteria_is_detected() {
        assert!(HandlerCriteria::new().is_empty());
        assert!(!HandlerCriteria::new().priority(0.0).is_empty());
    }

    #[test]
    fn criteria_requires_every_supplied_field() {
        let handler = Handler::from_spec(HandlerId(3), spec("switch", Some("on"), Some("off")));

        assert!(HandlerCriteria::new().change("switch").matches(&handler));
        assert!(HandlerCriteria::new()
            .change("switch")
            .from("on")
            .to("off")
            .matches(&handler));
        assert!(!HandlerCriteria::new()
            .change("switch")
            .from("off")
            .matches(&handler));
        assert!(!HandlerCriteria::new().comment("x").matches(&handler));
    }

    #[test]
    fn criteria_compares_callbacks_by_identity() {
        let input = spec("switch", Some("on"), Some("off"));
        let cb = input.callback.clone();
        let handler = Handler::from_spec(HandlerId(0), input);

        assert!(HandlerCriteria::new().callback(&cb).matches(&handler));
        assert!(!HandlerCriteria::new()
            .callback(&Callback::infallible(|| {}))
            .matches(&handler));
    }

    #[test]
    fn concrete_source_never_matches_enter_handlers() {
        let handler = Handler::from_spec(HandlerId(0), spec("enter", Some("a"), Some("b")));
        assert!(!HandlerCriteria::new().from("a").matches(&handler));
    }

    #[test]
    fn summary_display_includes_comment() {
        let mut input = spec("switch", Some("off"), Some("on"));
        input.comment = Some("off-switch-on".to_string());
        let summary = Handler::from_spec(HandlerId(2), input).summary();

        assert_eq!(
            summary.to_string(),
            "#2 on \"switch\": off --> on (priority -1.00) comment \"off-switch-on\""
        );
    }
}
