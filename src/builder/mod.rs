//! Builder API for ergonomic engine and handler construction.

pub mod engine;
pub mod error;
pub mod handler;

pub use engine::{default_instance_name, EngineBuilder};
pub use error::BuildError;
pub use handler::HandlerBuilder;

use crate::core::{Callback, ChangeName, HandlerSpec, StateId};

/// Handler fired whenever `to` is entered.
///
/// # Example
///
/// ```
/// use handlerstate::builder::on_enter;
/// use handlerstate::core::{Callback, ChangeName};
///
/// let spec = on_enter("on", Callback::infallible(|| {})).with_priority(-5.0);
/// assert_eq!(spec.change, ChangeName::Enter);
/// assert_eq!(spec.priority, Some(-5.0));
/// ```
pub fn on_enter(to: impl Into<StateId>, callback: Callback) -> HandlerSpec {
    HandlerSpec {
        change: ChangeName::Enter,
        from: None,
        to: Some(to.into()),
        callback,
        priority: None,
        comment: None,
    }
}

/// Handler fired whenever `from` is left.
pub fn on_leave(from: impl Into<StateId>, callback: Callback) -> HandlerSpec {
    HandlerSpec {
        change: ChangeName::Leave,
        from: Some(from.into()),
        to: None,
        callback,
        priority: None,
        comment: None,
    }
}

/// Handler for the custom change `change` taking `from` to `to`.
///
/// # Example
///
/// ```
/// use handlerstate::builder::on_change;
/// use handlerstate::core::{Callback, StateId};
///
/// let spec = on_change("switch", "off", "on", Callback::infallible(|| {}))
///     .with_comment("off-switch-on");
/// assert_eq!(spec.to, Some(StateId::from("on")));
/// ```
pub fn on_change(
    change: impl Into<ChangeName>,
    from: impl Into<StateId>,
    to: impl Into<StateId>,
    callback: Callback,
) -> HandlerSpec {
    HandlerSpec {
        change: change.into(),
        from: Some(from.into()),
        to: Some(to.into()),
        callback,
        priority: None,
        comment: None,
    }
}
