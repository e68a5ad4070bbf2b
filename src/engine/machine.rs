//! The engine: owns handlers and history, drives transitions.

use super::executor::{HandlerExecutor, TransitionReport};
use super::resolver::{Resolution, TransitionResolver};
use crate::builder::default_instance_name;
use crate::core::{
    ChangeName, Handler, HandlerCriteria, HandlerId, HandlerSpec, StateHistory, StateId,
};
use crate::registry::HandlerRegistry;
use crate::trace::{TraceEvent, Tracer};

/// Result of [`Engine::trigger`].
#[derive(Clone, Debug, PartialEq)]
pub enum Trigger {
    /// `enter` or `leave` was requested; nothing ran.
    RejectedCore { state: StateId },

    /// No handler for the change in the current state; nothing ran.
    Ignored { state: StateId },

    /// Transition ran and the destination is now current.
    Completed(TransitionReport),
}

impl Trigger {
    /// State the engine is in after the trigger.
    pub fn state(&self) -> &StateId {
        match self {
            Self::RejectedCore { state } | Self::Ignored { state } => state,
            Self::Completed(report) => &report.to,
        }
    }

    pub fn into_state(self) -> StateId {
        match self {
            Self::RejectedCore { state } | Self::Ignored { state } => state,
            Self::Completed(report) => report.to,
        }
    }

    pub fn report(&self) -> Option<&TransitionReport> {
        match self {
            Self::Completed(report) => Some(report),
            _ => None,
        }
    }
}

/// Handler-driven state machine.
///
/// Every operation takes the engine by `&mut self` and callbacks hold no
/// reference to it, so a callback cannot trigger a nested transition on the
/// engine that is running it. To share an engine across threads, wrap it in
/// a `Mutex`; a callback locking that same mutex deadlocks.
///
/// # Example
///
/// ```rust
/// use handlerstate::builder::{on_change, on_enter};
/// use handlerstate::core::{Callback, StateId};
/// use handlerstate::engine::Engine;
///
/// let mut engine = Engine::new("off", 100);
/// engine.add_state_handler(on_change("switch", "off", "on", Callback::infallible(|| {})));
/// engine.add_state_handler(on_enter("on", Callback::infallible(|| {})));
///
/// assert_eq!(engine.trigger_change("switch"), StateId::from("on"));
/// assert_eq!(engine.trigger_change("switch"), StateId::from("on")); // unhandled in "on"
/// assert_eq!(engine.history_peek(2), Some(&StateId::from("off")));
/// ```
#[derive(Debug)]
pub struct Engine {
    registry: HandlerRegistry,
    history: StateHistory,
    tracer: Tracer,
}

impl Engine {
    /// Create an engine with no trace sink and a generated name.
    ///
    /// Unlike [`EngineBuilder::build`](crate::builder::EngineBuilder::build),
    /// which refuses a `max_history` of zero, this raises it to one.
    pub fn new(initial: impl Into<StateId>, max_history: usize) -> Self {
        Self::from_parts(initial.into(), max_history, Tracer::new(default_instance_name(), None))
    }

    pub(crate) fn from_parts(initial: StateId, max_history: usize, tracer: Tracer) -> Self {
        Self {
            registry: HandlerRegistry::new(),
            history: StateHistory::new(initial, max_history),
            tracer,
        }
    }

    pub fn name(&self) -> &str {
        self.tracer.instance()
    }

    /// Register a handler. Refused registrations are reported to the trace
    /// sink only.
    pub fn add_state_handler(&mut self, spec: HandlerSpec) {
        let _ = self.try_add_state_handler(spec);
    }

    /// Like [`Engine::add_state_handler`], returning the id of the stored
    /// handler or `None` if it was refused.
    pub fn try_add_state_handler(&mut self, spec: HandlerSpec) -> Option<HandlerId> {
        let (change, from, to) = (spec.change.clone(), spec.from.clone(), spec.to.clone());

        match self.registry.add(spec) {
            Ok(handler) => {
                let id = handler.id;
                self.tracer.emit(|| TraceEvent::HandlerAdded {
                    handler: handler.summary(),
                });
                Some(id)
            }
            Err(violations) => {
                self.tracer.emit(|| TraceEvent::HandlerRejected {
                    change,
                    from,
                    to,
                    violations,
                });
                None
            }
        }
    }

    /// Remove every handler matching all fields set in `criteria`.
    /// Empty criteria remove nothing.
    pub fn remove_state_handler(&mut self, criteria: HandlerCriteria) {
        match self.registry.remove(&criteria) {
            Ok(removed) => self.tracer.emit(|| TraceEvent::HandlerRemoved {
                count: removed.len(),
                matched: removed.iter().map(Handler::summary).collect(),
            }),
            Err(_) => self.tracer.emit(|| TraceEvent::RemovalCriteriaEmpty),
        }
    }

    /// Request a change and return the resulting state: the destination if
    /// the transition ran, otherwise the unchanged current state.
    pub fn trigger_change(&mut self, change: impl Into<ChangeName>) -> StateId {
        self.trigger(change).into_state()
    }

    /// Request a change and return what happened.
    pub fn trigger(&mut self, change: impl Into<ChangeName>) -> Trigger {
        let change = change.into();
        let resolution = TransitionResolver::new(&self.registry, &self.history).resolve(&change);

        let planned = match resolution {
            Resolution::CoreChange { change, state } => {
                self.tracer.emit(|| TraceEvent::TransitionRejectedCore {
                    change,
                    state: state.clone(),
                });
                return Trigger::RejectedCore { state };
            }
            Resolution::Unhandled { change, state } => {
                self.tracer.emit(|| TraceEvent::TransitionIgnored {
                    change,
                    from: state.clone(),
                });
                return Trigger::Ignored { state };
            }
            Resolution::Accepted(planned) => planned,
        };

        let handlers = HandlerExecutor::order(self.registry.applicable(
            &planned.change,
            &planned.from,
            &planned.to,
        ));
        self.tracer.emit(|| TraceEvent::TransitionPlanned {
            change: planned.change.clone(),
            from: planned.from.clone(),
            to: planned.to.clone(),
            handlers: handlers.iter().map(|h| h.summary()).collect(),
        });

        let report = HandlerExecutor::new(&self.tracer).run(planned, &handlers);

        if let Some(evicted) = self.history.push(report.to.clone()) {
            self.tracer.emit(|| TraceEvent::HistoryTrimmed {
                evicted,
                capacity: self.history.capacity(),
            });
        }
        self.tracer.emit(|| TraceEvent::TransitionCompleted {
            report: report.clone(),
        });

        Trigger::Completed(report)
    }

    pub fn current_state(&self) -> &StateId {
        self.history.current()
    }

    /// State `n` positions back; `history_peek(1)` is the current state.
    pub fn history_peek(&self, n: usize) -> Option<&StateId> {
        self.history.peek(n)
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Registered handlers in registration order.
    pub fn handlers(&self) -> impl Iterator<Item = &Handler> {
        self.registry.iter()
    }
}
