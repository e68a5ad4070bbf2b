//! Runs the handlers of an accepted transition in priority order.

use super::resolver::PlannedTransition;
use crate::core::{Callback, CallbackError, ChangeName, Handler, HandlerSummary, StateId};
use crate::trace::{TraceEvent, Tracer};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// How one handler's callback ended.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Completed,
    Failed { error: CallbackError },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HandlerOutcome {
    pub handler: HandlerSummary,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl HandlerOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }
}

/// Everything that happened during one transition, in execution order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransitionReport {
    pub change: ChangeName,
    pub from: StateId,
    pub to: StateId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<HandlerOutcome>,
}

impl TransitionReport {
    pub fn failures(&self) -> impl Iterator<Item = &HandlerOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Orders and invokes handlers with per-handler fault isolation.
pub struct HandlerExecutor<'a> {
    tracer: &'a Tracer,
}

impl<'a> HandlerExecutor<'a> {
    pub(crate) fn new(tracer: &'a Tracer) -> Self {
        Self { tracer }
    }

    /// Sort ascending by priority. The sort is stable, so equal priorities
    /// keep registration order.
    pub fn order(mut handlers: Vec<&Handler>) -> Vec<&Handler> {
        handlers.sort_by(|a, b| a.priority.total_cmp(&b.priority));
        handlers
    }

    /// Invoke every handler once, in the given order. A failing handler is
    /// recorded and skipped over; it never stops the rest.
    pub fn run(&self, planned: PlannedTransition, handlers: &[&Handler]) -> TransitionReport {
        let started_at = Utc::now();
        let total = handlers.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, handler) in handlers.iter().enumerate() {
            self.tracer.emit(|| TraceEvent::HandlerExecuting {
                index: index + 1,
                total,
                priority: handler.priority,
                comment: handler.comment.clone(),
            });

            let status = match invoke(&handler.callback) {
                Ok(()) => OutcomeStatus::Completed,
                Err(error) => {
                    self.tracer.emit(|| TraceEvent::HandlerFailed {
                        handler: handler.summary(),
                        error: error.clone(),
                    });
                    OutcomeStatus::Failed { error }
                }
            };

            outcomes.push(HandlerOutcome {
                handler: handler.summary(),
                status,
            });
        }

        TransitionReport {
            change: planned.change,
            from: planned.from,
            to: planned.to,
            started_at,
            finished_at: Utc::now(),
            outcomes,
        }
    }
}

/// Run a callback, turning a panic into a `CallbackError`.
fn invoke(callback: &Callback) -> Result<(), CallbackError> {
    panic::catch_unwind(AssertUnwindSafe(|| callback.call())).unwrap_or_else(|payload| {
        Err(CallbackError::Panicked {
            message: panic_message(payload.as_ref()),
        })
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
