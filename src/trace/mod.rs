//! Structured trace events emitted by the engine.
//!
//! Tracing is purely observational. An engine without a sink never builds
//! events at all, and an engine with one behaves exactly the same.

mod sinks;

pub use sinks::{JsonLinesSink, MemorySink, TracingSink};

use crate::core::{CallbackError, ChangeName, HandlerSummary, StateId};
use crate::engine::TransitionReport;
use crate::registry::RegistrationError;
use serde::Serialize;

/// Something the engine did or refused to do.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    HandlerAdded {
        handler: HandlerSummary,
    },
    HandlerRejected {
        change: ChangeName,
        from: Option<StateId>,
        to: Option<StateId>,
        violations: Vec<RegistrationError>,
    },
    HandlerRemoved {
        count: usize,
        matched: Vec<HandlerSummary>,
    },
    RemovalCriteriaEmpty,
    TransitionRejectedCore {
        change: ChangeName,
        state: StateId,
    },
    TransitionIgnored {
        change: ChangeName,
        from: StateId,
    },
    TransitionPlanned {
        change: ChangeName,
        from: StateId,
        to: StateId,
        handlers: Vec<HandlerSummary>,
    },
    /// `index` is one-based.
    HandlerExecuting {
        index: usize,
        total: usize,
        priority: f64,
        comment: Option<String>,
    },
    HandlerFailed {
        handler: HandlerSummary,
        error: CallbackError,
    },
    TransitionCompleted {
        report: TransitionReport,
    },
    HistoryTrimmed {
        evicted: StateId,
        capacity: usize,
    },
}

impl TraceEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HandlerAdded { .. } => "handler_added",
            Self::HandlerRejected { .. } => "handler_rejected",
            Self::HandlerRemoved { .. } => "handler_removed",
            Self::RemovalCriteriaEmpty => "removal_criteria_empty",
            Self::TransitionRejectedCore { .. } => "transition_rejected_core",
            Self::TransitionIgnored { .. } => "transition_ignored",
            Self::TransitionPlanned { .. } => "transition_planned",
            Self::HandlerExecuting { .. } => "handler_executing",
            Self::HandlerFailed { .. } => "handler_failed",
            Self::TransitionCompleted { .. } => "transition_completed",
            Self::HistoryTrimmed { .. } => "history_trimmed",
        }
    }
}

/// Consumer of trace events.
///
/// `instance` is the emitting engine's name.
pub trait TraceSink: Send + Sync {
    fn record(&self, instance: &str, event: &TraceEvent);
}

/// Engine name paired with its optional sink.
pub(crate) struct Tracer {
    instance: String,
    sink: Option<Box<dyn TraceSink>>,
}

impl Tracer {
    pub(crate) fn new(instance: String, sink: Option<Box<dyn TraceSink>>) -> Self {
        Self { instance, sink }
    }

    pub(crate) fn instance(&self) -> &str {
        &self.instance
    }

    /// Build and record an event, only if a sink is attached.
    pub(crate) fn emit(&self, event: impl FnOnce() -> TraceEvent) {
        if let Some(sink) = &self.sink {
            sink.record(&self.instance, &event());
        }
    }
}

impl std::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracer")
            .field("instance", &self.instance)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
