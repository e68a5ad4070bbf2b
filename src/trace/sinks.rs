//! Ready-made trace sinks.

use super::{TraceEvent, TraceSink};
use serde::Serialize;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Forwards events to the `tracing` ecosystem.
///
/// Rejections and callback failures are logged at `warn`, everything else
/// at `debug`. Every record carries the engine name in the `instance` field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn record(&self, instance: &str, event: &TraceEvent) {
        match event {
            TraceEvent::HandlerAdded { handler } => {
                tracing::debug!(instance, "added {}", handler);
            }
            TraceEvent::HandlerRejected {
                change,
                violations,
                ..
            } => {
                for violation in violations {
                    tracing::warn!(instance, change = %change, "handler rejected: {}", violation);
                }
            }
            TraceEvent::HandlerRemoved { count, matched } => {
                tracing::debug!(instance, count, "removed {} handlers", count);
                for handler in matched {
                    tracing::trace!(instance, "removed {}", handler);
                }
            }
            TraceEvent::RemovalCriteriaEmpty => {
                tracing::warn!(instance, "no criteria provided to remove any state handler");
            }
            TraceEvent::TransitionRejectedCore { change, state } => {
                tracing::warn!(
                    instance,
                    change = %change,
                    state = %state,
                    "core change can not be triggered externally"
                );
            }
            TraceEvent::TransitionIgnored { change, from } => {
                tracing::debug!(instance, change = %change, from = %from, "event ignored");
            }
            TraceEvent::TransitionPlanned {
                change,
                from,
                to,
                handlers,
            } => {
                tracing::debug!(
                    instance,
                    change = %change,
                    from = %from,
                    to = %to,
                    handlers = handlers.len(),
                    "transition planned"
                );
            }
            TraceEvent::HandlerExecuting {
                index,
                total,
                priority,
                comment,
            } => {
                tracing::debug!(
                    instance,
                    "exec {:>2} of {:>2} priority {:>5.2} {}",
                    index,
                    total,
                    priority,
                    comment.as_deref().unwrap_or_default()
                );
            }
            TraceEvent::HandlerFailed { handler, error } => {
                tracing::warn!(instance, "failed to run {}: {}", handler, error);
            }
            TraceEvent::TransitionCompleted { report } => {
                tracing::debug!(
                    instance,
                    change = %report.change,
                    from = %report.from,
                    to = %report.to,
                    failures = report.failures().count(),
                    "transition done"
                );
            }
            TraceEvent::HistoryTrimmed { evicted, capacity } => {
                tracing::debug!(
                    instance,
                    evicted = %evicted,
                    capacity,
                    "history capacity reached, removed oldest record"
                );
            }
        }
    }
}

#[derive(Debug, Default)]
struct Recorded {
    instances: Vec<String>,
    events: Vec<TraceEvent>,
}

/// Keeps every event in memory. Clones share one buffer.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<Recorded>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.lock().events.clone()
    }

    /// Names of the emitting engines, one per event.
    pub fn instances(&self) -> Vec<String> {
        self.lock().instances.clone()
    }

    /// Event kinds in emission order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.lock().events.iter().map(TraceEvent::kind).collect()
    }

    pub fn clear(&self) {
        let mut recorded = self.lock();
        recorded.instances.clear();
        recorded.events.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TraceSink for MemorySink {
    fn record(&self, instance: &str, event: &TraceEvent) {
        let mut recorded = self.lock();
        recorded.instances.push(instance.to_string());
        recorded.events.push(event.clone());
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    instance: &'a str,
    #[serde(flatten)]
    event: &'a TraceEvent,
}

/// Writes one JSON object per event, newline separated.
///
/// Write failures are logged through `tracing` and otherwise dropped.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> TraceSink for JsonLinesSink<W> {
    fn record(&self, instance: &str, event: &TraceEvent) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let line = JsonLine { instance, event };
        let result = serde_json::to_writer(&mut *writer, &line)
            .map_err(std::io::Error::from)
            .and_then(|()| writer.write_all(b"\n"));
        if let Err(e) = result {
            tracing::warn!(instance, "failed to write trace event: {}", e);
        }
    }
}
