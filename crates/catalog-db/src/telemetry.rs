//! Span telemetry port.
//!
//! Repositories and the batch coordinator open a span around every store
//! round-trip: `db-get-<kind>` with the record id, `db-query-<kinds>` and
//! `get-<kinds>` with the query attributes. The port keeps that contract
//! independent of any tracing backend. [`TracingTelemetry`] maps it onto
//! `tracing` spans that callers instrument the store future with, so store
//! events land inside them. [`RecordingTelemetry`] keeps spans in memory for
//! tests.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::Span;

pub trait Telemetry: Send + Sync {
    /// Open a span. It stays open until [`ActiveSpan::end`] is called.
    fn start_span(&self, name: &str, attributes: &[(&'static str, String)]) -> Box<dyn ActiveSpan>;
}

pub trait ActiveSpan: Send {
    /// The `tracing` span to instrument work with while this span is open.
    fn span(&self) -> Span {
        Span::none()
    }

    fn end(self: Box<Self>);
}

/// Emits a `tracing` span named `catalog` per telemetry span.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

struct TracingSpan {
    span: Span,
    started: Instant,
}

impl Telemetry for TracingTelemetry {
    fn start_span(&self, name: &str, attributes: &[(&'static str, String)]) -> Box<dyn ActiveSpan> {
        let attributes = attributes
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        let span = tracing::info_span!("catalog", op = name, attributes = %attributes);
        span.in_scope(|| tracing::trace!("span started"));
        Box::new(TracingSpan {
            span,
            started: Instant::now(),
        })
    }
}

impl ActiveSpan for TracingSpan {
    fn span(&self) -> Span {
        self.span.clone()
    }

    fn end(self: Box<Self>) {
        let elapsed_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.span
            .in_scope(|| tracing::debug!(elapsed_ms, "span ended"));
    }
}

/// A span captured by [`RecordingTelemetry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRecord {
    pub name: String,
    pub attributes: Vec<(&'static str, String)>,
    pub ended: bool,
}

/// Keeps every span in memory, in start order.
#[derive(Debug, Clone, Default)]
pub struct RecordingTelemetry {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
}

struct RecordedSpan {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
    index: usize,
}

impl RecordingTelemetry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the spans started so far.
    #[must_use]
    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Names of the spans started so far.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.spans().into_iter().map(|s| s.name).collect()
    }

    #[must_use]
    pub fn all_ended(&self) -> bool {
        self.spans().iter().all(|s| s.ended)
    }
}

impl Telemetry for RecordingTelemetry {
    fn start_span(&self, name: &str, attributes: &[(&'static str, String)]) -> Box<dyn ActiveSpan> {
        let index = self.spans.lock().map_or(0, |mut spans| {
            spans.push(SpanRecord {
                name: name.to_string(),
                attributes: attributes.to_vec(),
                ended: false,
            });
            spans.len() - 1
        });
        Box::new(RecordedSpan {
            spans: Arc::clone(&self.spans),
            index,
        })
    }
}

impl ActiveSpan for RecordedSpan {
    fn end(self: Box<Self>) {
        if let Ok(mut spans) = self.spans.lock()
            && let Some(span) = spans.get_mut(self.index)
        {
            span.ended = true;
        }
    }
}
