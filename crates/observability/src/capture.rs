//! In-memory event capture
//!
//! A `tracing_subscriber::Layer` that keeps every event so tests can assert on
//! what a component logged without installing a global subscriber.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::field::{Field, Visit};
use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// One recorded event
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// Field value rendered as text
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Shared event sink
#[derive(Debug, Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch whose only layer is this capture
    pub fn dispatch(&self) -> Dispatch {
        Dispatch::new(tracing_subscriber::registry().with(self.clone()))
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().clone()
    }

    /// Number of events at exactly `level`
    pub fn count_at(&self, level: Level) -> usize {
        self.lock().iter().filter(|e| e.level == level).count()
    }

    /// Whether any message or field value contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|e| {
            e.message.contains(needle) || e.fields.values().any(|v| v.contains(needle))
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<CapturedEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldCollector::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        self.lock().push(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldCollector {
    message: String,
    fields: BTreeMap<String, String>,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .insert(field.name().to_string(), value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.insert(field.name().to_string(), rendered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_level_and_fields() {
        let capture = EventCapture::new();
        tracing::dispatcher::with_default(&capture.dispatch(), || {
            tracing::warn!(period = 0, operation = "peak_windspeed", "invalid period");
            tracing::info!("fine");
        });

        let events = capture.events();
        assert_eq!(events.len(), 2);
        assert_eq!(capture.count_at(Level::WARN), 1);
        assert_eq!(events[0].message, "invalid period");
        assert_eq!(events[0].field("operation"), Some("peak_windspeed"));
        assert_eq!(events[0].field("period"), Some("0"));
    }
}
