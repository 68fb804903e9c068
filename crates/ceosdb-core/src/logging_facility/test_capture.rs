//! In-memory log capture for tests
//!
//! Engine tests assert that `classify` and `seed_import` open and close their
//! boundaries, and that the orchestrator logs one `debug` event per subject.
//! The capture layer keeps every event with its fields rendered as text.

use ceosdb_core_types::schema::{FIELD_COMPONENT, FIELD_EVENT, FIELD_OP};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One captured event
///
/// `component`, `op` and `event` are lifted out of `fields` because nearly
/// every assertion filters on them.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Field value as text; `%`-formatted values appear without quotes
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Whether this is the `event` boundary of operation `op`
    pub fn is_boundary(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }
}

// Numbers and bools fall through to `record_debug`, which renders them
// without decoration. Only plain strings need their own arm.
#[derive(Default)]
struct TextFields(HashMap<String, String>);

impl Visit for TextFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = TextFields::default();
        event.record(&mut visitor);
        let fields = visitor.0;

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: fields.get(FIELD_COMPONENT).cloned(),
            op: fields.get(FIELD_OP).cloned(),
            event: fields.get(FIELD_EVENT).cloned(),
            fields,
        };
        if let Ok(mut events) = self.events.lock() {
            events.push(captured);
        }
    }
}

/// Handle on the shared capture buffer
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events logged under one op name, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// # Panics
    ///
    /// Panics when no `event` boundary was logged for `op`.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is_boundary(op, event)),
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber (once per test binary)
///
/// Tests run in parallel against the same buffer, so each test should log
/// under an op name or field value no other test uses.
///
/// ```
/// use ceosdb_core::logging_facility::test_capture::init_test_capture;
/// use ceosdb_core::{log_op_end, log_op_start};
///
/// let capture = init_test_capture();
/// log_op_start!("doc_seed_import", path = "seeds/");
/// log_op_end!("doc_seed_import", duration_ms = 5, file_count = 2);
///
/// let end = capture
///     .events_for_op("doc_seed_import")
///     .into_iter()
///     .find(|e| e.is_boundary("doc_seed_import", "end"))
///     .unwrap();
/// assert_eq!(end.field("file_count"), Some("2"));
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            let layer = CaptureLayer {
                events: events.clone(),
            };
            tracing_subscriber::registry().with(layer).init();
            TestCapture { events }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ceosdb_core_types::schema::FIELD_LABEL;

    fn event(op: &str, boundary: Option<&str>) -> CapturedEvent {
        let mut fields = HashMap::new();
        fields.insert(FIELD_LABEL.to_string(), "GEO".to_string());
        CapturedEvent {
            level: Level::DEBUG,
            component: None,
            op: Some(op.to_string()),
            event: boundary.map(str::to_string),
            fields,
        }
    }

    #[test]
    fn test_captured_event_field_lookup() {
        let event = event("classify_group", None);
        assert_eq!(event.field(FIELD_LABEL), Some("GEO"));
        assert_eq!(event.field("missing"), None);
    }

    #[test]
    fn test_is_boundary_needs_op_and_event() {
        let end = event("classify", Some("end"));
        assert!(end.is_boundary("classify", "end"));
        assert!(!end.is_boundary("classify", "start"));
        assert!(!end.is_boundary("seed_import", "end"));
        assert!(!event("classify", None).is_boundary("classify", "end"));
    }
}
