//! Tests for the diagnostic events emitted while building messages.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use herald::{BuildOptions, Bundle, StructuredMessage, vars};
use tracing::field::{Field, Visit};
use tracing::subscriber::with_default;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry;

const BATTLE: &str = "\
battle-result =
    .title = Battle won!
    .field-damage-name = Damage
    .field-damage-value = { $amount }
";

#[derive(Debug)]
struct RecordedEvent {
    level: Level,
    fields: BTreeMap<String, String>,
}

#[derive(Default)]
struct FieldRecorder(BTreeMap<String, String>);

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

#[derive(Clone, Default)]
struct EventLog(Arc<Mutex<Vec<RecordedEvent>>>);

impl<S: Subscriber> Layer<S> for EventLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        self.0.lock().unwrap().push(RecordedEvent {
            level: *event.metadata().level(),
            fields: recorder.0,
        });
    }
}

impl EventLog {
    fn errors(&self) -> Vec<BTreeMap<String, String>> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.level == Level::ERROR)
            .map(|event| event.fields.clone())
            .collect()
    }
}

/// Run `f` with every event on this thread recorded.
fn capture<T>(f: impl FnOnce() -> T) -> (T, EventLog) {
    let log = EventLog::default();
    let result = with_default(registry().with(log.clone()), f);
    (result, log)
}

fn bundle() -> Bundle {
    let mut bundle = Bundle::new();
    bundle.load_resource_str(BATTLE).unwrap();
    bundle
}

// =========================================================================
// Fallback Events
// =========================================================================

#[test]
fn fallback_emits_one_error_event_with_context() {
    let bundle = bundle();
    let (message, log) = capture(|| {
        bundle
            .message_builder()
            .build("battle-result", &BuildOptions::default())
    });
    assert_eq!(message, StructuredMessage::fallback("Localization error"));

    let errors = log.errors();
    assert_eq!(errors.len(), 1, "{errors:?}");
    let fields = &errors[0];
    assert_eq!(fields["message_id"], "battle-result");
    assert_eq!(fields["stage"], "fields");
    assert_eq!(fields["field"], "damage");
    assert!(fields["error"].contains("unknown variable '$amount'"));
}

#[test]
fn catalog_miss_event_has_no_field() {
    let bundle = bundle();
    let (_, log) = capture(|| {
        bundle
            .message_builder()
            .build("missing", &BuildOptions::default())
    });

    let errors = log.errors();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0]["message_id"], "missing");
    assert_eq!(errors[0]["stage"], "init");
    assert!(!errors[0].contains_key("field"));
}

#[test]
fn resolve_does_not_log_errors() {
    let bundle = bundle();
    let (_, log) = capture(|| {
        bundle
            .message_builder()
            .resolve("battle-result", &BuildOptions::default())
    });
    assert!(log.errors().is_empty());
}

// =========================================================================
// Successful Builds
// =========================================================================

#[test]
fn successful_build_logs_no_errors() {
    let bundle = bundle();
    let options = BuildOptions::builder()
        .variables(vars! { "amount" => 42 })
        .build();
    let (message, log) = capture(|| bundle.message_builder().build("battle-result", &options));
    assert_eq!(message.fields.len(), 1);
    assert!(log.errors().is_empty());

    let events = log.0.lock().unwrap();
    let debug = events
        .iter()
        .find(|event| event.level == Level::DEBUG)
        .unwrap();
    assert_eq!(debug.fields["message_id"], "battle-result");
    assert_eq!(debug.fields["fields"], "1");
}
