//! Helpers shared by the unit tests.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

/// The fields of one recorded event, values formatted with `Debug`.
pub(crate) type RecordedFields = HashMap<String, String>;

/// Records every event emitted on the current thread while its guard is alive.
#[derive(Clone, Default)]
pub(crate) struct EventRecorder {
    events: Arc<Mutex<Vec<RecordedFields>>>,
}

impl EventRecorder {
    /// Installs the recorder as the default subscriber of the current thread.
    pub(crate) fn install() -> (Self, DefaultGuard) {
        let recorder = Self::default();
        let subscriber = Registry::default().with(recorder.clone());
        let guard = tracing::subscriber::set_default(subscriber);
        (recorder, guard)
    }

    /// Messages of all recorded events, oldest first.
    pub(crate) fn messages(&self) -> Vec<String> {
        let events = self.events.lock().unwrap();
        events.iter().filter_map(|fields| fields.get("message").cloned()).collect()
    }

    /// Events whose message equals `message`, oldest first.
    pub(crate) fn with_message(&self, message: &str) -> Vec<RecordedFields> {
        let events = self.events.lock().unwrap();
        events.iter().filter(|fields| fields.get("message").map(String::as_str) == Some(message)).cloned().collect()
    }
}

impl<S: Subscriber> Layer<S> for EventRecorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(visitor.fields);
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: RecordedFields,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.fields.insert(field.name().to_owned(), format!("{value:?}"));
    }
}
