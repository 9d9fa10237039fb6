//! Routes `tracing` events from dependencies into the service logger.

use std::fmt;

use serde_json::Value;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::logging::{Attr, Level, Logger, Record};

/// A tracing layer that re-emits events through a [`Logger`].
pub struct HandlerLayer {
    log: Logger,
}

impl HandlerLayer {
    pub fn new(log: Logger) -> Self {
        Self { log }
    }
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    attrs: Vec<Attr>,
}

impl FieldCollector {
    fn record_value(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            if self.message.is_none() {
                self.message = Some(match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                });
            }
        } else {
            self.attrs.push(Attr::new(field.name(), value));
        }
    }
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, Value::String(format!("{value:?}")));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, Value::from(value));
    }
}

impl<S: Subscriber> Layer<S> for HandlerLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Level::from(*metadata.level());
        if !self.log.enabled(level) {
            return;
        }

        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        let message = collector
            .message
            .unwrap_or_else(|| metadata.name().to_string());
        let record = Record::new(level, message)
            .with_attrs([Attr::new("target", metadata.target())])
            .with_attrs(collector.attrs);
        self.log.log_record(&record);
    }
}

/// Install the global tracing subscriber, forwarding into `log`.
///
/// Reads the filter from the RUST_LOG environment variable.
/// Defaults to `info`.
pub fn init_tracing(log: &Logger) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(HandlerLayer::new(log.clone()))
        .init();
}
