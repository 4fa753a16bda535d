// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A `tracing` layer that captures events into the logger

use crate::logger::Logger;
use ringlog_core::{Captured, Clock, Level};
use ringlog_storage::KvStore;
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Records `tracing` events at or above a level as log entries.
///
/// Events from ringlog's own crates are skipped so flush and submit
/// diagnostics never feed back into the store.
pub struct CaptureLayer<K, C> {
    logger: Logger<K, C>,
    max_level: tracing::Level,
}

impl<K, C> CaptureLayer<K, C> {
    /// Capture `INFO` and more severe events
    pub fn new(logger: Logger<K, C>) -> Self {
        Self {
            logger,
            max_level: tracing::Level::INFO,
        }
    }

    /// Capture events at `level` and more severe
    pub fn with_max_level(mut self, level: tracing::Level) -> Self {
        self.max_level = level;
        self
    }
}

impl<S, K, C> Layer<S> for CaptureLayer<K, C>
where
    S: Subscriber,
    K: KvStore + 'static,
    C: Clock,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > self.max_level || metadata.target().starts_with("ringlog") {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut args = vec![Captured::String(format!(
            "{}: {}",
            metadata.target(),
            visitor.message
        ))];
        if !visitor.fields.is_empty() {
            args.push(Captured::Json(Value::Object(visitor.fields)));
        }
        self.logger.capture(level_of(metadata.level()), &args);
    }
}

fn level_of(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warn,
        _ => Level::Log,
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.insert(field, Value::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.insert(field, Value::from(format!("{value:?}")));
        }
    }
}
