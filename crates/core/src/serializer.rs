// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stable textual rendering of captured values
//!
//! Serialization never fails from the caller's point of view: anything that
//! cannot be encoded (a reference cycle, runaway nesting) renders as the
//! sentinel `__json-err__ : <reason>`.
//!
//! Values without a JSON form are converted first, through a registry keyed
//! by [`Captured::kind`]. Built-in conversions cover the standard kinds;
//! callers register converters for their own `Custom` kinds or to override
//! a built-in.

use crate::captured::{Captured, ErrorEvent, ErrorValue, FileInfo, SharedValue};
use crate::entry::{ErrorDetails, Level, LogEntry, SourceLocation};
use regex::Regex;
use serde_json::{Map, Number, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Prefix of the text produced when a value cannot be serialized
pub const SENTINEL: &str = "__json-err__";

/// Default bound on nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Converts a value into a JSON-safe shape. Returning `None` falls through
/// to the built-in conversion.
pub type Converter = Arc<dyn Fn(&Captured) -> Option<Value> + Send + Sync>;

/// Reasons a value cannot be encoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    #[error("converting circular structure to JSON")]
    Cyclic,
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
    #[error("json error: {0}")]
    Json(String),
}

/// Render a failure as the sentinel string
pub fn sentinel(err: &SerializeError) -> String {
    format!("{SENTINEL} : {err}")
}

#[derive(Clone)]
pub struct Serializer {
    converters: HashMap<String, Converter>,
    max_depth: usize,
    max_text_len: Option<usize>,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_text_len: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Truncate rendered payloads longer than `len` bytes
    pub fn with_max_text_len(mut self, len: Option<usize>) -> Self {
        self.max_text_len = len;
        self
    }

    /// Register a converter for a kind discriminator, replacing any previous one
    pub fn register<F>(&mut self, kind: impl Into<String>, converter: F)
    where
        F: Fn(&Captured) -> Option<Value> + Send + Sync + 'static,
    {
        self.converters.insert(kind.into(), Arc::new(converter));
    }

    /// Render a value as text. Never fails.
    pub fn serialize(&self, value: &Captured) -> String {
        if matches!(value, Captured::Undefined) {
            return "Undefined".to_string();
        }
        match self
            .to_json(value)
            .and_then(|v| serde_json::to_string(&v).map_err(|e| SerializeError::Json(e.to_string())))
        {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(kind = value.kind(), error = %e, "value not serializable");
                sentinel(&e)
            }
        }
    }

    /// Convert a value to its JSON-safe shape
    pub fn to_json(&self, value: &Captured) -> Result<Value, SerializeError> {
        let mut visiting = HashSet::new();
        self.convert(value, 0, &mut visiting)
    }

    /// Build the entry for one console-style call
    pub fn entry(&self, level: Level, args: &[Captured], date: String) -> LogEntry {
        let txt = self.truncate(self.serialize(&Captured::Array(args.to_vec())));
        let details = args.iter().flat_map(|a| self.error_details(a)).collect();
        LogEntry::new(date, txt, level).with_error_details(details)
    }

    /// Stored text of an entry. Never fails.
    pub fn encode_entry(&self, entry: &LogEntry) -> String {
        serde_json::to_string(entry)
            .unwrap_or_else(|e| sentinel(&SerializeError::Json(e.to_string())))
    }

    /// Error details for error-like values, in argument order
    pub fn error_details(&self, value: &Captured) -> Vec<ErrorDetails> {
        let mut visiting = HashSet::new();
        let mut out = Vec::new();
        collect_details(value, &mut visiting, &mut out);
        out
    }

    fn truncate(&self, text: String) -> String {
        let Some(max) = self.max_text_len else {
            return text;
        };
        if text.len() <= max {
            return text;
        }
        let mut cut = max;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        let dropped = text.len() - cut;
        format!("{}…[truncated {} bytes]", &text[..cut], dropped)
    }

    fn convert(
        &self,
        value: &Captured,
        depth: usize,
        visiting: &mut HashSet<usize>,
    ) -> Result<Value, SerializeError> {
        if depth > self.max_depth {
            return Err(SerializeError::TooDeep(self.max_depth));
        }
        if let Some(converter) = self.converters.get(value.kind()) {
            if let Some(converted) = converter(value) {
                return Ok(converted);
            }
        }

        let next = depth + 1;
        Ok(match value {
            Captured::Undefined | Captured::Null => Value::Null,
            Captured::Bool(b) => Value::Bool(*b),
            Captured::Number(n) => number(*n),
            Captured::String(s) => Value::String(s.clone()),
            Captured::Json(v) => v.clone(),
            Captured::Array(items) | Captured::Set(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.convert(item, next, visiting))
                    .collect::<Result<_, _>>()?,
            ),
            Captured::Object(fields) | Captured::FormData(fields) => {
                let mut map = Map::new();
                for (key, field) in fields {
                    // Undefined members are dropped, as in JSON.stringify
                    if matches!(field, Captured::Undefined) {
                        continue;
                    }
                    map.insert(key.clone(), self.convert(field, next, visiting)?);
                }
                Value::Object(map)
            }
            Captured::Map(entries) => {
                let mut map = Map::new();
                for (key, entry) in entries {
                    let key = self.map_key(key, next, visiting)?;
                    map.insert(key, self.convert(entry, next, visiting)?);
                }
                Value::Object(map)
            }
            Captured::Function { source, .. } => Value::String(source.clone()),
            Captured::Symbol(description) => Value::String(format!("Symbol({description})")),
            Captured::Element { outer_html } => Value::String(outer_html.clone()),
            Captured::BigInt(digits) => Value::String(digits.clone()),
            Captured::Bytes(bytes) => serde_json::json!({ "type": "Bytes", "len": bytes.len() }),
            Captured::File(file) => file_json(file),
            Captured::FileList(files) => Value::Array(files.iter().map(file_json).collect()),
            Captured::Date(at) => Value::String(at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
            Captured::RegExp { source, flags } => Value::String(format!("/{source}/{flags}")),
            Captured::Error(err) => error_json(err),
            Captured::ErrorEvent(event) => Value::String(error_event_text(event)),
            Captured::Rejection(reason) => self.convert(reason, next, visiting)?,
            Captured::Shared(shared) => self.convert_shared(shared, next, visiting)?,
            Captured::Custom { payload, .. } => payload.clone(),
        })
    }

    fn convert_shared(
        &self,
        shared: &SharedValue,
        depth: usize,
        visiting: &mut HashSet<usize>,
    ) -> Result<Value, SerializeError> {
        let address = shared.address();
        if !visiting.insert(address) {
            return Err(SerializeError::Cyclic);
        }
        let result = {
            let inner = shared.lock();
            self.convert(&inner, depth, visiting)
        };
        visiting.remove(&address);
        result
    }

    fn map_key(
        &self,
        key: &Captured,
        depth: usize,
        visiting: &mut HashSet<usize>,
    ) -> Result<String, SerializeError> {
        Ok(match self.convert(key, depth, visiting)? {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

fn number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Value::Number(Number::from(n as i64));
    }
    // NaN and infinities become null, as in JSON.stringify
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

fn file_json(file: &FileInfo) -> Value {
    serde_json::json!({
        "lastModified": file.last_modified,
        "name": file.name,
        "size": file.size,
        "type": file.mime_type,
        "webkitRelativePath": file.relative_path,
    })
}

fn error_json(err: &ErrorValue) -> Value {
    serde_json::json!({
        "name": err.name,
        "message": err.message,
        "stack": err.stack,
    })
}

fn error_event_text(event: &ErrorEvent) -> String {
    match &event.error {
        Some(err) => format!("message: {}\n stack: {}", err.message, err.stack),
        None => format!(
            "message: {}\n stack: {} {}:{}",
            event.message, event.filename, event.lineno, event.colno
        ),
    }
}

fn collect_details(value: &Captured, visiting: &mut HashSet<usize>, out: &mut Vec<ErrorDetails>) {
    match value {
        Captured::Error(err) => out.push(details_of(err)),
        Captured::ErrorEvent(event) => match &event.error {
            Some(err) => out.push(details_of(err)),
            None => {
                let mut source_locations = Vec::new();
                if !event.filename.is_empty() {
                    source_locations.push(SourceLocation {
                        file: event.filename.clone(),
                        line: event.lineno,
                        column: event.colno,
                    });
                }
                out.push(ErrorDetails {
                    message: event.message.clone(),
                    stack: format!("{} {}:{}", event.filename, event.lineno, event.colno),
                    source_locations,
                });
            }
        },
        Captured::Rejection(reason) => collect_details(reason, visiting, out),
        Captured::Array(items) => {
            for item in items {
                collect_details(item, visiting, out);
            }
        }
        Captured::Shared(shared) => {
            if visiting.insert(shared.address()) {
                let inner = shared.lock().clone();
                collect_details(&inner, visiting, out);
            }
        }
        _ => {}
    }
}

fn details_of(err: &ErrorValue) -> ErrorDetails {
    ErrorDetails {
        message: err.message.clone(),
        stack: err.stack.clone(),
        source_locations: source_locations(&err.stack),
    }
}

fn location_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"([A-Za-z][A-Za-z0-9+.\-]*://[^\s()]+?):(\d+):(\d+)").ok())
        .as_ref()
}

/// Find every `scheme://host/path:line:column` in a stack trace, in order
pub fn source_locations(stack: &str) -> Vec<SourceLocation> {
    let Some(pattern) = location_pattern() else {
        return Vec::new();
    };
    pattern
        .captures_iter(stack)
        .filter_map(|caps| {
            Some(SourceLocation {
                file: caps.get(1)?.as_str().to_string(),
                line: caps.get(2)?.as_str().parse().ok()?,
                column: caps.get(3)?.as_str().parse().ok()?,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "serializer_tests.rs"]
mod tests;
