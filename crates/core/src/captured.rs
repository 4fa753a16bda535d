// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Values handed to the logger by event sources
//!
//! Hosts pass anything they can log: plain JSON-like data, but also values
//! with no JSON form (functions, DOM elements, maps, errors, reference cycles).
//! [`Captured`] names each of those shapes so the serializer can convert them
//! before generic encoding.

use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

/// Metadata of a host file handle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    /// Milliseconds since the Unix epoch
    pub last_modified: i64,
    pub relative_path: String,
}

/// An error object
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,
    pub stack: String,
}

impl ErrorValue {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: String::new(),
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    /// Build from a Rust error; the source chain becomes the stack text
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut stack = String::new();
        let mut source = err.source();
        while let Some(cause) = source {
            if !stack.is_empty() {
                stack.push('\n');
            }
            stack.push_str("caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        Self {
            name: "Error".to_string(),
            message: err.to_string(),
            stack,
        }
    }
}

/// A global error signal: an uncaught exception or a failed resource load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorEvent {
    pub message: String,
    pub filename: String,
    pub lineno: u32,
    pub colno: u32,
    /// The thrown error, absent for resource errors
    pub error: Option<ErrorValue>,
}

/// A reference-counted value that may be shared or form a cycle
#[derive(Debug, Clone)]
pub struct SharedValue(Arc<Mutex<Captured>>);

impl SharedValue {
    pub fn new(value: Captured) -> Self {
        Self(Arc::new(Mutex::new(value)))
    }

    /// Replace the inner value (used to close a reference cycle)
    pub fn set(&self, value: Captured) {
        *self.lock() = value;
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Captured> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Identity of the allocation, used for cycle detection
    pub(crate) fn address(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

/// A captured value
#[derive(Debug, Clone)]
pub enum Captured {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Captured>),
    Object(Vec<(String, Captured)>),
    Json(serde_json::Value),
    Function { name: String, source: String },
    /// A symbol, by description
    Symbol(String),
    Element { outer_html: String },
    /// Decimal digits of an arbitrary-precision integer
    BigInt(String),
    Bytes(Vec<u8>),
    File(FileInfo),
    FileList(Vec<FileInfo>),
    Date(DateTime<Utc>),
    RegExp { source: String, flags: String },
    Map(Vec<(Captured, Captured)>),
    Set(Vec<Captured>),
    FormData(Vec<(String, Captured)>),
    Error(ErrorValue),
    ErrorEvent(ErrorEvent),
    /// The reason of an unhandled rejection
    Rejection(Box<Captured>),
    Shared(SharedValue),
    /// A host type identified by `kind`; see `Serializer::register`
    Custom {
        kind: String,
        payload: serde_json::Value,
    },
}

impl Captured {
    /// Discriminator used to look up converters
    pub fn kind(&self) -> &str {
        match self {
            Captured::Undefined => "Undefined",
            Captured::Null => "Null",
            Captured::Bool(_) => "Boolean",
            Captured::Number(_) => "Number",
            Captured::String(_) => "String",
            Captured::Array(_) => "Array",
            Captured::Object(_) => "Object",
            Captured::Json(_) => "Json",
            Captured::Function { .. } => "Function",
            Captured::Symbol(_) => "Symbol",
            Captured::Element { .. } => "Element",
            Captured::BigInt(_) => "BigInt",
            Captured::Bytes(_) => "Bytes",
            Captured::File(_) => "File",
            Captured::FileList(_) => "FileList",
            Captured::Date(_) => "Date",
            Captured::RegExp { .. } => "RegExp",
            Captured::Map(_) => "Map",
            Captured::Set(_) => "Set",
            Captured::FormData(_) => "FormData",
            Captured::Error(_) => "Error",
            Captured::ErrorEvent(_) => "ErrorEvent",
            Captured::Rejection(_) => "Rejection",
            Captured::Shared(_) => "Shared",
            Captured::Custom { kind, .. } => kind,
        }
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Captured)>) -> Self {
        Captured::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<&str> for Captured {
    fn from(value: &str) -> Self {
        Captured::String(value.to_string())
    }
}

impl From<String> for Captured {
    fn from(value: String) -> Self {
        Captured::String(value)
    }
}

impl From<bool> for Captured {
    fn from(value: bool) -> Self {
        Captured::Bool(value)
    }
}

impl From<i64> for Captured {
    fn from(value: i64) -> Self {
        Captured::Number(value as f64)
    }
}

impl From<f64> for Captured {
    fn from(value: f64) -> Self {
        Captured::Number(value)
    }
}

impl From<serde_json::Value> for Captured {
    fn from(value: serde_json::Value) -> Self {
        Captured::Json(value)
    }
}

impl From<ErrorValue> for Captured {
    fn from(value: ErrorValue) -> Self {
        Captured::Error(value)
    }
}

impl From<ErrorEvent> for Captured {
    fn from(value: ErrorEvent) -> Self {
        Captured::ErrorEvent(value)
    }
}
