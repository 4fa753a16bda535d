// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Panic capture: records panics as error entries before the previous hook runs

use crate::console::Console;
use ringlog_core::{Clock, ErrorEvent};
use ringlog_storage::KvStore;
use std::any::Any;
use std::sync::Arc;

/// An installed panic hook. The hook stays installed until
/// [`PanicCapture::uninstall`] restores the one it replaced.
pub struct PanicCapture {
    restore: Box<dyn FnOnce() + Send>,
}

impl PanicCapture {
    /// Chain a hook in front of the current one. The panic is captured as
    /// an error entry and flushed at once, since the process may be about
    /// to exit. The flush is skipped when the panic began while the store
    /// was locked.
    pub fn install<K: KvStore + 'static, C: Clock>(console: Console<K, C>) -> Self {
        let previous = Arc::new(std::panic::take_hook());
        let chained = Arc::clone(&previous);

        std::panic::set_hook(Box::new(move |info| {
            let mut event = ErrorEvent {
                message: panic_message(info.payload()),
                ..ErrorEvent::default()
            };
            if let Some(location) = info.location() {
                event.filename = location.file().to_string();
                event.lineno = location.line();
                event.colno = location.column();
            }
            console.report_error_event(event);
            match console.logger().try_flush() {
                Some(Ok(_)) => {}
                Some(Err(e)) => tracing::error!(error = %e, "could not persist panic entry"),
                None => tracing::warn!("store busy, panic entry left staged"),
            }
            (*chained)(info);
        }));

        Self {
            restore: Box::new(move || {
                std::panic::set_hook(Box::new(move |info| (*previous)(info)));
            }),
        }
    }

    /// Put the previous hook back
    pub fn uninstall(self) {
        (self.restore)();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
