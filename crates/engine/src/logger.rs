// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The logger: capture into a staging buffer, debounced merges into the
//! ring store, and submission of the stored history

use crate::buffer::StagingBuffer;
use crate::error::{FlushError, SubmitError};
use crate::scheduler::{FlushScheduler, TimerKind};
use ringlog_adapters::{ConsoleSink, NullSink, Sender};
use ringlog_core::{
    render_timestamp, Captured, Clock, Config, DeliveryMode, Level, LogEntry, Serializer,
};
use ringlog_storage::{KvStore, RingError, RingStore};
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use std::time::Instant;
use tokio::sync::Notify;

/// What a call to [`Logger::submit`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The store was empty after flushing
    NothingToSubmit,
    /// Neither an explicit nor a default sender was available
    NoSender,
    /// Fire-and-forget: the send runs in the background, the store is untouched
    Spawned { entries: usize },
    /// Acknowledged and evicted through the last delivered entry
    Delivered { entries: usize, evicted: usize },
    /// The sender failed; nothing was evicted
    Rejected { entries: usize, reason: String },
}

struct Shared<K, C> {
    config: Config,
    serializer: Serializer,
    clock: C,
    // Lock order: store before buffer
    store: Mutex<RingStore<K>>,
    buffer: Mutex<StagingBuffer>,
    timers: Mutex<FlushScheduler>,
    timers_changed: Notify,
    reporter: Mutex<Arc<dyn ConsoleSink>>,
    default_sender: Mutex<Option<Arc<dyn Sender>>>,
}

/// Cheap to clone; clones share one buffer, store and timer set
pub struct Logger<K, C> {
    shared: Arc<Shared<K, C>>,
}

impl<K, C> Clone for Logger<K, C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K: KvStore + 'static, C: Clock> Logger<K, C> {
    /// Open the ring store in `kv` and arm the floor timer
    pub fn new(kv: K, config: Config, clock: C) -> Result<Self, RingError> {
        Self::with_serializer(kv, config, clock, Serializer::new())
    }

    /// Like [`Logger::new`], with converters already registered on `serializer`
    pub fn with_serializer(
        kv: K,
        config: Config,
        clock: C,
        mut serializer: Serializer,
    ) -> Result<Self, RingError> {
        if config.max_text_len.is_some() {
            serializer = serializer.with_max_text_len(config.max_text_len);
        }
        let store = RingStore::open(kv, &config)?;
        let mut timers = FlushScheduler::new();
        if let Some(floor) = config.floor() {
            timers.arm(TimerKind::Floor, clock.now() + floor);
        }
        tracing::debug!(
            capacity = config.capacity,
            stored = store.count(),
            delivery = ?config.delivery,
            "logger started"
        );
        Ok(Self {
            shared: Arc::new(Shared {
                config,
                serializer,
                clock,
                store: Mutex::new(store),
                buffer: Mutex::new(StagingBuffer::new()),
                timers: Mutex::new(timers),
                timers_changed: Notify::new(),
                reporter: Mutex::new(Arc::new(NullSink)),
                default_sender: Mutex::new(None),
            }),
        })
    }

    /// Sender used by [`Logger::submit`] when none is passed
    pub fn with_default_sender(self, sender: Arc<dyn Sender>) -> Self {
        self.set_default_sender(Some(sender));
        self
    }

    pub fn set_default_sender(&self, sender: Option<Arc<dyn Sender>>) {
        *lock(&self.shared.default_sender) = sender;
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    pub fn clock(&self) -> &C {
        &self.shared.clock
    }

    pub fn serializer(&self) -> &Serializer {
        &self.shared.serializer
    }

    /// Entries captured but not yet merged into the store
    pub fn staged(&self) -> usize {
        self.buffer().len()
    }

    /// Occupied store slots
    pub fn stored(&self) -> usize {
        self.store().count()
    }

    /// Stored entries, oldest first
    pub fn entries(&self) -> Result<Vec<LogEntry>, RingError> {
        let texts = self.store().read_all()?;
        Ok(texts.iter().map(|t| LogEntry::from_stored(t)).collect())
    }

    /// Drop everything staged and stored
    pub fn clear(&self) -> Result<(), RingError> {
        let mut store = self.store();
        self.buffer().take();
        store.clear()?;
        tracing::info!("log history cleared");
        Ok(())
    }

    /// Record one console-style call. Never fails.
    pub fn capture(&self, level: Level, args: &[Captured]) {
        let date = render_timestamp(self.shared.clock.wall());
        let entry = self.shared.serializer.entry(level, args, date);
        let text = self.shared.serializer.encode_entry(&entry);
        self.buffer().push(text);

        let fire_at = self.shared.clock.now() + self.shared.config.debounce_interval;
        self.timers().arm(TimerKind::Debounce, fire_at);
        self.shared.timers_changed.notify_one();
    }

    /// Merge staged entries into the store, in capture order. Returns the
    /// number merged. On failure they stay staged for the next flush.
    pub fn flush(&self) -> Result<usize, FlushError> {
        self.flush_locked(self.store())
    }

    /// Flush unless the store lock is already held, as it is when a panic
    /// starts inside a store write on this thread
    pub(crate) fn try_flush(&self) -> Option<Result<usize, FlushError>> {
        let store = match self.shared.store.try_lock() {
            Ok(store) => store,
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
            Err(TryLockError::WouldBlock) => return None,
        };
        Some(self.flush_locked(store))
    }

    fn flush_locked(&self, mut store: MutexGuard<'_, RingStore<K>>) -> Result<usize, FlushError> {
        self.timers().disarm(TimerKind::Floor);

        let items = self.buffer().take();
        let result = if items.is_empty() {
            Ok(0)
        } else {
            let entries = items.len();
            match store.append(&items) {
                Ok(()) => {
                    tracing::debug!(entries, stored = store.count(), "flushed");
                    Ok(entries)
                }
                Err(source) => {
                    self.buffer().restore_front(items);
                    Err(FlushError::Merge { entries, source })
                }
            }
        };
        drop(store);

        if let Err(e) = &result {
            tracing::error!(error = %e, "flush failed, entries kept for retry");
            self.report(Level::Error, format!("ringlog: {e}"));
        }
        if let Some(floor) = self.shared.config.floor() {
            let fire_at = self.shared.clock.now() + floor;
            self.timers().arm(TimerKind::Floor, fire_at);
        }
        self.shared.timers_changed.notify_one();
        result
    }

    /// Fire due timers against the clock; any fired timer triggers one flush
    pub fn tick(&self) -> Vec<TimerKind> {
        let fired = self.timers().poll(self.shared.clock.now());
        if !fired.is_empty() {
            tracing::debug!(?fired, "flush timers fired");
            // Failures are logged and reported by flush itself
            if self.flush().is_err() {
                tracing::debug!(staged = self.staged(), "timer flush will be retried");
            }
        }
        fired
    }

    /// When the next timer is due, if any is armed
    pub fn next_fire_time(&self) -> Option<Instant> {
        self.timers().next_fire_time()
    }

    /// Resolves after a capture or flush has re-armed a timer
    pub(crate) async fn timers_changed(&self) {
        self.shared.timers_changed.notified().await;
    }

    /// Flush, then hand the stored history to `sender` (or the default one)
    pub async fn submit(
        &self,
        sender: Option<Arc<dyn Sender>>,
    ) -> Result<SubmitOutcome, SubmitError> {
        self.flush()?;
        let entries = match self.entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(error = %e, "could not read stored entries for submission");
                self.report(Level::Error, format!("ringlog: {e}"));
                return Err(SubmitError::Read(e));
            }
        };
        if entries.is_empty() {
            tracing::info!("nothing to submit");
            self.report(Level::Log, "nothing to submit".to_string());
            return Ok(SubmitOutcome::NothingToSubmit);
        }

        let Some(sender) = sender.or_else(|| lock(&self.shared.default_sender).clone()) else {
            tracing::warn!(entries = entries.len(), "no sender configured");
            return Ok(SubmitOutcome::NoSender);
        };

        let count = entries.len();
        match self.shared.config.delivery {
            DeliveryMode::FireAndForget => {
                let send = async move {
                    if let Err(e) = sender.send(&entries).await {
                        tracing::warn!(entries = entries.len(), error = %e, "background submission failed");
                    }
                };
                match tokio::runtime::Handle::try_current() {
                    Ok(handle) => {
                        handle.spawn(send);
                    }
                    Err(_) => send.await,
                }
                Ok(SubmitOutcome::Spawned { entries: count })
            }
            DeliveryMode::Acknowledged => match sender.send(&entries).await {
                Ok(()) => {
                    let evicted = match entries.last() {
                        Some(last) => self.evict_delivered(last)?,
                        None => 0,
                    };
                    tracing::info!(entries = count, evicted, "submission acknowledged");
                    Ok(SubmitOutcome::Delivered {
                        entries: count,
                        evicted,
                    })
                }
                Err(e) => {
                    tracing::warn!(entries = count, error = %e, "submission rejected, store kept");
                    Ok(SubmitOutcome::Rejected {
                        entries: count,
                        reason: e.to_string(),
                    })
                }
            },
        }
    }

    /// Evict through the newest stored copy of `last`. The store may have
    /// moved on while the sender ran, so the slot is found again by content.
    fn evict_delivered(&self, last: &LogEntry) -> Result<usize, SubmitError> {
        let mut store = self.store();
        let slots = store.read_slots().map_err(SubmitError::Evict)?;
        let found = slots
            .iter()
            .rev()
            .find(|(_, text)| LogEntry::from_stored(text).same_as(last))
            .map(|(slot, _)| *slot);
        match found {
            Some(slot) => store.evict_through(slot).map_err(SubmitError::Evict),
            None => {
                tracing::warn!("last submitted entry is no longer stored, skipping eviction");
                Ok(0)
            }
        }
    }

    pub(crate) fn set_reporter(&self, sink: Arc<dyn ConsoleSink>) {
        *lock(&self.shared.reporter) = sink;
    }

    /// Tell the user through the original console, bypassing capture
    fn report(&self, level: Level, message: String) {
        let sink = Arc::clone(&lock(&self.shared.reporter));
        sink.write(level, &[Captured::String(message)]);
    }

    fn store(&self) -> MutexGuard<'_, RingStore<K>> {
        lock(&self.shared.store)
    }

    fn buffer(&self) -> MutexGuard<'_, StagingBuffer> {
        lock(&self.shared.buffer)
    }

    fn timers(&self) -> MutexGuard<'_, FlushScheduler> {
        lock(&self.shared.timers)
    }
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
