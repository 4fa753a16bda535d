// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background task that fires flush timers in real time

use crate::logger::Logger;
use ringlog_core::Clock;
use ringlog_storage::KvStore;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// How long the driver sleeps when no timer is armed
const IDLE_WAIT: Duration = Duration::from_secs(60);

/// Handle to a running timer driver. Dropping it stops the driver after a
/// final flush; [`TimerDriver::shutdown`] also waits for that flush.
pub struct TimerDriver {
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl TimerDriver {
    pub async fn shutdown(self) {
        // An Err here means the task already stopped
        let _ = self.shutdown.send(());
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "timer driver task failed");
        }
    }
}

/// Spawn a task that sleeps until the next armed timer and ticks the logger
pub fn spawn_timer_driver<K: KvStore + 'static, C: Clock>(logger: Logger<K, C>) -> TimerDriver {
    let (shutdown, mut stop) = oneshot::channel();

    let handle = tokio::spawn(async move {
        tracing::debug!("timer driver started");
        loop {
            let wait = logger
                .next_fire_time()
                .map(|at| at.saturating_duration_since(logger.clock().now()))
                .unwrap_or(IDLE_WAIT);

            tokio::select! {
                _ = &mut stop => break,
                _ = logger.timers_changed() => {}
                _ = tokio::time::sleep(wait) => {
                    logger.tick();
                }
            }
        }
        if let Err(e) = logger.flush() {
            tracing::error!(error = %e, "final flush failed");
        }
        tracing::debug!("timer driver stopped");
    });

    TimerDriver { shutdown, handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringlog_core::{Captured, Config, Level, SystemClock};
    use ringlog_storage::MemoryKv;

    async fn wait_until(mut done: impl FnMut() -> bool) -> bool {
        for _ in 0..200 {
            if done() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[tokio::test]
    async fn driver_flushes_after_debounce() {
        let config = Config::default()
            .with_debounce(Duration::from_millis(20))
            .with_floor(Duration::ZERO);
        let logger = Logger::new(MemoryKv::new(), config, SystemClock).unwrap();
        let driver = spawn_timer_driver(logger.clone());

        logger.capture(Level::Log, &[Captured::from("tick")]);
        assert!(wait_until(|| logger.stored() == 1).await);
        assert_eq!(logger.staged(), 0);

        driver.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_flushes_what_is_staged() {
        let config = Config::default()
            .with_debounce(Duration::from_secs(3600))
            .with_floor(Duration::ZERO);
        let logger = Logger::new(MemoryKv::new(), config, SystemClock).unwrap();
        let driver = spawn_timer_driver(logger.clone());

        logger.capture(Level::Warn, &[Captured::from("late")]);
        driver.shutdown().await;

        assert_eq!(logger.stored(), 1);
    }
}
