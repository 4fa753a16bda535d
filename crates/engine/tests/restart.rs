// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

//! History survives a restart over the file store

use ringlog_adapters::{FakeSender, Sender};
use ringlog_core::{Captured, Config, FakeClock, Level};
use ringlog_engine::{Logger, SubmitOutcome};
use ringlog_storage::FileKv;
use std::sync::Arc;

fn open(dir: &std::path::Path, config: Config) -> Logger<FileKv, FakeClock> {
    Logger::new(FileKv::open(dir).unwrap(), config, FakeClock::new()).unwrap()
}

#[test]
fn entries_and_indices_persist_across_loggers() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default().with_capacity(3);

    let first = open(dir.path(), config.clone());
    for n in 1..=4i64 {
        first.capture(Level::Log, &[Captured::from(n)]);
    }
    first.flush().unwrap();
    drop(first);

    let second = open(dir.path(), config);
    let texts: Vec<String> = second.entries().unwrap().into_iter().map(|e| e.txt).collect();
    assert_eq!(texts, vec!["[2]", "[3]", "[4]"]);

    second.capture(Level::Warn, &[Captured::from("after restart")]);
    second.flush().unwrap();
    let texts: Vec<String> = second.entries().unwrap().into_iter().map(|e| e.txt).collect();
    assert_eq!(texts, vec!["[3]", "[4]", r#"["after restart"]"#]);
}

#[tokio::test]
async fn acknowledged_eviction_is_durable() {
    let dir = tempfile::tempdir().unwrap();
    let logger = open(dir.path(), Config::default());
    logger.capture(Level::Error, &[Captured::from("sent")]);

    let sender = FakeSender::new();
    let outcome = logger
        .submit(Some(Arc::new(sender.clone()) as Arc<dyn Sender>))
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Delivered { entries: 1, .. }));
    drop(logger);

    let reopened = open(dir.path(), Config::default());
    assert_eq!(reopened.stored(), 0);
    assert_eq!(sender.batches().len(), 1);
}
