// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use ringlog_core::Level;

fn entry(txt: &str) -> LogEntry {
    LogEntry::new("2024-01-01 00:00:00.000", txt, Level::Log)
}

#[tokio::test]
async fn fake_sender_records_batches() {
    let sender = FakeSender::new();
    sender.send(&[entry("a"), entry("b")]).await.unwrap();
    sender.send(&[entry("c")]).await.unwrap();

    let batches = sender.batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0][1].txt, "b");
    assert_eq!(batches[1][0].txt, "c");
}

#[tokio::test]
async fn rejecting_sender_fails_but_still_records() {
    let sender = FakeSender::rejecting("collector down");
    let err = sender.send(&[entry("a")]).await.unwrap_err();
    assert!(matches!(err, SendError::Rejected(ref r) if r == "collector down"));
    assert_eq!(sender.call_count(), 1);
}

#[tokio::test]
async fn outcome_can_change_between_calls() {
    let sender = FakeSender::rejecting("nope");
    assert!(sender.send(&[entry("a")]).await.is_err());
    sender.set_outcome(SendOutcome::Accept);
    assert!(sender.send(&[entry("a")]).await.is_ok());
}

#[tokio::test]
async fn gated_sender_waits_for_release() {
    let sender = FakeSender::gated();
    let task = tokio::spawn({
        let sender = sender.clone();
        async move { sender.send(&[entry("a")]).await }
    });

    tokio::task::yield_now().await;
    assert!(!task.is_finished());

    sender.release();
    task.await.unwrap().unwrap();
}
