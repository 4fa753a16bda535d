// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP sender: POSTs the batch as a JSON array

use super::{SendError, Sender};
use async_trait::async_trait;
use ringlog_core::LogEntry;

#[derive(Clone)]
pub struct HttpSender {
    url: String,
    agent: ureq::Agent,
}

impl HttpSender {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Sender for HttpSender {
    async fn send(&self, entries: &[LogEntry]) -> Result<(), SendError> {
        let body = serde_json::to_string(entries)?;
        let agent = self.agent.clone();
        let url = self.url.clone();

        // ureq is blocking
        let result = tokio::task::spawn_blocking(move || {
            agent
                .post(&url)
                .header("Content-Type", "application/json")
                .send(body)
        })
        .await
        .map_err(|e| SendError::Transport(format!("send task failed: {e}")))?;

        match result {
            Ok(response) if response.status().is_success() => Ok(()),
            Ok(response) => Err(SendError::Status(response.status().as_u16())),
            Err(ureq::Error::StatusCode(code)) => Err(SendError::Status(code)),
            Err(e) => Err(SendError::Transport(e.to_string())),
        }
    }
}
