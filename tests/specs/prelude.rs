//! Test helpers for behavioral specifications.

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread::JoinHandle;
use tempfile::TempDir;

/// A temporary store directory
pub struct Store {
    dir: TempDir,
}

impl Store {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `config.toml` into the store directory
    pub fn config(&self, toml: &str) -> &Self {
        std::fs::write(self.path().join("config.toml"), toml).unwrap();
        self
    }

    /// `ringlog --dir <store>`
    pub fn ringlog(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("ringlog").unwrap();
        cmd.arg("--dir").arg(self.path()).env_remove("RINGLOG_LOG");
        CliBuilder { cmd }
    }

    /// Log `message` at the default level
    pub fn log(&self, message: &str) {
        self.ringlog().args(&["log", message]).passes();
    }

    /// Stored entries as `show --format json` reports them
    pub fn entries(&self) -> Vec<serde_json::Value> {
        let out = self
            .ringlog()
            .args(&["show", "--format", "json"])
            .passes()
            .stdout();
        serde_json::from_str(&out).unwrap()
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    pub fn passes(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().success())
    }

    pub fn fails(mut self) -> RunAssert {
        RunAssert(self.cmd.assert().failure())
    }
}

pub struct RunAssert(Assert);

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.0.get_output().stderr).to_string()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        Self(self.0.stdout(predicates::str::contains(expected)))
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self(self.0.stdout(predicates::str::contains(unexpected).not()))
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self(self.0.stderr(predicates::str::contains(expected)))
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }
}

/// A one-shot HTTP collector answering with `status`
pub struct Collector {
    pub url: String,
    handle: JoinHandle<String>,
}

impl Collector {
    pub fn start(status: u16) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/logs", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap())
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response =
                format!("HTTP/1.1 {status} X\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).to_string()
        });
        Self { url, handle }
    }

    /// Wait for the request and return its JSON body
    pub fn body(self) -> Vec<serde_json::Value> {
        let request = self.handle.join().unwrap();
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        serde_json::from_str(body).unwrap()
    }
}

/// A local URL nothing listens on
pub fn unreachable_url() -> String {
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    format!("http://127.0.0.1:{port}/logs")
}
