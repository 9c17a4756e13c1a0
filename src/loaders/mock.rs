// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::errors::FetchError;
use crate::traits::Fetcher;

enum Reply {
    Body(Vec<u8>),
    Status(u16),
    Transport(String),
}

struct Route {
    reply: Reply,
    delay: Duration,
}

/// A canned-response fetcher for testing.
///
/// Unknown locations answer `404 Not Found`. Delays use `tokio::time`, so
/// paused-clock tests complete deterministically in delay order.
#[derive(Default)]
pub struct MockFetcher {
    routes: HashMap<String, Route>,
    credentials: Mutex<HashMap<String, bool>>,
    completed: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(mut self, src: &str, reply: Reply, delay_ms: u64) -> Self {
        self.routes.insert(
            src.to_string(),
            Route {
                reply,
                delay: Duration::from_millis(delay_ms),
            },
        );
        self
    }

    pub fn body(self, src: &str, body: &str) -> Self {
        self.route(src, Reply::Body(body.as_bytes().to_vec()), 0)
    }

    pub fn bytes(self, src: &str, body: Vec<u8>) -> Self {
        self.route(src, Reply::Body(body), 0)
    }

    pub fn delayed(self, src: &str, body: &str, delay_ms: u64) -> Self {
        self.route(src, Reply::Body(body.as_bytes().to_vec()), delay_ms)
    }

    pub fn not_found(self, src: &str) -> Self {
        self.route(src, Reply::Status(404), 0)
    }

    pub fn not_found_after(self, src: &str, delay_ms: u64) -> Self {
        self.route(src, Reply::Status(404), delay_ms)
    }

    pub fn failing(self, src: &str, message: &str) -> Self {
        self.route(src, Reply::Transport(message.to_string()), 0)
    }

    /// The credentials flag of the last request for `src`, if it was requested
    pub fn credentials_for(&self, src: &str) -> Option<bool> {
        self.credentials
            .lock()
            .ok()
            .and_then(|seen| seen.get(src).copied())
    }

    /// Number of requests that ran to the end of their delay
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn get(&self, src: &str, credentials: bool) -> Result<Vec<u8>, FetchError> {
        if let Ok(mut seen) = self.credentials.lock() {
            seen.insert(src.to_string(), credentials);
        }

        let Some(route) = self.routes.get(src) else {
            self.completed.fetch_add(1, Ordering::SeqCst);
            return Err(FetchError::status(404));
        };

        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        match &route.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status(status) => Err(FetchError::status(*status)),
            Reply::Transport(message) => Err(FetchError::Transport(message.clone())),
        }
    }
}
