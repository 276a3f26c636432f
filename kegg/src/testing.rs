//! Testing utilities.
//!
//! [`MockTransport`] answers requests from a scripted table instead of the
//! network and records every URL it was asked for, so tests can assert how
//! many round trips an operation made.

use crate::transport::Transport;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// A scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// A successful response with this body.
    Body(String),
    /// A non-success HTTP status.
    Status { status: u16, reason: String },
    /// A connection failure.
    Unreachable(String),
}

/// A transport that replays scripted responses.
///
/// URLs without a script fail with a 404, which is what KEGG answers for
/// unknown entries.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, MockResponse>,
    calls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `body`.
    pub fn respond(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), MockResponse::Body(body.into()));
        self
    }

    /// Answer `url` with an HTTP error status.
    pub fn fail(mut self, url: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        self.responses.insert(
            url.into(),
            MockResponse::Status {
                status,
                reason: reason.into(),
            },
        );
        self
    }

    /// Answer `url` with a connection failure.
    pub fn unreachable(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), MockResponse::Unreachable(message.into()));
        self
    }

    /// Number of fetches performed so far.
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    /// Fetches of one URL.
    pub fn calls_to(&self, url: &str) -> usize {
        self.calls().iter().filter(|called| *called == url).count()
    }

    /// Every fetched URL, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Transport for MockTransport {
    fn fetch(&self, url: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());

        match self.responses.get(url) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Status { status, reason }) => Err(Error::Transport {
                status: *status,
                reason: reason.clone(),
                url: url.to_string(),
            }),
            Some(MockResponse::Unreachable(message)) => Err(Error::Network(message.clone())),
            None => Err(Error::Transport {
                status: 404,
                reason: "Not Found".to_string(),
                url: url.to_string(),
            }),
        }
    }
}
