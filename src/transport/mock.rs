// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Scripted transport for tests
//!
//! Every handle produced by [`MockTransport::factory`] plays the same
//! scripted reply and records what it was asked to send.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::Method;

use super::{Transport, TransportEvent, TransportFactory};
use crate::error::{Error, Result};

/// What a mock handle does when sent
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Complete with a status, status text and optional body
    Respond {
        status: u16,
        status_text: String,
        body: Option<String>,
        headers: Vec<(String, String)>,
    },
    /// Fail as if the network was unreachable
    NetworkError(String),
    /// Report the handle's own deadline
    Timeout,
    /// Never complete
    Hang,
}

/// Request as seen by a mock handle
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub method: Option<Method>,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    pub body: Option<Bytes>,
}

impl RecordedRequest {
    /// Get a recorded header (last value wins)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as text
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }
}

/// Transport that replays a scripted reply
#[derive(Debug, Clone)]
pub struct MockTransport {
    reply: MockReply,
    delay: Option<Duration>,
    log: Arc<Mutex<Vec<RecordedRequest>>>,
    current: RecordedRequest,
    opened: bool,
    status: u16,
    status_text: String,
    response_text: Option<String>,
    response_headers: Vec<(String, String)>,
}

impl MockTransport {
    /// Create a mock playing `reply`
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            delay: None,
            log: Arc::new(Mutex::new(Vec::new())),
            current: RecordedRequest::default(),
            opened: false,
            status: 0,
            status_text: String::new(),
            response_text: None,
            response_headers: Vec::new(),
        }
    }

    /// Complete with a status and body
    pub fn respond(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(MockReply::Respond {
            status,
            status_text: status_text.into(),
            body: Some(body.into()),
            headers: Vec::new(),
        })
    }

    /// Complete with a status and no body at all
    pub fn respond_empty(status: u16, status_text: impl Into<String>) -> Self {
        Self::new(MockReply::Respond {
            status,
            status_text: status_text.into(),
            body: None,
            headers: Vec::new(),
        })
    }

    /// Fail with a network error
    pub fn network_error(detail: impl Into<String>) -> Self {
        Self::new(MockReply::NetworkError(detail.into()))
    }

    /// Never complete
    pub fn hang() -> Self {
        Self::new(MockReply::Hang)
    }

    /// Add a response header to a `Respond` reply
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let MockReply::Respond { ref mut headers, .. } = self.reply {
            headers.push((name.into(), value.into()));
        }
        self
    }

    /// Wait before replying
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Factory producing fresh handles that share this mock's request log
    pub fn factory(&self) -> TransportFactory {
        let template = self.clone();
        Arc::new(move || Ok(Box::new(template.fresh()) as Box<dyn Transport>))
    }

    /// Requests sent through any handle of this mock
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.log.lock().last().cloned()
    }

    fn fresh(&self) -> Self {
        Self {
            reply: self.reply.clone(),
            delay: self.delay,
            log: self.log.clone(),
            ..Self::new(MockReply::Hang)
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn open(&mut self, method: Method, url: &str) -> Result<()> {
        self.current = RecordedRequest {
            method: Some(method),
            url: url.to_string(),
            ..Default::default()
        };
        self.opened = true;
        Ok(())
    }

    fn set_request_header(&mut self, name: &str, value: &str) -> Result<()> {
        if !self.opened {
            return Err(Error::transport("header set before the request was opened"));
        }
        self.current
            .headers
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.current.timeout = Some(timeout);
    }

    async fn send(&mut self, body: Option<Bytes>) -> TransportEvent {
        self.current.body = body;
        self.log.lock().push(self.current.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.reply.clone() {
            MockReply::Respond {
                status,
                status_text,
                body,
                headers,
            } => {
                self.status = status;
                self.status_text = status_text;
                self.response_text = body;
                self.response_headers = headers;
                TransportEvent::Load
            }
            MockReply::NetworkError(detail) => TransportEvent::Error(detail),
            MockReply::Timeout => TransportEvent::Timeout,
            MockReply::Hang => std::future::pending().await,
        }
    }

    fn status(&self) -> u16 {
        self.status
    }

    fn status_text(&self) -> &str {
        &self.status_text
    }

    fn response_text(&self) -> Option<&str> {
        self.response_text.as_deref()
    }

    fn response_header(&self, name: &str) -> Option<&str> {
        self.response_headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
