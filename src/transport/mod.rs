// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport layer
//!
//! A [`Transport`] is a single-use asynchronous HTTP handle: it is opened,
//! given headers, sent once, and then read. The pipeline never reuses a
//! handle; a [`TransportFactory`] hands out a fresh one per call.

mod mock;
mod native;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;

use crate::error::Result;

pub use mock::{MockReply, MockTransport, RecordedRequest};
pub use native::ReqwestTransport;

/// Terminal event reported by a transport after `send`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The exchange completed; any HTTP status counts as completion
    Load,
    /// The exchange could not complete
    Error(String),
    /// The handle's own deadline elapsed
    Timeout,
}

/// Asynchronous HTTP handle
///
/// # Example
///
/// ```rust,no_run
/// use courier::transport::{ReqwestTransport, Transport, TransportEvent};
/// use reqwest::Method;
///
/// # async fn run() -> courier::Result<()> {
/// let mut handle = ReqwestTransport::new()?;
/// handle.open(Method::GET, "https://example.com")?;
/// handle.set_request_header("accept", "text/plain")?;
///
/// if handle.send(None).await == TransportEvent::Load {
///     println!("{} {}", handle.status(), handle.status_text());
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Prepare the handle for an asynchronous request
    fn open(&mut self, method: Method, url: &str) -> Result<()>;

    /// Set a request header; only valid between `open` and `send`
    fn set_request_header(&mut self, name: &str, value: &str) -> Result<()>;

    /// Ask the handle to give up after `timeout`
    ///
    /// Handles without a native deadline may ignore this; the pipeline runs
    /// its own watchdog either way.
    fn set_timeout(&mut self, timeout: Duration) {
        let _ = timeout;
    }

    /// Transmit the body and wait for the terminal event
    async fn send(&mut self, body: Option<Bytes>) -> TransportEvent;

    /// HTTP status of the completed exchange (0 before completion)
    fn status(&self) -> u16;

    /// Status text of the completed exchange
    fn status_text(&self) -> &str;

    /// Raw response text, if any was received
    fn response_text(&self) -> Option<&str>;

    /// Response header lookup
    fn response_header(&self, name: &str) -> Option<&str> {
        let _ = name;
        None
    }
}

/// Produces a fresh transport for every call
pub type TransportFactory = Arc<dyn Fn() -> Result<Box<dyn Transport>> + Send + Sync>;

/// Factory backed by [`ReqwestTransport`]
pub fn default_factory() -> TransportFactory {
    Arc::new(|| Ok(Box::new(ReqwestTransport::new()?) as Box<dyn Transport>))
}
