// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request execution and response stages
//!
//! A call opens one transport handle, attaches headers, arms the watchdog,
//! runs the before-send hook and sends. Once the single terminal event
//! arrives the outcome goes through the enabled stages in a fixed order:
//! status gate, JSON decode, data-only unwrap. The first rejection ends
//! the chain.

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use reqwest::Method;
use tracing::{debug, trace};

use super::body::Body;
use super::response::{Reply, Response};
use crate::config::{DataType, RequestOptions};
use crate::error::{Error, FailureContext, Result};
use crate::transport::TransportEvent;
use crate::utils::{json, Value};

/// Statuses the status gate lets through
pub const ACCEPTED_STATUS: RangeInclusive<u16> = 200..=399;

/// Post-processing step applied to a completed exchange
pub trait Stage: Send + Sync {
    /// Stage name for logging
    fn name(&self) -> &'static str;

    /// Whether the stage runs under the resolved options
    fn enabled(&self, options: &RequestOptions) -> bool;

    /// Transform the reply or reject it
    fn apply(&self, reply: Reply) -> Result<Reply>;
}

/// Rejects statuses outside [`ACCEPTED_STATUS`]
pub struct StatusGate;

impl Stage for StatusGate {
    fn name(&self) -> &'static str {
        "status-gate"
    }

    fn enabled(&self, options: &RequestOptions) -> bool {
        options.reject_on_status_code
    }

    fn apply(&self, reply: Reply) -> Result<Reply> {
        match reply {
            Reply::Response(response) if !ACCEPTED_STATUS.contains(&response.status) => {
                Err(Error::status(
                    response.status,
                    response.status_text,
                    response.options,
                    response.transport,
                ))
            }
            other => Ok(other),
        }
    }
}

/// Replaces the raw text with the decoded JSON tree
pub struct JsonDecode;

impl Stage for JsonDecode {
    fn name(&self) -> &'static str {
        "json-decode"
    }

    fn enabled(&self, options: &RequestOptions) -> bool {
        options.data_type == DataType::Json
    }

    fn apply(&self, reply: Reply) -> Result<Reply> {
        let mut response = match reply {
            Reply::Response(response) => response,
            data => return Ok(data),
        };

        let text = match std::mem::take(&mut response.data) {
            Value::String(text) => Some(text),
            _ => None,
        };

        match json::decode(text.as_deref(), response.options.json_reviver.as_ref()) {
            Ok(data) => {
                response.data = data;
                Ok(Reply::Response(response))
            }
            Err(source) => Err(Error::Decode {
                status: response.status,
                status_text: response.status_text,
                source,
                context: FailureContext::new(response.options, response.transport),
            }),
        }
    }
}

/// Reduces the response to its data
pub struct DataOnly;

impl Stage for DataOnly {
    fn name(&self) -> &'static str {
        "data-only"
    }

    fn enabled(&self, options: &RequestOptions) -> bool {
        options.data_only
    }

    fn apply(&self, reply: Reply) -> Result<Reply> {
        Ok(Reply::Data(reply.into_data()))
    }
}

/// Ordered list of stages
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl Pipeline {
    /// Status gate, then JSON decode, then data-only unwrap
    pub fn standard() -> Self {
        Self {
            stages: vec![Box::new(StatusGate), Box::new(JsonDecode), Box::new(DataOnly)],
        }
    }

    /// Names of the stages enabled under `options`, in run order
    pub fn active(&self, options: &RequestOptions) -> Vec<&'static str> {
        self.stages
            .iter()
            .filter(|stage| stage.enabled(options))
            .map(|stage| stage.name())
            .collect()
    }

    /// Run a completed response through the enabled stages
    pub fn run(&self, response: Response) -> Result<Reply> {
        let enabled: Vec<&dyn Stage> = self
            .stages
            .iter()
            .map(|stage| stage.as_ref())
            .filter(|stage| stage.enabled(&response.options))
            .collect();

        enabled
            .into_iter()
            .try_fold(Reply::Response(response), |reply, stage| {
                stage.apply(reply).map_err(|err| {
                    debug!(stage = stage.name(), error = %err, "Stage rejected response");
                    err
                })
            })
    }

    /// Issue the request and settle it through the stages
    pub async fn send(
        &self,
        url: &str,
        method: Method,
        body: Option<Body>,
        options: RequestOptions,
    ) -> Result<Reply> {
        let response = execute(url, method, body, options).await?;
        self.run(response)
    }
}

/// Perform one exchange and wait for its terminal event
pub async fn execute(
    url: &str,
    method: Method,
    body: Option<Body>,
    options: RequestOptions,
) -> Result<Response> {
    let payload = body.map(Body::encode).transpose()?;

    let mut transport = (options.create_request)()?;
    transport.open(method.clone(), url)?;
    debug!(method = %method, url, "Request opened");

    for (name, value) in options.headers.resolve(&options) {
        trace!(header = %name, "Attaching header");
        transport.set_request_header(&name, &value)?;
    }

    let deadline = options.effective_timeout();
    if let Some(deadline) = deadline {
        transport.set_timeout(deadline);
    }

    if let Some(hook) = options.before_send.clone() {
        hook(transport.as_mut(), &options);
    }

    let start = Instant::now();
    let event = match deadline {
        Some(deadline) => tokio::time::timeout(deadline, transport.send(payload))
            .await
            .unwrap_or(TransportEvent::Timeout),
        None => transport.send(payload).await,
    };
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match event {
        TransportEvent::Load => {
            let response = Response::from_transport(transport, options);
            debug!(url, status = response.status, elapsed_ms, "Request completed");
            Ok(response)
        }
        TransportEvent::Error(detail) => {
            debug!(url, elapsed_ms, detail = %detail, "Request failed");
            Err(Error::network(detail, options, transport))
        }
        TransportEvent::Timeout => {
            let duration_ms = deadline.map(duration_ms).unwrap_or(elapsed_ms);
            debug!(url, duration_ms, "Request timed out");
            Err(Error::timeout(duration_ms, options, transport))
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    duration.as_millis() as u64
}
