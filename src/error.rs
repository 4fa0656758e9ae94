// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for courier
//!
//! Rejected requests carry enough context to diagnose and re-issue them by
//! hand: the status (when one was received), the status text or failure
//! reason, the resolved options and the transport handle.

use std::fmt;

use thiserror::Error;

use crate::config::RequestOptions;
use crate::transport::Transport;

/// Result type alias for courier operations
pub type Result<T> = std::result::Result<T, Error>;

/// Status text reported for network failures
pub const NETWORK_REASON: &str = "Network";

/// Status text reported for timeouts
pub const TIMEOUT_REASON: &str = "Timeout";

/// Main error type for courier
#[derive(Error, Debug)]
pub enum Error {
    /// The transport could not complete the exchange
    #[error("Network error: {detail}")]
    Network {
        detail: String,
        context: Box<FailureContext>,
    },

    /// The configured deadline elapsed before completion
    #[error("Request timed out after {duration_ms}ms")]
    Timeout {
        duration_ms: u64,
        context: Box<FailureContext>,
    },

    /// The exchange completed with a status outside the accepted range
    #[error("Request failed with status {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        context: Box<FailureContext>,
    },

    /// The response text was not valid JSON
    #[error("Invalid JSON in response (status {status}): {source}")]
    Decode {
        status: u16,
        status_text: String,
        #[source]
        source: serde_json::Error,
        context: Box<FailureContext>,
    },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Header name or value rejected by the transport
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client construction failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport misuse or construction failure
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Resolved options and transport handle of a rejected request
pub struct FailureContext {
    pub options: RequestOptions,
    pub transport: Box<dyn Transport>,
}

impl FailureContext {
    pub fn new(options: RequestOptions, transport: Box<dyn Transport>) -> Box<Self> {
        Box::new(Self { options, transport })
    }
}

impl fmt::Debug for FailureContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureContext")
            .field("options", &self.options)
            .field("transport_status", &self.transport.status())
            .finish()
    }
}

impl Error {
    /// Create a network failure
    pub fn network(
        detail: impl Into<String>,
        options: RequestOptions,
        transport: Box<dyn Transport>,
    ) -> Self {
        Error::Network {
            detail: detail.into(),
            context: FailureContext::new(options, transport),
        }
    }

    /// Create a timeout failure
    pub fn timeout(duration_ms: u64, options: RequestOptions, transport: Box<dyn Transport>) -> Self {
        Error::Timeout {
            duration_ms,
            context: FailureContext::new(options, transport),
        }
    }

    /// Create a status failure
    pub fn status(
        status: u16,
        status_text: impl Into<String>,
        options: RequestOptions,
        transport: Box<dyn Transport>,
    ) -> Self {
        Error::Status {
            status,
            status_text: status_text.into(),
            context: FailureContext::new(options, transport),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Error::Transport(msg.into())
    }

    /// Check if this is a network failure
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network { .. })
    }

    /// Check if this is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Check if this is a status rejection
    pub fn is_status(&self) -> bool {
        matches!(self, Error::Status { .. })
    }

    /// Check if the response body failed to decode
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// HTTP status, when a response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } | Error::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Status text of the response, or the failure reason when none arrived
    pub fn status_text(&self) -> Option<&str> {
        match self {
            Error::Network { .. } => Some(NETWORK_REASON),
            Error::Timeout { .. } => Some(TIMEOUT_REASON),
            Error::Status { status_text, .. } | Error::Decode { status_text, .. } => {
                Some(status_text.as_str())
            }
            _ => None,
        }
    }

    fn context(&self) -> Option<&FailureContext> {
        match self {
            Error::Network { context, .. }
            | Error::Timeout { context, .. }
            | Error::Status { context, .. }
            | Error::Decode { context, .. } => Some(context.as_ref()),
            _ => None,
        }
    }

    /// Resolved options of the rejected request
    pub fn options(&self) -> Option<&RequestOptions> {
        self.context().map(|c| &c.options)
    }

    /// Transport handle of the rejected request
    pub fn transport_handle(&self) -> Option<&dyn Transport> {
        self.context().map(|c| c.transport.as_ref())
    }

    /// Take the failure context out of the error
    pub fn into_context(self) -> Option<FailureContext> {
        match self {
            Error::Network { context, .. }
            | Error::Timeout { context, .. }
            | Error::Status { context, .. }
            | Error::Decode { context, .. } => Some(*context),
            _ => None,
        }
    }
}
