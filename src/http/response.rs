// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response types

use std::fmt;

use serde::de::DeserializeOwned;

use crate::config::RequestOptions;
use crate::error::Result;
use crate::transport::Transport;
use crate::utils::Value;

/// Status some hosts report in place of 204
pub const LEGACY_NO_CONTENT: u16 = 1223;

/// Completed exchange
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Status text
    pub status_text: String,
    /// Raw text (`Value::String`) or the decoded JSON tree
    pub data: Value,
    /// Resolved options used for the request
    pub options: RequestOptions,
    /// Transport handle that carried the request
    pub transport: Box<dyn Transport>,
}

impl Response {
    /// Build a response from a transport that reported completion
    pub fn from_transport(transport: Box<dyn Transport>, options: RequestOptions) -> Self {
        let (status, status_text) = match transport.status() {
            LEGACY_NO_CONTENT => (204, "No Content".to_string()),
            status => (status, transport.status_text().to_string()),
        };
        let data = transport
            .response_text()
            .map(|text| Value::String(text.to_string()))
            .unwrap_or(Value::Null);

        Self {
            status,
            status_text,
            data,
            options,
            transport,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if status is client error (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Check if status is server error (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Data as text, when it has not been decoded
    pub fn text(&self) -> Option<&str> {
        self.data.as_str()
    }

    /// Deserialize the data into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.data.to_json())?)
    }

    /// Get a response header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.transport.response_header(name)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("data", &self.data)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Settled value of a successful call
#[derive(Debug)]
pub enum Reply {
    /// The full response
    Response(Response),
    /// Only the data, when `data_only` is set
    Data(Value),
}

impl Reply {
    /// Data of the reply
    pub fn data(&self) -> &Value {
        match self {
            Reply::Response(response) => &response.data,
            Reply::Data(data) => data,
        }
    }

    /// Take the data out of the reply
    pub fn into_data(self) -> Value {
        match self {
            Reply::Response(response) => response.data,
            Reply::Data(data) => data,
        }
    }

    /// The full response, unless it was unwrapped
    pub fn response(&self) -> Option<&Response> {
        match self {
            Reply::Response(response) => Some(response),
            Reply::Data(_) => None,
        }
    }

    /// Take the full response, unless it was unwrapped
    pub fn into_response(self) -> Option<Response> {
        match self {
            Reply::Response(response) => Some(response),
            Reply::Data(_) => None,
        }
    }

    /// HTTP status, unless the response was unwrapped
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }

    /// Deserialize the data into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.data().to_json())?)
    }
}
