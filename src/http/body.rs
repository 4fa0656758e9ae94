// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request bodies

use bytes::Bytes;
use serde::Serialize;

use crate::error::Result;
use crate::utils::Value;

/// Body of an outgoing request
///
/// Text and raw bytes are sent unchanged; JSON is serialized first.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Already textual, sent as-is
    Text(String),
    /// Serialized to JSON text before sending
    Json(serde_json::Value),
    /// Raw payload, sent as-is
    Bytes(Bytes),
}

impl Body {
    /// Build a JSON body from any serializable value
    pub fn json<T: Serialize + ?Sized>(data: &T) -> Result<Self> {
        Ok(Body::Json(serde_json::to_value(data)?))
    }

    /// Bytes to hand to the transport
    pub fn encode(self) -> Result<Bytes> {
        match self {
            Body::Text(text) => Ok(Bytes::from(text)),
            Body::Json(value) => Ok(Bytes::from(serde_json::to_vec(&value)?)),
            Body::Bytes(bytes) => Ok(bytes),
        }
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value.to_json())
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(Bytes::from(bytes))
    }
}
