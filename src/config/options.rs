// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request options
//!
//! [`RequestOptions`] is both the client-wide default set and the resolved,
//! per-call set handed to the pipeline.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::headers::{HeaderValue, Headers};
use super::overrides::Overrides;
use crate::http::headers::{ACCEPT, CONTENT_TYPE};
use crate::transport::{default_factory, Transport, TransportFactory};
use crate::utils::json::Reviver;
use crate::utils::{Map, Value};

/// Accept header sent when JSON is expected
pub const JSON_ACCEPT: &str = "application/json, text/json";

/// Content type sent by default
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Hook run with the opened handle right before the body is sent
pub type BeforeSend = Arc<dyn Fn(&mut dyn Transport, &RequestOptions) + Send + Sync>;

/// Expected shape of the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    /// Decode the body as JSON
    #[default]
    Json,
    /// Leave the body as text
    Text,
}

/// Settings for a request
#[derive(Clone)]
pub struct RequestOptions {
    /// Headers sent with each request
    pub headers: Headers,
    /// Called after headers are attached and before the body is sent
    pub before_send: Option<BeforeSend>,
    /// Reject responses whose status is outside 200..=399
    pub reject_on_status_code: bool,
    /// Deadline for the whole exchange
    pub timeout: Option<Duration>,
    /// Resolve with the response data only
    ///
    /// Mostly useful together with `reject_on_status_code`, otherwise a
    /// failed status is indistinguishable from success.
    pub data_only: bool,
    /// Expected response body shape
    pub data_type: DataType,
    /// Reviver applied while decoding JSON responses
    pub json_reviver: Option<Reviver>,
    /// Produces the transport handle for each request
    pub create_request: TransportFactory,
    /// Free-form settings, deep-merged like the rest of the options
    pub extensions: Map,
}

impl Default for RequestOptions {
    fn default() -> Self {
        let mut headers = Headers::new();
        headers.insert(CONTENT_TYPE, JSON_CONTENT_TYPE);
        headers.insert(
            ACCEPT,
            HeaderValue::computed(|options| {
                (options.data_type == DataType::Json).then(|| JSON_ACCEPT.to_string())
            }),
        );

        Self {
            headers,
            before_send: None,
            reject_on_status_code: false,
            timeout: None,
            data_only: false,
            data_type: DataType::Json,
            json_reviver: None,
            create_request: default_factory(),
            extensions: Map::new(),
        }
    }
}

impl RequestOptions {
    /// Create options with the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for plain-text responses
    pub fn text() -> Self {
        Self {
            data_type: DataType::Text,
            ..Default::default()
        }
    }

    /// Set a literal header
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<HeaderValue>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set a header computed from the resolved options
    pub fn computed_header<F>(mut self, name: impl AsRef<str>, f: F) -> Self
    where
        F: Fn(&RequestOptions) -> Option<String> + Send + Sync + 'static,
    {
        self.headers.insert(name, HeaderValue::computed(f));
        self
    }

    /// Stop sending a header
    pub fn remove_header(mut self, name: &str) -> Self {
        self.headers.remove(name);
        self
    }

    /// Set the before-send hook
    pub fn before_send<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut dyn Transport, &RequestOptions) + Send + Sync + 'static,
    {
        self.before_send = Some(Arc::new(f));
        self
    }

    /// Reject on out-of-range status codes
    pub fn reject_on_status_code(mut self, reject: bool) -> Self {
        self.reject_on_status_code = reject;
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable timeout
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Resolve with the data only
    pub fn data_only(mut self, data_only: bool) -> Self {
        self.data_only = data_only;
        self
    }

    /// Set the expected body shape
    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    /// Set the JSON reviver
    pub fn json_reviver(mut self, reviver: Reviver) -> Self {
        self.json_reviver = Some(reviver);
        self
    }

    /// Set the transport factory
    pub fn transport(mut self, factory: TransportFactory) -> Self {
        self.create_request = factory;
        self
    }

    /// Set a free-form setting
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// Read a free-form setting
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// Deadline to arm, if any; a zero duration arms nothing
    pub fn effective_timeout(&self) -> Option<Duration> {
        self.timeout.filter(|t| !t.is_zero())
    }

    /// Resolve the options for one call
    ///
    /// Returns a new value; `self` is never modified.
    pub fn resolve(&self, overrides: Option<&Overrides>) -> RequestOptions {
        let mut resolved = self.clone();
        if let Some(overrides) = overrides {
            overrides.apply_to(&mut resolved);
        }
        resolved
    }
}

impl PartialEq for RequestOptions {
    fn eq(&self, other: &Self) -> bool {
        self.headers == other.headers
            && same_arc(&self.before_send, &other.before_send)
            && self.reject_on_status_code == other.reject_on_status_code
            && self.timeout == other.timeout
            && self.data_only == other.data_only
            && self.data_type == other.data_type
            && same_arc(&self.json_reviver, &other.json_reviver)
            && Arc::ptr_eq(&self.create_request, &other.create_request)
            && self.extensions == other.extensions
    }
}

fn same_arc<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("headers", &self.headers)
            .field("before_send", &self.before_send.is_some())
            .field("reject_on_status_code", &self.reject_on_status_code)
            .field("timeout", &self.timeout)
            .field("data_only", &self.data_only)
            .field("data_type", &self.data_type)
            .field("json_reviver", &self.json_reviver.is_some())
            .field("extensions", &self.extensions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RequestOptions::default();

        assert!(!options.reject_on_status_code);
        assert!(!options.data_only);
        assert_eq!(options.data_type, DataType::Json);
        assert!(options.timeout.is_none());
        assert!(options.before_send.is_none());
    }

    #[test]
    fn test_accept_follows_data_type() {
        let json = RequestOptions::default();
        let text = RequestOptions::text();

        let accept = |o: &RequestOptions| o.headers.get("accept").and_then(|h| h.resolve(o));
        assert_eq!(accept(&json), Some(JSON_ACCEPT.to_string()));
        assert_eq!(accept(&text), None);
    }

    #[test]
    fn test_zero_timeout_is_not_armed() {
        assert_eq!(RequestOptions::new().timeout(Duration::ZERO).effective_timeout(), None);
        assert_eq!(
            RequestOptions::new()
                .timeout(Duration::from_millis(10))
                .effective_timeout(),
            Some(Duration::from_millis(10))
        );
    }

    #[test]
    fn test_clone_is_equal() {
        let options = RequestOptions::new().before_send(|_, _| {});
        assert_eq!(options.clone(), options);
        assert_ne!(options, RequestOptions::new());
    }
}
