// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request client

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::Method;

use super::body::Body;
use super::pipeline::Pipeline;
use super::response::Reply;
use crate::config::{Overrides, RequestOptions};
use crate::error::Result;

/// Client holding the default options shared by every call
///
/// Defaults are read when a call resolves its options and never written
/// by the call itself. Replacing them affects later calls only. Clones
/// share the same defaults.
///
/// # Example
///
/// ```rust,no_run
/// use courier::{Client, Overrides};
///
/// #[tokio::main]
/// async fn main() -> courier::Result<()> {
///     let client = Client::new();
///
///     let reply = client
///         .get("https://example.com/api/users/1", Some(&Overrides::strict()))
///         .await?;
///     println!("{:?}", reply.data());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    defaults: Arc<RwLock<RequestOptions>>,
    pipeline: Arc<Pipeline>,
}

impl Client {
    /// Create a client with the default options
    pub fn new() -> Self {
        Self::with_defaults(RequestOptions::default())
    }

    /// Create a client with custom default options
    pub fn with_defaults(defaults: RequestOptions) -> Self {
        Self {
            defaults: Arc::new(RwLock::new(defaults)),
            pipeline: Arc::new(Pipeline::standard()),
        }
    }

    /// Snapshot of the current defaults
    pub fn defaults(&self) -> RequestOptions {
        self.defaults.read().clone()
    }

    /// Replace the defaults
    pub fn set_defaults(&self, defaults: RequestOptions) {
        *self.defaults.write() = defaults;
    }

    /// Modify the defaults in place
    pub fn update_defaults(&self, f: impl FnOnce(&mut RequestOptions)) {
        let mut defaults = self.defaults.write();
        f(&mut *defaults);
    }

    /// Resolve the options a call with `overrides` would use
    pub fn resolve(&self, overrides: Option<&Overrides>) -> RequestOptions {
        self.defaults.read().resolve(overrides)
    }

    /// Send a request
    ///
    /// Resolves once the exchange completes, whatever its status, unless
    /// `reject_on_status_code` is set. Network failures and timeouts are
    /// always errors.
    pub async fn send(
        &self,
        url: impl AsRef<str>,
        method: Method,
        body: Option<Body>,
        overrides: Option<&Overrides>,
    ) -> Result<Reply> {
        let options = self.resolve(overrides);
        self.pipeline
            .send(url.as_ref(), method, body, options)
            .await
    }

    /// Send a GET request
    pub async fn get(&self, url: impl AsRef<str>, overrides: Option<&Overrides>) -> Result<Reply> {
        self.send(url, Method::GET, None, overrides).await
    }

    /// Send a POST request
    pub async fn post(
        &self,
        url: impl AsRef<str>,
        body: impl Into<Body>,
        overrides: Option<&Overrides>,
    ) -> Result<Reply> {
        self.send(url, Method::POST, Some(body.into()), overrides)
            .await
    }

    /// Send a PUT request
    pub async fn put(
        &self,
        url: impl AsRef<str>,
        body: impl Into<Body>,
        overrides: Option<&Overrides>,
    ) -> Result<Reply> {
        self.send(url, Method::PUT, Some(body.into()), overrides)
            .await
    }

    /// Send a DELETE request
    pub async fn delete(
        &self,
        url: impl AsRef<str>,
        overrides: Option<&Overrides>,
    ) -> Result<Reply> {
        self.send(url, Method::DELETE, None, overrides).await
    }

    /// Alias for [`Client::delete`]
    pub async fn del(&self, url: impl AsRef<str>, overrides: Option<&Overrides>) -> Result<Reply> {
        self.delete(url, overrides).await
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataType, JSON_ACCEPT};
    use crate::transport::MockTransport;
    use crate::utils::Value;
    use serde_json::json;
    use std::time::Duration;

    fn client(mock: &MockTransport) -> Client {
        Client::with_defaults(RequestOptions::default().transport(mock.factory()))
    }

    #[tokio::test]
    async fn test_not_found_resolves_by_default() {
        let mock = MockTransport::respond(404, "Not Found", "");
        let reply = client(&mock).get("https://example.com/missing", None).await.unwrap();

        assert_eq!(reply.status(), Some(404));
        assert!(reply.data().is_null());
    }

    #[tokio::test]
    async fn test_not_found_rejects_when_gated() {
        let mock = MockTransport::respond(404, "Not Found", r#"{"error":"missing"}"#);
        let overrides = Overrides::new().reject_on_status_code(true);

        let err = client(&mock)
            .get("https://example.com/missing", Some(&overrides))
            .await
            .unwrap_err();

        assert!(err.is_status());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.status_text(), Some("Not Found"));
        assert!(err.transport_handle().is_some());
    }

    #[tokio::test]
    async fn test_json_accept_header() {
        let mock = MockTransport::respond(200, "OK", "{}");
        client(&mock).get("https://example.com", None).await.unwrap();

        assert_eq!(mock.last_request().unwrap().header("accept"), Some(JSON_ACCEPT));
    }

    #[tokio::test]
    async fn test_text_mode_keeps_raw_text() {
        let mock = MockTransport::respond(200, "OK", "plain words");
        let overrides = Overrides::new().data_type(DataType::Text);

        let reply = client(&mock)
            .get("https://example.com", Some(&overrides))
            .await
            .unwrap();

        assert_eq!(reply.data().as_str(), Some("plain words"));
        assert_eq!(mock.last_request().unwrap().header("accept"), None);
    }

    #[tokio::test]
    async fn test_empty_json_body_is_null() {
        let mock = MockTransport::respond(200, "OK", "");
        let reply = client(&mock).get("https://example.com", None).await.unwrap();

        assert!(reply.data().is_null());
    }

    #[tokio::test]
    async fn test_data_only_returns_decoded_data() {
        let mock = MockTransport::respond(200, "OK", r#"{"id":1,"tags":["a"]}"#);
        let overrides = Overrides::new().data_only(true);

        let reply = client(&mock)
            .get("https://example.com", Some(&overrides))
            .await
            .unwrap();

        assert!(reply.response().is_none());
        assert_eq!(reply.into_data(), Value::from(json!({"id": 1, "tags": ["a"]})));
    }

    #[tokio::test]
    async fn test_legacy_status_normalized() {
        let mock = MockTransport::respond_empty(1223, "");
        let reply = client(&mock).delete("https://example.com/1", None).await.unwrap();
        let response = reply.response().unwrap();

        assert_eq!(response.status, 204);
        assert_eq!(response.status_text, "No Content");
        assert_eq!(mock.last_request().unwrap().method, Some(Method::DELETE));
    }

    #[tokio::test]
    async fn test_post_serializes_json() {
        let mock = MockTransport::respond(201, "Created", "");
        client(&mock)
            .post("https://example.com/items", json!({"a": 1, "b": "test"}), None)
            .await
            .unwrap();

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.method, Some(Method::POST));
        assert_eq!(sent.body_text().as_deref(), Some(r#"{"a":1,"b":"test"}"#));
    }

    #[tokio::test]
    async fn test_put_passes_text_through() {
        let mock = MockTransport::respond(200, "OK", "");
        client(&mock)
            .put("https://example.com/items/1", r#"{"a":1}"#, None)
            .await
            .unwrap();

        assert_eq!(mock.last_request().unwrap().body_text().as_deref(), Some(r#"{"a":1}"#));
    }

    #[tokio::test]
    async fn test_get_and_del_send_no_body() {
        let mock = MockTransport::respond(200, "OK", "");
        let client = client(&mock);
        client.get("https://example.com", None).await.unwrap();
        client.del("https://example.com", None).await.unwrap();

        assert!(mock.requests().iter().all(|r| r.body.is_none()));
    }

    #[tokio::test]
    async fn test_defaults_read_at_call_time() {
        let mock = MockTransport::respond(200, "OK", "");
        let client = client(&mock);

        client.update_defaults(|d| d.headers.insert("x-version", "2"));
        client.get("https://example.com", None).await.unwrap();

        assert_eq!(mock.last_request().unwrap().header("x-version"), Some("2"));
    }

    #[tokio::test]
    async fn test_call_never_mutates_defaults() {
        let mock = MockTransport::respond(200, "OK", "");
        let client = client(&mock);
        let before = client.defaults();

        let overrides = Overrides::new()
            .timeout(Duration::from_secs(1))
            .header("accept", "text/plain");
        client.get("https://example.com", Some(&overrides)).await.unwrap();

        assert_eq!(client.defaults(), before);
    }

    #[tokio::test]
    async fn test_invalid_url_is_an_error_result() {
        let client = Client::new();
        let err = client.get("not a url", None).await.unwrap_err();

        assert!(matches!(err, crate::Error::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let fast = MockTransport::respond(200, "OK", r#"{"n":1}"#);
        let slow = MockTransport::respond(200, "OK", r#"{"n":2}"#)
            .with_delay(Duration::from_millis(20));
        let client = client(&fast);

        let slow_overrides = Overrides::new().transport(slow.factory()).data_only(true);
        let fast_overrides = Overrides::new().data_only(true);

        let (a, b) = futures::future::join(
            client.get("https://example.com/slow", Some(&slow_overrides)),
            client.get("https://example.com/fast", Some(&fast_overrides)),
        )
        .await;

        assert_eq!(a.unwrap().into_data(), Value::from(json!({"n": 2})));
        assert_eq!(b.unwrap().into_data(), Value::from(json!({"n": 1})));
    }
}
