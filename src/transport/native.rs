// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Default transport backed by reqwest

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use url::Url;

use super::{Transport, TransportEvent, TransportFactory};
use crate::error::{Error, Result};
use crate::DEFAULT_USER_AGENT;

/// Transport handle that performs the exchange with a reqwest [`Client`]
pub struct ReqwestTransport {
    client: Client,
    method: Option<Method>,
    url: Option<Url>,
    headers: HeaderMap,
    timeout: Option<Duration>,
    status: u16,
    status_text: String,
    response_text: Option<String>,
    response_headers: HeaderMap,
}

impl ReqwestTransport {
    /// Create a handle with its own client
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(DEFAULT_USER_AGENT).build()?;
        Ok(Self::with_client(client))
    }

    /// Create a handle that shares an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            method: None,
            url: None,
            headers: HeaderMap::new(),
            timeout: None,
            status: 0,
            status_text: String::new(),
            response_text: None,
            response_headers: HeaderMap::new(),
        }
    }

    /// Factory whose handles all share `client` and its connection pool
    pub fn factory(client: Client) -> TransportFactory {
        Arc::new(move || Ok(Box::new(Self::with_client(client.clone())) as Box<dyn Transport>))
    }

    fn failure(err: reqwest::Error) -> TransportEvent {
        if err.is_timeout() {
            TransportEvent::Timeout
        } else {
            TransportEvent::Error(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn open(&mut self, method: Method, url: &str) -> Result<()> {
        self.url = Some(Url::parse(url)?);
        self.method = Some(method);
        self.headers.clear();
        self.status = 0;
        self.status_text.clear();
        self.response_text = None;
        self.response_headers.clear();
        Ok(())
    }

    fn set_request_header(&mut self, name: &str, value: &str) -> Result<()> {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::invalid_header(name, e.to_string()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e.to_string()))?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    async fn send(&mut self, body: Option<Bytes>) -> TransportEvent {
        let (Some(method), Some(url)) = (self.method.clone(), self.url.clone()) else {
            return TransportEvent::Error("request was sent before it was opened".to_string());
        };

        let mut builder = self.client.request(method, url).headers(self.headers.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Self::failure(e),
        };

        let status = response.status();
        self.status = status.as_u16();
        self.status_text = status.canonical_reason().unwrap_or("").to_string();
        self.response_headers = response.headers().clone();

        match response.text().await {
            Ok(text) => {
                self.response_text = Some(text);
                TransportEvent::Load
            }
            Err(e) => Self::failure(e),
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
        self.response_headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_open_rejects_bad_url() {
        let mut handle = ReqwestTransport::new().unwrap();
        let err = handle.open(Method::GET, "not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_invalid_header_name() {
        let mut handle = ReqwestTransport::new().unwrap();
        handle.open(Method::GET, "https://example.com").unwrap();
        assert!(handle.set_request_header("bad header", "x").is_err());
    }

    #[tokio::test]
    async fn test_send_before_open() {
        let mut handle = ReqwestTransport::new().unwrap();
        assert!(matches!(handle.send(None).await, TransportEvent::Error(_)));
    }

    #[tokio::test]
    async fn test_load_event() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header("x-token", "abc"))
            .and(body_string("payload"))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("x-request-id", "42")
                    .set_body_string("created"),
            )
            .mount(&server)
            .await;

        let mut handle = ReqwestTransport::new().unwrap();
        handle
            .open(Method::POST, &format!("{}/echo", server.uri()))
            .unwrap();
        handle.set_request_header("x-token", "abc").unwrap();

        let event = handle.send(Some(Bytes::from("payload"))).await;

        assert_eq!(event, TransportEvent::Load);
        assert_eq!(handle.status(), 201);
        assert_eq!(handle.status_text(), "Created");
        assert_eq!(handle.response_text(), Some("created"));
        assert_eq!(handle.response_header("x-request-id"), Some("42"));
    }

    #[tokio::test]
    async fn test_handle_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let mut handle = ReqwestTransport::new().unwrap();
        handle.open(Method::GET, &server.uri()).unwrap();
        handle.set_timeout(Duration::from_millis(50));

        assert_eq!(handle.send(None).await, TransportEvent::Timeout);
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        let mut handle = ReqwestTransport::new().unwrap();
        handle.open(Method::GET, "http://127.0.0.1:1/").unwrap();

        assert!(matches!(handle.send(None).await, TransportEvent::Error(_)));
    }
}
