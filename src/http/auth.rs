// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Authorization hooks
//!
//! Ready-made [`BeforeSend`] hooks that set the `authorization` header on
//! the open transport handle.

use std::sync::Arc;

use base64::Engine;

use super::headers::AUTHORIZATION;
use crate::config::BeforeSend;

/// Hook sending `Authorization: Bearer <token>`
pub fn bearer_token(token: impl Into<String>) -> BeforeSend {
    authorization(format!("Bearer {}", token.into()))
}

/// Hook sending HTTP basic credentials
pub fn basic_auth(username: &str, password: &str) -> BeforeSend {
    let encoded = base64::engine::general_purpose::STANDARD
        .encode(format!("{}:{}", username, password));
    authorization(format!("Basic {}", encoded))
}

fn authorization(value: String) -> BeforeSend {
    Arc::new(move |transport, _options| {
        if let Err(e) = transport.set_request_header(AUTHORIZATION, &value) {
            tracing::warn!(error = %e, "Failed to set authorization header");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Overrides, RequestOptions};
    use crate::http::Client;
    use crate::transport::MockTransport;

    #[tokio::test]
    async fn test_bearer_token() {
        let mock = MockTransport::respond(200, "OK", "");
        let client = Client::with_defaults(
            RequestOptions::default().transport(mock.factory()),
        );
        let overrides = Overrides::new().before_send_hook(bearer_token("abc123"));

        client.get("https://example.com", Some(&overrides)).await.unwrap();

        assert_eq!(
            mock.last_request().unwrap().header("authorization"),
            Some("Bearer abc123")
        );
    }

    #[tokio::test]
    async fn test_basic_auth() {
        let mock = MockTransport::respond(200, "OK", "");
        let mut options = RequestOptions::default().transport(mock.factory());
        options.before_send = Some(basic_auth("user", "pass"));

        Client::with_defaults(options)
            .get("https://example.com", None)
            .await
            .unwrap();

        assert_eq!(
            mock.last_request().unwrap().header("authorization"),
            Some("Basic dXNlcjpwYXNz")
        );
    }
}
