// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-call overrides
//!
//! Only the settings that differ from the client defaults need to be given.
//! Headers are overlaid key by key, extensions are deep-merged, every other
//! field replaces the default outright.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::headers::{HeaderValue, Headers};
use super::options::{BeforeSend, DataType, RequestOptions};
use crate::transport::{Transport, TransportFactory};
use crate::utils::json::Reviver;
use crate::utils::{merge_maps, Map, Value};

/// Partial [`RequestOptions`] for a single call
#[derive(Clone, Default)]
pub struct Overrides {
    headers: Headers,
    before_send: Option<Option<BeforeSend>>,
    reject_on_status_code: Option<bool>,
    timeout: Option<Option<Duration>>,
    data_only: Option<bool>,
    data_type: Option<DataType>,
    json_reviver: Option<Option<Reviver>>,
    create_request: Option<TransportFactory>,
    extensions: Map,
}

impl Overrides {
    /// Create empty overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject on status and resolve with the data only
    pub fn strict() -> Self {
        Self::new().reject_on_status_code(true).data_only(true)
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

    /// Suppress a default header for this call
    pub fn without_header(mut self, name: impl AsRef<str>) -> Self {
        self.headers.insert(name, HeaderValue::literal(""));
        self
    }

    /// Set the before-send hook
    pub fn before_send<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut dyn Transport, &RequestOptions) + Send + Sync + 'static,
    {
        self.before_send = Some(Some(Arc::new(f)));
        self
    }

    /// Use an existing before-send hook
    pub fn before_send_hook(mut self, hook: BeforeSend) -> Self {
        self.before_send = Some(Some(hook));
        self
    }

    /// Skip the default before-send hook
    pub fn no_before_send(mut self) -> Self {
        self.before_send = Some(None);
        self
    }

    /// Reject on out-of-range status codes
    pub fn reject_on_status_code(mut self, reject: bool) -> Self {
        self.reject_on_status_code = Some(reject);
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(Some(timeout));
        self
    }

    /// Disable the default timeout
    pub fn no_timeout(mut self) -> Self {
        self.timeout = Some(None);
        self
    }

    /// Resolve with the data only
    pub fn data_only(mut self, data_only: bool) -> Self {
        self.data_only = Some(data_only);
        self
    }

    /// Set the expected body shape
    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Set the JSON reviver
    pub fn json_reviver(mut self, reviver: Reviver) -> Self {
        self.json_reviver = Some(Some(reviver));
        self
    }

    /// Skip the default JSON reviver
    pub fn no_json_reviver(mut self) -> Self {
        self.json_reviver = Some(None);
        self
    }

    /// Set the transport factory
    pub fn transport(mut self, factory: TransportFactory) -> Self {
        self.create_request = Some(factory);
        self
    }

    /// Set a free-form setting; mappings are deep-merged into the defaults
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// Apply these overrides on top of `options`
    pub fn apply_to(&self, options: &mut RequestOptions) {
        options.headers.extend_from(&self.headers);
        merge_maps(&mut options.extensions, &self.extensions);

        if let Some(ref before_send) = self.before_send {
            options.before_send = before_send.clone();
        }
        if let Some(reject) = self.reject_on_status_code {
            options.reject_on_status_code = reject;
        }
        if let Some(timeout) = self.timeout {
            options.timeout = timeout;
        }
        if let Some(data_only) = self.data_only {
            options.data_only = data_only;
        }
        if let Some(data_type) = self.data_type {
            options.data_type = data_type;
        }
        if let Some(ref reviver) = self.json_reviver {
            options.json_reviver = reviver.clone();
        }
        if let Some(ref factory) = self.create_request {
            options.create_request = factory.clone();
        }
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides")
            .field("headers", &self.headers)
            .field("before_send", &self.before_send.as_ref().map(Option::is_some))
            .field("reject_on_status_code", &self.reject_on_status_code)
            .field("timeout", &self.timeout)
            .field("data_only", &self.data_only)
            .field("data_type", &self.data_type)
            .field("json_reviver", &self.json_reviver.as_ref().map(Option::is_some))
            .field("create_request", &self.create_request.is_some())
            .field("extensions", &self.extensions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JSON_ACCEPT;
    use crate::utils::json::{iso8601_reviver, reviver};
    use serde_json::json;

    fn accept(options: &RequestOptions) -> Option<String> {
        options.headers.get("accept").and_then(|h| h.resolve(options))
    }

    #[test]
    fn test_resolve_without_overrides_is_equal_copy() {
        let defaults = RequestOptions::default();
        let resolved = defaults.resolve(None);

        assert_eq!(resolved, defaults);
        assert!(!std::ptr::eq(&resolved, &defaults));
    }

    #[test]
    fn test_resolve_never_touches_defaults() {
        let defaults = RequestOptions::default().with_extension("auth", Value::from(json!({"realm": "a"})));
        let overrides = Overrides::new()
            .header("accept", "text/plain")
            .reject_on_status_code(true)
            .with_extension("auth", Value::from(json!({"user": "b"})));

        let resolved = defaults.resolve(Some(&overrides));

        assert!(resolved.reject_on_status_code);
        assert!(!defaults.reject_on_status_code);
        assert_eq!(accept(&defaults), Some(JSON_ACCEPT.to_string()));
        assert_eq!(accept(&resolved), Some("text/plain".to_string()));
        assert_eq!(
            defaults.extension("auth"),
            Some(&Value::from(json!({"realm": "a"})))
        );
    }

    #[test]
    fn test_headers_merge_key_wise() {
        let resolved = RequestOptions::default().resolve(Some(&Overrides::new().header("x-trace", "1")));

        assert!(resolved.headers.get("content-type").is_some());
        assert!(resolved.headers.get("accept").is_some());
        assert!(resolved.headers.get("x-trace").is_some());
    }

    #[test]
    fn test_without_header_omits_it() {
        let resolved =
            RequestOptions::default().resolve(Some(&Overrides::new().without_header("content-type")));
        let sent = resolved.headers.resolve(&resolved);

        assert!(sent.iter().all(|(name, _)| name != "content-type"));
    }

    #[test]
    fn test_accept_tracks_resolved_data_type() {
        let resolved =
            RequestOptions::default().resolve(Some(&Overrides::new().data_type(DataType::Text)));
        assert_eq!(accept(&resolved), None);
    }

    #[test]
    fn test_extensions_deep_merge() {
        let defaults = RequestOptions::default()
            .with_extension("paging", Value::from(json!({"size": 10, "cursor": {"from": 0, "dir": "asc"}})));
        let overrides =
            Overrides::new().with_extension("paging", Value::from(json!({"cursor": {"from": 20}})));

        let resolved = defaults.resolve(Some(&overrides));
        assert_eq!(
            resolved.extension("paging"),
            Some(&Value::from(json!({"size": 10, "cursor": {"from": 20, "dir": "asc"}})))
        );
    }

    #[test]
    fn test_clearing_overrides() {
        let defaults = RequestOptions::default()
            .timeout(Duration::from_secs(5))
            .json_reviver(reviver(iso8601_reviver))
            .before_send(|_, _| {});
        let overrides = Overrides::new()
            .no_timeout()
            .no_json_reviver()
            .no_before_send();

        let resolved = defaults.resolve(Some(&overrides));
        assert!(resolved.timeout.is_none());
        assert!(resolved.json_reviver.is_none());
        assert!(resolved.before_send.is_none());
    }

    #[test]
    fn test_strict_preset() {
        let resolved = RequestOptions::default().resolve(Some(&Overrides::strict()));
        assert!(resolved.reject_on_status_code);
        assert!(resolved.data_only);
    }
}
