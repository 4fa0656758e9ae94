// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request header configuration
//!
//! A header is either a literal string or a function of the resolved
//! options, evaluated at send time. Empty or absent values are not sent.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::options::RequestOptions;

/// Header producer evaluated with the resolved options
pub type HeaderFn = Arc<dyn Fn(&RequestOptions) -> Option<String> + Send + Sync>;

/// Configured value of a single header
#[derive(Clone)]
pub enum HeaderValue {
    /// Sent as-is unless empty
    Literal(String),
    /// Computed per request; `None` or an empty string omits the header
    Computed(HeaderFn),
}

impl HeaderValue {
    /// Create a literal value
    pub fn literal(value: impl Into<String>) -> Self {
        HeaderValue::Literal(value.into())
    }

    /// Create a computed value
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&RequestOptions) -> Option<String> + Send + Sync + 'static,
    {
        HeaderValue::Computed(Arc::new(f))
    }

    /// Produce the value to send, if any
    pub fn resolve(&self, options: &RequestOptions) -> Option<String> {
        let value = match self {
            HeaderValue::Literal(value) => Some(value.clone()),
            HeaderValue::Computed(f) => f(options),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            HeaderValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl PartialEq for HeaderValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HeaderValue::Literal(a), HeaderValue::Literal(b)) => a == b,
            (HeaderValue::Computed(a), HeaderValue::Computed(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Literal(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Literal(value)
    }
}

/// Header names are stored lower-cased, so `Accept` and `accept` are the
/// same entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers {
    entries: BTreeMap<String, HeaderValue>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a header, replacing any previous value
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<HeaderValue>) {
        self.entries
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Get a configured header
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries.get(&name.to_ascii_lowercase())
    }

    /// Remove a configured header
    pub fn remove(&mut self, name: &str) -> Option<HeaderValue> {
        self.entries.remove(&name.to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `other` onto this set; its entries win
    pub fn extend_from(&mut self, other: &Headers) {
        for (name, value) in &other.entries {
            self.entries.insert(name.clone(), value.clone());
        }
    }

    /// Evaluate every header against the resolved options
    ///
    /// Headers that produce nothing are left out.
    pub fn resolve(&self, options: &RequestOptions) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(name, value)| value.resolve(options).map(|v| (name.clone(), v)))
            .collect()
    }
}
