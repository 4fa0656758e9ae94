// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Courier - Promise-style HTTP requests
//!
//! A small request helper that wraps a callback-driven transport in an
//! async API, with shared defaults and per-call overrides.
//!
//! ## Features
//!
//! - Default headers, literal or computed from the resolved options
//! - JSON bodies serialized on the way out and decoded on the way in
//! - Revivers for ISO-8601 and `/Date(ticks)/` date strings
//! - Per-call timeout with a single watchdog
//! - Optional rejection of statuses outside 200..=399
//! - Data-only replies
//! - Deep merge of plain object trees
//!
//! ## Example
//!
//! ```rust,no_run
//! use courier::utils::json::{iso8601_reviver, reviver};
//! use courier::{Client, Overrides};
//!
//! #[tokio::main]
//! async fn main() -> courier::Result<()> {
//!     let client = Client::new();
//!
//!     let overrides = Overrides::new()
//!         .json_reviver(reviver(iso8601_reviver))
//!         .data_only(true);
//!
//!     let user = client
//!         .get("https://example.com/api/users/1", Some(&overrides))
//!         .await?
//!         .into_data();
//!
//!     if let Some(created) = user.get("createdAt").and_then(|v| v.as_date()) {
//!         println!("created {}", created);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod utils;

// Re-exports for convenience

// Client
pub use http::{Body, Client, Reply, Response};

// Configuration
pub use config::{DataType, HeaderValue, Headers, Overrides, RequestOptions};

// Transport
pub use transport::{MockTransport, ReqwestTransport, Transport, TransportEvent, TransportFactory};

// Utilities
pub use utils::{is_array, is_date, is_function, merge, merge_all, Map, Value};

// Errors
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent by the default transport
pub const DEFAULT_USER_AGENT: &str = concat!("courier/", env!("CARGO_PKG_VERSION"));
