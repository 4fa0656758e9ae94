// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request configuration
//!
//! Client-wide defaults are held as [`RequestOptions`]; each call may pass
//! [`Overrides`], and the two are resolved into a fresh `RequestOptions`
//! that lives only for that call.

mod headers;
mod options;
mod overrides;

pub use headers::{HeaderFn, HeaderValue, Headers};
pub use options::{BeforeSend, DataType, RequestOptions, JSON_ACCEPT, JSON_CONTENT_TYPE};
pub use overrides::Overrides;
