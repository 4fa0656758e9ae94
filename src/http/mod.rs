// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request layer
//!
//! [`Client`] resolves options and hands each call to the [`Pipeline`],
//! which drives one transport exchange and settles it into a [`Reply`].

pub mod auth;
mod body;
mod client;
pub mod pipeline;
mod response;

pub use body::Body;
pub use client::Client;
pub use pipeline::{execute, Pipeline, Stage, ACCEPTED_STATUS};
pub use response::{Reply, Response, LEGACY_NO_CONTENT};

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const AUTHORIZATION: &str = "authorization";
}
