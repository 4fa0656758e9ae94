// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Standalone helpers used by the request pipeline
//!
//! Everything here is pure and usable without a [`Client`](crate::Client):
//! the value tree, deep merge, shape checks and JSON revivers.

pub mod json;
mod merge;
mod value;

pub use merge::{merge, merge_all, merge_maps};
pub use value::{Callable, Map, Value};

/// Check if the value is callable
pub fn is_function(value: &Value) -> bool {
    value.is_function()
}

/// Check if the value is a date
pub fn is_date(value: &Value) -> bool {
    value.is_date()
}

/// Check if the value is an ordered sequence
pub fn is_array(value: &Value) -> bool {
    value.is_array()
}
