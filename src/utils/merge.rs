// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Deep merge of value trees
//!
//! Sources are applied left to right onto `out`. Plain mappings are merged
//! key by key; every other shape (arrays, dates, functions, primitives,
//! null) replaces whatever `out` held under that key.
//!
//! ```rust
//! use courier::utils::{merge_all, Value};
//! use serde_json::json;
//!
//! let defaults = Value::from(json!({"b": {"c": {"d": 2, "e": 3}}}));
//! let overrides = Value::from(json!({"b": {"c": {"d": 100}}}));
//!
//! let merged = merge_all([&defaults, &overrides]);
//! assert_eq!(merged, Value::from(json!({"b": {"c": {"d": 100, "e": 3}}})));
//! ```

use super::value::{Map, Value};

/// Merge `sources` into `out` and return `out`
///
/// `out` is the only argument modified. If it is not a plain mapping it is
/// replaced with an empty one first. Sources that are not plain mappings
/// (including null) contribute nothing.
pub fn merge<'a, 'b, I>(out: &'a mut Value, sources: I) -> &'a mut Value
where
    I: IntoIterator<Item = &'b Value>,
{
    if !out.is_object() {
        *out = Value::object();
    }

    if let Value::Object(target) = out {
        for source in sources {
            if let Value::Object(source) = source {
                merge_maps(target, source);
            }
        }
    }

    out
}

/// Merge every source into a fresh mapping
///
/// Equivalent to `merge` with an empty mapping as `out`, so none of the
/// sources are touched.
pub fn merge_all<'b, I>(sources: I) -> Value
where
    I: IntoIterator<Item = &'b Value>,
{
    let mut out = Value::object();
    merge(&mut out, sources);
    out
}

/// Merge one mapping into another in place
pub fn merge_maps(target: &mut Map, source: &Map) {
    for (key, incoming) in source {
        match incoming {
            Value::Object(nested) => {
                let slot = target.entry(key.clone()).or_insert_with(Value::object);
                if !slot.is_object() {
                    *slot = Value::object();
                }
                if let Value::Object(existing) = slot {
                    merge_maps(existing, nested);
                }
            }
            atomic => {
                target.insert(key.clone(), atomic.clone());
            }
        }
    }
}
