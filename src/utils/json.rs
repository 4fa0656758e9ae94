// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JSON decoding with revivers
//!
//! A reviver is called for every property of the decoded tree, innermost
//! first, with the property key (array indices as decimal strings, the
//! root as `""`) and the already-revived value. Returning `None` drops the
//! property from its parent object; a dropped array element becomes null.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use super::value::Value;

/// Per-property transform applied while decoding
pub type Reviver = Arc<dyn Fn(&str, Value) -> Option<Value> + Send + Sync>;

lazy_static! {
    static ref ISO8601: Regex =
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2}(?:\.\d*)?)").unwrap();
    static ref MS_DATE: Regex = Regex::new(r"^/Date\((\d+)\)/$").unwrap();
}

/// Wrap a closure as a [`Reviver`]
pub fn reviver<F>(f: F) -> Reviver
where
    F: Fn(&str, Value) -> Option<Value> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Parse JSON text, applying `reviver` to every property when given
pub fn parse_with_reviver(text: &str, reviver: Option<&Reviver>) -> serde_json::Result<Value> {
    let parsed: serde_json::Value = serde_json::from_str(text)?;
    let value = Value::from(parsed);

    Ok(match reviver {
        Some(reviver) => revive("", value, reviver.as_ref()).unwrap_or(Value::Null),
        None => value,
    })
}

/// Decode a response body
///
/// Absent or empty text decodes to null rather than failing.
pub fn decode(text: Option<&str>, reviver: Option<&Reviver>) -> serde_json::Result<Value> {
    match text {
        None | Some("") => Ok(Value::Null),
        Some(text) => parse_with_reviver(text, reviver),
    }
}

fn revive(
    key: &str,
    value: Value,
    reviver: &(dyn Fn(&str, Value) -> Option<Value> + Send + Sync),
) -> Option<Value> {
    let value = match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| revive(&i.to_string(), item, reviver).unwrap_or(Value::Null))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter_map(|(k, item)| revive(&k, item, reviver).map(|revived| (k, revived)))
                .collect(),
        ),
        other => other,
    };

    reviver(key, value)
}

/// Turn ISO 8601 date-time strings into dates
///
/// Strings starting with `YYYY-MM-DDTHH:MM:SS` are parsed; a missing
/// offset is read as UTC. Strings that match the shape but fail to parse
/// are left as they are.
pub fn iso8601_reviver(_key: &str, value: Value) -> Option<Value> {
    if let Value::String(ref text) = value {
        if ISO8601.is_match(text) {
            if let Some(date) = parse_iso8601(text) {
                return Some(Value::Date(date));
            }
        }
    }
    Some(value)
}

fn parse_iso8601(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Turn legacy `/Date(ticks)/` strings into dates
///
/// `ticks` is milliseconds since the Unix epoch.
pub fn ms_date_reviver(_key: &str, value: Value) -> Option<Value> {
    if let Value::String(ref text) = value {
        let millis = MS_DATE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<i64>().ok());

        if let Some(date) = millis.and_then(|ms| Utc.timestamp_millis_opt(ms).single()) {
            return Some(Value::Date(date));
        }
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_decode_empty_is_null() {
        assert_eq!(decode(Some(""), None).unwrap(), Value::Null);
        assert_eq!(decode(None, None).unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_malformed_fails() {
        assert!(decode(Some("{not json"), None).is_err());
    }

    #[test]
    fn test_iso8601_reviver() {
        let r = reviver(iso8601_reviver);
        let value =
            parse_with_reviver(r#"{"at": "2024-03-01T12:30:45.250Z", "name": "x"}"#, Some(&r))
                .unwrap();

        let date = value.get("at").and_then(Value::as_date).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.timestamp_subsec_millis(), 250);
        assert_eq!(value.get("name").and_then(Value::as_str), Some("x"));
    }

    #[test]
    fn test_iso8601_without_offset() {
        let revived = iso8601_reviver("", Value::from("2020-01-02T03:04:05")).unwrap();
        assert_eq!(
            revived.as_date().copied(),
            Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).single()
        );
    }

    #[test]
    fn test_iso8601_ignores_plain_dates() {
        let revived = iso8601_reviver("", Value::from("2020-01-02")).unwrap();
        assert_eq!(revived, Value::from("2020-01-02"));
    }

    #[test]
    fn test_ms_date_reviver() {
        let revived = ms_date_reviver("", Value::from("/Date(1000)/")).unwrap();
        assert_eq!(revived.as_date().map(|d| d.timestamp()), Some(1));

        let untouched = ms_date_reviver("", Value::from("Date(1000)")).unwrap();
        assert!(untouched.is_string());
    }

    #[test]
    fn test_reviver_can_drop_properties() {
        let r = reviver(|key, value| if key == "secret" { None } else { Some(value) });
        let value = parse_with_reviver(r#"{"secret": 1, "keep": [1, 2]}"#, Some(&r)).unwrap();

        assert!(value.get("secret").is_none());
        assert_eq!(value.get("keep").and_then(Value::as_array).map(Vec::len), Some(2));
    }

    #[test]
    fn test_reviver_sees_innermost_first() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let log = seen.clone();
        let r = reviver(move |key, value| {
            log.lock().push(key.to_string());
            Some(value)
        });

        parse_with_reviver(r#"{"a": {"b": [true]}}"#, Some(&r)).unwrap();
        assert_eq!(*seen.lock(), vec!["0", "b", "a", ""]);
    }
}
