//! Epoch timestamp normalization for Stripe period fields.
//!
//! Stripe normally sends period boundaries as integer seconds since epoch,
//! but payloads have been observed carrying milliseconds, numeric strings,
//! and nulls. Everything un-normalizable degrades to `None`.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

/// Values above this threshold are interpreted as milliseconds since epoch,
/// values at or below it as seconds.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// Normalize a raw JSON epoch value into a UTC timestamp.
///
/// Accepts:
/// - JSON numbers (integer or float, truncated)
/// - JSON strings containing a base-10 integer (whitespace trimmed)
///
/// Returns `None` for nulls, absent values, unparseable strings, other JSON
/// types, and values that overflow the representable range.
pub fn normalize_epoch(raw: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = match raw? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };

    let millis = if raw > MILLIS_THRESHOLD {
        raw
    } else {
        raw.checked_mul(1000)?
    };

    Utc.timestamp_millis_opt(millis).single()
}

/// Render a timestamp as an ISO-8601 string with millisecond precision.
pub fn to_iso8601(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn normalizes_seconds() {
        let ts = normalize_epoch(Some(&json!(1704067200))).unwrap();
        assert_eq!(to_iso8601(&ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn normalizes_milliseconds() {
        let ts = normalize_epoch(Some(&json!(1704067200000i64))).unwrap();
        assert_eq!(to_iso8601(&ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn normalizes_numeric_string() {
        let ts = normalize_epoch(Some(&json!("1704067200"))).unwrap();
        assert_eq!(to_iso8601(&ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn normalizes_string_with_whitespace() {
        let ts = normalize_epoch(Some(&json!("  1704067200 "))).unwrap();
        assert_eq!(to_iso8601(&ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn null_yields_none() {
        assert_eq!(normalize_epoch(Some(&Value::Null)), None);
        assert_eq!(normalize_epoch(None), None);
    }

    #[test]
    fn garbage_string_yields_none() {
        assert_eq!(normalize_epoch(Some(&json!("not a number"))), None);
        assert_eq!(normalize_epoch(Some(&json!(""))), None);
    }

    #[test]
    fn wrong_json_type_yields_none() {
        assert_eq!(normalize_epoch(Some(&json!(true))), None);
        assert_eq!(normalize_epoch(Some(&json!({"seconds": 1}))), None);
        assert_eq!(normalize_epoch(Some(&json!([1704067200]))), None);
    }

    #[test]
    fn float_is_truncated() {
        let ts = normalize_epoch(Some(&json!(1704067200.9))).unwrap();
        assert_eq!(to_iso8601(&ts), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn threshold_boundary() {
        // Just above the threshold: treated as milliseconds.
        let above = normalize_epoch(Some(&json!(MILLIS_THRESHOLD + 1))).unwrap();
        assert_eq!(to_iso8601(&above), "2001-09-09T01:46:40.001Z");

        // At the threshold: still treated as seconds, landing far in the
        // future rather than in 2001.
        let at = normalize_epoch(Some(&json!(MILLIS_THRESHOLD))).unwrap();
        assert!(at > above);
    }

    #[test]
    fn overflow_yields_none() {
        assert_eq!(normalize_epoch(Some(&json!(i64::MAX))), None);
    }

    proptest! {
        // For realistic epochs, the seconds form and its milliseconds
        // equivalent normalize to the same instant.
        #[test]
        fn seconds_and_millis_agree(secs in 1_000_000_001i64..4_000_000_000i64) {
            let from_secs = normalize_epoch(Some(&json!(secs)));
            let from_millis = normalize_epoch(Some(&json!(secs * 1000)));
            prop_assert_eq!(from_secs, from_millis);
            prop_assert!(from_secs.is_some());
        }

        #[test]
        fn string_and_number_agree(secs in 1_000_000_000i64..4_000_000_000i64) {
            let from_number = normalize_epoch(Some(&json!(secs)));
            let from_string = normalize_epoch(Some(&json!(secs.to_string())));
            prop_assert_eq!(from_number, from_string);
        }
    }
}
