//! Timestamp helpers.
//!
//! Proof timestamps are ISO 8601 strings in UTC with millisecond precision
//! (`2025-01-09T10:30:00.000Z`). Ledgers count nanoseconds since the Unix epoch.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Current time in the canonical proof timestamp format.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Converts a ledger timestamp (nanoseconds since the epoch) to a `DateTime<Utc>`.
///
/// Values past the range of `i64` nanoseconds (year 2262) saturate.
pub fn timestamp_to_datetime(nanos: u64) -> DateTime<Utc> {
    let nanos = i64::try_from(nanos).unwrap_or(i64::MAX);
    Utc.timestamp_nanos(nanos)
}

/// Converts a `DateTime<Utc>` to a ledger timestamp.
///
/// Pre-epoch times clamp to 0; times past year 2262 saturate at `u64::MAX`.
pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> u64 {
    match dt.timestamp_nanos_opt() {
        Some(nanos) => u64::try_from(nanos).unwrap_or(0),
        None if dt.timestamp() < 0 => 0,
        None => u64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_format() {
        let ts = now_iso8601();
        // 2025-01-09T10:30:00.000Z
        assert_eq!(ts.len(), 24);
        assert!(ts.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_ledger_timestamp_roundtrip() {
        let dt = DateTime::parse_from_rfc3339("2025-01-09T10:30:00.123Z")
            .unwrap()
            .with_timezone(&Utc);
        let nanos = datetime_to_timestamp(dt);
        assert_eq!(nanos, 1_736_418_600_123_000_000);
        assert_eq!(timestamp_to_datetime(nanos), dt);
    }

    #[test]
    fn test_pre_epoch_clamps_to_zero() {
        let dt = DateTime::parse_from_rfc3339("1969-12-31T23:59:59Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(datetime_to_timestamp(dt), 0);

        // Outside the i64 nanosecond range (before 1677)
        let dt = DateTime::parse_from_rfc3339("1600-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(datetime_to_timestamp(dt), 0);
    }

    #[test]
    fn test_far_future_saturates() {
        let dt = DateTime::parse_from_rfc3339("2300-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(datetime_to_timestamp(dt), u64::MAX);
    }
}
