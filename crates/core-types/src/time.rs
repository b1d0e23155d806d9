//! Conversions between epoch seconds and the ISO-8601 strings used at the edges.
//!
//! Output is always UTC with a literal `Z` suffix and whole-second precision,
//! e.g. `2024-03-01T12:00:00Z`.

use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

pub const SECONDS_PER_DAY: i64 = 86_400;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];

/// Converts epoch seconds into a UTC `DateTime`.
pub(crate) fn utc_datetime(secs: i64) -> Result<DateTime<Utc>, CoreError> {
    DateTime::from_timestamp(secs, 0).ok_or(CoreError::TimestampOutOfRange(secs))
}

/// Formats epoch seconds as extended ISO-8601 with a `Z` suffix.
pub fn epoch_to_iso(secs: i64) -> Result<String, CoreError> {
    Ok(utc_datetime(secs)?.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Parses a caller-supplied date bound into epoch seconds.
///
/// Accepts RFC 3339 (with `Z` or a numeric offset), naive date-times and bare
/// dates. Naive values are read as UTC. Anything unparseable yields `None`, so a
/// malformed bound degrades to "no bound" instead of failing the request.
pub fn parse_iso_to_epoch(input: &str) -> Option<i64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.timestamp());
        }
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc().timestamp());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc().timestamp())
}

/// Serde adapter rendering an epoch-seconds `i64` as an ISO-8601 string.
pub mod iso_seconds {
    use serde::{ser, Serializer};

    pub fn serialize<S: Serializer>(secs: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        let iso = super::epoch_to_iso(*secs).map_err(ser::Error::custom)?;
        serializer.serialize_str(&iso)
    }
}

/// Same as [`iso_seconds`] for optional values; `None` maps to `null`.
pub mod iso_seconds_option {
    use serde::{ser, Serializer};

    pub fn serialize<S: Serializer>(secs: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        match secs {
            Some(secs) => {
                let iso = super::epoch_to_iso(*secs).map_err(ser::Error::custom)?;
                serializer.serialize_some(&iso)
            }
            None => serializer.serialize_none(),
        }
    }
}
