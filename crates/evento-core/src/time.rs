// Timestamp parsing, canonical formatting and zone conversion
//
// Stored timestamps are naive UTC wall-clock values with whole-second
// precision, rendered as `YYYY-MM-DD HH:mm:ss`. Zone conversion is applied
// on read only and never changes what is stored.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, TimeZone};
use chrono_tz::Tz;

use crate::error::{EventError, Result};

/// Canonical textual form of a stored timestamp
pub const STORED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Zone used for listed events when none is configured
pub const DEFAULT_DISPLAY_TIMEZONE: &str = "America/Sao_Paulo";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a client-supplied timestamp into the canonical stored value.
///
/// Inputs carrying an offset (RFC 3339) are converted to UTC first. Naive
/// inputs are read as UTC. A bare date means midnight. Sub-second precision
/// is dropped.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return Err(EventError::validation("Timestamp must not be empty"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.naive_utc().trunc_subsecs(0));
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt.trunc_subsecs(0));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    Err(EventError::validation(format!(
        "Invalid timestamp: {}",
        input
    )))
}

/// Convert epoch milliseconds into the canonical stored value
pub fn from_epoch_millis(millis: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc().trunc_subsecs(0))
        .ok_or_else(|| EventError::validation(format!("Invalid timestamp: {}", millis)))
}

/// Render a stored timestamp in its canonical text form
pub fn format_stored(dt: &NaiveDateTime) -> String {
    dt.format(STORED_FORMAT).to_string()
}

/// Resolve an IANA zone name
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| EventError::validation(format!("Unknown timezone: {}", name)))
}

/// Interpret a stored timestamp as UTC and express it in `tz`
pub fn to_zone(utc: &NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    tz.from_utc_datetime(utc)
}

/// Serde adapter for timestamps in the canonical stored form
pub mod stored_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_stored(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, super::STORED_FORMAT).map_err(serde::de::Error::custom)
    }
}
