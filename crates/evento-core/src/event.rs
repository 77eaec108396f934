// Event domain types
//
// `Event` mirrors one row of the `events` table. JSON field names are part of
// the public contract and stay camelCase.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::time::{stored_format, to_zone};

/// Calendar entry with a start time, end time and title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    #[serde(with = "stored_format")]
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, example = "2024-01-10 09:00:00")
    )]
    pub start_time: NaiveDateTime,
    #[serde(with = "stored_format")]
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, example = "2024-01-10 10:00:00")
    )]
    pub end_time: NaiveDateTime,
    pub event_title: String,
}

/// Event as returned by the list operation.
///
/// Carries the stored fields unchanged plus `start`/`end`: the stored UTC
/// values expressed in the display zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListedEvent {
    #[serde(flatten)]
    pub event: Event,
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, example = "2024-01-10T06:00:00-03:00")
    )]
    pub start: DateTime<FixedOffset>,
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, example = "2024-01-10T07:00:00-03:00")
    )]
    pub end: DateTime<FixedOffset>,
}

impl ListedEvent {
    pub fn new(event: Event, tz: Tz) -> Self {
        let start = to_zone(&event.start_time, tz).fixed_offset();
        let end = to_zone(&event.end_time, tz).fixed_offset();
        Self { event, start, end }
    }
}
