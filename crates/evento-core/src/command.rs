// Request payloads and validated commands
//
// Payloads accept any JSON shape so that every malformed body is reported
// through the same validation path. Commands are only built from payloads
// that passed validation, and are the only input the stores accept.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::{EventError, Result};
use crate::time::{from_epoch_millis, parse_timestamp};

// ============================================================================
// EventId
// ============================================================================

/// Store-generated event identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl EventId {
    pub fn get(self) -> i64 {
        self.0
    }

    /// Accepts a JSON integer (`1` or `1.0`) or a string holding one
    pub fn from_value(value: Option<&Value>) -> Result<Self> {
        match value {
            Some(Value::Number(n)) => integral(n).map(EventId).ok_or_else(invalid_id),
            Some(Value::String(s)) => s.parse(),
            _ => Err(invalid_id()),
        }
    }
}

impl FromStr for EventId {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim().parse::<i64>().map(EventId).map_err(|_| invalid_id())
    }
}

fn invalid_id() -> EventError {
    EventError::validation("Invalid id")
}

/// The integer a JSON number holds, if it has no fractional part
fn integral(n: &serde_json::Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

// ============================================================================
// Payloads (raw request bodies)
// ============================================================================

/// Body of a create request
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-01-10T09:00:00Z"))]
    pub start_time: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-01-10T10:00:00Z"))]
    pub end_time: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "Standup"))]
    pub event_title: Option<Value>,
}

/// Body of an update request
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventPayload {
    #[cfg_attr(feature = "openapi", schema(value_type = i64, example = 1))]
    pub id: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-01-10T09:30:00Z"))]
    pub start_time: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-01-10T10:30:00Z"))]
    pub end_time: Option<Value>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "Standup (moved)"))]
    pub event_title: Option<Value>,
}

/// Body of a fetch-by-id request
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EventIdPayload {
    #[cfg_attr(feature = "openapi", schema(value_type = i64, example = 1))]
    pub id: Option<Value>,
}

// ============================================================================
// Commands (validated input)
// ============================================================================

/// Validated event fields, timestamps already in canonical stored form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInput {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub event_title: String,
}

impl EventInput {
    fn from_parts(
        start_time: Option<&Value>,
        end_time: Option<&Value>,
        event_title: Option<&Value>,
    ) -> Result<Self> {
        Ok(Self {
            start_time: required_timestamp(start_time, "startTime")?,
            end_time: required_timestamp(end_time, "endTime")?,
            event_title: required_text(event_title, "eventTitle")?,
        })
    }
}

impl TryFrom<CreateEventPayload> for EventInput {
    type Error = EventError;

    fn try_from(payload: CreateEventPayload) -> Result<Self> {
        EventInput::from_parts(
            payload.start_time.as_ref(),
            payload.end_time.as_ref(),
            payload.event_title.as_ref(),
        )
    }
}

/// Full overwrite of an existing event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEvent {
    pub id: EventId,
    pub input: EventInput,
}

impl TryFrom<UpdateEventPayload> for UpdateEvent {
    type Error = EventError;

    fn try_from(payload: UpdateEventPayload) -> Result<Self> {
        let id = EventId::from_value(payload.id.as_ref())?;
        let input = EventInput::from_parts(
            payload.start_time.as_ref(),
            payload.end_time.as_ref(),
            payload.event_title.as_ref(),
        )?;
        Ok(Self { id, input })
    }
}

impl TryFrom<EventIdPayload> for EventId {
    type Error = EventError;

    fn try_from(payload: EventIdPayload) -> Result<Self> {
        EventId::from_value(payload.id.as_ref())
    }
}

/// A present timestamp field. Numbers are epoch milliseconds; anything else
/// goes through the text rules and is parsed.
fn required_timestamp(value: Option<&Value>, field: &str) -> Result<NaiveDateTime> {
    match value {
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => match integral(n) {
            Some(millis) => from_epoch_millis(millis),
            None => Err(EventError::validation(format!("Invalid timestamp: {}", n))),
        },
        other => parse_timestamp(&required_text(other, field)?),
    }
}

/// A present, non-empty text field. Numbers and booleans are taken as their
/// JSON text; `false` and `0` count as absent.
fn required_text(value: Option<&Value>, field: &str) -> Result<String> {
    let text = match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => {
            return Err(EventError::validation(format!(
                "Field {} must be a string",
                field
            )))
        }
        _ => {
            return Err(EventError::validation(format!(
                "Missing required field: {}",
                field
            )))
        }
    };
    Ok(text)
}
