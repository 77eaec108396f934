// Database models (internal, may differ from public DTOs)

use chrono::NaiveDateTime;
use evento_core::Event;
use sqlx::FromRow;

/// One row of the `events` table. Column names are camelCase in the schema.
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: i64,
    #[sqlx(rename = "startTime")]
    pub start_time: NaiveDateTime,
    #[sqlx(rename = "endTime")]
    pub end_time: NaiveDateTime,
    #[sqlx(rename = "eventTitle")]
    pub event_title: String,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            event_title: row.event_title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_into_event() {
        let start = NaiveDateTime::parse_from_str("2024-01-10 09:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let row = EventRow {
            id: 4,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            event_title: "Planning".to_string(),
        };

        let event = Event::from(row);
        assert_eq!(event.id, 4);
        assert_eq!(event.start_time, start);
        assert_eq!(event.end_time - event.start_time, chrono::Duration::hours(1));
        assert_eq!(event.event_title, "Planning");
    }
}
