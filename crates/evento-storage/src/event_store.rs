// Database-backed EventStore implementation
//
// This module implements the core EventStore trait on top of the MySQL
// repository layer.

use async_trait::async_trait;
use evento_core::{Event, EventError, EventId, EventInput, EventStore, Result};

use crate::repositories::Database;

// ============================================================================
// DbEventStore - Persists events in the `events` table
// ============================================================================

/// Database-backed event store
#[derive(Clone)]
pub struct DbEventStore {
    db: Database,
}

impl DbEventStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn store_error(e: anyhow::Error) -> EventError {
    EventError::store(e.to_string())
}

#[async_trait]
impl EventStore for DbEventStore {
    async fn insert(&self, input: &EventInput) -> Result<Event> {
        let id = self.db.create_event(input).await.map_err(store_error)?;
        Ok(Event {
            id,
            start_time: input.start_time,
            end_time: input.end_time,
            event_title: input.event_title.clone(),
        })
    }

    async fn list(&self) -> Result<Vec<Event>> {
        let rows = self.db.list_events().await.map_err(store_error)?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn get(&self, id: EventId) -> Result<Option<Event>> {
        let row = self.db.get_event(id.get()).await.map_err(store_error)?;
        Ok(row.map(Event::from))
    }

    async fn update(&self, id: EventId, input: &EventInput) -> Result<bool> {
        let affected = self
            .db
            .update_event(id.get(), input)
            .await
            .map_err(store_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: EventId) -> Result<bool> {
        let affected = self.db.delete_event(id.get()).await.map_err(store_error)?;
        Ok(affected > 0)
    }

    async fn delete_all(&self) -> Result<u64> {
        self.db.delete_all_events().await.map_err(store_error)
    }

    async fn ping(&self) -> Result<()> {
        self.db.ping().await.map_err(store_error)
    }
}

// ============================================================================
// Factory functions
// ============================================================================

/// Create a database-backed event store
pub fn create_db_event_store(db: Database) -> DbEventStore {
    DbEventStore::new(db)
}
