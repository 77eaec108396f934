// In-memory implementation for local runs and testing
//
// Keeps all events in a BTreeMap behind a RwLock. Ids come from a counter
// that is never reset, matching AUTO_INCREMENT semantics.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::command::{EventId, EventInput};
use crate::error::Result;
use crate::event::Event;
use crate::traits::EventStore;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Event>,
    last_id: i64,
}

/// In-memory event store
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryEventStore {
    /// Create a new, empty in-memory event store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Pre-populate with events (useful for testing). Existing ids are replaced.
    pub async fn seed(&self, events: Vec<Event>) {
        let mut table = self.table.write().await;
        for event in events {
            table.last_id = table.last_id.max(event.id);
            table.rows.insert(event.id, event);
        }
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn insert(&self, input: &EventInput) -> Result<Event> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let event = Event {
            id: table.last_id,
            start_time: input.start_time,
            end_time: input.end_time,
            event_title: input.event_title.clone(),
        };
        table.rows.insert(event.id, event.clone());
        Ok(event)
    }

    async fn list(&self) -> Result<Vec<Event>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: EventId) -> Result<Option<Event>> {
        Ok(self.table.read().await.rows.get(&id.get()).cloned())
    }

    async fn update(&self, id: EventId, input: &EventInput) -> Result<bool> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id.get()) {
            Some(event) => {
                event.start_time = input.start_time;
                event.end_time = input.end_time;
                event.event_title = input.event_title.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: EventId) -> Result<bool> {
        Ok(self.table.write().await.rows.remove(&id.get()).is_some())
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut table = self.table.write().await;
        let removed = table.rows.len() as u64;
        table.rows.clear();
        Ok(removed)
    }
}
