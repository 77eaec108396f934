// Event service for business logic

use chrono_tz::Tz;
use evento_core::{
    Event, EventError, EventId, EventInput, EventStore, ListedEvent, Result, UpdateEvent,
};
use std::sync::Arc;

pub struct EventService {
    store: Arc<dyn EventStore>,
    display_timezone: Tz,
}

impl EventService {
    pub fn new(store: Arc<dyn EventStore>, display_timezone: Tz) -> Self {
        Self {
            store,
            display_timezone,
        }
    }

    pub fn display_timezone(&self) -> Tz {
        self.display_timezone
    }

    pub async fn create(&self, input: EventInput) -> Result<Event> {
        self.store.insert(&input).await
    }

    /// All events with `start`/`end` expressed in the display zone
    pub async fn list(&self) -> Result<Vec<ListedEvent>> {
        let events = self.store.list().await?;
        Ok(events
            .into_iter()
            .map(|event| ListedEvent::new(event, self.display_timezone))
            .collect())
    }

    pub async fn get(&self, id: EventId) -> Result<Event> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| EventError::not_found(id.get()))
    }

    /// Overwrite an event. An unknown id is not an error; the return value
    /// says whether a row matched.
    pub async fn update(&self, cmd: UpdateEvent) -> Result<bool> {
        let matched = self.store.update(cmd.id, &cmd.input).await?;
        if !matched {
            tracing::warn!(event_id = cmd.id.get(), "Update matched no event");
        }
        Ok(matched)
    }

    pub async fn delete(&self, id: EventId) -> Result<()> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(EventError::not_found(id.get()))
        }
    }

    pub async fn delete_all(&self) -> Result<u64> {
        self.store.delete_all().await
    }

    pub async fn is_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Store health check failed");
                false
            }
        }
    }
}
