// Core traits for pluggable backends
//
// These traits allow the service to be used with different backends:
// - In-memory implementation for local runs and testing
// - Database implementation for production

use async_trait::async_trait;

use crate::command::{EventId, EventInput};
use crate::error::Result;
use crate::event::Event;

// ============================================================================
// EventStore - Persistence of the events table
// ============================================================================

/// Trait for storing and retrieving events
///
/// Each method maps to exactly one statement against the backing store.
/// Implementations must not hold state across calls beyond what the store
/// itself persists.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert a new event and return it with its generated id
    async fn insert(&self, input: &EventInput) -> Result<Event>;

    /// All events, in id order
    async fn list(&self) -> Result<Vec<Event>>;

    /// A single event, if it exists
    async fn get(&self, id: EventId) -> Result<Option<Event>>;

    /// Overwrite all fields of an event. Returns false when no row matched.
    async fn update(&self, id: EventId, input: &EventInput) -> Result<bool>;

    /// Delete one event. Returns false when no row matched.
    async fn delete(&self, id: EventId) -> Result<bool>;

    /// Delete every event, returning the number of rows removed
    async fn delete_all(&self) -> Result<u64>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
