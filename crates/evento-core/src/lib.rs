// Event Service core
//
// DB-agnostic building blocks shared by the storage and API crates.
//
// Key design decisions:
// - Request bodies are validated into typed commands before any store call
// - Stores plug in through the EventStore trait (MySQL in production, memory in tests)
// - Timestamps are stored as naive UTC with whole seconds; zones apply on read only

pub mod command;
pub mod error;
pub mod event;
pub mod time;
pub mod traits;

// In-memory implementation for local runs and testing
pub mod memory;

// Re-exports for convenience
pub use command::{
    CreateEventPayload, EventId, EventIdPayload, EventInput, UpdateEvent, UpdateEventPayload,
};
pub use error::{EventError, Result};
pub use event::{Event, ListedEvent};
pub use memory::InMemoryEventStore;
pub use time::{parse_timestamp, parse_timezone, to_zone, DEFAULT_DISPLAY_TIMEZONE};
pub use traits::EventStore;
