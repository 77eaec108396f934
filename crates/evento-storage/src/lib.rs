// MySQL storage layer with sqlx
//
// This crate provides database implementations for core traits:
// - DbEventStore: implements EventStore for the `events` table
//
// The schema itself is owned by the database; `sql/events.sql` documents the
// expected table for local setups.

pub mod event_store;
pub mod models;
pub mod repositories;

pub use event_store::{create_db_event_store, DbEventStore};
pub use models::*;
pub use repositories::*;
