// Repository layer for database operations
//
// One parameterized statement per operation. Every call borrows a connection
// from the pool for the duration of the statement only.

use anyhow::Result;
use evento_core::EventInput;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use crate::models::EventRow;

#[derive(Clone)]
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Create a sized connection pool from explicit connect options
    pub async fn connect(
        options: MySqlConnectOptions,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            // Broken connections are replaced on the next acquire
            .test_before_acquire(true)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ============================================
    // Events
    // ============================================

    /// Insert an event, returning the generated id
    pub async fn create_event(&self, input: &EventInput) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO events (startTime, endTime, eventTitle)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(&input.event_title)
        .execute(&self.pool)
        .await?;

        Ok(i64::try_from(result.last_insert_id())?)
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, startTime, endTime, eventTitle
            FROM events
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_event(&self, id: i64) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, startTime, endTime, eventTitle
            FROM events
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Overwrite all fields; returns the number of matched rows
    pub async fn update_event(&self, id: i64, input: &EventInput) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET startTime = ?, endTime = ?, eventTitle = ?
            WHERE id = ?
            "#,
        )
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(&input.event_title)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_event(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_all_events(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM events")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
