// ABOUTME: Database operations for template days
// ABOUTME: Idempotent get-or-create keyed by (template_id, day_index); days are sparse
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::models::Day;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Day database operations manager
///
/// Day rows emulate a sparse array: a row for a given index exists only
/// once something was written there, and writes go through get-or-create.
pub struct DaysManager {
    pool: SqlitePool,
}

impl DaysManager {
    /// Create a new days manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the day row at an index, creating it if missing
    ///
    /// Idempotent: concurrent or repeated calls for the same
    /// `(template_id, day_index)` converge on a single row.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero index or a failed database operation
    pub async fn get_or_create(&self, template_id: Uuid, day_index: u32) -> AppResult<Day> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        Self::get_or_create_in(&mut conn, template_id, day_index).await
    }

    /// Transaction-aware variant of [`Self::get_or_create`]
    ///
    /// # Errors
    ///
    /// Returns an error for a zero index or a failed database operation
    pub async fn get_or_create_in(
        conn: &mut SqliteConnection,
        template_id: Uuid,
        day_index: u32,
    ) -> AppResult<Day> {
        if day_index == 0 {
            return Err(AppError::out_of_range("day_index is 1-based"));
        }

        let now = Utc::now();
        sqlx::query(
            r"
            INSERT INTO template_days (id, template_id, day_index, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(template_id, day_index) DO NOTHING
            ",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(template_id.to_string())
        .bind(i64::from(day_index))
        .bind(now.to_rfc3339())
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to create day: {e}")))?;

        let row = sqlx::query(
            r"
            SELECT id, template_id, day_index, title, notes, created_at
            FROM template_days
            WHERE template_id = $1 AND day_index = $2
            ",
        )
        .bind(template_id.to_string())
        .bind(i64::from(day_index))
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get day: {e}")))?;

        row_to_day(&row)
    }

    /// Get a day by its ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, day_id: Uuid) -> AppResult<Option<Day>> {
        let row = sqlx::query(
            r"
            SELECT id, template_id, day_index, title, notes, created_at
            FROM template_days
            WHERE id = $1
            ",
        )
        .bind(day_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get day: {e}")))?;

        row.map(|r| row_to_day(&r)).transpose()
    }

    /// Get the day at an index, if a row exists there
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_by_index(
        &self,
        template_id: Uuid,
        day_index: u32,
    ) -> AppResult<Option<Day>> {
        let row = sqlx::query(
            r"
            SELECT id, template_id, day_index, title, notes, created_at
            FROM template_days
            WHERE template_id = $1 AND day_index = $2
            ",
        )
        .bind(template_id.to_string())
        .bind(i64::from(day_index))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get day: {e}")))?;

        row.map(|r| row_to_day(&r)).transpose()
    }

    /// List all day rows of a template, ascending by index
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_for_template(&self, template_id: Uuid) -> AppResult<Vec<Day>> {
        let rows = sqlx::query(
            r"
            SELECT id, template_id, day_index, title, notes, created_at
            FROM template_days
            WHERE template_id = $1
            ORDER BY day_index ASC
            ",
        )
        .bind(template_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list days: {e}")))?;

        rows.iter().map(row_to_day).collect()
    }

    /// Set a day's title and notes, creating the row if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update_details(
        &self,
        template_id: Uuid,
        day_index: u32,
        title: Option<&str>,
        notes: Option<&str>,
    ) -> AppResult<Day> {
        let day = self.get_or_create(template_id, day_index).await?;

        sqlx::query("UPDATE template_days SET title = $1, notes = $2 WHERE id = $3")
            .bind(title)
            .bind(notes)
            .bind(day.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update day: {e}")))?;

        Ok(Day {
            title: title.map(ToOwned::to_owned),
            notes: notes.map(ToOwned::to_owned),
            ..day
        })
    }

    /// Insert a fully-formed day row inside a caller-held transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_in(conn: &mut SqliteConnection, day: &Day) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO template_days (id, template_id, day_index, title, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(day.id.to_string())
        .bind(day.template_id.to_string())
        .bind(i64::from(day.day_index))
        .bind(&day.title)
        .bind(&day.notes)
        .bind(day.created_at.to_rfc3339())
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert day: {e}")))?;

        Ok(())
    }
}

/// Convert a database row to a Day struct
fn row_to_day(row: &SqliteRow) -> AppResult<Day> {
    let id_str: String = row.get("id");
    let template_id_str: String = row.get("template_id");
    let day_index: i64 = row.get("day_index");
    let created_at_str: String = row.get("created_at");

    Ok(Day {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        template_id: Uuid::parse_str(&template_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        day_index: u32::try_from(day_index)
            .map_err(|e| AppError::internal(format!("Invalid day_index: {e}")))?,
        title: row.get("title"),
        notes: row.get("notes"),
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}
