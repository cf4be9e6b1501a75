// ABOUTME: Database operations for session modules
// ABOUTME: Ordering within a day, draft/published toggling, and transaction-aware inserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::templates::validated_title;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Module, ModuleStatus, ModuleType, SessionMeta, SessionTiming, SessionType,
    UpdateModuleRequest,
};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Module database operations manager
pub struct ModulesManager {
    pool: SqlitePool,
}

impl ModulesManager {
    /// Create a new modules manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new module on a day, appended after the day's last module
    ///
    /// New modules always start as drafts; publication is an explicit,
    /// separate step and is never inherited.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty title, or a database error
    /// if the insert fails
    pub async fn create(
        &self,
        day_id: Uuid,
        owner_id: Uuid,
        meta: &SessionMeta,
    ) -> AppResult<Module> {
        let title = validated_title(&meta.title)?;

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;

        let now = Utc::now();
        let module = Module {
            id: Uuid::new_v4(),
            day_id,
            owner_id,
            module_type: meta.module_type,
            session_type: meta.session_type,
            session_timing: meta.session_timing,
            title,
            sort_order: Self::next_sort_order_in(&mut conn, day_id).await?,
            status: ModuleStatus::Draft,
            created_at: now,
            updated_at: now,
        };

        Self::insert_in(&mut conn, &module).await?;
        Ok(module)
    }

    /// Get a module by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, module_id: Uuid) -> AppResult<Option<Module>> {
        let row = sqlx::query(
            r"
            SELECT id, day_id, owner_id, module_type, session_type, session_timing,
                   title, sort_order, status, created_at, updated_at
            FROM modules
            WHERE id = $1
            ",
        )
        .bind(module_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get module: {e}")))?;

        row.map(|r| row_to_module(&r)).transpose()
    }

    /// List a day's modules in sort order
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_for_day(&self, day_id: Uuid) -> AppResult<Vec<Module>> {
        let rows = sqlx::query(
            r"
            SELECT id, day_id, owner_id, module_type, session_type, session_timing,
                   title, sort_order, status, created_at, updated_at
            FROM modules
            WHERE day_id = $1
            ORDER BY sort_order ASC
            ",
        )
        .bind(day_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list modules: {e}")))?;

        rows.iter().map(row_to_module).collect()
    }

    /// Next append position within a day: max(sort_order) + 1
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn next_sort_order_in(
        conn: &mut SqliteConnection,
        day_id: Uuid,
    ) -> AppResult<i64> {
        let row = sqlx::query(
            "SELECT COALESCE(MAX(sort_order), 0) AS max_order FROM modules WHERE day_id = $1",
        )
        .bind(day_id.to_string())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to read sort order: {e}")))?;

        let max_order: i64 = row.get("max_order");
        Ok(max_order + 1)
    }

    /// Insert a fully-formed module row inside a caller-held transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_in(conn: &mut SqliteConnection, module: &Module) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO modules (
                id, day_id, owner_id, module_type, session_type, session_timing,
                title, sort_order, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(module.id.to_string())
        .bind(module.day_id.to_string())
        .bind(module.owner_id.to_string())
        .bind(module.module_type.as_str())
        .bind(module.session_type.as_str())
        .bind(module.session_timing.as_str())
        .bind(&module.title)
        .bind(module.sort_order)
        .bind(module.status.as_str())
        .bind(module.created_at.to_rfc3339())
        .bind(module.updated_at.to_rfc3339())
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert module: {e}")))?;

        Ok(())
    }

    /// Update a module's descriptive fields (status untouched)
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty replacement title, or a
    /// database error if the update fails
    pub async fn update_meta(
        &self,
        module_id: Uuid,
        request: &UpdateModuleRequest,
    ) -> AppResult<Option<Module>> {
        let existing = self.get(module_id).await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let title = match &request.title {
            Some(t) => validated_title(t)?,
            None => existing.title,
        };
        let module_type = request.module_type.unwrap_or(existing.module_type);
        let session_type = request.session_type.unwrap_or(existing.session_type);
        let session_timing = request.session_timing.unwrap_or(existing.session_timing);
        let now = Utc::now();

        let result = sqlx::query(
            r"
            UPDATE modules SET
                title = $1, module_type = $2, session_type = $3,
                session_timing = $4, updated_at = $5
            WHERE id = $6
            ",
        )
        .bind(&title)
        .bind(module_type.as_str())
        .bind(session_type.as_str())
        .bind(session_timing.as_str())
        .bind(now.to_rfc3339())
        .bind(module_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update module: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(module_id).await
    }

    /// Flip a module between draft and published
    ///
    /// No cascade: child exercise entries and prescriptions are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn toggle_status(&self, module_id: Uuid) -> AppResult<Option<Module>> {
        let row = sqlx::query("SELECT status FROM modules WHERE id = $1")
            .bind(module_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get module: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let current: String = row.get("status");
        let new_status = ModuleStatus::parse(&current).toggled();
        let now = Utc::now();

        sqlx::query("UPDATE modules SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(new_status.as_str())
            .bind(now.to_rfc3339())
            .bind(module_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to toggle module status: {e}")))?;

        self.get(module_id).await
    }

    /// Delete a module; its entries and prescriptions cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(&self, module_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(module_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete module: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Convert a database row to a Module struct
fn row_to_module(row: &SqliteRow) -> AppResult<Module> {
    let id_str: String = row.get("id");
    let day_id_str: String = row.get("day_id");
    let owner_id_str: String = row.get("owner_id");
    let module_type_str: String = row.get("module_type");
    let session_type_str: String = row.get("session_type");
    let session_timing_str: String = row.get("session_timing");
    let status_str: String = row.get("status");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    Ok(Module {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        day_id: Uuid::parse_str(&day_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        owner_id: Uuid::parse_str(&owner_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        module_type: ModuleType::parse(&module_type_str),
        session_type: SessionType::parse(&session_type_str),
        session_timing: SessionTiming::parse(&session_timing_str),
        title: row.get("title"),
        sort_order: row.get("sort_order"),
        status: ModuleStatus::parse(&status_str),
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
        updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}
