// ABOUTME: Database operations for program templates
// ABOUTME: CRUD for the top-level program record that owns the day list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::models::{
    CreateTemplateRequest, ProgramLevel, Template, TemplateVisibility, UpdateTemplateRequest,
};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Template database operations manager
pub struct TemplatesManager {
    pool: SqlitePool,
}

impl TemplatesManager {
    /// Create a new templates manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new template
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or oversized title, or a
    /// database error if the insert fails
    pub async fn create(
        &self,
        owner_id: Uuid,
        request: &CreateTemplateRequest,
    ) -> AppResult<Template> {
        let title = validated_title(&request.title)?;
        if request.tags.len() > limits::MAX_TAGS {
            return Err(AppError::invalid_input(format!(
                "A template can carry at most {} tags",
                limits::MAX_TAGS
            )));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        let tags_json = serde_json::to_string(&request.tags)?;

        sqlx::query(
            r"
            INSERT INTO templates (
                id, owner_id, title, description, level, tags, visibility,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ",
        )
        .bind(id.to_string())
        .bind(owner_id.to_string())
        .bind(&title)
        .bind(&request.description)
        .bind(request.level.as_str())
        .bind(&tags_json)
        .bind(request.visibility.as_str())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create template: {e}")))?;

        Ok(Template {
            id,
            owner_id,
            title,
            description: request.description.clone(),
            level: request.level,
            tags: request.tags.clone(),
            visibility: request.visibility,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a template by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get(&self, template_id: Uuid) -> AppResult<Option<Template>> {
        let row = sqlx::query(
            r"
            SELECT id, owner_id, title, description, level, tags, visibility,
                   created_at, updated_at
            FROM templates
            WHERE id = $1
            ",
        )
        .bind(template_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get template: {e}")))?;

        row.map(|r| row_to_template(&r)).transpose()
    }

    /// List a coach's templates, most recently updated first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Template>> {
        let rows = sqlx::query(
            r"
            SELECT id, owner_id, title, description, level, tags, visibility,
                   created_at, updated_at
            FROM templates
            WHERE owner_id = $1
            ORDER BY updated_at DESC
            ",
        )
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list templates: {e}")))?;

        rows.iter().map(row_to_template).collect()
    }

    /// Update an existing template
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty replacement title, or a
    /// database error if the update fails
    pub async fn update(
        &self,
        template_id: Uuid,
        request: &UpdateTemplateRequest,
    ) -> AppResult<Option<Template>> {
        let existing = self.get(template_id).await?;
        let Some(existing) = existing else {
            return Ok(None);
        };

        let title = match &request.title {
            Some(t) => validated_title(t)?,
            None => existing.title,
        };
        let description = request.description.clone().or(existing.description);
        let level = request.level.unwrap_or(existing.level);
        let tags = request.tags.as_ref().unwrap_or(&existing.tags);
        let visibility = request.visibility.unwrap_or(existing.visibility);
        let tags_json = serde_json::to_string(tags)?;
        let now = Utc::now();

        let result = sqlx::query(
            r"
            UPDATE templates SET
                title = $1, description = $2, level = $3, tags = $4,
                visibility = $5, updated_at = $6
            WHERE id = $7
            ",
        )
        .bind(&title)
        .bind(&description)
        .bind(level.as_str())
        .bind(&tags_json)
        .bind(visibility.as_str())
        .bind(now.to_rfc3339())
        .bind(template_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update template: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(template_id).await
    }

    /// Delete a template and, via FK cascade, its whole tree
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(&self, template_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(template_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete template: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Bump a template's updated_at after a structural change to its tree
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn touch(&self, template_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE templates SET updated_at = $1 WHERE id = $2")
            .bind(Utc::now().to_rfc3339())
            .bind(template_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to touch template: {e}")))?;
        Ok(())
    }

    /// Insert a fully-formed template row inside a caller-held transaction
    ///
    /// Used by program duplication, where the clone must land atomically
    /// with the rest of the copied tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_in(conn: &mut SqliteConnection, template: &Template) -> AppResult<()> {
        let tags_json = serde_json::to_string(&template.tags)?;

        sqlx::query(
            r"
            INSERT INTO templates (
                id, owner_id, title, description, level, tags, visibility,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(template.id.to_string())
        .bind(template.owner_id.to_string())
        .bind(&template.title)
        .bind(&template.description)
        .bind(template.level.as_str())
        .bind(&tags_json)
        .bind(template.visibility.as_str())
        .bind(template.created_at.to_rfc3339())
        .bind(template.updated_at.to_rfc3339())
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert template: {e}")))?;

        Ok(())
    }
}

/// Validate and normalize a title: trimmed, non-empty, bounded length
pub(crate) fn validated_title(raw: &str) -> AppResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::missing_field("title"));
    }
    if title.len() > limits::MAX_TITLE_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Title exceeds {} characters",
            limits::MAX_TITLE_LENGTH
        )));
    }
    Ok(title.to_owned())
}

/// Convert a database row to a Template struct
fn row_to_template(row: &SqliteRow) -> AppResult<Template> {
    let id_str: String = row.get("id");
    let owner_id_str: String = row.get("owner_id");
    let level_str: String = row.get("level");
    let tags_json: String = row.get("tags");
    let visibility_str: String = row.get("visibility");
    let created_at_str: String = row.get("created_at");
    let updated_at_str: String = row.get("updated_at");

    let tags: Vec<String> = serde_json::from_str(&tags_json)?;

    Ok(Template {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        owner_id: Uuid::parse_str(&owner_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        title: row.get("title"),
        description: row.get("description"),
        level: ProgramLevel::parse(&level_str),
        tags,
        visibility: TemplateVisibility::parse(&visibility_str),
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
        updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}
