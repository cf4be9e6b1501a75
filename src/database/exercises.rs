// ABOUTME: Database operations for exercise entries and their prescriptions
// ABOUTME: Entries order within a module section; each entry owns exactly one prescription
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::models::{
    CreateExerciseRequest, ExerciseDetail, ExerciseEntry, IntensityType, Prescription,
    PrescriptionData, Section, UpdatePrescriptionRequest,
};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

/// Exercise entry and prescription database operations manager
pub struct ExercisesManager {
    pool: SqlitePool,
}

impl ExercisesManager {
    /// Create a new exercises manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an exercise in a module, appended after the section's last entry
    ///
    /// The entry and its prescription are inserted in one transaction so an
    /// entry can never exist without its prescription.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty exercise reference or zero
    /// sets, or a database error if the insert fails
    pub async fn add(
        &self,
        module_id: Uuid,
        request: &CreateExerciseRequest,
    ) -> AppResult<ExerciseDetail> {
        if request.exercise_id.trim().is_empty() {
            return Err(AppError::missing_field("exercise_id"));
        }
        if request.prescription.set_count == 0 {
            return Err(AppError::out_of_range("set_count must be at least 1"));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let now = Utc::now();
        let entry = ExerciseEntry {
            id: Uuid::new_v4(),
            module_id,
            exercise_id: request.exercise_id.clone(),
            section: request.section,
            sort_order: Self::next_sort_order_in(&mut tx, module_id, request.section).await?,
            instructions: request.instructions.clone(),
            created_at: now,
        };
        let prescription = prescription_from_data(entry.id, &request.prescription, now);

        Self::insert_entry_in(&mut tx, &entry).await?;
        Self::insert_prescription_in(&mut tx, &prescription).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit exercise: {e}")))?;

        Ok(ExerciseDetail {
            entry,
            prescription,
        })
    }

    /// Get an entry by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_entry(&self, entry_id: Uuid) -> AppResult<Option<ExerciseEntry>> {
        let row = sqlx::query(
            r"
            SELECT id, module_id, exercise_id, section, sort_order, instructions, created_at
            FROM exercise_entries
            WHERE id = $1
            ",
        )
        .bind(entry_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get exercise entry: {e}")))?;

        row.map(|r| row_to_entry(&r)).transpose()
    }

    /// List a module's exercises with prescriptions, in section display
    /// order then sort order
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list_for_module(&self, module_id: Uuid) -> AppResult<Vec<ExerciseDetail>> {
        let rows = sqlx::query(
            r"
            SELECT e.id, e.module_id, e.exercise_id, e.section, e.sort_order,
                   e.instructions, e.created_at,
                   p.id AS p_id, p.exercise_entry_id AS p_entry_id, p.set_count,
                   p.rep_range_min, p.rep_range_max, p.tempo, p.rest_seconds,
                   p.intensity_type, p.intensity_value, p.columns, p.custom_fields,
                   p.progression_notes, p.created_at AS p_created_at,
                   p.updated_at AS p_updated_at
            FROM exercise_entries e
            INNER JOIN prescriptions p ON p.exercise_entry_id = e.id
            WHERE e.module_id = $1
            ORDER BY CASE e.section
                         WHEN 'warmup' THEN 0
                         WHEN 'main' THEN 1
                         WHEN 'accessory' THEN 2
                         ELSE 3
                     END,
                     e.sort_order ASC
            ",
        )
        .bind(module_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(ExerciseDetail {
                    entry: row_to_entry(row)?,
                    prescription: row_to_joined_prescription(row)?,
                })
            })
            .collect()
    }

    /// Transaction-aware ordered read of a module's entries, used by the
    /// deep-copy paths
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn entries_for_module_in(
        conn: &mut SqliteConnection,
        module_id: Uuid,
    ) -> AppResult<Vec<ExerciseEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, module_id, exercise_id, section, sort_order, instructions, created_at
            FROM exercise_entries
            WHERE module_id = $1
            ORDER BY CASE section
                         WHEN 'warmup' THEN 0
                         WHEN 'main' THEN 1
                         WHEN 'accessory' THEN 2
                         ELSE 3
                     END,
                     sort_order ASC
            ",
        )
        .bind(module_id.to_string())
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercise entries: {e}")))?;

        rows.iter().map(row_to_entry).collect()
    }

    /// Transaction-aware lookup of an entry's prescription, if one exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    async fn find_prescription_in(
        conn: &mut SqliteConnection,
        entry_id: Uuid,
    ) -> AppResult<Option<Prescription>> {
        let row = sqlx::query(
            r"
            SELECT id, exercise_entry_id, set_count, rep_range_min, rep_range_max,
                   tempo, rest_seconds, intensity_type, intensity_value, columns,
                   custom_fields, progression_notes, created_at, updated_at
            FROM prescriptions
            WHERE exercise_entry_id = $1
            ",
        )
        .bind(entry_id.to_string())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get prescription: {e}")))?;

        row.as_ref().map(row_to_prescription).transpose()
    }

    /// Transaction-aware read of an entry's prescription
    ///
    /// Every entry owns exactly one prescription; a missing row is a broken
    /// invariant, not a caller error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or the prescription
    /// row is missing
    pub async fn prescription_for_entry_in(
        conn: &mut SqliteConnection,
        entry_id: Uuid,
    ) -> AppResult<Prescription> {
        Self::find_prescription_in(conn, entry_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!("Exercise entry {entry_id} has no prescription"))
            })
    }

    /// Get an entry's prescription
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or the prescription
    /// row is missing
    pub async fn prescription_for_entry(&self, entry_id: Uuid) -> AppResult<Prescription> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
        Self::prescription_for_entry_in(&mut conn, entry_id).await
    }

    /// Insert a fully-formed entry row inside a caller-held transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_entry_in(
        conn: &mut SqliteConnection,
        entry: &ExerciseEntry,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO exercise_entries (
                id, module_id, exercise_id, section, sort_order, instructions, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.module_id.to_string())
        .bind(&entry.exercise_id)
        .bind(entry.section.as_str())
        .bind(entry.sort_order)
        .bind(&entry.instructions)
        .bind(entry.created_at.to_rfc3339())
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert exercise entry: {e}")))?;

        Ok(())
    }

    /// Insert a fully-formed prescription row inside a caller-held
    /// transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_prescription_in(
        conn: &mut SqliteConnection,
        prescription: &Prescription,
    ) -> AppResult<()> {
        let columns_json = serde_json::to_string(&prescription.columns)?;
        let custom_fields_json = serde_json::to_string(&prescription.custom_fields)?;

        sqlx::query(
            r"
            INSERT INTO prescriptions (
                id, exercise_entry_id, set_count, rep_range_min, rep_range_max,
                tempo, rest_seconds, intensity_type, intensity_value, columns,
                custom_fields, progression_notes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(prescription.id.to_string())
        .bind(prescription.exercise_entry_id.to_string())
        .bind(i64::from(prescription.set_count))
        .bind(prescription.rep_range_min.map(i64::from))
        .bind(prescription.rep_range_max.map(i64::from))
        .bind(&prescription.tempo)
        .bind(prescription.rest_seconds.map(i64::from))
        .bind(prescription.intensity_type.as_str())
        .bind(prescription.intensity_value)
        .bind(&columns_json)
        .bind(&custom_fields_json)
        .bind(&prescription.progression_notes)
        .bind(prescription.created_at.to_rfc3339())
        .bind(prescription.updated_at.to_rfc3339())
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert prescription: {e}")))?;

        Ok(())
    }

    /// Update an entry's coaching instructions
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update_instructions(
        &self,
        entry_id: Uuid,
        instructions: Option<&str>,
    ) -> AppResult<Option<ExerciseEntry>> {
        let result = sqlx::query("UPDATE exercise_entries SET instructions = $1 WHERE id = $2")
            .bind(instructions)
            .bind(entry_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update instructions: {e}")))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_entry(entry_id).await
    }

    /// Update prescription fields for an entry
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn update_prescription(
        &self,
        entry_id: Uuid,
        request: &UpdatePrescriptionRequest,
    ) -> AppResult<Option<Prescription>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;

        let Some(existing) = Self::find_prescription_in(&mut conn, entry_id).await? else {
            return Ok(None);
        };

        let set_count = request.set_count.unwrap_or(existing.set_count);
        if set_count == 0 {
            return Err(AppError::out_of_range("set_count must be at least 1"));
        }
        let rep_range_min = request.rep_range_min.or(existing.rep_range_min);
        let rep_range_max = request.rep_range_max.or(existing.rep_range_max);
        let tempo = request.tempo.clone().or(existing.tempo);
        let rest_seconds = request.rest_seconds.or(existing.rest_seconds);
        let intensity_type = request.intensity_type.unwrap_or(existing.intensity_type);
        let intensity_value = request.intensity_value.or(existing.intensity_value);
        let columns = request.columns.clone().unwrap_or(existing.columns);
        let custom_fields = request.custom_fields.clone().unwrap_or(existing.custom_fields);
        let progression_notes = request
            .progression_notes
            .clone()
            .or(existing.progression_notes);
        let columns_json = serde_json::to_string(&columns)?;
        let custom_fields_json = serde_json::to_string(&custom_fields)?;
        let now = Utc::now();

        sqlx::query(
            r"
            UPDATE prescriptions SET
                set_count = $1, rep_range_min = $2, rep_range_max = $3, tempo = $4,
                rest_seconds = $5, intensity_type = $6, intensity_value = $7,
                columns = $8, custom_fields = $9, progression_notes = $10,
                updated_at = $11
            WHERE exercise_entry_id = $12
            ",
        )
        .bind(i64::from(set_count))
        .bind(rep_range_min.map(i64::from))
        .bind(rep_range_max.map(i64::from))
        .bind(&tempo)
        .bind(rest_seconds.map(i64::from))
        .bind(intensity_type.as_str())
        .bind(intensity_value)
        .bind(&columns_json)
        .bind(&custom_fields_json)
        .bind(&progression_notes)
        .bind(now.to_rfc3339())
        .bind(entry_id.to_string())
        .execute(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to update prescription: {e}")))?;

        Ok(Some(Prescription {
            set_count,
            rep_range_min,
            rep_range_max,
            tempo,
            rest_seconds,
            intensity_type,
            intensity_value,
            columns,
            custom_fields,
            progression_notes,
            updated_at: now,
            ..existing
        }))
    }

    /// Delete an entry; its prescription cascades
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn delete(&self, entry_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM exercise_entries WHERE id = $1")
            .bind(entry_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete exercise entry: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Next append position within a module section: max(sort_order) + 1
    async fn next_sort_order_in(
        conn: &mut SqliteConnection,
        module_id: Uuid,
        section: Section,
    ) -> AppResult<i64> {
        let row = sqlx::query(
            r"
            SELECT COALESCE(MAX(sort_order), 0) AS max_order
            FROM exercise_entries
            WHERE module_id = $1 AND section = $2
            ",
        )
        .bind(module_id.to_string())
        .bind(section.as_str())
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to read sort order: {e}")))?;

        let max_order: i64 = row.get("max_order");
        Ok(max_order + 1)
    }
}

/// Build a Prescription from caller-supplied data
pub(crate) fn prescription_from_data(
    entry_id: Uuid,
    data: &PrescriptionData,
    now: DateTime<Utc>,
) -> Prescription {
    Prescription {
        id: Uuid::new_v4(),
        exercise_entry_id: entry_id,
        set_count: data.set_count,
        rep_range_min: data.rep_range_min,
        rep_range_max: data.rep_range_max,
        tempo: data.tempo.clone(),
        rest_seconds: data.rest_seconds,
        intensity_type: data.intensity_type,
        intensity_value: data.intensity_value,
        columns: data.columns.clone(),
        custom_fields: data.custom_fields.clone(),
        progression_notes: data.progression_notes.clone(),
        created_at: now,
        updated_at: now,
    }
}

/// Convert a database row to an ExerciseEntry struct
fn row_to_entry(row: &SqliteRow) -> AppResult<ExerciseEntry> {
    let id_str: String = row.get("id");
    let module_id_str: String = row.get("module_id");
    let section_str: String = row.get("section");
    let created_at_str: String = row.get("created_at");

    Ok(ExerciseEntry {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        module_id: Uuid::parse_str(&module_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        exercise_id: row.get("exercise_id"),
        section: Section::parse(&section_str),
        sort_order: row.get("sort_order"),
        instructions: row.get("instructions"),
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}

/// Convert an unaliased prescriptions row to a Prescription struct
fn row_to_prescription(row: &SqliteRow) -> AppResult<Prescription> {
    prescription_from_columns(
        row,
        "id",
        "exercise_entry_id",
        "created_at",
        "updated_at",
    )
}

/// Convert the `p_`-aliased prescription columns of a joined row
fn row_to_joined_prescription(row: &SqliteRow) -> AppResult<Prescription> {
    prescription_from_columns(row, "p_id", "p_entry_id", "p_created_at", "p_updated_at")
}

fn prescription_from_columns(
    row: &SqliteRow,
    id_col: &str,
    entry_col: &str,
    created_col: &str,
    updated_col: &str,
) -> AppResult<Prescription> {
    let id_str: String = row.get(id_col);
    let entry_id_str: String = row.get(entry_col);
    let set_count: i64 = row.get("set_count");
    let rep_range_min: Option<i64> = row.get("rep_range_min");
    let rep_range_max: Option<i64> = row.get("rep_range_max");
    let rest_seconds: Option<i64> = row.get("rest_seconds");
    let intensity_type_str: String = row.get("intensity_type");
    let columns_json: String = row.get("columns");
    let custom_fields_json: String = row.get("custom_fields");
    let created_at_str: String = row.get(created_col);
    let updated_at_str: String = row.get(updated_col);

    Ok(Prescription {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        exercise_entry_id: Uuid::parse_str(&entry_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        set_count: u32::try_from(set_count)
            .map_err(|e| AppError::internal(format!("Invalid set_count: {e}")))?,
        rep_range_min: rep_range_min.map(|v| v as u32),
        rep_range_max: rep_range_max.map(|v| v as u32),
        tempo: row.get("tempo"),
        rest_seconds: rest_seconds.map(|v| v as u32),
        intensity_type: IntensityType::parse(&intensity_type_str),
        intensity_value: row.get("intensity_value"),
        columns: serde_json::from_str(&columns_json)?,
        custom_fields: serde_json::from_str(&custom_fields_json)?,
        progression_notes: row.get("progression_notes"),
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
        updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
            .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
            .with_timezone(&Utc),
    })
}
