// ABOUTME: The composition engine: structural operations across the four-level template tree
// ABOUTME: Add session, copy/paste session, copy week, duplicate program, publish toggle, delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Composition Engine
//!
//! Structural operations over Program -> Day -> Module -> Exercise +
//! Prescription trees. Every copy builds fresh rows with fresh ids,
//! re-parented to the destination; sources are never mutated. Copied
//! modules always land as drafts.
//!
//! Multi-entity copies (paste, copy week, duplicate program) run inside a
//! single SQLite transaction. A mid-operation failure rolls the whole copy
//! back and surfaces as a partial-failure error describing how far the
//! operation had progressed; retrying after such a failure is clean.

/// Caller-held clipboard token
pub mod clipboard;

pub use clipboard::ClipboardRef;

use crate::calendar::{self, day_index_for, CalendarWeek};
use crate::constants::defaults;
use crate::database::templates::validated_title;
use crate::database::{
    Database, DaysManager, ExercisesManager, ModulesManager, TemplatesManager,
};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Day, ExerciseEntry, Module, ModuleStatus, Prescription, SessionMeta, Template,
    TemplateVisibility,
};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// The composition engine
///
/// Thin orchestration over the entity stores; the backing store is the
/// sole arbiter of consistency (no in-process locking, last write wins).
pub struct CompositionEngine {
    pool: SqlitePool,
    templates: TemplatesManager,
    days: DaysManager,
    modules: ModulesManager,
}

impl CompositionEngine {
    /// Create an engine over a database
    #[must_use]
    pub fn new(database: &Database) -> Self {
        Self {
            pool: database.pool().clone(),
            templates: database.templates(),
            days: database.days(),
            modules: database.modules(),
        }
    }

    /// Add a new session to a day, creating the day row if missing
    ///
    /// The module appends after the day's existing sessions and starts as a
    /// draft. Its owner defaults to the template's primary coach unless the
    /// meta names a delegated specialist.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty title or zero day index, a
    /// not-found error for an unknown template, or a database error
    pub async fn add_session(
        &self,
        template_id: Uuid,
        day_index: u32,
        meta: &SessionMeta,
    ) -> AppResult<Module> {
        // Validation precedes every write; a rejected title must not leave
        // a stray day row behind.
        validated_title(&meta.title)?;

        let template = self
            .templates
            .get(template_id)
            .await?
            .ok_or_else(|| AppError::not_found("Template").with_resource_id(template_id.to_string()))?;

        let day = self.days.get_or_create(template_id, day_index).await?;
        let owner_id = meta.owner_id.unwrap_or(template.owner_id);
        let module = self.modules.create(day.id, owner_id, meta).await?;
        self.templates.touch(template_id).await?;

        info!(
            template_id = %template_id,
            day_index,
            module_id = %module.id,
            "session added"
        );
        Ok(module)
    }

    /// Record a module as clipboard contents
    ///
    /// Verifies the module currently exists; the returned token is a
    /// reference, so later edits to the source are reflected at paste time.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown module, or a database error
    pub async fn copy_session(&self, module_id: Uuid) -> AppResult<ClipboardRef> {
        self.modules
            .get(module_id)
            .await?
            .ok_or_else(|| AppError::not_found("Module").with_resource_id(module_id.to_string()))?;

        debug!(module_id = %module_id, "session copied to clipboard");
        Ok(ClipboardRef::new(module_id))
    }

    /// Paste the clipboard module into a target day of the same template
    ///
    /// Deep-copies the module with all exercise entries and prescriptions:
    /// new ids throughout, order preserved, status reset to draft. Pasting
    /// into the source's own day yields a sibling duplicate.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the source module was deleted after the
    /// copy, a validation error for a zero day index, or a database error
    pub async fn paste_session(
        &self,
        clipboard: &ClipboardRef,
        target_day_index: u32,
    ) -> AppResult<Module> {
        let source = self
            .modules
            .get(clipboard.module_id())
            .await?
            .ok_or_else(|| {
                AppError::not_found("Clipboard source module")
                    .with_resource_id(clipboard.module_id().to_string())
            })?;
        let source_day = self.days.get(source.day_id).await?.ok_or_else(|| {
            AppError::internal(format!("Module {} has no day row", source.id))
        })?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let target_day =
            DaysManager::get_or_create_in(&mut tx, source_day.template_id, target_day_index)
                .await?;
        let pasted = Self::deep_copy_module_in(&mut tx, &source, target_day.id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit paste: {e}")))?;
        self.templates.touch(source_day.template_id).await?;

        info!(
            source_module_id = %source.id,
            target_day_index,
            module_id = %pasted.id,
            "session pasted"
        );
        Ok(pasted)
    }

    /// Copy every session of one week into another week
    ///
    /// Destination day indices follow `(dest_week-1)*7 + day_of_week`; the
    /// destination may lie beyond the template's current last week. Source
    /// days with zero modules are skipped, so no empty destination day rows
    /// appear. The whole copy is one transaction: on failure nothing is
    /// kept and the error reports how far the copy had progressed.
    ///
    /// # Errors
    ///
    /// Returns a validation error for zero week numbers, a not-found error
    /// for an unknown template, a partial-failure error for an aborted
    /// copy, or a database error
    pub async fn copy_week(
        &self,
        template_id: Uuid,
        source_week: u32,
        dest_week: u32,
    ) -> AppResult<Vec<Module>> {
        if source_week == 0 || dest_week == 0 {
            return Err(AppError::out_of_range("week is 1-based"));
        }
        self.templates
            .get(template_id)
            .await?
            .ok_or_else(|| AppError::not_found("Template").with_resource_id(template_id.to_string()))?;

        // Snapshot the source plan before any write so copying a week onto
        // itself cannot re-read its own copies.
        let mut plan: Vec<(u32, Vec<Module>)> = Vec::new();
        for day_of_week in 1..=7 {
            let index = day_index_for(source_week, day_of_week);
            if let Some(day) = self.days.get_by_index(template_id, index).await? {
                let day_modules = self.modules.list_for_day(day.id).await?;
                if !day_modules.is_empty() {
                    plan.push((day_of_week, day_modules));
                }
            }
        }

        let total: usize = plan.iter().map(|(_, m)| m.len()).sum();
        if total == 0 {
            debug!(template_id = %template_id, source_week, "copy week: nothing to copy");
            return Ok(Vec::new());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let mut copied: Vec<Module> = Vec::new();
        if let Err(e) =
            Self::copy_plan_in(&mut tx, template_id, dest_week, &plan, &mut copied).await
        {
            // Dropping the transaction rolls the destination back.
            return Err(AppError::partial_failure(format!(
                "Copy week aborted after {} of {total} modules; destination changes rolled back",
                copied.len()
            ))
            .with_details(serde_json::json!({
                "copied": copied.len(),
                "total": total,
                "source_week": source_week,
                "dest_week": dest_week,
            }))
            .with_source(e));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit copy week: {e}")))?;
        self.templates.touch(template_id).await?;

        info!(
            template_id = %template_id,
            source_week,
            dest_week,
            modules = copied.len(),
            "week copied"
        );
        Ok(copied)
    }

    /// Duplicate a whole program into a fresh, fully independent template
    ///
    /// The clone gets a new id, a suffixed title, private visibility, and
    /// the acting coach as owner. Days keep their indices, modules keep
    /// their owner delegation but reset to draft, and every exercise entry
    /// and prescription is copied. No row of the duplicate references the
    /// source, so deleting either tree leaves the other untouched.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown template, a partial-failure
    /// error for an aborted copy, or a database error
    pub async fn duplicate_program(
        &self,
        template_id: Uuid,
        acting_coach: Uuid,
    ) -> AppResult<Template> {
        let source = self
            .templates
            .get(template_id)
            .await?
            .ok_or_else(|| AppError::not_found("Template").with_resource_id(template_id.to_string()))?;

        // Snapshot the whole source tree top level before writing.
        let source_days = self.days.list_for_template(template_id).await?;
        let mut day_modules: Vec<(Day, Vec<Module>)> = Vec::with_capacity(source_days.len());
        for day in source_days {
            let list = self.modules.list_for_day(day.id).await?;
            day_modules.push((day, list));
        }
        let total: usize = day_modules.iter().map(|(_, m)| m.len()).sum();

        let now = Utc::now();
        let duplicate = Template {
            id: Uuid::new_v4(),
            owner_id: acting_coach,
            title: format!("{}{}", source.title, defaults::DUPLICATE_TITLE_SUFFIX),
            description: source.description.clone(),
            level: source.level,
            tags: source.tags.clone(),
            visibility: TemplateVisibility::Private,
            created_at: now,
            updated_at: now,
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let mut copied = 0usize;
        if let Err(e) =
            Self::duplicate_tree_in(&mut tx, &duplicate, &day_modules, &mut copied).await
        {
            return Err(AppError::partial_failure(format!(
                "Duplicate program aborted after {copied} of {total} modules; changes rolled back"
            ))
            .with_details(serde_json::json!({
                "copied": copied,
                "total": total,
                "source_template_id": template_id,
            }))
            .with_source(e));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit duplicate: {e}")))?;

        info!(
            source_template_id = %template_id,
            template_id = %duplicate.id,
            modules = total,
            "program duplicated"
        );
        Ok(duplicate)
    }

    /// Flip a module between draft and published
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown module, or a database error
    pub async fn toggle_module_status(&self, module_id: Uuid) -> AppResult<Module> {
        let module = self
            .modules
            .toggle_status(module_id)
            .await?
            .ok_or_else(|| AppError::not_found("Module").with_resource_id(module_id.to_string()))?;

        info!(module_id = %module_id, status = module.status.as_str(), "module status toggled");
        Ok(module)
    }

    /// Delete a module and its subtree
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown module, or a database error
    pub async fn delete_module(&self, module_id: Uuid) -> AppResult<()> {
        let deleted = self.modules.delete(module_id).await?;
        if !deleted {
            return Err(AppError::not_found("Module").with_resource_id(module_id.to_string()));
        }

        info!(module_id = %module_id, "module deleted");
        Ok(())
    }

    /// Project one week of a template's calendar
    ///
    /// Read-only; recomputed from the current day list on every call.
    ///
    /// # Errors
    ///
    /// Returns a validation error for week 0, a not-found error for an
    /// unknown template, or a database error
    pub async fn get_calendar(&self, template_id: Uuid, week: u32) -> AppResult<CalendarWeek> {
        self.templates
            .get(template_id)
            .await?
            .ok_or_else(|| AppError::not_found("Template").with_resource_id(template_id.to_string()))?;

        let days = self.days.list_for_template(template_id).await?;
        let week_days: Vec<Day> = days
            .into_iter()
            .filter(|d| calendar::week_of(d.day_index) == week)
            .collect();

        let mut modules_by_day: HashMap<Uuid, Vec<Module>> =
            HashMap::with_capacity(week_days.len());
        for day in &week_days {
            modules_by_day.insert(day.id, self.modules.list_for_day(day.id).await?);
        }

        calendar::project_week(week, &week_days, &modules_by_day)
    }

    /// Number of calendar weeks the template currently spans (minimum 1)
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown template, or a database error
    pub async fn week_count(&self, template_id: Uuid) -> AppResult<u32> {
        self.templates
            .get(template_id)
            .await?
            .ok_or_else(|| AppError::not_found("Template").with_resource_id(template_id.to_string()))?;

        let days = self.days.list_for_template(template_id).await?;
        Ok(calendar::week_count(&days))
    }

    /// Deep-copy one module under a destination day, within a transaction
    ///
    /// Parent before child: the new module row must exist before its
    /// entries, and each new entry before its prescription, because each
    /// level carries the fresh parent id. Source rows are only read.
    async fn deep_copy_module_in(
        conn: &mut SqliteConnection,
        source: &Module,
        target_day_id: Uuid,
    ) -> AppResult<Module> {
        let now = Utc::now();
        let copy = Module {
            id: Uuid::new_v4(),
            day_id: target_day_id,
            owner_id: source.owner_id,
            module_type: source.module_type,
            session_type: source.session_type,
            session_timing: source.session_timing,
            title: source.title.clone(),
            sort_order: ModulesManager::next_sort_order_in(conn, target_day_id).await?,
            // Publication is never inherited by a copy
            status: ModuleStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        ModulesManager::insert_in(conn, &copy).await?;

        let entries = ExercisesManager::entries_for_module_in(conn, source.id).await?;
        for entry in entries {
            let prescription =
                ExercisesManager::prescription_for_entry_in(conn, entry.id).await?;

            let entry_copy = ExerciseEntry {
                id: Uuid::new_v4(),
                module_id: copy.id,
                exercise_id: entry.exercise_id.clone(),
                section: entry.section,
                sort_order: entry.sort_order,
                instructions: entry.instructions.clone(),
                created_at: now,
            };
            ExercisesManager::insert_entry_in(conn, &entry_copy).await?;

            let prescription_copy = Prescription {
                id: Uuid::new_v4(),
                exercise_entry_id: entry_copy.id,
                created_at: now,
                updated_at: now,
                ..prescription
            };
            ExercisesManager::insert_prescription_in(conn, &prescription_copy).await?;
        }

        Ok(copy)
    }

    /// Copy a snapshotted week plan into the destination week
    async fn copy_plan_in(
        conn: &mut SqliteConnection,
        template_id: Uuid,
        dest_week: u32,
        plan: &[(u32, Vec<Module>)],
        copied: &mut Vec<Module>,
    ) -> AppResult<()> {
        for (day_of_week, source_modules) in plan {
            let dest_index = day_index_for(dest_week, *day_of_week);
            let dest_day = DaysManager::get_or_create_in(conn, template_id, dest_index).await?;
            for module in source_modules {
                let copy = Self::deep_copy_module_in(conn, module, dest_day.id).await?;
                copied.push(copy);
            }
        }
        Ok(())
    }

    /// Clone a snapshotted template tree under a fresh template row
    async fn duplicate_tree_in(
        conn: &mut SqliteConnection,
        duplicate: &Template,
        day_modules: &[(Day, Vec<Module>)],
        copied: &mut usize,
    ) -> AppResult<()> {
        TemplatesManager::insert_in(conn, duplicate).await?;

        for (day, modules) in day_modules {
            let day_copy = Day {
                id: Uuid::new_v4(),
                template_id: duplicate.id,
                day_index: day.day_index,
                title: day.title.clone(),
                notes: day.notes.clone(),
                created_at: duplicate.created_at,
            };
            DaysManager::insert_in(conn, &day_copy).await?;

            for module in modules {
                Self::deep_copy_module_in(conn, module, day_copy.id).await?;
                *copied += 1;
            }
        }
        Ok(())
    }
}
