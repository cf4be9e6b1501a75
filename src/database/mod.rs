// ABOUTME: Database management for the program template tree
// ABOUTME: Connection setup, schema migrations, and access to the per-entity stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! This module provides database functionality for the program builder.
//! It owns the connection pool, runs schema migrations, and hands out the
//! per-entity store managers.

/// Day store with idempotent get-or-create by `(template_id, day_index)`
pub mod days;

/// Exercise entry and prescription stores
pub mod exercises;

/// Module store with ordering and status toggling
pub mod modules;

/// Template store
pub mod templates;

pub use days::DaysManager;
pub use exercises::ExercisesManager;
pub use modules::ModulesManager;
pub use templates::TemplatesManager;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Database manager for the template tree
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration statement fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Create the file if missing and enforce FK cascades on every
        // pooled connection; child rows must go when their parent goes.
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to :memory: is its own database, so an
        // in-memory pool must hold exactly one connection and never
        // recycle it.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Template store
    #[must_use]
    pub fn templates(&self) -> TemplatesManager {
        TemplatesManager::new(self.pool.clone())
    }

    /// Day store
    #[must_use]
    pub fn days(&self) -> DaysManager {
        DaysManager::new(self.pool.clone())
    }

    /// Module store
    #[must_use]
    pub fn modules(&self) -> ModulesManager {
        ModulesManager::new(self.pool.clone())
    }

    /// Exercise entry and prescription store
    #[must_use]
    pub fn exercises(&self) -> ExercisesManager {
        ExercisesManager::new(self.pool.clone())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a migration statement fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_templates().await?;
        self.migrate_days().await?;
        self.migrate_modules().await?;
        self.migrate_exercises().await?;
        Ok(())
    }

    /// Create the templates table
    async fn migrate_templates(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS templates (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                level TEXT NOT NULL DEFAULT 'none',
                tags TEXT NOT NULL DEFAULT '[]',
                visibility TEXT NOT NULL DEFAULT 'private',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_templates_owner ON templates(owner_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create the template_days table
    async fn migrate_days(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS template_days (
                id TEXT PRIMARY KEY,
                template_id TEXT NOT NULL REFERENCES templates(id) ON DELETE CASCADE,
                day_index INTEGER NOT NULL,
                title TEXT,
                notes TEXT,
                created_at TEXT NOT NULL,
                UNIQUE(template_id, day_index)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_template_days_template ON template_days(template_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create the modules table
    async fn migrate_modules(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS modules (
                id TEXT PRIMARY KEY,
                day_id TEXT NOT NULL REFERENCES template_days(id) ON DELETE CASCADE,
                owner_id TEXT NOT NULL,
                module_type TEXT NOT NULL DEFAULT 'custom',
                session_type TEXT NOT NULL DEFAULT 'mixed',
                session_timing TEXT NOT NULL DEFAULT 'anytime',
                title TEXT NOT NULL,
                sort_order INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'draft',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_modules_day ON modules(day_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create the exercise_entries and prescriptions tables
    async fn migrate_exercises(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_entries (
                id TEXT PRIMARY KEY,
                module_id TEXT NOT NULL REFERENCES modules(id) ON DELETE CASCADE,
                exercise_id TEXT NOT NULL,
                section TEXT NOT NULL DEFAULT 'main',
                sort_order INTEGER NOT NULL,
                instructions TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercise_entries_module ON exercise_entries(module_id)",
        )
        .execute(&self.pool)
        .await?;

        // exercise_entry_id is UNIQUE: exactly one prescription per entry
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS prescriptions (
                id TEXT PRIMARY KEY,
                exercise_entry_id TEXT NOT NULL UNIQUE
                    REFERENCES exercise_entries(id) ON DELETE CASCADE,
                set_count INTEGER NOT NULL,
                rep_range_min INTEGER,
                rep_range_max INTEGER,
                tempo TEXT,
                rest_seconds INTEGER,
                intensity_type TEXT NOT NULL DEFAULT 'none',
                intensity_value REAL,
                columns TEXT NOT NULL DEFAULT '{}',
                custom_fields TEXT NOT NULL DEFAULT '{}',
                progression_notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
