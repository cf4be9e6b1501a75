// ABOUTME: Main library entry point for the Pierre program builder engine
// ABOUTME: Provides template composition, duplication, and calendar projection for coaching programs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Program Builder
//!
//! The coaching-program authoring engine for the Pierre fitness platform.
//! Coaches build multi-week workout templates composed of days, modules
//! (sessions such as strength, cardio, mobility), exercises within each
//! module, and per-exercise prescriptions.
//!
//! ## Features
//!
//! - **Four-level template tree**: Program -> Day -> Module -> Exercise + Prescription
//! - **Composition engine**: add session, copy/paste session, copy week, duplicate program
//! - **Calendar projection**: derived week/day grid computed from day indices
//! - **Draft/publish lifecycle**: copies always start as drafts
//!
//! ## Architecture
//!
//! - **Models**: value types for templates, days, modules, exercises, prescriptions
//! - **Database**: SQLite-backed stores, one manager per entity
//! - **Composition**: the deep-copy engine operating across the tree
//! - **Calendar**: pure projection from the flat day list to a week grid
//! - **External**: trait seams for the exercise library and identity provider
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_programs::composition::CompositionEngine;
//! use pierre_programs::database::Database;
//! use pierre_programs::models::{CreateTemplateRequest, SessionMeta};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let database = Database::new("sqlite::memory:").await?;
//!     let engine = CompositionEngine::new(&database);
//!
//!     let coach = Uuid::new_v4();
//!     let template = database
//!         .templates()
//!         .create(coach, &CreateTemplateRequest::titled("12-Week Strength Block"))
//!         .await?;
//!
//!     let module = engine
//!         .add_session(template.id, 1, &SessionMeta::titled("Push Day"))
//!         .await?;
//!     println!("created module {} on day 1", module.id);
//!     Ok(())
//! }
//! ```

/// Pure calendar projection from day indices to a week/day grid
pub mod calendar;

/// The composition engine: add, copy/paste, copy week, duplicate program
pub mod composition;

/// Configuration management and environment parsing
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// SQLite-backed stores for the template tree
pub mod database;

/// Unified error handling system with standard error codes and HTTP mapping
pub mod errors;

/// External collaborator seams (exercise library, identity provider)
pub mod external;

/// Logging configuration and structured logging setup
pub mod logging;

/// Core data models for the template tree
pub mod models;
