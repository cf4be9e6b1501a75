// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, template, and session creation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(
    dead_code,
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

//! Shared test utilities for `pierre_programs`
//!
//! Common setup functions to reduce duplication across integration tests.

use pierre_programs::composition::CompositionEngine;
use pierre_programs::database::Database;
use pierre_programs::models::{
    CreateExerciseRequest, CreateTemplateRequest, ExerciseDetail, Module, PrescriptionData,
    Section, SessionMeta, Template,
};
use std::sync::Once;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup (in-memory, migrated)
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new("sqlite::memory:")
        .await
        .expect("in-memory database setup failed")
}

/// Create a coach id and an empty template owned by them
pub async fn create_test_template(database: &Database) -> (Uuid, Template) {
    let coach = Uuid::new_v4();
    let template = database
        .templates()
        .create(coach, &CreateTemplateRequest::titled("Test Block"))
        .await
        .unwrap();
    (coach, template)
}

/// Build the canonical "Push Day" module on a day: two main-section
/// exercises, Bench 4x8 RIR2 then Incline DB 3x10 RIR2
pub async fn add_push_day(
    database: &Database,
    engine: &CompositionEngine,
    template_id: Uuid,
    day_index: u32,
) -> Module {
    let module = engine
        .add_session(template_id, day_index, &SessionMeta::titled("Push Day"))
        .await
        .unwrap();

    let exercises = database.exercises();
    exercises
        .add(
            module.id,
            &CreateExerciseRequest {
                exercise_id: "bench-press".to_owned(),
                section: Section::Main,
                instructions: Some("Pause first rep".to_owned()),
                prescription: PrescriptionData::sets_and_reps(4, 8, 8).with_rir(2.0),
            },
        )
        .await
        .unwrap();
    exercises
        .add(
            module.id,
            &CreateExerciseRequest {
                exercise_id: "incline-db-press".to_owned(),
                section: Section::Main,
                instructions: None,
                prescription: PrescriptionData::sets_and_reps(3, 10, 10).with_rir(2.0),
            },
        )
        .await
        .unwrap();

    module
}

/// The exercise ids of a module's listing, in listed order
pub fn exercise_ids(details: &[ExerciseDetail]) -> Vec<String> {
    details.iter().map(|d| d.entry.exercise_id.clone()).collect()
}
