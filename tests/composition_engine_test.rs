// ABOUTME: Integration tests for the composition engine's session operations
// ABOUTME: Add session, copy/paste, status toggling, and deletion invariants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::{add_push_day, create_test_database, create_test_template, exercise_ids};
use pierre_programs::composition::CompositionEngine;
use pierre_programs::errors::ErrorCode;
use pierre_programs::models::{
    CreateExerciseRequest, ModuleStatus, PrescriptionData, Section, SessionMeta, SessionTiming,
    UpdateModuleRequest,
};
use uuid::Uuid;

// ============================================================================
// Add Session
// ============================================================================

#[tokio::test]
async fn test_add_session_creates_day_and_draft_module() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (coach, template) = create_test_template(&database).await;

    let module = engine
        .add_session(template.id, 3, &SessionMeta::titled("Intervals"))
        .await
        .unwrap();

    assert_eq!(module.status, ModuleStatus::Draft);
    assert_eq!(module.sort_order, 1);
    // Owner defaults to the template's primary coach
    assert_eq!(module.owner_id, coach);

    let day = database
        .days()
        .get_by_index(template.id, 3)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(day.id, module.day_id);
    assert_eq!(day.day_index, 3);
}

#[tokio::test]
async fn test_add_session_twice_same_day_is_idempotent_on_day() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;

    let first = engine
        .add_session(template.id, 5, &SessionMeta::titled("AM Strength"))
        .await
        .unwrap();
    let second = engine
        .add_session(template.id, 5, &SessionMeta::titled("PM Cardio"))
        .await
        .unwrap();

    // Exactly one day row, two modules with distinct ids and ascending order
    let days = database.days().list_for_template(template.id).await.unwrap();
    assert_eq!(days.len(), 1);
    assert_ne!(first.id, second.id);
    assert_eq!(first.day_id, second.day_id);
    assert_eq!(first.sort_order, 1);
    assert_eq!(second.sort_order, 2);
}

#[tokio::test]
async fn test_add_session_empty_title_rejected_before_any_write() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;

    let err = engine
        .add_session(template.id, 1, &SessionMeta::titled("   "))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    // No day row was created for the rejected session
    let days = database.days().list_for_template(template.id).await.unwrap();
    assert!(days.is_empty());
}

#[tokio::test]
async fn test_add_session_day_index_zero_rejected() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;

    let err = engine
        .add_session(template.id, 0, &SessionMeta::titled("Ghost Day"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
}

#[tokio::test]
async fn test_add_session_unknown_template() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);

    let err = engine
        .add_session(Uuid::new_v4(), 1, &SessionMeta::titled("Orphan"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_add_session_delegated_owner() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (coach, template) = create_test_template(&database).await;
    let specialist = Uuid::new_v4();

    let meta = SessionMeta {
        owner_id: Some(specialist),
        session_timing: SessionTiming::Morning,
        ..SessionMeta::titled("Mobility Flow")
    };
    let module = engine.add_session(template.id, 2, &meta).await.unwrap();

    assert_eq!(module.owner_id, specialist);
    assert_ne!(module.owner_id, coach);
    assert_eq!(module.session_timing, SessionTiming::Morning);
}

// ============================================================================
// Copy / Paste
// ============================================================================

#[tokio::test]
async fn test_copy_unknown_module_rejected() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);

    let err = engine.copy_session(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_paste_push_day_into_week_two() {
    // The canonical scenario: Push Day on day 1 pasted into day 8
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;
    let source = add_push_day(&database, &engine, template.id, 1).await;

    let clipboard = engine.copy_session(source.id).await.unwrap();
    let pasted = engine.paste_session(&clipboard, 8).await.unwrap();

    assert_ne!(pasted.id, source.id);
    assert_eq!(pasted.title, "Push Day");
    assert_eq!(pasted.status, ModuleStatus::Draft);

    // Same exercises, same section, same order, prescriptions copied exactly
    let source_details = database.exercises().list_for_module(source.id).await.unwrap();
    let pasted_details = database.exercises().list_for_module(pasted.id).await.unwrap();
    assert_eq!(pasted_details.len(), 2);
    assert_eq!(exercise_ids(&pasted_details), exercise_ids(&source_details));
    for (s, p) in source_details.iter().zip(&pasted_details) {
        assert_eq!(p.entry.section, s.entry.section);
        assert_eq!(p.entry.instructions, s.entry.instructions);
        assert_eq!(p.prescription.set_count, s.prescription.set_count);
        assert_eq!(p.prescription.rep_range_min, s.prescription.rep_range_min);
        assert_eq!(p.prescription.rep_range_max, s.prescription.rep_range_max);
        assert_eq!(p.prescription.intensity_type, s.prescription.intensity_type);
        assert_eq!(p.prescription.intensity_value, s.prescription.intensity_value);
        // Fresh rows throughout
        assert_ne!(p.entry.id, s.entry.id);
        assert_ne!(p.prescription.id, s.prescription.id);
    }

    // Week 1 day 1 still shows the original, unchanged
    let week_one = engine.get_calendar(template.id, 1).await.unwrap();
    assert_eq!(week_one.days[0].modules.len(), 1);
    assert_eq!(week_one.days[0].modules[0].id, source.id);

    let week_two = engine.get_calendar(template.id, 2).await.unwrap();
    assert_eq!(week_two.days[0].day_index, 8);
    assert_eq!(week_two.days[0].modules.len(), 1);
    assert_eq!(week_two.days[0].modules[0].id, pasted.id);
}

#[tokio::test]
async fn test_paste_twice_yields_independent_subtrees() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;
    let source = add_push_day(&database, &engine, template.id, 1).await;

    let clipboard = engine.copy_session(source.id).await.unwrap();
    let first = engine.paste_session(&clipboard, 3).await.unwrap();
    let second = engine.paste_session(&clipboard, 10).await.unwrap();

    let first_details = database.exercises().list_for_module(first.id).await.unwrap();
    let second_details = database.exercises().list_for_module(second.id).await.unwrap();
    assert_eq!(first_details.len(), 2);
    assert_eq!(second_details.len(), 2);

    // Zero shared ids between the two pastes
    let first_ids: Vec<Uuid> = first_details
        .iter()
        .flat_map(|d| [d.entry.id, d.prescription.id])
        .chain([first.id])
        .collect();
    let second_ids: Vec<Uuid> = second_details
        .iter()
        .flat_map(|d| [d.entry.id, d.prescription.id])
        .chain([second.id])
        .collect();
    assert!(first_ids.iter().all(|id| !second_ids.contains(id)));

    // Deleting one copy leaves the other fully intact
    engine.delete_module(first.id).await.unwrap();
    let after = database.exercises().list_for_module(second.id).await.unwrap();
    assert_eq!(after.len(), 2);
    assert!(database.modules().get(source.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_paste_into_source_day_creates_sibling() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;
    let source = add_push_day(&database, &engine, template.id, 4).await;

    let clipboard = engine.copy_session(source.id).await.unwrap();
    let sibling = engine.paste_session(&clipboard, 4).await.unwrap();

    assert_ne!(sibling.id, source.id);
    assert_eq!(sibling.day_id, source.day_id);
    assert_eq!(source.sort_order, 1);
    assert_eq!(sibling.sort_order, 2);

    let day_modules = database.modules().list_for_day(source.day_id).await.unwrap();
    assert_eq!(day_modules.len(), 2);
}

#[tokio::test]
async fn test_paste_fails_after_source_deleted() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;
    let source = add_push_day(&database, &engine, template.id, 1).await;

    let clipboard = engine.copy_session(source.id).await.unwrap();
    engine.delete_module(source.id).await.unwrap();

    let err = engine.paste_session(&clipboard, 2).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_paste_reflects_source_edits_after_copy() {
    // The clipboard is a reference, not a snapshot
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;
    let source = add_push_day(&database, &engine, template.id, 1).await;

    let clipboard = engine.copy_session(source.id).await.unwrap();
    database
        .modules()
        .update_meta(
            source.id,
            &UpdateModuleRequest {
                title: Some("Push Day (revised)".to_owned()),
                ..UpdateModuleRequest::default()
            },
        )
        .await
        .unwrap();

    let pasted = engine.paste_session(&clipboard, 8).await.unwrap();
    assert_eq!(pasted.title, "Push Day (revised)");
}

#[tokio::test]
async fn test_paste_resets_published_status_to_draft() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;
    let source = add_push_day(&database, &engine, template.id, 1).await;

    let published = engine.toggle_module_status(source.id).await.unwrap();
    assert_eq!(published.status, ModuleStatus::Published);

    let clipboard = engine.copy_session(source.id).await.unwrap();
    let pasted = engine.paste_session(&clipboard, 2).await.unwrap();

    assert_eq!(pasted.status, ModuleStatus::Draft);
    // The source keeps its publication
    let source_after = database.modules().get(source.id).await.unwrap().unwrap();
    assert_eq!(source_after.status, ModuleStatus::Published);
}

#[tokio::test]
async fn test_paste_preserves_exercise_order_within_section() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;

    let module = engine
        .add_session(template.id, 1, &SessionMeta::titled("Ordered"))
        .await
        .unwrap();
    let exercises = database.exercises();
    for exercise_id in ["back-squat", "romanian-deadlift", "plank"] {
        exercises
            .add(
                module.id,
                &CreateExerciseRequest {
                    exercise_id: exercise_id.to_owned(),
                    section: Section::Main,
                    instructions: None,
                    prescription: PrescriptionData::sets_and_reps(3, 5, 5),
                },
            )
            .await
            .unwrap();
    }

    let clipboard = engine.copy_session(module.id).await.unwrap();
    let pasted = engine.paste_session(&clipboard, 6).await.unwrap();

    let details = exercises.list_for_module(pasted.id).await.unwrap();
    assert_eq!(
        exercise_ids(&details),
        vec!["back-squat", "romanian-deadlift", "plank"]
    );
}

// ============================================================================
// Status toggle / delete
// ============================================================================

#[tokio::test]
async fn test_toggle_module_status_round_trip() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;
    let module = add_push_day(&database, &engine, template.id, 1).await;

    let published = engine.toggle_module_status(module.id).await.unwrap();
    assert_eq!(published.status, ModuleStatus::Published);

    let back = engine.toggle_module_status(module.id).await.unwrap();
    assert_eq!(back.status, ModuleStatus::Draft);

    // No cascade: the exercises are untouched by either toggle
    let details = database.exercises().list_for_module(module.id).await.unwrap();
    assert_eq!(details.len(), 2);
}

#[tokio::test]
async fn test_toggle_unknown_module() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);

    let err = engine.toggle_module_status(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_delete_module_removes_subtree() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;
    let module = add_push_day(&database, &engine, template.id, 1).await;

    let details = database.exercises().list_for_module(module.id).await.unwrap();
    let entry_id = details[0].entry.id;

    engine.delete_module(module.id).await.unwrap();

    assert!(database.modules().get(module.id).await.unwrap().is_none());
    assert!(database.exercises().get_entry(entry_id).await.unwrap().is_none());

    // The day row remains; it is harmless
    let days = database.days().list_for_template(template.id).await.unwrap();
    assert_eq!(days.len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_module() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);

    let err = engine.delete_module(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
