// ABOUTME: Integration tests for the copy week operation
// ABOUTME: Rest-day skipping, destination day creation, ordering, and self-copy behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use common::{add_push_day, create_test_database, create_test_template, exercise_ids};
use pierre_programs::composition::CompositionEngine;
use pierre_programs::errors::ErrorCode;
use pierre_programs::models::{ModuleStatus, SessionMeta};
use uuid::Uuid;

#[tokio::test]
async fn test_copy_week_copies_every_module() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;

    // Week 1: two sessions on Monday, one on Tuesday, rest elsewhere
    add_push_day(&database, &engine, template.id, 1).await;
    engine
        .add_session(template.id, 1, &SessionMeta::titled("Evening Cardio"))
        .await
        .unwrap();
    engine
        .add_session(template.id, 2, &SessionMeta::titled("Lower Day"))
        .await
        .unwrap();

    let copied = engine.copy_week(template.id, 1, 2).await.unwrap();
    assert_eq!(copied.len(), 3);
    assert!(copied.iter().all(|m| m.status == ModuleStatus::Draft));

    let week_two = engine.get_calendar(template.id, 2).await.unwrap();
    assert_eq!(week_two.days[0].modules.len(), 2); // day 8
    assert_eq!(week_two.days[1].modules.len(), 1); // day 9
    assert_eq!(week_two.days[0].modules[0].title, "Push Day");
    assert_eq!(week_two.days[0].modules[1].title, "Evening Cardio");
}

#[tokio::test]
async fn test_copy_week_skips_rest_days_and_empty_day_rows() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;

    add_push_day(&database, &engine, template.id, 1).await;
    // Day 3 has a row (titled) but zero modules; it must not be copied
    database
        .days()
        .update_details(template.id, 3, Some("Rest"), None)
        .await
        .unwrap();

    engine.copy_week(template.id, 1, 2).await.unwrap();

    // Destination rows exist only where modules landed: day 8, not day 10
    assert!(database
        .days()
        .get_by_index(template.id, 8)
        .await
        .unwrap()
        .is_some());
    assert!(database
        .days()
        .get_by_index(template.id, 10)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_copy_week_into_brand_new_week_beyond_max() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;

    add_push_day(&database, &engine, template.id, 2).await;
    assert_eq!(engine.week_count(template.id).await.unwrap(), 1);

    let copied = engine.copy_week(template.id, 1, 5).await.unwrap();
    assert_eq!(copied.len(), 1);
    // Day 2 of week 5 is index 30
    assert_eq!(engine.week_count(template.id).await.unwrap(), 5);
    let week_five = engine.get_calendar(template.id, 5).await.unwrap();
    assert_eq!(week_five.days[1].day_index, 30);
    assert_eq!(week_five.days[1].modules.len(), 1);
}

#[tokio::test]
async fn test_copy_week_with_empty_source_is_a_no_op() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;

    let copied = engine.copy_week(template.id, 1, 2).await.unwrap();
    assert!(copied.is_empty());
    assert!(database
        .days()
        .list_for_template(template.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_copy_week_deep_copies_exercises() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;
    let source = add_push_day(&database, &engine, template.id, 1).await;

    let copied = engine.copy_week(template.id, 1, 3).await.unwrap();
    assert_eq!(copied.len(), 1);

    let source_details = database.exercises().list_for_module(source.id).await.unwrap();
    let copied_details = database
        .exercises()
        .list_for_module(copied[0].id)
        .await
        .unwrap();
    assert_eq!(exercise_ids(&copied_details), exercise_ids(&source_details));
    assert!(copied_details
        .iter()
        .zip(&source_details)
        .all(|(c, s)| c.entry.id != s.entry.id && c.prescription.id != s.prescription.id));
}

#[tokio::test]
async fn test_copy_week_onto_itself_duplicates_in_place() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;
    let source = add_push_day(&database, &engine, template.id, 1).await;

    let copied = engine.copy_week(template.id, 1, 1).await.unwrap();
    assert_eq!(copied.len(), 1);

    // The day now holds the original and one sibling copy, not an explosion
    let day_modules = database.modules().list_for_day(source.day_id).await.unwrap();
    assert_eq!(day_modules.len(), 2);
    assert_eq!(day_modules[0].id, source.id);
    assert_eq!(day_modules[1].sort_order, 2);
}

#[tokio::test]
async fn test_copy_week_rejects_week_zero_and_unknown_template() {
    let database = create_test_database().await;
    let engine = CompositionEngine::new(&database);
    let (_, template) = create_test_template(&database).await;

    let err = engine.copy_week(template.id, 0, 2).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    let err = engine.copy_week(template.id, 1, 0).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    let err = engine.copy_week(Uuid::new_v4(), 1, 2).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
