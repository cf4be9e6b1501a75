// ABOUTME: Core data models for the four-level template tree
// ABOUTME: Templates, days, modules, exercise entries, and prescriptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Core data models
//!
//! Value types for the template tree. Enums carry `as_str`/`parse` codecs
//! for their SQLite TEXT columns; unknown stored strings parse to a
//! fallback variant so old rows never fail a read.

/// Day rows anchoring modules to a 1-based index within a template
pub mod day;

/// Exercise entries and their prescriptions
pub mod exercise;

/// Session modules scheduled on a day
pub mod module;

/// Top-level program templates
pub mod template;

pub use day::Day;
pub use exercise::{
    CreateExerciseRequest, ExerciseDetail, ExerciseEntry, IntensityType, Prescription,
    PrescriptionData, Section, UpdatePrescriptionRequest,
};
pub use module::{
    Module, ModuleStatus, ModuleType, SessionMeta, SessionTiming, SessionType,
    UpdateModuleRequest,
};
pub use template::{
    CreateTemplateRequest, ProgramLevel, Template, TemplateVisibility, UpdateTemplateRequest,
};
