// ABOUTME: Read-only exercise library lookup seam
// ABOUTME: Resolves opaque exercise references to display metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display metadata for one library exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseInfo {
    /// Library identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Primary muscle group
    pub muscle_group: String,
    /// Equipment needed, if any
    pub equipment: Option<String>,
}

/// Read-only lookup into the exercise library, keyed by id
#[async_trait]
pub trait ExerciseLibrary: Send + Sync {
    /// Resolve an exercise reference to display metadata
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup backend fails
    async fn get_exercise(&self, exercise_id: &str) -> AppResult<Option<ExerciseInfo>>;
}

/// In-memory library used by seeds and tests
#[derive(Debug, Default)]
pub struct StaticExerciseLibrary {
    exercises: HashMap<String, ExerciseInfo>,
}

impl StaticExerciseLibrary {
    /// Build a library from a list of exercises
    #[must_use]
    pub fn new(exercises: Vec<ExerciseInfo>) -> Self {
        Self {
            exercises: exercises.into_iter().map(|e| (e.id.clone(), e)).collect(),
        }
    }

    /// A small catalog of common barbell and dumbbell movements
    #[must_use]
    pub fn with_demo_catalog() -> Self {
        let catalog = [
            ("bench-press", "Barbell Bench Press", "chest", Some("barbell")),
            ("incline-db-press", "Incline Dumbbell Press", "chest", Some("dumbbells")),
            ("back-squat", "Barbell Back Squat", "quads", Some("barbell")),
            ("romanian-deadlift", "Romanian Deadlift", "hamstrings", Some("barbell")),
            ("overhead-press", "Overhead Press", "shoulders", Some("barbell")),
            ("barbell-row", "Barbell Row", "back", Some("barbell")),
            ("pull-up", "Pull-Up", "back", None),
            ("plank", "Plank", "core", None),
        ];

        Self::new(
            catalog
                .into_iter()
                .map(|(id, name, muscle_group, equipment)| ExerciseInfo {
                    id: id.to_owned(),
                    name: name.to_owned(),
                    muscle_group: muscle_group.to_owned(),
                    equipment: equipment.map(ToOwned::to_owned),
                })
                .collect(),
        )
    }
}

#[async_trait]
impl ExerciseLibrary for StaticExerciseLibrary {
    async fn get_exercise(&self, exercise_id: &str) -> AppResult<Option<ExerciseInfo>> {
        Ok(self.exercises.get(exercise_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_catalog_lookup() {
        let library = StaticExerciseLibrary::with_demo_catalog();

        let bench = library.get_exercise("bench-press").await.unwrap();
        assert_eq!(bench.unwrap().muscle_group, "chest");

        let missing = library.get_exercise("zercher-squat").await.unwrap();
        assert!(missing.is_none());
    }
}
