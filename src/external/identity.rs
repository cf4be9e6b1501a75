// ABOUTME: Identity provider seam supplying the acting coach's delegated-specialist roster
// ABOUTME: Used to populate module owner choices; authorization itself lives outside this crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A specialist a coach may delegate sessions to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistInfo {
    /// Specialist identity
    pub id: Uuid,
    /// Display name
    pub display_name: String,
    /// Area of practice (e.g. "mobility", "nutrition")
    pub specialty: String,
}

/// Resolves the delegated-specialist roster for an acting coach
///
/// Module ownership is a plain foreign identity; whether an owner may edit
/// or publish is an authorization concern layered outside this crate.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// List the specialists a coach can assign sessions to
    ///
    /// # Errors
    ///
    /// Returns an error if the identity backend fails
    async fn coach_roster(&self, coach_id: Uuid) -> AppResult<Vec<SpecialistInfo>>;
}

/// In-memory roster used by seeds and tests
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    rosters: HashMap<Uuid, Vec<SpecialistInfo>>,
}

impl StaticIdentityProvider {
    /// Build a provider from per-coach rosters
    #[must_use]
    pub fn new(rosters: HashMap<Uuid, Vec<SpecialistInfo>>) -> Self {
        Self { rosters }
    }

    /// Register a specialist on a coach's roster
    pub fn add_specialist(&mut self, coach_id: Uuid, specialist: SpecialistInfo) {
        self.rosters.entry(coach_id).or_default().push(specialist);
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn coach_roster(&self, coach_id: Uuid) -> AppResult<Vec<SpecialistInfo>> {
        Ok(self.rosters.get(&coach_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roster_lookup() {
        let coach = Uuid::new_v4();
        let mut provider = StaticIdentityProvider::default();
        provider.add_specialist(
            coach,
            SpecialistInfo {
                id: Uuid::new_v4(),
                display_name: "Dana Mobility".to_owned(),
                specialty: "mobility".to_owned(),
            },
        );

        let roster = provider.coach_roster(coach).await.unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].specialty, "mobility");

        let empty = provider.coach_roster(Uuid::new_v4()).await.unwrap();
        assert!(empty.is_empty());
    }
}
