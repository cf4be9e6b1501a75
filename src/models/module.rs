// ABOUTME: Session modules scheduled on a day, with draft/published lifecycle
// ABOUTME: A module's owner may be a delegated specialist distinct from the template owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Training modality of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    /// Resistance training session
    Workout,
    /// Steady-state or interval cardio
    Cardio,
    /// Stretching and mobility work
    Mobility,
    /// Active recovery session
    Recovery,
    /// User-defined custom modality
    #[default]
    Custom,
}

impl ModuleType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Cardio => "cardio",
            Self::Mobility => "mobility",
            Self::Recovery => "recovery",
            Self::Custom => "custom",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "workout" => Self::Workout,
            "cardio" => Self::Cardio,
            "mobility" => Self::Mobility,
            "recovery" => Self::Recovery,
            _ => Self::Custom,
        }
    }
}

/// Training emphasis of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    /// Maximal strength work
    Strength,
    /// Muscle-growth focused volume work
    Hypertrophy,
    /// Aerobic base and capacity
    Endurance,
    /// Repeated high-intensity efforts
    Intervals,
    /// Technique and skill practice
    Skill,
    /// No single emphasis
    #[default]
    Mixed,
}

impl SessionType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Hypertrophy => "hypertrophy",
            Self::Endurance => "endurance",
            Self::Intervals => "intervals",
            Self::Skill => "skill",
            Self::Mixed => "mixed",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "strength" => Self::Strength,
            "hypertrophy" => Self::Hypertrophy,
            "endurance" => Self::Endurance,
            "intervals" => Self::Intervals,
            "skill" => Self::Skill,
            _ => Self::Mixed,
        }
    }
}

/// Recommended time of day for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionTiming {
    /// No timing preference
    #[default]
    Anytime,
    /// Morning session
    Morning,
    /// Midday session
    Midday,
    /// Evening session
    Evening,
}

impl SessionTiming {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anytime => "anytime",
            Self::Morning => "morning",
            Self::Midday => "midday",
            Self::Evening => "evening",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "morning" => Self::Morning,
            "midday" => Self::Midday,
            "evening" => Self::Evening,
            _ => Self::Anytime,
        }
    }
}

/// Publication state of a module
///
/// A module only becomes visible to client assignment once published.
/// Every freshly created or copied module starts as a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    /// Not yet visible to clients
    #[default]
    Draft,
    /// Visible and assignable to clients
    Published,
}

impl ModuleStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "published" => Self::Published,
            _ => Self::Draft,
        }
    }

    /// The opposite state
    #[must_use]
    pub const fn toggled(&self) -> Self {
        match self {
            Self::Draft => Self::Published,
            Self::Published => Self::Draft,
        }
    }
}

/// One session scheduled on a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier
    pub id: Uuid,
    /// Parent day
    pub day_id: Uuid,
    /// Coach or delegated specialist who owns this session
    pub owner_id: Uuid,
    /// Training modality
    pub module_type: ModuleType,
    /// Training emphasis
    pub session_type: SessionType,
    /// Recommended time of day
    pub session_timing: SessionTiming,
    /// Display title (required, non-empty)
    pub title: String,
    /// Ordering within the day; new modules append at max+1
    pub sort_order: i64,
    /// Publication state
    pub status: ModuleStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    /// Display title (required, non-empty)
    pub title: String,
    /// Training modality
    #[serde(default)]
    pub module_type: ModuleType,
    /// Training emphasis
    #[serde(default)]
    pub session_type: SessionType,
    /// Recommended time of day
    #[serde(default)]
    pub session_timing: SessionTiming,
    /// Session owner; defaults to the template's primary coach
    #[serde(default)]
    pub owner_id: Option<Uuid>,
}

impl SessionMeta {
    /// Create a meta with just a title, everything else defaulted
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            module_type: ModuleType::Custom,
            session_type: SessionType::Mixed,
            session_timing: SessionTiming::Anytime,
            owner_id: None,
        }
    }
}

/// Request to update a module's descriptive fields
///
/// Publication state is deliberately excluded; it only changes through the
/// explicit status toggle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateModuleRequest {
    /// New title (if provided)
    pub title: Option<String>,
    /// New modality (if provided)
    pub module_type: Option<ModuleType>,
    /// New emphasis (if provided)
    pub session_type: Option<SessionType>,
    /// New timing (if provided)
    pub session_timing: Option<SessionTiming>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggle() {
        assert_eq!(ModuleStatus::Draft.toggled(), ModuleStatus::Published);
        assert_eq!(ModuleStatus::Published.toggled(), ModuleStatus::Draft);
    }

    #[test]
    fn test_enum_codecs_round_trip() {
        assert_eq!(ModuleType::parse("cardio"), ModuleType::Cardio);
        assert_eq!(SessionType::parse("hypertrophy"), SessionType::Hypertrophy);
        assert_eq!(SessionTiming::parse("evening"), SessionTiming::Evening);
        // Unknown strings never fail, they fall back
        assert_eq!(ModuleType::parse("swimming"), ModuleType::Custom);
        assert_eq!(SessionType::parse(""), SessionType::Mixed);
        assert_eq!(ModuleStatus::parse("archived"), ModuleStatus::Draft);
    }
}
