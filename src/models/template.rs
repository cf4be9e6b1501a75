// ABOUTME: Top-level program template model and its request types
// ABOUTME: Carries title, level, tags, and visibility for an authored multi-week program
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Target experience level for a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgramLevel {
    /// No level assigned
    #[default]
    None,
    /// New trainees
    Beginner,
    /// One or more years of consistent training
    Intermediate,
    /// Competitive or long-trained athletes
    Advanced,
}

impl ProgramLevel {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "beginner" => Self::Beginner,
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::None,
        }
    }
}

/// Template visibility for sharing with other coaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemplateVisibility {
    /// Only visible to the owning coach
    #[default]
    Private,
    /// Visible to other coaches on the platform
    Shared,
}

impl TemplateVisibility {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Shared => "shared",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "shared" => Self::Shared,
            _ => Self::Private,
        }
    }
}

/// An authored, reusable multi-week workout program definition
///
/// Templates own their day list; days are created lazily on first write to
/// an index. A template is never linked from client-assigned program
/// copies, so author edits cannot reach in-progress assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Unique identifier
    pub id: Uuid,
    /// Primary coach who owns the template
    pub owner_id: Uuid,
    /// Display title (required, non-empty)
    pub title: String,
    /// Optional description of the program
    pub description: Option<String>,
    /// Target experience level
    pub level: ProgramLevel,
    /// Tags for filtering and search (stored as JSON array)
    pub tags: Vec<String>,
    /// Sharing visibility
    pub visibility: TemplateVisibility,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    /// Display title (required, non-empty)
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Target experience level
    #[serde(default)]
    pub level: ProgramLevel,
    /// Tags for filtering and search
    #[serde(default)]
    pub tags: Vec<String>,
    /// Sharing visibility
    #[serde(default)]
    pub visibility: TemplateVisibility,
}

impl CreateTemplateRequest {
    /// Create a request with just a title, everything else defaulted
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            level: ProgramLevel::None,
            tags: Vec::new(),
            visibility: TemplateVisibility::Private,
        }
    }
}

/// Request to update an existing template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTemplateRequest {
    /// New display title (if provided)
    pub title: Option<String>,
    /// New description (if provided)
    pub description: Option<String>,
    /// New level (if provided)
    pub level: Option<ProgramLevel>,
    /// New tags (if provided)
    pub tags: Option<Vec<String>>,
    /// New visibility (if provided)
    pub visibility: Option<TemplateVisibility>,
}
