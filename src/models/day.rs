// ABOUTME: Day rows anchoring modules to a 1-based running index within a template
// ABOUTME: Days are addressed by index, not calendar date, and are created lazily
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One numbered slot within a template
///
/// `day_index` is 1-based and unbounded; week/day placement is derived from
/// it, never stored. A row for a given index exists only once something was
/// written there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Day {
    /// Unique identifier
    pub id: Uuid,
    /// Parent template
    pub template_id: Uuid,
    /// 1-based running index, unique within the template
    pub day_index: u32,
    /// Optional display title (e.g. "Heavy Lower")
    pub title: Option<String>,
    /// Optional coach notes for the day
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
