// ABOUTME: Pure calendar projection from the flat day list to a week/day grid
// ABOUTME: Derived view only; never the source of truth, safe to recompute after any mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Calendar Projection
//!
//! Templates store a flat list of days addressed by a 1-based running
//! index. The calendar view is derived: week `w`, day-of-week `d` (Mon=1)
//! maps to `day_index = (w-1)*7 + d`. Nothing here touches the database;
//! the projector is a pure function over already-loaded rows.

use crate::constants::calendar::DAYS_PER_WEEK;
use crate::errors::{AppError, AppResult};
use crate::models::{Day, Module};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Compute the day index for a week and day-of-week slot (both 1-based)
#[must_use]
pub const fn day_index_for(week: u32, day_of_week: u32) -> u32 {
    (week - 1) * DAYS_PER_WEEK + day_of_week
}

/// Compute the week a day index falls in
#[must_use]
pub const fn week_of(day_index: u32) -> u32 {
    day_index.div_ceil(DAYS_PER_WEEK)
}

/// Number of calendar weeks spanned by a day list: `ceil(max_index/7)`,
/// minimum 1 so an empty template still renders one blank week
#[must_use]
pub fn week_count(days: &[Day]) -> u32 {
    days.iter()
        .map(|d| week_of(d.day_index))
        .max()
        .unwrap_or(1)
        .max(1)
}

/// One slot in a projected week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The 1-based running index this slot maps to
    pub day_index: u32,
    /// Day-of-week position, Mon=1 .. Sun=7
    pub day_of_week: u32,
    /// The persisted day row, if one exists at this index
    pub day: Option<Day>,
    /// The day's modules in sort order; empty for rest days
    pub modules: Vec<Module>,
}

impl CalendarDay {
    /// A slot with no sessions is a rest day (synthetic, never persisted)
    #[must_use]
    pub fn is_rest_day(&self) -> bool {
        self.modules.is_empty()
    }
}

/// A projected week: exactly seven slots, Monday through Sunday
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarWeek {
    /// 1-based week number
    pub week: u32,
    /// Seven slots, Mon..Sun
    pub days: Vec<CalendarDay>,
}

/// Project one week of a template's calendar
///
/// `modules_by_day` maps day row ids to that day's modules in sort order.
/// Indices with no persisted day row project as rest days.
///
/// # Errors
///
/// Returns a validation error for week 0
pub fn project_week(
    week: u32,
    days: &[Day],
    modules_by_day: &HashMap<Uuid, Vec<Module>>,
) -> AppResult<CalendarWeek> {
    if week == 0 {
        return Err(AppError::out_of_range("week is 1-based"));
    }

    let by_index: HashMap<u32, &Day> = days.iter().map(|d| (d.day_index, d)).collect();

    let days = (1..=DAYS_PER_WEEK)
        .map(|day_of_week| {
            let day_index = day_index_for(week, day_of_week);
            let day = by_index.get(&day_index).map(|d| (*d).clone());
            let modules = day
                .as_ref()
                .and_then(|d| modules_by_day.get(&d.id))
                .cloned()
                .unwrap_or_default();
            CalendarDay {
                day_index,
                day_of_week,
                day,
                modules,
            }
        })
        .collect();

    Ok(CalendarWeek { week, days })
}
