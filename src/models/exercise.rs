// ABOUTME: Exercise entries placed within a module section, each owning one prescription
// ABOUTME: Prescriptions hold the quantitative training parameters (sets, reps, tempo, intensity)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Section of a module an exercise belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Preparation work
    Warmup,
    /// Primary lifts or efforts
    #[default]
    Main,
    /// Supplemental volume work
    Accessory,
    /// Wind-down work
    Cooldown,
}

impl Section {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warmup => "warmup",
            Self::Main => "main",
            Self::Accessory => "accessory",
            Self::Cooldown => "cooldown",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "warmup" => Self::Warmup,
            "accessory" => Self::Accessory,
            "cooldown" => Self::Cooldown,
            _ => Self::Main,
        }
    }

    /// Display order of sections within a module
    #[must_use]
    pub const fn rank(&self) -> i64 {
        match self {
            Self::Warmup => 0,
            Self::Main => 1,
            Self::Accessory => 2,
            Self::Cooldown => 3,
        }
    }
}

/// How prescribed intensity is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntensityType {
    /// No intensity prescribed
    #[default]
    None,
    /// Rating of perceived exertion (1-10)
    Rpe,
    /// Reps in reserve
    Rir,
    /// Percent of one-rep max
    PercentOneRm,
    /// Heart rate zone (1-5)
    HeartRateZone,
}

impl IntensityType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Rpe => "rpe",
            Self::Rir => "rir",
            Self::PercentOneRm => "percent_one_rm",
            Self::HeartRateZone => "heart_rate_zone",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "rpe" => Self::Rpe,
            "rir" => Self::Rir,
            "percent_one_rm" => Self::PercentOneRm,
            "heart_rate_zone" => Self::HeartRateZone,
            _ => Self::None,
        }
    }
}

/// One exercise placed within a module's section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Unique identifier
    pub id: Uuid,
    /// Parent module
    pub module_id: Uuid,
    /// Reference into the external exercise library
    pub exercise_id: String,
    /// Section within the module
    pub section: Section,
    /// Ordering within module+section; new entries append at max+1
    pub sort_order: i64,
    /// Optional coaching instructions
    pub instructions: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Quantitative training parameters for one exercise entry (1:1)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    /// Unique identifier
    pub id: Uuid,
    /// Owning exercise entry (exactly one prescription per entry)
    pub exercise_entry_id: Uuid,
    /// Number of working sets
    pub set_count: u32,
    /// Lower bound of the rep range
    pub rep_range_min: Option<u32>,
    /// Upper bound of the rep range
    pub rep_range_max: Option<u32>,
    /// Tempo notation (e.g. "31X1")
    pub tempo: Option<String>,
    /// Rest between sets in seconds
    pub rest_seconds: Option<u32>,
    /// How intensity is expressed
    pub intensity_type: IntensityType,
    /// Intensity value in the unit of `intensity_type`
    pub intensity_value: Option<f64>,
    /// Structured per-set column payload (JSON)
    pub columns: serde_json::Value,
    /// Coach-defined custom fields (JSON)
    pub custom_fields: serde_json::Value,
    /// Free-form progression notes
    pub progression_notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Prescription fields supplied when creating an exercise entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionData {
    /// Number of working sets
    pub set_count: u32,
    /// Lower bound of the rep range
    #[serde(default)]
    pub rep_range_min: Option<u32>,
    /// Upper bound of the rep range
    #[serde(default)]
    pub rep_range_max: Option<u32>,
    /// Tempo notation
    #[serde(default)]
    pub tempo: Option<String>,
    /// Rest between sets in seconds
    #[serde(default)]
    pub rest_seconds: Option<u32>,
    /// How intensity is expressed
    #[serde(default)]
    pub intensity_type: IntensityType,
    /// Intensity value
    #[serde(default)]
    pub intensity_value: Option<f64>,
    /// Structured per-set column payload
    #[serde(default = "empty_object")]
    pub columns: serde_json::Value,
    /// Coach-defined custom fields
    #[serde(default = "empty_object")]
    pub custom_fields: serde_json::Value,
    /// Free-form progression notes
    #[serde(default)]
    pub progression_notes: Option<String>,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl PrescriptionData {
    /// Sets-and-rep-range shorthand used heavily by seeds and tests
    #[must_use]
    pub fn sets_and_reps(set_count: u32, rep_min: u32, rep_max: u32) -> Self {
        Self {
            set_count,
            rep_range_min: Some(rep_min),
            rep_range_max: Some(rep_max),
            tempo: None,
            rest_seconds: None,
            intensity_type: IntensityType::None,
            intensity_value: None,
            columns: empty_object(),
            custom_fields: empty_object(),
            progression_notes: None,
        }
    }

    /// Attach an RIR intensity target
    #[must_use]
    pub fn with_rir(mut self, rir: f64) -> Self {
        self.intensity_type = IntensityType::Rir;
        self.intensity_value = Some(rir);
        self
    }
}

/// Request to place an exercise in a module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExerciseRequest {
    /// Reference into the external exercise library
    pub exercise_id: String,
    /// Section within the module
    #[serde(default)]
    pub section: Section,
    /// Optional coaching instructions
    #[serde(default)]
    pub instructions: Option<String>,
    /// The entry's prescription (exactly one, created together)
    pub prescription: PrescriptionData,
}

/// Request to update prescription fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePrescriptionRequest {
    /// New set count (if provided)
    pub set_count: Option<u32>,
    /// New rep range lower bound (if provided)
    pub rep_range_min: Option<u32>,
    /// New rep range upper bound (if provided)
    pub rep_range_max: Option<u32>,
    /// New tempo (if provided)
    pub tempo: Option<String>,
    /// New rest seconds (if provided)
    pub rest_seconds: Option<u32>,
    /// New intensity type (if provided)
    pub intensity_type: Option<IntensityType>,
    /// New intensity value (if provided)
    pub intensity_value: Option<f64>,
    /// Replacement column payload (if provided)
    pub columns: Option<serde_json::Value>,
    /// Replacement custom fields (if provided)
    pub custom_fields: Option<serde_json::Value>,
    /// New progression notes (if provided)
    pub progression_notes: Option<String>,
}

/// An exercise entry together with its prescription, as listed to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDetail {
    /// The entry
    #[serde(flatten)]
    pub entry: ExerciseEntry,
    /// Its prescription
    pub prescription: Prescription,
}
