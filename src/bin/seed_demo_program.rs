// ABOUTME: Demo data seeder for the program builder
// ABOUTME: Builds a realistic 4-week strength template through the real composition engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Demo program seeder.
//!
//! Populates the database with a 4-week upper/lower strength template so
//! the calendar and composition flows have something real to operate on.
//!
//! Usage:
//! ```bash
//! # Seed into the default database location
//! cargo run --bin seed-demo-program
//!
//! # Seed into a specific database
//! cargo run --bin seed-demo-program -- --database-url sqlite:demo.db
//!
//! # Verbose output
//! cargo run --bin seed-demo-program -- -v
//! ```

use anyhow::Result;
use clap::Parser;
use pierre_programs::composition::CompositionEngine;
use pierre_programs::config::BuilderConfig;
use pierre_programs::database::Database;
use pierre_programs::logging::LoggingConfig;
use pierre_programs::models::{
    CreateExerciseRequest, CreateTemplateRequest, ModuleType, PrescriptionData, ProgramLevel,
    Section, SessionMeta, SessionType,
};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "seed-demo-program",
    about = "Pierre Program Builder Demo Seeder",
    long_about = "Populate the database with a demo 4-week strength template"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Number of weeks to build (week 1 is authored, the rest are copies)
    #[arg(long, default_value = "4")]
    weeks: u32,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// One exercise line of the demo plan
struct DemoExercise {
    exercise_id: &'static str,
    section: Section,
    sets: u32,
    rep_min: u32,
    rep_max: u32,
    rir: f64,
    instructions: Option<&'static str>,
}

/// One session of the demo plan
struct DemoSession {
    day_index: u32,
    title: &'static str,
    session_type: SessionType,
    exercises: &'static [DemoExercise],
}

const UPPER_A: &[DemoExercise] = &[
    DemoExercise {
        exercise_id: "bench-press",
        section: Section::Main,
        sets: 4,
        rep_min: 6,
        rep_max: 8,
        rir: 2.0,
        instructions: Some("Pause the first rep of every set"),
    },
    DemoExercise {
        exercise_id: "barbell-row",
        section: Section::Main,
        sets: 4,
        rep_min: 8,
        rep_max: 10,
        rir: 2.0,
        instructions: None,
    },
    DemoExercise {
        exercise_id: "incline-db-press",
        section: Section::Accessory,
        sets: 3,
        rep_min: 10,
        rep_max: 12,
        rir: 1.0,
        instructions: None,
    },
    DemoExercise {
        exercise_id: "pull-up",
        section: Section::Accessory,
        sets: 3,
        rep_min: 6,
        rep_max: 10,
        rir: 1.0,
        instructions: Some("Add weight once all sets hit 10"),
    },
];

const LOWER_A: &[DemoExercise] = &[
    DemoExercise {
        exercise_id: "back-squat",
        section: Section::Main,
        sets: 4,
        rep_min: 5,
        rep_max: 6,
        rir: 2.0,
        instructions: None,
    },
    DemoExercise {
        exercise_id: "romanian-deadlift",
        section: Section::Main,
        sets: 3,
        rep_min: 8,
        rep_max: 10,
        rir: 2.0,
        instructions: None,
    },
    DemoExercise {
        exercise_id: "plank",
        section: Section::Cooldown,
        sets: 3,
        rep_min: 1,
        rep_max: 1,
        rir: 0.0,
        instructions: Some("60 second holds"),
    },
];

const UPPER_B: &[DemoExercise] = &[
    DemoExercise {
        exercise_id: "overhead-press",
        section: Section::Main,
        sets: 4,
        rep_min: 6,
        rep_max: 8,
        rir: 2.0,
        instructions: None,
    },
    DemoExercise {
        exercise_id: "pull-up",
        section: Section::Main,
        sets: 4,
        rep_min: 6,
        rep_max: 8,
        rir: 2.0,
        instructions: None,
    },
    DemoExercise {
        exercise_id: "bench-press",
        section: Section::Accessory,
        sets: 3,
        rep_min: 10,
        rep_max: 12,
        rir: 1.0,
        instructions: Some("Close grip"),
    },
];

const WEEK_ONE: &[DemoSession] = &[
    DemoSession {
        day_index: 1,
        title: "Upper A",
        session_type: SessionType::Strength,
        exercises: UPPER_A,
    },
    DemoSession {
        day_index: 2,
        title: "Lower A",
        session_type: SessionType::Strength,
        exercises: LOWER_A,
    },
    DemoSession {
        day_index: 4,
        title: "Upper B",
        session_type: SessionType::Strength,
        exercises: UPPER_B,
    },
    DemoSession {
        day_index: 5,
        title: "Lower B",
        session_type: SessionType::Strength,
        exercises: LOWER_A,
    },
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let config = BuilderConfig::from_env()?;
    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database_url.to_connection_string());

    info!(database_url = %database_url, "seeding demo program");
    let database = Database::new(&database_url).await?;
    let engine = CompositionEngine::new(&database);

    let coach = Uuid::new_v4();
    let template = database
        .templates()
        .create(
            coach,
            &CreateTemplateRequest {
                title: "Upper/Lower Strength Block".into(),
                description: Some("Four-day upper/lower split built for steady strength gains".into()),
                level: ProgramLevel::Intermediate,
                tags: vec!["strength".into(), "upper-lower".into()],
                visibility: pierre_programs::models::TemplateVisibility::Private,
            },
        )
        .await?;
    info!(template_id = %template.id, "template created");

    // Author week 1 session by session, exercise by exercise
    let exercises = database.exercises();
    for session in WEEK_ONE {
        let meta = SessionMeta {
            title: session.title.into(),
            module_type: ModuleType::Workout,
            session_type: session.session_type,
            session_timing: pierre_programs::models::SessionTiming::Anytime,
            owner_id: None,
        };
        let module = engine
            .add_session(template.id, session.day_index, &meta)
            .await?;

        for exercise in session.exercises {
            exercises
                .add(
                    module.id,
                    &CreateExerciseRequest {
                        exercise_id: exercise.exercise_id.to_owned(),
                        section: exercise.section,
                        instructions: exercise.instructions.map(ToOwned::to_owned),
                        prescription: PrescriptionData::sets_and_reps(
                            exercise.sets,
                            exercise.rep_min,
                            exercise.rep_max,
                        )
                        .with_rir(exercise.rir),
                    },
                )
                .await?;
        }
        info!(
            module_id = %module.id,
            day_index = session.day_index,
            exercises = session.exercises.len(),
            "session seeded"
        );
    }

    // Repeat week 1 across the remaining weeks through the real copy path
    for week in 2..=args.weeks.max(1) {
        let copied = engine.copy_week(template.id, 1, week).await?;
        info!(week, modules = copied.len(), "week copied");
    }

    let weeks = engine.week_count(template.id).await?;
    info!(
        template_id = %template.id,
        weeks,
        "demo program ready"
    );

    Ok(())
}
