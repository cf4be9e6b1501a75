// ABOUTME: Application constants and configuration values organized by domain
// ABOUTME: Single source of truth for env var names, defaults, and validation limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application constants organized by domain

/// Environment variable names
pub mod env_config {
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Log level override (standard tracing variable)
    pub const RUST_LOG: &str = "RUST_LOG";
    /// Log output format (json, pretty, compact)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default configuration values
pub mod defaults {
    /// Default SQLite database location
    pub const DATABASE_URL: &str = "sqlite:data/programs.db";
    /// Title suffix appended when duplicating a program
    pub const DUPLICATE_TITLE_SUFFIX: &str = " (Copy)";
}

/// Validation limits
pub mod limits {
    /// Maximum length for template and module titles
    pub const MAX_TITLE_LENGTH: usize = 200;
    /// Maximum number of tags per template
    pub const MAX_TAGS: usize = 20;
}

/// Service identifiers for structured logging
pub mod service_names {
    /// This crate's service name
    pub const PROGRAM_BUILDER: &str = "pierre-program-builder";
}

/// Calendar geometry
pub mod calendar {
    /// Days per projected calendar week
    pub const DAYS_PER_WEEK: u32 = 7;
}
