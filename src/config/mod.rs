// ABOUTME: Configuration management for the program builder
// ABOUTME: Environment-variable driven, no config files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management

/// Environment-based configuration parsing
pub mod environment;

pub use environment::{BuilderConfig, DatabaseUrl, Environment, LogLevel};
