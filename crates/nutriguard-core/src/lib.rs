// ABOUTME: Core types and constants for the NutriGuard food-safety engine
// ABOUTME: Foundation crate with error handling, constants, and restriction/food models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `NutriGuard` Core
//!
//! Foundation crate providing shared types and constants for the restriction
//! aggregation and food-safety engine. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Nutrient names, condition keywords, and reason strings
//! - **models**: Conditions, nutrient limits, ingredient exclusions, foods, profiles and verdicts

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models consumed and produced by the engine
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
