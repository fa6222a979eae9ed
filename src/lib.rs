// ABOUTME: Main library entry point for the NutriGuard restriction and food-safety engine
// ABOUTME: Re-exports the core and intelligence crates and adds logging, caching, and store loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `NutriGuard`
//!
//! Consolidates a user's chronic-condition restrictions and evaluates foods
//! against them, producing a Safe / Caution / Avoid verdict with reasons and
//! suggested modifications.
//!
//! ## Architecture
//!
//! - **`nutriguard-core`**: errors, constants, and plain data models
//! - **`nutriguard-intelligence`**: pattern matching, aggregation, and the conflict engine
//! - **this crate**: logging setup, the restriction profile cache, snapshot loading,
//!   the seed catalog, and the `nutriguard-cli` binary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutriguard::intelligence::{ConflictEngine, PolicyConfig, RestrictionProfile};
//! use nutriguard::models::{FoodItem, UserProfile};
//! use nutriguard::seed::default_store;
//!
//! let store = default_store();
//! let profile = UserProfile::with_conditions(["ckd-3b-5", "hypertension"]);
//! let restrictions = RestrictionProfile::from_store(&store, &profile.condition_slugs());
//!
//! let food = FoodItem::new("Deli ham").with_ingredients("pork, water, salt, sodium phosphate");
//! let engine = ConflictEngine::new(PolicyConfig::default());
//! let verdict = engine.evaluate_with_restrictions(&food, &profile, &restrictions);
//! println!("{}: {:?}", verdict.status, verdict.reasons);
//! ```

pub use nutriguard_core::{constants, errors, models};
pub use nutriguard_core::{AppError, AppResult, ErrorCode};

/// Engine crate, re-exported for path-based access
pub use nutriguard_intelligence as intelligence;

/// Logging configuration and initialization
pub mod logging;

/// Built-in restriction catalog
pub mod seed;

/// Stateful services around the pure engine
pub mod services;

/// Restriction store snapshot loading
pub mod store;
