// ABOUTME: Core data models for conditions, restrictions, foods, profiles and verdicts
// ABOUTME: Re-exports each model module so callers can import from `nutriguard_core::models`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain data consumed and produced by the engine. Nothing here performs I/O.

/// Verdict types
pub mod analysis;
/// AI-generated personalized limits
pub mod computed_limits;
/// Clinical conditions and slug classification
pub mod condition;
/// Ingredient exclusion rules
pub mod exclusion;
/// Food items and nutrient values
pub mod food;
/// Nutrient limit rows and typed limit specs
pub mod limits;
/// User profile subset
pub mod profile;
/// Restriction record snapshot
pub mod store;

pub use analysis::{AnalysisResult, SafetyStatus};
pub use computed_limits::{ComputedLimits, RawBounds, RejectedField, ValidatedBounds};
pub use condition::{Condition, ConditionCatalog, ConditionKind};
pub use exclusion::{ExclusionSeverity, IngredientExclusion};
pub use food::{clamp_amount, split_ingredients, FoodItem, NutrientValues};
pub use limits::{LimitParseError, LimitSpec, LimitType, NutrientLimit};
pub use profile::{Biometrics, DietaryGoal, Gender, UserProfile};
pub use store::RestrictionStore;
