// ABOUTME: Restriction aggregation and food-safety conflict engine
// ABOUTME: Pattern matching, grain tiers, limit/exclusion aggregation, restriction profiles, verdict rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `NutriGuard` Intelligence
//!
//! Pure, synchronous evaluation of foods against a user's chronic conditions.
//!
//! - **`pattern_matcher`**: additive categories in ingredient text
//! - **`bioavailability`**: grain phosphorus tiers
//! - **`limit_aggregator`** / **`exclusion_aggregator`**: consolidate per-condition records
//! - **`restriction_profile`**: both aggregations for one condition set, plus AI overlay
//! - **`conflict_engine`**: Safe / Caution / Avoid verdicts
//! - **`config`**: swappable clinical cutoffs

/// Grain phosphorus bioavailability tiers
pub mod bioavailability;
/// Policy thresholds and environment overrides
pub mod config;
/// Verdict rules and the evaluation fold
pub mod conflict_engine;
/// Ingredient exclusion consolidation
pub mod exclusion_aggregator;
/// Nutrient limit consolidation
pub mod limit_aggregator;
/// Additive category detection
pub mod pattern_matcher;
/// Consolidated restrictions per condition set
pub mod restriction_profile;

pub use bioavailability::{classify_grain, GrainTier};
pub use config::{ConfigError, PolicyConfig};
pub use conflict_engine::{ConflictEngine, NamedRule, RuleContext, RuleOutcome};
pub use exclusion_aggregator::{
    AggregatedExclusions, ConsolidatedExclusion, IngredientExclusionAggregator, InvalidPattern,
};
pub use limit_aggregator::{
    AggregatedLimits, IgnoredLimit, LimitContribution, NutrientLimitAggregator, NutrientResolution,
    ResolvedLimit,
};
pub use pattern_matcher::{found_patterns, match_categories, AdditiveCategory, PatternScan};
pub use restriction_profile::RestrictionProfile;
