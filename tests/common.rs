// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup, seeded restriction stores, profiles, and foods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `nutriguard`
//!
//! Each integration test binary pulls this in with `mod common;` and uses the
//! subset it needs.

use nutriguard::intelligence::{PolicyConfig, RestrictionProfile};
use nutriguard::models::{
    Condition, ExclusionSeverity, FoodItem, IngredientExclusion, LimitType, NutrientLimit,
    NutrientValues, RestrictionStore, UserProfile,
};
use nutriguard::seed::default_store;
use std::env;
use std::sync::Once;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        // Another test binary helper may already have installed one
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Seed store with logging initialized
pub fn seeded_store() -> RestrictionStore {
    init_test_logging();
    default_store()
}

/// Restriction profile built from the seed store
pub fn seeded_restrictions(slugs: &[&str]) -> RestrictionProfile {
    RestrictionProfile::from_store(&seeded_store(), slugs)
}

/// Default policy, independent of process environment
pub fn policy() -> PolicyConfig {
    PolicyConfig::default()
}

/// Profile with the given conditions
pub fn profile(slugs: &[&str]) -> UserProfile {
    UserProfile::with_conditions(slugs.iter().copied())
}

/// Condition with a random id
pub fn condition(slug: &str) -> Condition {
    Condition {
        id: Uuid::new_v4(),
        slug: slug.to_owned(),
        label: slug.to_owned(),
        description: String::new(),
        nutritional_focus: Vec::new(),
    }
}

/// Limit row
pub fn limit(condition: &Condition, nutrient: &str, limit_type: LimitType, value: &str) -> NutrientLimit {
    NutrientLimit {
        condition_id: condition.id,
        nutrient: nutrient.to_owned(),
        limit_type,
        limit_value: value.to_owned(),
        unit: Some("mg".to_owned()),
    }
}

/// Exclusion row; `None` condition makes it global
pub fn exclusion(
    condition: Option<&Condition>,
    category: &str,
    pattern: &str,
    severity: ExclusionSeverity,
) -> IngredientExclusion {
    IngredientExclusion {
        condition_id: condition.map(|c| c.id),
        category: category.to_owned(),
        pattern: pattern.to_owned(),
        risk_description: format!("{category} risk"),
        severity,
        source: "test fixture".to_owned(),
    }
}

/// Food with ingredient text and zeroed nutrients
pub fn food_with_ingredients(name: &str, ingredients: &str) -> FoodItem {
    FoodItem::new(name).with_ingredients(ingredients)
}

/// Food with nutrient amounts and no ingredient text
pub fn food_with_nutrients(name: &str, nutrients: NutrientValues) -> FoodItem {
    FoodItem::new(name).with_nutrients(nutrients)
}

/// A mixed set of foods for batch and property tests
pub fn sample_foods() -> Vec<FoodItem> {
    vec![
        food_with_ingredients("Deli ham", "pork, water, salt, sodium phosphate, sodium nitrite"),
        food_with_ingredients("Crackers", "enriched flour, partially hydrogenated soybean oil"),
        food_with_ingredients("Granola bar", "oats, high fructose corn syrup, almonds"),
        food_with_ingredients("Salt substitute", "potassium chloride"),
        FoodItem::new("Bulgur pilaf")
            .with_ingredients("bulgur wheat, olive oil, parsley")
            .with_nutrients(NutrientValues {
                carbs_g: 34.0,
                fiber_g: 8.0,
                sodium_mg: 120.0,
                potassium_mg: 180.0,
                phosphorus_mg: 90.0,
                ..NutrientValues::default()
            }),
        food_with_nutrients(
            "Pasta bowl",
            NutrientValues {
                carbs_g: 70.0,
                fiber_g: 12.0,
                sodium_mg: 450.0,
                potassium_mg: 320.0,
                phosphorus_mg: 240.0,
                ..NutrientValues::default()
            },
        ),
        food_with_nutrients(
            "Canned soup",
            NutrientValues {
                sodium_mg: 1800.0,
                potassium_mg: 420.0,
                ..NutrientValues::default()
            },
        ),
        FoodItem::new("Starfruit"),
        FoodItem::new("Plain water"),
    ]
}
