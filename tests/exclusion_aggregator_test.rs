// ABOUTME: Integration tests for ingredient exclusion consolidation
// ABOUTME: Category merging, severity precedence, global rows, invalid patterns, and order independence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{condition, exclusion, seeded_store};
use nutriguard::intelligence::IngredientExclusionAggregator;
use nutriguard::models::{ConditionCatalog, ExclusionSeverity};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[test]
fn test_global_rows_apply_without_conditions() {
    let store = seeded_store();
    let catalog = store.catalog();
    let no_conditions: [&str; 0] = [];

    let aggregated =
        IngredientExclusionAggregator::new(&catalog).aggregate(&store.exclusions, &no_conditions);

    assert_eq!(aggregated.len(), 1);
    let trans = aggregated.get("trans fats").unwrap();
    assert_eq!(trans.sources, vec!["global"]);
    assert_eq!(trans.severity, ExclusionSeverity::CriticalAvoid);
    assert!(trans.matches("flour, Partially-Hydrogenated cottonseed oil"));
}

#[test]
fn test_seed_ckd_with_hypertension_categories() {
    let store = seeded_store();
    let catalog = store.catalog();

    let aggregated = IngredientExclusionAggregator::new(&catalog)
        .aggregate(&store.exclusions, &["ckd-3b-5", "hypertension"]);

    let categories: Vec<&str> = aggregated
        .exclusions
        .iter()
        .map(|e| e.category.as_str())
        .collect();
    assert_eq!(
        categories,
        vec![
            "Phosphate additives",
            "Potassium additives",
            "Sodium additives",
            "Trans fats"
        ]
    );
    assert_eq!(
        aggregated.get("sodium additives").unwrap().severity,
        ExclusionSeverity::Limit
    );
}

#[test]
fn test_same_category_merges_patterns_sources_and_descriptions() {
    let store = seeded_store();
    let catalog = store.catalog();

    let aggregated = IngredientExclusionAggregator::new(&catalog)
        .aggregate(&store.exclusions, &["type-2-diabetes", "pcos", "hyperlipidemia"]);

    let sugars = aggregated.get("Hidden sugars").unwrap();
    assert_eq!(sugars.sources, vec!["pcos", "type-2-diabetes"]);
    assert_eq!(sugars.patterns.len(), 2);
    assert_eq!(sugars.severity, ExclusionSeverity::Limit);

    let trans = aggregated.get("Trans fats").unwrap();
    assert_eq!(trans.sources, vec!["global", "hyperlipidemia"]);
    assert_eq!(
        trans.risk_description,
        "Artificial trans fats raise LDL and cardiovascular risk; Trans fats lower HDL and raise LDL"
    );
    assert!(trans.matches("vegetable shortening"));
}

#[test]
fn test_critical_avoid_is_never_downgraded() {
    let a = condition("a");
    let b = condition("b");
    let catalog = ConditionCatalog::new([a.clone(), b.clone()]);
    let rows = vec![
        exclusion(Some(&a), "Sweeteners", "aspartame", ExclusionSeverity::CriticalAvoid),
        exclusion(Some(&b), "sweeteners", "sucralose", ExclusionSeverity::Limit),
    ];

    let aggregated = IngredientExclusionAggregator::new(&catalog).aggregate(&rows, &["b", "a"]);

    assert_eq!(aggregated.len(), 1);
    let sweeteners = aggregated.get("SWEETENERS").unwrap();
    assert_eq!(sweeteners.category, "Sweeteners");
    assert_eq!(sweeteners.severity, ExclusionSeverity::CriticalAvoid);
    assert_eq!(sweeteners.patterns, vec!["aspartame", "sucralose"]);
    assert_eq!(sweeteners.found("water, Sucralose"), vec!["sucralose"]);
}

#[test]
fn test_invalid_pattern_is_reported_and_skipped() {
    let a = condition("a");
    let catalog = ConditionCatalog::new([a.clone()]);
    let rows = vec![
        exclusion(Some(&a), "Dyes", "(red\\s+40", ExclusionSeverity::Limit),
        exclusion(Some(&a), "Dyes", r"yellow\s+5", ExclusionSeverity::Limit),
    ];

    let aggregated = IngredientExclusionAggregator::new(&catalog).aggregate(&rows, &["a"]);

    assert_eq!(aggregated.invalid_patterns.len(), 1);
    assert_eq!(aggregated.invalid_patterns[0].pattern, "(red\\s+40");
    let dyes = aggregated.get("dyes").unwrap();
    assert_eq!(dyes.patterns, vec![r"yellow\s+5"]);
    assert!(dyes.matches("sugar, Yellow 5"));
    assert!(!dyes.matches("sugar, red 40"));
}

#[test]
fn test_empty_ingredient_text_matches_nothing() {
    let store = seeded_store();
    let catalog = store.catalog();
    let aggregated = IngredientExclusionAggregator::new(&catalog)
        .aggregate(&store.exclusions, &["ckd-3b-5"]);

    assert_eq!(aggregated.matching("").count(), 0);
    assert_eq!(aggregated.matching("  ").count(), 0);
}

#[test]
fn test_shuffled_rows_consolidate_identically() {
    let store = seeded_store();
    let catalog = store.catalog();
    let slugs = ["ckd-3b-5", "hypertension", "type-2-diabetes", "pcos", "hyperlipidemia"];
    let aggregator = IngredientExclusionAggregator::new(&catalog);
    let baseline = aggregator.aggregate(&store.exclusions, &slugs);

    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..25 {
        let mut rows = store.exclusions.clone();
        rows.shuffle(&mut rng);
        assert_eq!(aggregator.aggregate(&rows, &slugs), baseline);
    }
}
