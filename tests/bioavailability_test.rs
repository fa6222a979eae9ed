// ABOUTME: Integration tests for grain phosphorus bioavailability tiers
// ABOUTME: Validates tier precedence, fallbacks, and grain detection on ingredient names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use nutriguard::intelligence::bioavailability::looks_like_grain;
use nutriguard::intelligence::{classify_grain, GrainTier};

#[test]
fn test_optimal_grains() {
    for name in ["Bulgur wheat", "pearl barley", "buckwheat groats", "couscous", "millet"] {
        assert_eq!(classify_grain(name), GrainTier::Optimal, "{name}");
    }
}

#[test]
fn test_tier_order_beats_generic_words() {
    // "brown rice" contains "rice" but the moderate list is checked first
    assert_eq!(classify_grain("brown rice"), GrainTier::Moderate);
    assert_eq!(classify_grain("rolled oats"), GrainTier::Moderate);
    assert_eq!(classify_grain("white rice"), GrainTier::Conditional);
    assert_eq!(classify_grain("refined wheat flour"), GrainTier::Conditional);
}

#[test]
fn test_whole_grain_fallback_and_default_avoid() {
    assert_eq!(classify_grain("whole wheat flour"), GrainTier::Moderate);
    assert_eq!(classify_grain("multigrain bread"), GrainTier::Moderate);
    assert_eq!(classify_grain("corn flakes"), GrainTier::Avoid);
    assert_eq!(classify_grain(""), GrainTier::Avoid);
}

#[test]
fn test_grain_detection_ignores_embedded_words() {
    assert!(looks_like_grain("rolled oats"));
    assert!(looks_like_grain("enriched wheat flour"));
    assert!(!looks_like_grain("goat cheese"));
    assert!(!looks_like_grain("black licorice"));
    assert!(!looks_like_grain("peppercorn"));
}

#[test]
fn test_tier_serializes_uppercase() {
    assert_eq!(serde_json::to_value(GrainTier::Conditional).unwrap(), "CONDITIONAL");
    assert_eq!(GrainTier::Optimal.to_string(), "OPTIMAL");
}
