// ABOUTME: Built-in restriction catalog for common chronic conditions
// ABOUTME: Seeds CKD, hypertension, type 2 diabetes, PCOS, and hyperlipidemia limits and exclusions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Default restriction store
//!
//! Used by the CLI when no snapshot file is given, and by tests. Condition ids
//! are fixed so snapshots and fixtures can refer to them.

use nutriguard_core::constants::nutrients;
use nutriguard_core::models::{
    Condition, ExclusionSeverity, IngredientExclusion, LimitType, NutrientLimit, RestrictionStore,
};
use uuid::Uuid;

/// Condition id for `ckd-3b-5`
pub const CKD_ID: Uuid = Uuid::from_u128(0x6e75_7472_6900_0000_0000_0000_0000_0001);
/// Condition id for `hypertension`
pub const HYPERTENSION_ID: Uuid = Uuid::from_u128(0x6e75_7472_6900_0000_0000_0000_0000_0002);
/// Condition id for `type-2-diabetes`
pub const DIABETES_ID: Uuid = Uuid::from_u128(0x6e75_7472_6900_0000_0000_0000_0000_0003);
/// Condition id for `pcos`
pub const PCOS_ID: Uuid = Uuid::from_u128(0x6e75_7472_6900_0000_0000_0000_0000_0004);
/// Condition id for `hyperlipidemia`
pub const HYPERLIPIDEMIA_ID: Uuid = Uuid::from_u128(0x6e75_7472_6900_0000_0000_0000_0000_0005);

const KDOQI: &str = "KDOQI 2020";
const AHA: &str = "AHA/ACC 2017";
const ADA: &str = "ADA Standards of Care 2024";
const CONSENSUS: &str = "Clinical consensus";

fn condition(id: Uuid, slug: &str, label: &str, description: &str, focus: &[&str]) -> Condition {
    Condition {
        id,
        slug: slug.to_owned(),
        label: label.to_owned(),
        description: description.to_owned(),
        nutritional_focus: focus.iter().map(|f| (*f).to_owned()).collect(),
    }
}

fn limit(
    condition_id: Uuid,
    nutrient: &str,
    limit_type: LimitType,
    value: &str,
    unit: Option<&str>,
) -> NutrientLimit {
    NutrientLimit {
        condition_id,
        nutrient: nutrient.to_owned(),
        limit_type,
        limit_value: value.to_owned(),
        unit: unit.map(str::to_owned),
    }
}

fn exclusion(
    condition_id: Option<Uuid>,
    category: &str,
    pattern: &str,
    risk: &str,
    severity: ExclusionSeverity,
    source: &str,
) -> IngredientExclusion {
    IngredientExclusion {
        condition_id,
        category: category.to_owned(),
        pattern: pattern.to_owned(),
        risk_description: risk.to_owned(),
        severity,
        source: source.to_owned(),
    }
}

fn conditions() -> Vec<Condition> {
    vec![
        condition(
            CKD_ID,
            "ckd-3b-5",
            "Chronic Kidney Disease (Stage 3b-5)",
            "Reduced kidney function requiring potassium, phosphorus, and sodium control",
            &["potassium", "phosphorus", "sodium", "protein"],
        ),
        condition(
            HYPERTENSION_ID,
            "hypertension",
            "Hypertension",
            "Elevated blood pressure managed with sodium restriction",
            &["sodium", "potassium", "saturated fat"],
        ),
        condition(
            DIABETES_ID,
            "type-2-diabetes",
            "Type 2 Diabetes",
            "Insulin resistance requiring carbohydrate and added sugar control",
            &["carbohydrates", "added sugar", "fiber"],
        ),
        condition(
            PCOS_ID,
            "pcos",
            "Polycystic Ovary Syndrome",
            "Hormonal disorder with insulin resistance and inflammation",
            &["added sugar", "inflammation", "fiber"],
        ),
        condition(
            HYPERLIPIDEMIA_ID,
            "hyperlipidemia",
            "Hyperlipidemia",
            "Elevated LDL cholesterol and triglycerides",
            &["saturated fat", "trans fat", "cholesterol", "fiber"],
        ),
    ]
}

fn limits() -> Vec<NutrientLimit> {
    use LimitType::{Max, Min, Range, Text};
    vec![
        limit(CKD_ID, nutrients::SODIUM, Max, "2000", Some("mg")),
        limit(CKD_ID, nutrients::POTASSIUM, Range, "2000-3000", Some("mg")),
        limit(CKD_ID, nutrients::PHOSPHORUS, Range, "800-1000", Some("mg")),
        limit(
            CKD_ID,
            nutrients::PROTEIN,
            Text,
            "0.6-0.8 g per kg body weight, per nephrologist",
            None,
        ),
        limit(HYPERTENSION_ID, nutrients::SODIUM, Max, "1500", Some("mg")),
        limit(HYPERTENSION_ID, nutrients::POTASSIUM, Range, "3500-5000", Some("mg")),
        limit(HYPERTENSION_ID, nutrients::SATURATED_FAT, Max, "13", Some("g")),
        limit(DIABETES_ID, nutrients::ADDED_SUGAR, Max, "25", Some("g")),
        limit(DIABETES_ID, nutrients::FIBER, Min, "25", Some("g")),
        limit(
            DIABETES_ID,
            nutrients::CARBOHYDRATES,
            Text,
            "Keep carbohydrate intake consistent across meals",
            None,
        ),
        limit(PCOS_ID, nutrients::ADDED_SUGAR, Max, "25", Some("g")),
        limit(PCOS_ID, nutrients::FIBER, Min, "25", Some("g")),
        limit(HYPERLIPIDEMIA_ID, nutrients::SATURATED_FAT, Max, "13", Some("g")),
        limit(HYPERLIPIDEMIA_ID, nutrients::CHOLESTEROL, Max, "200", Some("mg")),
        limit(HYPERLIPIDEMIA_ID, nutrients::FIBER, Min, "30", Some("g")),
    ]
}

fn exclusions() -> Vec<IngredientExclusion> {
    use ExclusionSeverity::{CriticalAvoid, Limit};
    vec![
        exclusion(
            None,
            "Trans fats",
            r"partially[\s-]hydrogenated",
            "Artificial trans fats raise LDL and cardiovascular risk",
            CriticalAvoid,
            CONSENSUS,
        ),
        exclusion(
            Some(CKD_ID),
            "Phosphate additives",
            r"phosphoric\s+acid|\b[a-z]*phosphates?\b",
            "Inorganic phosphorus is absorbed almost completely",
            CriticalAvoid,
            KDOQI,
        ),
        exclusion(
            Some(CKD_ID),
            "Potassium additives",
            r"potassium\s+(chloride|citrate|lactate|bicarbonate)|salt\s+substitute",
            "Potassium salts can cause dangerous hyperkalemia",
            CriticalAvoid,
            KDOQI,
        ),
        exclusion(
            Some(HYPERTENSION_ID),
            "Sodium additives",
            r"monosodium\s+glutamate|\bmsg\b|sodium\s+(nitrite|benzoate|bicarbonate)",
            "Concentrated sodium raises blood pressure",
            Limit,
            AHA,
        ),
        exclusion(
            Some(DIABETES_ID),
            "Hidden sugars",
            r"corn\s+syrup|dextrose|maltodextrin|cane\s+sugar",
            "Rapidly absorbed sugars spike blood glucose",
            Limit,
            ADA,
        ),
        exclusion(
            Some(PCOS_ID),
            "Hidden sugars",
            r"corn\s+syrup|agave|fructose",
            "Added sugars worsen insulin resistance",
            Limit,
            CONSENSUS,
        ),
        exclusion(
            Some(PCOS_ID),
            "Processed meat curing agents",
            r"\bnitr(ite|ate)s?\b",
            "Curing agents are inflammatory triggers",
            Limit,
            CONSENSUS,
        ),
        exclusion(
            Some(HYPERLIPIDEMIA_ID),
            "Trans fats",
            r"hydrogenated\s+(vegetable\s+)?oil|shortening",
            "Trans fats lower HDL and raise LDL",
            CriticalAvoid,
            AHA,
        ),
    ]
}

/// Built-in store covering the seeded conditions
#[must_use]
pub fn default_store() -> RestrictionStore {
    RestrictionStore {
        conditions: conditions(),
        limits: limits(),
        exclusions: exclusions(),
    }
}
