// ABOUTME: Integration tests for the food-safety conflict engine
// ABOUTME: Verdict rules, short-circuits, restriction-driven rules, and engine-wide properties
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{
    condition, food_with_ingredients, food_with_nutrients, init_test_logging, limit, policy,
    profile, sample_foods, seeded_restrictions,
};
use nutriguard::constants::messages;
use nutriguard::intelligence::conflict_engine::DEFAULT_RULES;
use nutriguard::intelligence::{
    ConflictEngine, NamedRule, RestrictionProfile, RuleContext, RuleOutcome,
};
use nutriguard::models::{
    DietaryGoal, FoodItem, Gender, LimitType, NutrientValues, RestrictionStore, SafetyStatus,
    UserProfile,
};

fn engine() -> ConflictEngine {
    init_test_logging();
    ConflictEngine::new(policy())
}

// ============================================================================
// Ingredient rules
// ============================================================================

#[test]
fn test_phosphate_additive_short_circuits_for_kidney_disease() {
    let food = FoodItem::new("Processed cheese")
        .with_ingredients("contains sodium phosphate")
        .with_nutrients(NutrientValues {
            sodium_mg: 5.0,
            potassium_mg: 1.0,
            ..NutrientValues::default()
        });

    let result = engine().evaluate(&food, &profile(&["ckd-3b-5"]));

    assert_eq!(result.status, SafetyStatus::Avoid);
    assert!(result.mentions("phosphate"));
    assert_eq!(result.reasons.len(), 1);
    assert_eq!(
        result.modifications,
        vec!["Choose a version without phosphate additives"]
    );
}

#[test]
fn test_phosphate_additive_is_not_flagged_without_kidney_disease() {
    let food = food_with_ingredients("Processed cheese", "milk, sodium phosphate");
    let result = engine().evaluate(&food, &profile(&["type-2-diabetes"]));
    assert_eq!(result.status, SafetyStatus::Safe);
    assert_eq!(result.reasons, vec![messages::FITS_PROFILE]);
}

#[test]
fn test_potassium_salt_substitute_for_kidney_disease() {
    let food = food_with_ingredients("Lite salt", "potassium chloride, salt");
    let result = engine().evaluate(&food, &profile(&["chronic-kidney-disease"]));
    assert_eq!(result.status, SafetyStatus::Avoid);
    assert!(result.mentions("potassium chloride"));
}

#[test]
fn test_global_trans_fat_rule_needs_no_condition() {
    let food = food_with_ingredients("Shortbread", "partially hydrogenated oil");
    let result = engine().evaluate(&food, &UserProfile::default());
    assert_eq!(result.status, SafetyStatus::Avoid);
    assert!(result.mentions("trans fat"));
}

#[test]
fn test_hidden_sugar_is_caution_for_diabetes_only() {
    let food = food_with_ingredients("Granola", "oats, corn syrup, almonds");

    let diabetic = engine().evaluate(&food, &profile(&["type-2-diabetes"]));
    assert_eq!(diabetic.status, SafetyStatus::Caution);
    assert!(diabetic.mentions("corn syrup"));

    let unaffected = engine().evaluate(&food, &profile(&["hypertension"]));
    assert_eq!(unaffected.status, SafetyStatus::Safe);
}

#[test]
fn test_starfruit_is_contraindicated_for_kidney_disease() {
    let result = engine().evaluate(&FoodItem::new("Fresh Starfruit"), &profile(&["ckd-3b-5"]));
    assert_eq!(result.status, SafetyStatus::Avoid);
    assert!(result.mentions("contraindicated"));

    let other = engine().evaluate(&FoodItem::new("Fresh Starfruit"), &profile(&["pcos"]));
    assert_eq!(other.status, SafetyStatus::Safe);
}

// ============================================================================
// Nutrient thresholds
// ============================================================================

#[test]
fn test_diabetes_fiber_buffer_downgrades_to_caution() {
    let food = food_with_nutrients(
        "Pasta bowl",
        NutrientValues {
            carbs_g: 70.0,
            fiber_g: 12.0,
            ..NutrientValues::default()
        },
    );

    let result = engine().evaluate(&food, &profile(&["type-2-diabetes"]));

    assert_eq!(result.status, SafetyStatus::Caution);
    assert!(result.mentions("buffered by fiber"));
}

#[test]
fn test_diabetes_carbs_without_fiber_are_avoid() {
    let food = food_with_nutrients(
        "White bread sandwich",
        NutrientValues {
            carbs_g: 70.0,
            fiber_g: 2.0,
            ..NutrientValues::default()
        },
    );

    let result = engine().evaluate(&food, &profile(&["type-2-diabetes"]));

    assert_eq!(result.status, SafetyStatus::Avoid);
    assert!(result.modifications.contains(&messages::REDUCE_PORTION.to_owned()));
}

#[test]
fn test_carb_ceiling_depends_on_gender_and_goal() {
    let food = food_with_nutrients(
        "Rice bowl",
        NutrientValues {
            carbs_g: 70.0,
            fiber_g: 12.0,
            ..NutrientValues::default()
        },
    );

    let male = profile(&["type-2-diabetes"])
        .gender(Gender::Male)
        .goal(DietaryGoal::Maintenance);
    assert_eq!(engine().evaluate(&food, &male).status, SafetyStatus::Safe);

    let male_cutting = male.goal(DietaryGoal::WeightLoss);
    assert_eq!(
        engine().evaluate(&food, &male_cutting).status,
        SafetyStatus::Caution
    );
}

#[test]
fn test_sodium_ceiling_tightens_with_hypertension_and_kidney_disease() {
    let food = food_with_nutrients(
        "Soup",
        NutrientValues {
            sodium_mg: 550.0,
            ..NutrientValues::default()
        },
    );

    let hypertension = engine().evaluate(&food, &profile(&["hypertension"]));
    assert_eq!(hypertension.status, SafetyStatus::Safe);

    let both = engine().evaluate(&food, &profile(&["hypertension", "ckd-3b-5"]));
    assert_eq!(both.status, SafetyStatus::Avoid);
    assert!(both.mentions("per-meal limit of 500 mg"));
    assert!(both.modifications.contains(&messages::AVOID_ADDING_SALT.to_owned()));
}

#[test]
fn test_resolved_sodium_max_replaces_default_daily_limit() {
    let food = food_with_nutrients(
        "Soup",
        NutrientValues {
            sodium_mg: 550.0,
            ..NutrientValues::default()
        },
    );
    let user = profile(&["hypertension"]);
    let restrictions = seeded_restrictions(&["hypertension"]);

    // 1500 mg daily over three meals is 500 mg, below the 600 mg hypertension cap
    let result = engine().evaluate_with_restrictions(&food, &user, &restrictions);
    assert_eq!(result.status, SafetyStatus::Avoid);
    assert!(result.mentions("per-meal limit of 500 mg"));
}

#[test]
fn test_kidney_potassium_thresholds() {
    let with_potassium = |mg: f64| {
        food_with_nutrients(
            "Vegetable",
            NutrientValues {
                potassium_mg: mg,
                ..NutrientValues::default()
            },
        )
    };
    let ckd = profile(&["ckd-3b-5"]);

    assert_eq!(engine().evaluate(&with_potassium(150.0), &ckd).status, SafetyStatus::Safe);
    assert_eq!(
        engine().evaluate(&with_potassium(250.0), &ckd).status,
        SafetyStatus::Caution
    );
    assert_eq!(
        engine().evaluate(&with_potassium(400.0), &ckd).status,
        SafetyStatus::Avoid
    );
}

#[test]
fn test_potassium_supports_blood_pressure_without_kidney_disease() {
    let banana = food_with_nutrients(
        "Banana",
        NutrientValues {
            potassium_mg: 420.0,
            sodium_mg: 1.0,
            ..NutrientValues::default()
        },
    );

    let result = engine().evaluate(&banana, &profile(&["hypertension"]));

    assert_eq!(result.status, SafetyStatus::Safe);
    assert!(result.mentions("supports blood pressure"));
    assert_eq!(result.reasons.last().unwrap(), messages::FITS_PROFILE);
}

#[test]
fn test_blood_pressure_note_is_dropped_when_a_later_rule_escalates() {
    let sweetened = food_with_nutrients(
        "Sweetened banana smoothie",
        NutrientValues {
            potassium_mg: 420.0,
            sodium_mg: 50.0,
            added_sugar_g: 15.0,
            ..NutrientValues::default()
        },
    );

    let result = engine().evaluate(&sweetened, &profile(&["hypertension", "pcos"]));

    assert_eq!(result.status, SafetyStatus::Avoid);
    assert!(result.mentions("inflammatory trigger"));
    assert!(!result.mentions("supports blood pressure"));
}

#[test]
fn test_pcos_inflammatory_triggers() {
    let soda = food_with_nutrients(
        "Soda",
        NutrientValues {
            added_sugar_g: 12.0,
            fat_g: 0.0,
            ..NutrientValues::default()
        },
    );
    let pcos = engine().evaluate(&soda, &profile(&["pcos"]));
    assert_eq!(pcos.status, SafetyStatus::Avoid);
    assert!(pcos.mentions("inflammatory trigger"));
    assert!(!pcos.mentions("low-fat"));

    let with_cholesterol = engine().evaluate(&soda, &profile(&["pcos", "hyperlipidemia"]));
    assert!(with_cholesterol.mentions("low-fat label"));

    let bacon = food_with_ingredients("Bacon", "pork, water, sodium nitrite");
    let cured = engine().evaluate(&bacon, &profile(&["pcos"]));
    assert_eq!(cured.status, SafetyStatus::Avoid);
    assert!(cured.mentions("sodium nitrite"));
}

#[test]
fn test_diabetes_kidney_fiber_phosphorus_tradeoff() {
    let lentils = food_with_nutrients(
        "Lentils",
        NutrientValues {
            carbs_g: 30.0,
            fiber_g: 8.0,
            phosphorus_mg: 250.0,
            ..NutrientValues::default()
        },
    );

    let both = engine().evaluate(&lentils, &profile(&["type-2-diabetes", "ckd-3b-5"]));
    assert_eq!(both.status, SafetyStatus::Caution);
    assert!(both.mentions("tradeoff"));

    let diabetes_only = engine().evaluate(&lentils, &profile(&["type-2-diabetes"]));
    assert_eq!(diabetes_only.status, SafetyStatus::Safe);
}

// ============================================================================
// Restriction-profile rules
// ============================================================================

#[test]
fn test_profile_exclusion_limit_is_caution() {
    let food = food_with_ingredients("Stir fry", "chicken, monosodium glutamate");
    let user = profile(&["hypertension"]);
    let restrictions = seeded_restrictions(&["hypertension"]);

    let result = engine().evaluate_with_restrictions(&food, &user, &restrictions);
    assert_eq!(result.status, SafetyStatus::Caution);
    assert!(result.mentions("sodium additives"));

    // Without restrictions only built-in rules apply
    assert_eq!(engine().evaluate(&food, &user).status, SafetyStatus::Safe);
}

#[test]
fn test_single_serving_over_daily_max_is_avoid() {
    let eggs = food_with_nutrients(
        "Three-egg omelette",
        NutrientValues {
            cholesterol_mg: 560.0,
            ..NutrientValues::default()
        },
    );
    let user = profile(&["hyperlipidemia"]);
    let restrictions = seeded_restrictions(&["hyperlipidemia"]);

    let result = engine().evaluate_with_restrictions(&eggs, &user, &restrictions);

    assert_eq!(result.status, SafetyStatus::Avoid);
    assert!(result.mentions("exceeds your daily limit of 200mg"));
}

#[test]
fn test_daily_max_matches_aliased_nutrient_labels() {
    let custom = condition("carb-counting");
    let store = RestrictionStore {
        conditions: vec![custom.clone()],
        limits: vec![
            limit(&custom, "Carbs", LimitType::Max, "50"),
            limit(&custom, "Total Fat", LimitType::Max, "20"),
        ],
        exclusions: Vec::new(),
    };
    let restrictions = RestrictionProfile::from_store(&store, &["carb-counting"]);
    assert_eq!(restrictions.limits.max_for("Carbohydrates"), Some(50.0));

    let pasta = food_with_nutrients(
        "Pasta bowl",
        NutrientValues {
            carbs_g: 120.0,
            fat_g: 12.0,
            ..NutrientValues::default()
        },
    );
    let result =
        engine().evaluate_with_restrictions(&pasta, &profile(&["carb-counting"]), &restrictions);

    assert_eq!(result.status, SafetyStatus::Avoid);
    assert!(result.mentions("carbohydrates 120mg in one serving exceeds your daily limit of 50mg"));
    assert!(!result.mentions("fat"));
}

#[test]
fn test_grain_notes_for_kidney_disease() {
    let food = food_with_ingredients("Grain bowl", "Bulgur wheat, white rice, corn flour");

    let stage_three = engine().evaluate(&food, &profile(&["ckd-3b-5"]).ckd_stage(3));
    assert_eq!(stage_three.status, SafetyStatus::Safe);
    assert!(stage_three.mentions("bulgur wheat: preferred grain"));
    assert!(stage_three.mentions("white rice: low phosphorus but high glycemic index"));
    assert!(stage_three.mentions("corn flour: consider a lower-burden grain"));
    assert_eq!(
        stage_three.modifications,
        vec!["Swap corn flour for bulgur, barley, or buckwheat"]
    );

    let stage_four = engine().evaluate(&food, &profile(&["ckd-3b-5"]).ckd_stage(4));
    assert!(stage_four.mentions("acceptable at CKD stage 4"));

    let no_kidney = engine().evaluate(&food, &profile(&["hypertension"]));
    assert_eq!(no_kidney.reasons, vec![messages::FITS_PROFILE]);
}

#[test]
fn test_ckd_stage_alone_activates_kidney_rules() {
    let food = food_with_ingredients("Cola", "carbonated water, phosphoric acid");
    let user = UserProfile::default().ckd_stage(4);
    assert_eq!(engine().evaluate(&food, &user).status, SafetyStatus::Avoid);
}

// ============================================================================
// Input normalization
// ============================================================================

#[test]
fn test_malformed_nutrients_are_treated_as_zero() {
    let food: FoodItem = serde_json::from_str(
        r#"{
            "name": "Mystery snack",
            "nutrients": {"sodium_mg": "lots", "potassium_mg": null, "carbs_g": -5, "fiber_g": "4.5"}
        }"#,
    )
    .unwrap();

    let result = engine().evaluate(&food, &profile(&["ckd-3b-5", "type-2-diabetes"]));

    assert_eq!(result.status, SafetyStatus::Safe);
    assert!(result.nutrients.sodium_mg.abs() < f64::EPSILON);
    assert!(result.nutrients.carbs_g.abs() < f64::EPSILON);
    assert!((result.nutrients.fiber_g - 4.5).abs() < f64::EPSILON);
}

#[test]
fn test_non_finite_amounts_never_escalate() {
    let food = food_with_nutrients(
        "Sensor glitch",
        NutrientValues {
            sodium_mg: f64::NAN,
            potassium_mg: f64::INFINITY,
            carbs_g: -100.0,
            ..NutrientValues::default()
        },
    );
    let result = engine().evaluate(&food, &profile(&["ckd-3b-5", "hypertension"]));
    assert_eq!(result.status, SafetyStatus::Safe);
}

// ============================================================================
// Engine-wide properties
// ============================================================================

#[test]
fn test_evaluation_is_idempotent() {
    let user = profile(&["ckd-3b-5", "hypertension", "type-2-diabetes"]);
    let restrictions = seeded_restrictions(&["ckd-3b-5", "hypertension", "type-2-diabetes"]);
    let engine = engine();

    for food in sample_foods() {
        let first = engine.evaluate_with_restrictions(&food, &user, &restrictions);
        let second = engine.evaluate_with_restrictions(&food, &user, &restrictions);
        assert_eq!(first, second, "{}", food.name);
    }
}

#[test]
fn test_final_status_is_at_least_every_rule_severity() {
    let policy = policy();
    let engine = ConflictEngine::new(policy.clone());
    let profiles = [
        vec![],
        vec!["ckd-3b-5"],
        vec!["hypertension", "ckd-3b-5"],
        vec!["type-2-diabetes", "pcos"],
        vec!["hyperlipidemia", "pcos", "hypertension"],
    ];

    for slugs in &profiles {
        let user = profile(slugs);
        let restrictions = seeded_restrictions(slugs);
        for food in sample_foods() {
            let result = engine.evaluate_with_restrictions(&food, &user, &restrictions);
            let ctx = RuleContext::new(&food, &user, Some(&restrictions), &policy);
            for rule in DEFAULT_RULES {
                let outcome = (rule.apply)(&ctx, SafetyStatus::Safe);
                assert!(
                    result.status >= outcome.severity,
                    "{} for {slugs:?}: {} reached {} but verdict was {}",
                    food.name,
                    rule.name,
                    outcome.severity,
                    result.status
                );
            }
        }
    }
}

fn reassuring_rule(_ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    RuleOutcome::note("Looks wholesome")
}

#[test]
fn test_later_rules_cannot_downgrade_avoid() {
    let rules = vec![
        DEFAULT_RULES[2],
        NamedRule {
            name: "reassuring",
            apply: reassuring_rule,
        },
    ];
    let engine = ConflictEngine::with_rules(policy(), rules);
    let food = food_with_ingredients("Crackers", "flour, vegetable shortening");

    let result = engine.evaluate(&food, &UserProfile::default());

    assert_eq!(result.status, SafetyStatus::Avoid);
    assert!(result.mentions("looks wholesome"));
    assert!(!result.reasons.contains(&messages::FITS_PROFILE.to_owned()));
}

#[test]
fn test_evaluate_many_preserves_order() {
    let engine = engine();
    let user = profile(&["ckd-3b-5", "pcos"]);
    let restrictions = seeded_restrictions(&["ckd-3b-5", "pcos"]);
    let foods = sample_foods();

    let batch = engine.evaluate_many(&foods, &user, Some(&restrictions));

    assert_eq!(batch.len(), foods.len());
    for (food, result) in foods.iter().zip(&batch) {
        assert_eq!(
            result,
            &engine.evaluate_with_restrictions(food, &user, &restrictions)
        );
    }
}

#[test]
fn test_rule_order_starts_with_additive_scans_and_ends_with_notes() {
    let names: Vec<&str> = engine().rule_names().collect();
    assert_eq!(names.len(), DEFAULT_RULES.len());
    assert_eq!(&names[..2], &["phosphate_additive", "potassium_additive"]);
    assert_eq!(names.last(), Some(&"blood_pressure_note"));
}
