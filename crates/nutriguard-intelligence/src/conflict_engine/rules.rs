// ABOUTME: Individual conflict engine rules, each a pure function of context and status so far
// ABOUTME: Ingredient scans first (additives, contraindications, exclusions), then nutrient thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{RuleContext, RuleOutcome};
use crate::bioavailability::{classify_grain, looks_like_grain, GrainTier, PREFERRED_SWAP};
use crate::pattern_matcher::{found_patterns, AdditiveCategory};
use nutriguard_core::constants::{messages, nutrients};
use nutriguard_core::models::{ConditionKind, ExclusionSeverity, SafetyStatus};
use std::collections::BTreeSet;

/// A rule: context and the status reached so far in, outcome out
pub type Rule = fn(&RuleContext<'_>, SafetyStatus) -> RuleOutcome;

/// A rule with a name for logging
#[derive(Debug, Clone, Copy)]
pub struct NamedRule {
    /// Identifier used in logs
    pub name: &'static str,
    /// Rule body
    pub apply: Rule,
}

/// Default evaluation order
pub const DEFAULT_RULES: &[NamedRule] = &[
    NamedRule { name: "phosphate_additive", apply: phosphate_additive },
    NamedRule { name: "potassium_additive", apply: potassium_additive },
    NamedRule { name: "trans_fat", apply: trans_fat },
    NamedRule { name: "hidden_sugar", apply: hidden_sugar },
    NamedRule { name: "contraindication", apply: contraindication },
    NamedRule { name: "profile_exclusions", apply: profile_exclusions },
    NamedRule { name: "sodium_ceiling", apply: sodium_ceiling },
    NamedRule { name: "carb_ceiling", apply: carb_ceiling },
    NamedRule { name: "potassium", apply: potassium },
    NamedRule { name: "pcos_triggers", apply: pcos_triggers },
    NamedRule { name: "diabetes_kidney_tradeoff", apply: diabetes_kidney_tradeoff },
    NamedRule { name: "daily_max_overflow", apply: daily_max_overflow },
    NamedRule { name: "grain_notes", apply: grain_notes },
    NamedRule { name: "blood_pressure_note", apply: blood_pressure_note },
];

/// Ingredients that are contraindicated outright, regardless of amounts
const CONTRAINDICATIONS: &[(ConditionKind, &str, &str)] = &[
    (ConditionKind::KidneyDisease, "starfruit", "caramboxin is a kidney toxin"),
    (ConditionKind::KidneyDisease, "star fruit", "caramboxin is a kidney toxin"),
    (ConditionKind::KidneyDisease, "carambola", "caramboxin is a kidney toxin"),
    (ConditionKind::Hypertension, "licorice root", "glycyrrhizin raises blood pressure"),
    (ConditionKind::Hypertension, "black licorice", "glycyrrhizin raises blood pressure"),
];

fn additive_scan(
    ctx: &RuleContext<'_>,
    category: AdditiveCategory,
    severity: SafetyStatus,
    label: &str,
) -> RuleOutcome {
    let found = found_patterns(&ctx.ingredient_text, category);
    RuleOutcome::escalate(severity, format!("{label}: {}", found.join(", ")))
}

/// Kidney disease with an inorganic phosphate additive
pub fn phosphate_additive(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    if !(ctx.has(ConditionKind::KidneyDisease) && ctx.found(AdditiveCategory::PhosphateAdditive)) {
        return RuleOutcome::none();
    }
    additive_scan(
        ctx,
        AdditiveCategory::PhosphateAdditive,
        SafetyStatus::Avoid,
        "Contains inorganic phosphate additive (near-complete absorption)",
    )
    .with_modification("Choose a version without phosphate additives")
    .halt()
}

/// Kidney disease with a potassium additive
pub fn potassium_additive(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    if !(ctx.has(ConditionKind::KidneyDisease) && ctx.found(AdditiveCategory::PotassiumAdditive)) {
        return RuleOutcome::none();
    }
    additive_scan(
        ctx,
        AdditiveCategory::PotassiumAdditive,
        SafetyStatus::Avoid,
        "Contains potassium additive (near-complete absorption)",
    )
    .with_modification("Choose a version without potassium salts")
    .halt()
}

/// Trans fat applies to everyone
pub fn trans_fat(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    if !ctx.found(AdditiveCategory::TransFat) {
        return RuleOutcome::none();
    }
    additive_scan(ctx, AdditiveCategory::TransFat, SafetyStatus::Avoid, "Trans fat present")
        .with_modification("Choose a product without partially hydrogenated oils")
}

/// Hidden sugars matter for diabetes and PCOS
pub fn hidden_sugar(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    let gated = ctx.has(ConditionKind::Diabetes) || ctx.has(ConditionKind::Pcos);
    if !(gated && ctx.found(AdditiveCategory::HiddenSugar)) {
        return RuleOutcome::none();
    }
    additive_scan(ctx, AdditiveCategory::HiddenSugar, SafetyStatus::Caution, "Hidden sugars")
}

/// Fixed per-condition contraindications, checked against name and ingredients
pub fn contraindication(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    let name = ctx.food.name.to_lowercase();
    let hits: Vec<RuleOutcome> = CONTRAINDICATIONS
        .iter()
        .filter(|(kind, term, _)| {
            ctx.has(*kind) && (name.contains(term) || ctx.ingredient_text.contains(term))
        })
        .map(|(_, term, why)| {
            RuleOutcome::escalate(
                SafetyStatus::Avoid,
                format!("Contraindicated: contains {term} ({why})"),
            )
        })
        .collect();

    hits.into_iter()
        .reduce(RuleOutcome::merge)
        .map_or_else(RuleOutcome::none, RuleOutcome::halt)
}

/// Consolidated exclusions from the restriction profile
pub fn profile_exclusions(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    let Some(restrictions) = ctx.restrictions else {
        return RuleOutcome::none();
    };
    restrictions
        .exclusions
        .matching(&ctx.ingredient_text)
        .map(|exclusion| {
            let severity = match exclusion.severity {
                ExclusionSeverity::CriticalAvoid => SafetyStatus::Avoid,
                ExclusionSeverity::Limit => SafetyStatus::Caution,
            };
            let found = exclusion.found(&ctx.ingredient_text).join(", ");
            let reason = if exclusion.risk_description.is_empty() {
                format!("{} ({found})", exclusion.category)
            } else {
                format!(
                    "{} ({found}): {}",
                    exclusion.category, exclusion.risk_description
                )
            };
            RuleOutcome::escalate(severity, reason)
        })
        .fold(RuleOutcome::none(), RuleOutcome::merge)
}

/// Per-meal sodium ceiling for this profile
#[must_use]
pub fn sodium_meal_ceiling(ctx: &RuleContext<'_>) -> f64 {
    let policy = &ctx.policy.sodium;
    let daily = ctx
        .restrictions
        .and_then(|r| r.limits.max_for(nutrients::SODIUM))
        .unwrap_or(policy.default_daily_limit_mg);
    let base = daily / policy.meals_per_day.max(1.0);

    let hypertension = ctx.has(ConditionKind::Hypertension);
    if hypertension && ctx.has(ConditionKind::KidneyDisease) {
        base.min(policy.hypertension_kidney_meal_ceiling_mg)
    } else if hypertension {
        base.min(policy.hypertension_meal_ceiling_mg)
    } else {
        base
    }
}

/// Sodium above the per-meal ceiling
pub fn sodium_ceiling(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    let ceiling = sodium_meal_ceiling(ctx);
    let sodium = ctx.nutrients.sodium_mg;
    if sodium <= ceiling {
        return RuleOutcome::none();
    }
    RuleOutcome::escalate(
        SafetyStatus::Avoid,
        format!("Sodium {sodium:.0} mg exceeds your per-meal limit of {ceiling:.0} mg"),
    )
    .with_modification(messages::AVOID_ADDING_SALT)
}

/// Diabetes carbohydrate ceiling with fiber buffering
pub fn carb_ceiling(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    if !ctx.has(ConditionKind::Diabetes) {
        return RuleOutcome::none();
    }
    let policy = &ctx.policy.carbohydrates;
    let ceiling = policy.meal_ceiling_g(ctx.profile.biometrics.gender, ctx.profile.goal);
    let carbs = ctx.nutrients.carbs_g;
    let fiber = ctx.nutrients.fiber_g;

    if carbs > ceiling {
        if fiber > policy.fiber_buffer_g {
            return RuleOutcome::escalate(
                SafetyStatus::Caution,
                format!(
                    "High carbs ({carbs:.0} g, limit {ceiling:.0} g) buffered by fiber ({fiber:.0} g)"
                ),
            );
        }
        return RuleOutcome::escalate(
            SafetyStatus::Avoid,
            format!("Carbohydrates {carbs:.0} g exceed your per-meal limit of {ceiling:.0} g"),
        )
        .with_modification(messages::REDUCE_PORTION);
    }

    if carbs > policy.moderate_carbs_g && fiber < policy.low_fiber_g {
        return RuleOutcome::escalate(
            SafetyStatus::Caution,
            format!("Moderately high carbs ({carbs:.0} g) with little fiber ({fiber:.1} g)"),
        )
        .with_modification("Pair with a high-fiber side");
    }
    RuleOutcome::none()
}

/// Kidney potassium limits
pub fn potassium(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    let policy = &ctx.policy.potassium;
    let potassium = ctx.nutrients.potassium_mg;

    if ctx.has(ConditionKind::KidneyDisease) {
        let severity = if potassium > policy.kidney_avoid_mg {
            SafetyStatus::Avoid
        } else if potassium > policy.kidney_caution_mg {
            SafetyStatus::Caution
        } else {
            return RuleOutcome::none();
        };
        return RuleOutcome::escalate(
            severity,
            format!("Potassium {potassium:.0} mg is high for kidney disease"),
        )
        .with_modification("Choose a lower-potassium alternative");
    }
    RuleOutcome::none()
}

/// Positive note for hypertension without kidney disease
///
/// Runs last so it only sees a food that stayed `Safe` through every other rule.
pub fn blood_pressure_note(ctx: &RuleContext<'_>, status: SafetyStatus) -> RuleOutcome {
    let policy = &ctx.policy.potassium;
    let potassium = ctx.nutrients.potassium_mg;
    if status == SafetyStatus::Safe
        && ctx.has(ConditionKind::Hypertension)
        && !ctx.has(ConditionKind::KidneyDisease)
        && potassium > policy.blood_pressure_support_min_mg
        && ctx.nutrients.sodium_mg < policy.blood_pressure_support_max_sodium_mg
    {
        return RuleOutcome::note(format!(
            "Potassium-rich ({potassium:.0} mg) and low in sodium: supports blood pressure management"
        ));
    }
    RuleOutcome::none()
}

/// PCOS inflammatory triggers
pub fn pcos_triggers(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    if !ctx.has(ConditionKind::Pcos) {
        return RuleOutcome::none();
    }
    let policy = &ctx.policy.pcos;
    let added_sugar = ctx.nutrients.added_sugar_g;
    let high_sugar = added_sugar > policy.added_sugar_max_g;

    let mut outcome = RuleOutcome::none();
    if high_sugar {
        outcome = outcome.merge(RuleOutcome::escalate(
            SafetyStatus::Avoid,
            format!("Inflammatory trigger: {added_sugar:.0} g added sugar"),
        ));
    }
    if ctx.found(AdditiveCategory::Nitrites) {
        let found = found_patterns(&ctx.ingredient_text, AdditiveCategory::Nitrites);
        outcome = outcome.merge(RuleOutcome::escalate(
            SafetyStatus::Avoid,
            format!("Inflammatory trigger: {}", found.join(", ")),
        ));
    }
    if high_sugar
        && ctx.has(ConditionKind::HighCholesterol)
        && ctx.nutrients.fat_g < policy.low_fat_g
    {
        outcome = outcome.merge(RuleOutcome::escalate(
            SafetyStatus::Avoid,
            "Low-fat label does not offset high added sugar",
        ));
    }
    outcome
}

/// Diabetes and kidney disease together: fiber helps one, phosphorus hurts the other
pub fn diabetes_kidney_tradeoff(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    if !(ctx.has(ConditionKind::Diabetes) && ctx.has(ConditionKind::KidneyDisease)) {
        return RuleOutcome::none();
    }
    let policy = &ctx.policy.diabetes_kidney;
    let fiber = ctx.nutrients.fiber_g;
    let phosphorus = ctx.nutrients.phosphorus_mg;
    if fiber > policy.fiber_g && phosphorus > policy.phosphorus_mg {
        return RuleOutcome::escalate(
            SafetyStatus::Caution,
            format!(
                "Tradeoff: fiber ({fiber:.0} g) helps blood sugar, but phosphorus ({phosphorus:.0} mg) burdens the kidneys"
            ),
        )
        .with_modification(messages::REDUCE_PORTION);
    }
    RuleOutcome::none()
}

/// One serving exceeding an entire resolved daily maximum
///
/// Sodium is skipped; it has its own per-meal rule. Limits on nutrients the
/// food model does not track are skipped.
pub fn daily_max_overflow(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    let Some(restrictions) = ctx.restrictions else {
        return RuleOutcome::none();
    };
    restrictions
        .limits
        .nutrients
        .values()
        .filter(|resolution| resolution.nutrient != nutrients::SODIUM)
        .filter_map(|resolution| {
            let max = resolution.resolved.as_ref()?.upper_bound()?;
            let amount = ctx.nutrients.amount_for(&resolution.nutrient)?;
            let name = &resolution.nutrient;
            let unit = resolution.unit.as_deref().unwrap_or_default();
            (amount > max).then(|| {
                RuleOutcome::escalate(
                    SafetyStatus::Avoid,
                    format!(
                        "{name} {amount:.0}{unit} in one serving exceeds your daily limit of {max:.0}{unit}"
                    ),
                )
                .with_modification(messages::REDUCE_PORTION)
            })
        })
        .fold(RuleOutcome::none(), RuleOutcome::merge)
}

/// Informational grain notes for kidney disease
pub fn grain_notes(ctx: &RuleContext<'_>, _status: SafetyStatus) -> RuleOutcome {
    if !ctx.has(ConditionKind::KidneyDisease) {
        return RuleOutcome::none();
    }

    let mut candidates = ctx.food.ingredient_list();
    if candidates.is_empty() {
        candidates.push(ctx.food.name.trim().to_lowercase());
    }
    let grains: BTreeSet<String> = candidates
        .into_iter()
        .filter(|candidate| looks_like_grain(candidate))
        .collect();

    grains
        .iter()
        .map(|grain| grain_note(grain, ctx.profile.ckd_stage))
        .fold(RuleOutcome::none(), RuleOutcome::merge)
}

fn grain_note(grain: &str, ckd_stage: Option<u8>) -> RuleOutcome {
    match classify_grain(grain) {
        GrainTier::Optimal => RuleOutcome::note(format!(
            "{grain}: preferred grain for kidney health (lower phosphorus absorption)"
        )),
        GrainTier::Moderate => RuleOutcome::none(),
        GrainTier::Conditional => match ckd_stage {
            Some(stage) if stage >= 4 => RuleOutcome::note(format!(
                "{grain}: low phosphorus, acceptable at CKD stage {stage}"
            )),
            _ => RuleOutcome::note(format!(
                "{grain}: low phosphorus but high glycemic index"
            )),
        },
        GrainTier::Avoid => RuleOutcome::note(format!(
            "{grain}: consider a lower-burden grain such as {PREFERRED_SWAP}"
        ))
        .with_modification(format!("Swap {grain} for {PREFERRED_SWAP}")),
    }
}
