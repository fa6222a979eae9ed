// ABOUTME: Food-safety conflict engine producing Safe/Caution/Avoid verdicts for a user profile
// ABOUTME: Folds an ordered list of independent rules, escalating severity and accumulating reasons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Conflict Engine
//!
//! Evaluation starts at `Safe` and runs every rule in [`rules::DEFAULT_RULES`]
//! in order. Each rule sees the food, the profile, the active policy, and the
//! status reached so far, and returns a [`RuleOutcome`]. The fold keeps the
//! maximum severity, appends reasons, and de-duplicates modifications. A rule
//! may halt the fold once the status is `Avoid`; nothing can lower a status.
//!
//! Phase 1 rules scan ingredient text (additives, contraindications, profile
//! exclusions). Phase 2 rules compare nutrient amounts against per-meal
//! ceilings derived from the policy and the restriction profile.
//!
//! The engine is pure: no I/O, no interior state, and no errors for any input.
//! Malformed numbers are treated as zero before any rule runs.

pub mod rules;

use crate::config::PolicyConfig;
use crate::pattern_matcher::{match_categories, AdditiveCategory};
use crate::restriction_profile::RestrictionProfile;
use nutriguard_core::constants::messages;
use nutriguard_core::models::{
    AnalysisResult, ConditionKind, FoodItem, NutrientValues, SafetyStatus, UserProfile,
};
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

pub use rules::{NamedRule, Rule, DEFAULT_RULES};

/// Everything a rule may look at
pub struct RuleContext<'a> {
    /// Food under evaluation
    pub food: &'a FoodItem,
    /// Sanitized nutrient amounts (non-finite and negative values are zero)
    pub nutrients: NutrientValues,
    /// Lowercased ingredient text, empty when absent
    pub ingredient_text: String,
    /// User profile
    pub profile: &'a UserProfile,
    /// Condition kinds derived from the profile
    pub kinds: BTreeSet<ConditionKind>,
    /// Additive categories found in the ingredient text
    pub additives: BTreeSet<AdditiveCategory>,
    /// Consolidated restrictions, when the caller supplied them
    pub restrictions: Option<&'a RestrictionProfile>,
    /// Thresholds
    pub policy: &'a PolicyConfig,
}

impl<'a> RuleContext<'a> {
    /// Build a context, normalizing the food's inputs
    #[must_use]
    pub fn new(
        food: &'a FoodItem,
        profile: &'a UserProfile,
        restrictions: Option<&'a RestrictionProfile>,
        policy: &'a PolicyConfig,
    ) -> Self {
        let ingredient_text = food.ingredient_text();
        let additives = match_categories(&ingredient_text);
        Self {
            food,
            nutrients: food.nutrients.sanitized(),
            ingredient_text,
            profile,
            kinds: profile.condition_kinds(),
            additives,
            restrictions,
            policy,
        }
    }

    /// Whether a condition kind is active
    #[must_use]
    pub fn has(&self, kind: ConditionKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Whether an additive category was found
    #[must_use]
    pub fn found(&self, category: AdditiveCategory) -> bool {
        self.additives.contains(&category)
    }
}

/// The result of one rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Minimum status this rule demands
    pub severity: SafetyStatus,
    /// Reasons to append
    pub reasons: Vec<String>,
    /// Modifications to suggest
    pub modifications: Vec<String>,
    /// Stop evaluating further rules
    pub short_circuit: bool,
}

impl RuleOutcome {
    /// Rule did not fire
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Rule escalates to `severity` with a reason
    #[must_use]
    pub fn escalate(severity: SafetyStatus, reason: impl Into<String>) -> Self {
        Self {
            severity,
            reasons: vec![reason.into()],
            ..Self::default()
        }
    }

    /// Rule adds an informational reason without changing status
    #[must_use]
    pub fn note(reason: impl Into<String>) -> Self {
        Self::escalate(SafetyStatus::Safe, reason)
    }

    /// Attach a suggested modification
    #[must_use]
    pub fn with_modification(mut self, modification: impl Into<String>) -> Self {
        self.modifications.push(modification.into());
        self
    }

    /// Stop the fold after this rule
    #[must_use]
    pub const fn halt(mut self) -> Self {
        self.short_circuit = true;
        self
    }

    /// Combine two outcomes from the same rule
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.severity = self.severity.escalate(other.severity);
        self.reasons.extend(other.reasons);
        self.modifications.extend(other.modifications);
        self.short_circuit |= other.short_circuit;
        self
    }

    /// True when the rule contributed nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.severity == SafetyStatus::Safe
            && self.reasons.is_empty()
            && self.modifications.is_empty()
    }
}

/// Evaluates foods against a user profile
#[derive(Debug, Clone)]
pub struct ConflictEngine {
    policy: PolicyConfig,
    rules: Vec<NamedRule>,
}

impl Default for ConflictEngine {
    fn default() -> Self {
        Self::new(PolicyConfig::global().clone())
    }
}

impl ConflictEngine {
    /// Create an engine with an explicit policy and the default rule order
    #[must_use]
    pub fn new(policy: PolicyConfig) -> Self {
        Self {
            policy,
            rules: DEFAULT_RULES.to_vec(),
        }
    }

    /// Create an engine with a custom rule list
    #[must_use]
    pub fn with_rules(policy: PolicyConfig, rules: Vec<NamedRule>) -> Self {
        Self { policy, rules }
    }

    /// Active policy
    #[must_use]
    pub const fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }

    /// Evaluate a food using only the profile's conditions
    #[must_use]
    pub fn evaluate(&self, food: &FoodItem, profile: &UserProfile) -> AnalysisResult {
        self.run(&RuleContext::new(food, profile, None, &self.policy))
    }

    /// Evaluate a food with consolidated restrictions applied
    #[must_use]
    pub fn evaluate_with_restrictions(
        &self,
        food: &FoodItem,
        profile: &UserProfile,
        restrictions: &RestrictionProfile,
    ) -> AnalysisResult {
        self.run(&RuleContext::new(
            food,
            profile,
            Some(restrictions),
            &self.policy,
        ))
    }

    /// Evaluate many foods in parallel, preserving input order
    #[must_use]
    pub fn evaluate_many(
        &self,
        foods: &[FoodItem],
        profile: &UserProfile,
        restrictions: Option<&RestrictionProfile>,
    ) -> Vec<AnalysisResult> {
        foods
            .par_iter()
            .map(|food| self.run(&RuleContext::new(food, profile, restrictions, &self.policy)))
            .collect()
    }

    fn run(&self, ctx: &RuleContext<'_>) -> AnalysisResult {
        let mut status = SafetyStatus::Safe;
        let mut reasons: Vec<String> = Vec::new();
        let mut modifications: Vec<String> = Vec::new();

        for rule in &self.rules {
            let outcome = (rule.apply)(ctx, status);
            if outcome.is_empty() {
                continue;
            }

            let previous = status;
            status = status.escalate(outcome.severity);
            if status > previous {
                debug!(
                    rule = rule.name,
                    food = %ctx.food.name,
                    from = %previous,
                    to = %status,
                    "Rule escalated verdict"
                );
            }

            reasons.extend(outcome.reasons);
            for modification in outcome.modifications {
                if !modifications.contains(&modification) {
                    modifications.push(modification);
                }
            }

            if outcome.short_circuit && status == SafetyStatus::Avoid {
                debug!(rule = rule.name, food = %ctx.food.name, "Short-circuit");
                break;
            }
        }

        if status == SafetyStatus::Safe {
            reasons.push(messages::FITS_PROFILE.to_owned());
        }

        AnalysisResult {
            status,
            reasons,
            modifications,
            nutrients: ctx.nutrients,
        }
    }
}
