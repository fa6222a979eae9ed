// ABOUTME: Consolidated, conflict-resolved restrictions for a user's full active condition set
// ABOUTME: Runs both aggregators over a store snapshot and overlays AI-generated personalized limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Restriction Profile
//!
//! Derived data: rebuilt whenever the active condition set changes and never
//! edited in place by readers.

use crate::exclusion_aggregator::{
    AggregatedExclusions, ConsolidatedExclusion, IngredientExclusionAggregator, InvalidPattern,
};
use crate::limit_aggregator::{
    AggregatedLimits, IgnoredLimit, LimitContribution, NutrientLimitAggregator, NutrientResolution,
};
use nutriguard_core::constants::sources;
use nutriguard_core::models::{
    ComputedLimits, ConditionCatalog, ExclusionSeverity, IngredientExclusion, LimitSpec,
    RestrictionStore,
};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Resolved limits and consolidated exclusions for one condition set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RestrictionProfile {
    /// Known active condition slugs, sorted
    pub active_conditions: Vec<String>,
    /// Requested slugs with no matching condition, sorted
    pub unknown_conditions: Vec<String>,
    /// Per-nutrient resolution
    pub limits: AggregatedLimits,
    /// Consolidated exclusion rules
    pub exclusions: AggregatedExclusions,
    /// Reasoning attached to an AI overlay, if one was applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_reasoning: Option<String>,
}

impl RestrictionProfile {
    /// Aggregate a store snapshot for the given active slugs
    #[must_use]
    pub fn build<S: AsRef<str>>(
        catalog: &ConditionCatalog,
        store: &RestrictionStore,
        active_slugs: &[S],
    ) -> Self {
        let active = catalog.resolve_active(active_slugs);

        let active_conditions: Vec<String> = active
            .iter()
            .filter_map(|id| catalog.get(id))
            .map(|condition| condition.slug.trim().to_lowercase())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let unknown_conditions: Vec<String> = active_slugs
            .iter()
            .map(|slug| slug.as_ref().trim().to_lowercase())
            .filter(|slug| catalog.by_slug(slug).is_none())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let limits = NutrientLimitAggregator::new(catalog).aggregate_ids(&store.limits, &active);
        let exclusions =
            IngredientExclusionAggregator::new(catalog).aggregate_ids(&store.exclusions, &active);

        debug!(
            active = ?active_conditions,
            unknown = ?unknown_conditions,
            nutrients = limits.len(),
            exclusions = exclusions.len(),
            "Built restriction profile"
        );

        Self {
            active_conditions,
            unknown_conditions,
            limits,
            exclusions,
            ai_reasoning: None,
        }
    }

    /// Aggregate using the store's own condition list
    #[must_use]
    pub fn from_store<S: AsRef<str>>(store: &RestrictionStore, active_slugs: &[S]) -> Self {
        Self::build(&store.catalog(), store, active_slugs)
    }

    /// Merge AI-generated personalized limits as one more contributor
    ///
    /// Only fields that validate as non-negative numbers are used; the rest
    /// are recorded as ignored. `avoid_ingredients` become LIMIT exclusions.
    #[must_use]
    pub fn with_computed_limits(mut self, computed: &ComputedLimits) -> Self {
        let (accepted, rejected) = computed.validate();

        for field in rejected {
            let reason = if field.field == "code" {
                "unknown nutrient code"
            } else {
                "non-numeric AI limit field"
            };
            self.limits.add_ignored(IgnoredLimit {
                source: sources::AI_GENERATED.to_owned(),
                nutrient: field.code,
                limit_type: field.field.to_uppercase(),
                raw_value: field.raw,
                reason: reason.to_owned(),
            });
        }

        for bounds in accepted {
            let spec = match (bounds.min, bounds.max) {
                (Some(low), Some(high)) if low <= high => LimitSpec::Range { low, high },
                (Some(low), Some(high)) => {
                    self.limits.add_ignored(IgnoredLimit {
                        source: sources::AI_GENERATED.to_owned(),
                        nutrient: bounds.code,
                        limit_type: "RANGE".to_owned(),
                        raw_value: format!("{low}-{high}"),
                        reason: "minimum exceeds maximum".to_owned(),
                    });
                    continue;
                }
                (Some(value), None) => LimitSpec::Min { value },
                (None, Some(value)) => LimitSpec::Max { value },
                (None, None) => continue,
            };
            self.limits.add_contribution(
                &bounds.nutrient,
                LimitContribution {
                    source: sources::AI_GENERATED.to_owned(),
                    spec,
                    unit: None,
                },
            );
        }

        let avoid: BTreeSet<String> = computed
            .avoid_ingredients
            .iter()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        for term in avoid {
            self.exclusions.add_row(
                &IngredientExclusion {
                    condition_id: None,
                    category: sources::AI_AVOID_CATEGORY.to_owned(),
                    pattern: format!(r"\b{}\b", regex::escape(&term)),
                    risk_description: format!("{term} flagged by personalized analysis"),
                    severity: ExclusionSeverity::Limit,
                    source: sources::AI_GENERATED.to_owned(),
                },
                sources::AI_GENERATED,
            );
        }

        let reasoning = computed.reasoning.trim();
        if !reasoning.is_empty() {
            self.ai_reasoning = Some(reasoning.to_owned());
        }

        if self.limits.conflicts().next().is_some() {
            warn!("AI overlay left conflicting nutrient limits; flag for review");
        }
        self
    }

    /// Nutrients whose limits could not be reconciled
    pub fn conflicts(&self) -> impl Iterator<Item = &NutrientResolution> {
        self.limits.conflicts()
    }

    /// Limit rows excluded from numeric resolution
    #[must_use]
    pub fn ignored_limits(&self) -> &[IgnoredLimit] {
        &self.limits.ignored
    }

    /// Exclusion patterns that failed to compile
    #[must_use]
    pub fn invalid_patterns(&self) -> &[InvalidPattern] {
        &self.exclusions.invalid_patterns
    }

    /// Consolidated exclusion rules
    #[must_use]
    pub fn consolidated_exclusions(&self) -> &[ConsolidatedExclusion] {
        &self.exclusions.exclusions
    }
}
