// ABOUTME: Consolidates per-condition nutrient limits into one resolved limit per nutrient
// ABOUTME: Most-restrictive-wins intersection with explicit CONFLICTING records for empty ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrient Limit Aggregator
//!
//! Every numeric limit is treated as a half-open interval (`MAX v` is `..=v`,
//! `MIN v` is `v..`) and the active conditions' intervals for a nutrient are
//! intersected. An empty intersection is recorded as a conflict for human
//! review; nothing is averaged or guessed.
//!
//! Output is independent of input row order: nutrients are keyed by canonical
//! name in a `BTreeMap`, contributors are sorted, and ties are broken on
//! stable keys.

use nutriguard_core::constants::nutrients;
use nutriguard_core::models::{ConditionCatalog, LimitSpec, LimitType, NutrientLimit};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};
use uuid::Uuid;

/// Consolidated limit for one nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedLimit {
    /// Upper bound only
    Max {
        /// Most restrictive maximum
        value: f64,
    },
    /// Lower bound only
    Min {
        /// Most restrictive minimum
        value: f64,
    },
    /// Both bounds
    Range {
        /// Highest lower bound
        low: f64,
        /// Lowest upper bound
        high: f64,
    },
    /// The active conditions' bounds do not overlap
    Conflicting {
        /// Narrowest individual limit, retained for display
        narrowest: LimitSpec,
        /// Sources whose limits took part in the conflict
        contributing: Vec<String>,
    },
}

impl ResolvedLimit {
    /// Effective upper bound, if the limit resolved cleanly
    #[must_use]
    pub const fn upper_bound(&self) -> Option<f64> {
        match self {
            Self::Max { value } => Some(*value),
            Self::Range { high, .. } => Some(*high),
            Self::Min { .. } | Self::Conflicting { .. } => None,
        }
    }

    /// Effective lower bound, if the limit resolved cleanly
    #[must_use]
    pub const fn lower_bound(&self) -> Option<f64> {
        match self {
            Self::Min { value } => Some(*value),
            Self::Range { low, .. } => Some(*low),
            Self::Max { .. } | Self::Conflicting { .. } => None,
        }
    }

    /// True for an empty intersection
    #[must_use]
    pub const fn is_conflicting(&self) -> bool {
        matches!(self, Self::Conflicting { .. })
    }
}

/// One source's limit on a nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitContribution {
    /// Condition slug, or a provenance label such as `ai-generated`
    pub source: String,
    /// Parsed limit
    pub spec: LimitSpec,
    /// Unit as stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Resolution state for one nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientResolution {
    /// Display name: the canonical name, or the lexically first label seen
    pub nutrient: String,
    /// Unit (the lexically first unit seen)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Consolidated numeric limit; `None` when only TEXT guidance exists
    pub resolved: Option<ResolvedLimit>,
    /// TEXT guidance, never used numerically
    pub notes: Vec<String>,
    /// Every contributing limit, sorted by source
    pub contributors: Vec<LimitContribution>,
}

impl NutrientResolution {
    fn new(nutrient: &str) -> Self {
        Self {
            nutrient: display_name(nutrient),
            unit: None,
            resolved: None,
            notes: Vec::new(),
            contributors: Vec::new(),
        }
    }

    fn absorb(&mut self, label: &str, contribution: LimitContribution) {
        let label = display_name(label);
        if label < self.nutrient {
            self.nutrient = label;
        }
        if let Some(unit) = &contribution.unit {
            if self.unit.as_ref().is_none_or(|current| unit < current) {
                self.unit = Some(unit.clone());
            }
        }
        self.contributors.push(contribution);
    }

    /// Recompute `resolved` and `notes` from the contributors
    fn resolve(&mut self) {
        self.contributors.sort_by(compare_contributions);

        let mut notes: BTreeSet<String> = BTreeSet::new();
        let mut low: Option<f64> = None;
        let mut high: Option<f64> = None;
        let mut numeric: Vec<&LimitContribution> = Vec::new();

        for contribution in &self.contributors {
            match contribution.spec.bounds() {
                Some((lo, hi)) => {
                    if let Some(lo) = lo {
                        low = Some(low.map_or(lo, |current| current.max(lo)));
                    }
                    if let Some(hi) = hi {
                        high = Some(high.map_or(hi, |current| current.min(hi)));
                    }
                    numeric.push(contribution);
                }
                None => {
                    if let LimitSpec::Text { text } = &contribution.spec {
                        if !text.is_empty() {
                            notes.insert(text.clone());
                        }
                    }
                }
            }
        }

        self.notes = notes.into_iter().collect();
        self.resolved = match (low, high) {
            (Some(lo), Some(hi)) if lo > hi => {
                let contributing: Vec<String> = numeric
                    .iter()
                    .map(|c| c.source.clone())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect();
                let narrowest = numeric
                    .iter()
                    .min_by(|a, b| {
                        interval_width(&a.spec)
                            .total_cmp(&interval_width(&b.spec))
                            .then_with(|| compare_contributions(a, b))
                    })
                    .map(|c| c.spec.clone());
                warn!(
                    nutrient = %self.nutrient,
                    low = lo,
                    high = hi,
                    sources = ?contributing,
                    "Nutrient limits conflict: no value satisfies every active condition"
                );
                narrowest.map(|narrowest| ResolvedLimit::Conflicting {
                    narrowest,
                    contributing,
                })
            }
            (Some(lo), Some(hi)) => Some(ResolvedLimit::Range { low: lo, high: hi }),
            (None, Some(hi)) => Some(ResolvedLimit::Max { value: hi }),
            (Some(lo), None) => Some(ResolvedLimit::Min { value: lo }),
            (None, None) => None,
        };
    }
}

fn interval_width(spec: &LimitSpec) -> f64 {
    match spec.bounds() {
        Some((Some(lo), Some(hi))) => hi - lo,
        _ => f64::INFINITY,
    }
}

fn compare_contributions(a: &LimitContribution, b: &LimitContribution) -> Ordering {
    a.source
        .cmp(&b.source)
        .then_with(|| a.spec.to_string().cmp(&b.spec.to_string()))
        .then_with(|| a.unit.cmp(&b.unit))
}

/// A limit row excluded from numeric resolution because its value did not parse
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IgnoredLimit {
    /// Source that owns the row
    pub source: String,
    /// Nutrient label as stored
    pub nutrient: String,
    /// Declared limit type
    pub limit_type: String,
    /// Raw value as stored
    pub raw_value: String,
    /// Why it was ignored
    pub reason: String,
}

/// Output of the limit aggregator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedLimits {
    /// Resolutions keyed by lowercase canonical nutrient name
    pub nutrients: BTreeMap<String, NutrientResolution>,
    /// Rows that could not be used numerically
    pub ignored: Vec<IgnoredLimit>,
}

impl AggregatedLimits {
    /// Look up a nutrient by name or alias (case-insensitive)
    #[must_use]
    pub fn get(&self, nutrient: &str) -> Option<&NutrientResolution> {
        self.nutrients.get(&nutrient_key(nutrient))
    }

    /// Resolved limit for a nutrient, if any numeric limit applies
    #[must_use]
    pub fn resolved(&self, nutrient: &str) -> Option<&ResolvedLimit> {
        self.get(nutrient).and_then(|r| r.resolved.as_ref())
    }

    /// Resolved upper bound for a nutrient, ignoring conflicts
    #[must_use]
    pub fn max_for(&self, nutrient: &str) -> Option<f64> {
        self.resolved(nutrient).and_then(ResolvedLimit::upper_bound)
    }

    /// Nutrients whose limits conflict
    pub fn conflicts(&self) -> impl Iterator<Item = &NutrientResolution> {
        self.nutrients
            .values()
            .filter(|r| r.resolved.as_ref().is_some_and(ResolvedLimit::is_conflicting))
    }

    /// Number of nutrients with any limit
    #[must_use]
    pub fn len(&self) -> usize {
        self.nutrients.len()
    }

    /// True when no limits apply
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nutrients.is_empty()
    }

    /// Merge one more limit into a nutrient and re-resolve it
    pub fn add_contribution(&mut self, nutrient: &str, contribution: LimitContribution) {
        let entry = self
            .nutrients
            .entry(nutrient_key(nutrient))
            .or_insert_with(|| NutrientResolution::new(nutrient));
        entry.absorb(nutrient, contribution);
        entry.resolve();
    }

    /// Record a row that could not be used
    pub fn add_ignored(&mut self, ignored: IgnoredLimit) {
        warn!(
            source = %ignored.source,
            nutrient = %ignored.nutrient,
            raw = %ignored.raw_value,
            reason = %ignored.reason,
            "Ignoring malformed nutrient limit"
        );
        self.ignored.push(ignored);
        self.ignored.sort();
    }
}

/// Map key for a nutrient label: the canonical name when known, so `Carbs`
/// and `Carbohydrates` resolve together
fn nutrient_key(nutrient: &str) -> String {
    display_name(nutrient).to_lowercase()
}

fn display_name(nutrient: &str) -> String {
    nutrients::canonical_name(nutrient).map_or_else(|| nutrient.trim().to_owned(), str::to_owned)
}

/// Resolves nutrient limits for a set of active conditions
pub struct NutrientLimitAggregator<'a> {
    catalog: &'a ConditionCatalog,
}

impl<'a> NutrientLimitAggregator<'a> {
    /// Create an aggregator over a condition catalog
    #[must_use]
    pub const fn new(catalog: &'a ConditionCatalog) -> Self {
        Self { catalog }
    }

    /// Aggregate limits for active condition slugs
    ///
    /// Unknown slugs and rows owned by inactive conditions are skipped.
    #[must_use]
    pub fn aggregate<S: AsRef<str>>(
        &self,
        limits: &[NutrientLimit],
        active_slugs: &[S],
    ) -> AggregatedLimits {
        let active = self.catalog.resolve_active(active_slugs);
        self.aggregate_ids(limits, &active)
    }

    /// Aggregate limits for already-resolved active condition ids
    #[must_use]
    pub fn aggregate_ids(&self, limits: &[NutrientLimit], active: &BTreeSet<Uuid>) -> AggregatedLimits {
        let mut aggregated = AggregatedLimits::default();
        let mut grouped: BTreeMap<String, NutrientResolution> = BTreeMap::new();

        for limit in limits {
            if !active.contains(&limit.condition_id) {
                continue;
            }
            let Some(condition) = self.catalog.get(&limit.condition_id) else {
                continue;
            };
            let source = condition.slug.clone();

            match limit.spec() {
                Ok(spec) => {
                    grouped
                        .entry(nutrient_key(&limit.nutrient))
                        .or_insert_with(|| NutrientResolution::new(&limit.nutrient))
                        .absorb(
                            &limit.nutrient,
                            LimitContribution {
                                source,
                                spec,
                                unit: limit.unit.clone(),
                            },
                        );
                }
                Err(e) => aggregated.add_ignored(IgnoredLimit {
                    source,
                    nutrient: limit.nutrient.trim().to_owned(),
                    limit_type: limit_type_label(limit.limit_type).to_owned(),
                    raw_value: limit.limit_value.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        for resolution in grouped.values_mut() {
            resolution.resolve();
        }
        aggregated.nutrients = grouped;

        debug!(
            active_conditions = active.len(),
            nutrients = aggregated.nutrients.len(),
            ignored = aggregated.ignored.len(),
            conflicts = aggregated.conflicts().count(),
            "Aggregated nutrient limits"
        );
        aggregated
    }
}

const fn limit_type_label(limit_type: LimitType) -> &'static str {
    match limit_type {
        LimitType::Max => "MAX",
        LimitType::Min => "MIN",
        LimitType::Range => "RANGE",
        LimitType::Text => "TEXT",
    }
}
