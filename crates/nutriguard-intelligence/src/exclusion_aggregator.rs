// ABOUTME: Consolidates global and condition-specific ingredient exclusions by additive category
// ABOUTME: Most severe rule per category wins; patterns are compiled case-insensitively once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Ingredient Exclusion Aggregator
//!
//! Rows with no owning condition apply to everyone. Rows for the same
//! category (case-insensitive) merge into one consolidated rule: the highest
//! severity, the union of patterns, and the distinct risk descriptions.

use crate::pattern_matcher::matched_terms;
use nutriguard_core::constants::sources;
use nutriguard_core::models::{ConditionCatalog, ExclusionSeverity, IngredientExclusion};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};
use uuid::Uuid;

/// One consolidated exclusion rule
#[derive(Debug, Clone, Serialize)]
pub struct ConsolidatedExclusion {
    /// Category label (the lexically first spelling seen)
    pub category: String,
    /// Most severe severity across merged rows
    pub severity: ExclusionSeverity,
    /// Distinct risk descriptions joined with "; "
    pub risk_description: String,
    /// Distinct valid patterns, sorted
    pub patterns: Vec<String>,
    /// Condition slugs (or `global`) that contributed
    pub sources: Vec<String>,
    /// Provenance labels from the rows
    pub provenance: Vec<String>,
    #[serde(skip)]
    descriptions: BTreeSet<String>,
    #[serde(skip)]
    compiled: Vec<Regex>,
}

impl PartialEq for ConsolidatedExclusion {
    fn eq(&self, other: &Self) -> bool {
        // Compiled regexes are derived from `patterns`
        self.category == other.category
            && self.severity == other.severity
            && self.risk_description == other.risk_description
            && self.patterns == other.patterns
            && self.sources == other.sources
            && self.provenance == other.provenance
    }
}

impl ConsolidatedExclusion {
    fn new(category: &str, severity: ExclusionSeverity) -> Self {
        Self {
            category: category.trim().to_owned(),
            severity,
            risk_description: String::new(),
            patterns: Vec::new(),
            sources: Vec::new(),
            provenance: Vec::new(),
            descriptions: BTreeSet::new(),
            compiled: Vec::new(),
        }
    }

    /// Whether any pattern matches the ingredient text
    #[must_use]
    pub fn matches(&self, ingredient_text: &str) -> bool {
        !ingredient_text.trim().is_empty()
            && self.compiled.iter().any(|regex| regex.is_match(ingredient_text))
    }

    /// Distinct ingredient phrases matched by this rule
    #[must_use]
    pub fn found(&self, ingredient_text: &str) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.compiled
            .iter()
            .flat_map(|regex| matched_terms(regex, ingredient_text))
            .filter(|term| seen.insert(term.clone()))
            .collect()
    }

    fn absorb(
        &mut self,
        row: &IngredientExclusion,
        source: &str,
        invalid: &mut Vec<InvalidPattern>,
    ) {
        let category = row.category.trim();
        if category < self.category.as_str() {
            category.clone_into(&mut self.category);
        }
        self.severity = self.severity.max(row.severity);

        let description = row.risk_description.trim();
        if !description.is_empty() {
            self.descriptions.insert(description.to_owned());
        }
        insert_sorted(&mut self.sources, source);
        if !row.source.trim().is_empty() {
            insert_sorted(&mut self.provenance, row.source.trim());
        }

        let pattern = row.pattern.trim();
        if pattern.is_empty() || self.patterns.iter().any(|p| p == pattern) {
            return;
        }
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(_) => insert_sorted(&mut self.patterns, pattern),
            Err(e) => {
                warn!(
                    category = %self.category,
                    pattern,
                    error = %e,
                    "Skipping invalid exclusion pattern"
                );
                invalid.push(InvalidPattern {
                    category: self.category.clone(),
                    pattern: pattern.to_owned(),
                    error: e.to_string(),
                });
            }
        }
    }

    /// Rebuild derived fields after absorbing rows
    fn finish(&mut self) {
        self.risk_description = self
            .descriptions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        self.compiled = self
            .patterns
            .iter()
            .filter_map(|p| RegexBuilder::new(p).case_insensitive(true).build().ok())
            .collect();
    }
}

fn insert_sorted(values: &mut Vec<String>, value: &str) {
    if let Err(pos) = values.binary_search_by(|v| v.as_str().cmp(value)) {
        values.insert(pos, value.to_owned());
    }
}

/// A stored pattern that is not a valid regular expression
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct InvalidPattern {
    /// Category the row belonged to
    pub category: String,
    /// Pattern as stored
    pub pattern: String,
    /// Compiler error
    pub error: String,
}

/// Output of the exclusion aggregator
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedExclusions {
    /// Consolidated rules sorted by category key
    pub exclusions: Vec<ConsolidatedExclusion>,
    /// Rows whose pattern failed to compile
    pub invalid_patterns: Vec<InvalidPattern>,
}

impl AggregatedExclusions {
    /// Look up a consolidated rule by category (case-insensitive)
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&ConsolidatedExclusion> {
        let key = category_key(category);
        self.exclusions.iter().find(|e| category_key(&e.category) == key)
    }

    /// Rules matching the ingredient text
    pub fn matching<'a>(
        &'a self,
        ingredient_text: &'a str,
    ) -> impl Iterator<Item = &'a ConsolidatedExclusion> + 'a {
        self.exclusions
            .iter()
            .filter(move |exclusion| exclusion.matches(ingredient_text))
    }

    /// Number of consolidated rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.exclusions.len()
    }

    /// True when no rules apply
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exclusions.is_empty()
    }

    /// Merge one more row under a source label
    pub fn add_row(&mut self, row: &IngredientExclusion, source: &str) {
        let key = category_key(&row.category);
        let mut invalid = Vec::new();
        match self
            .exclusions
            .iter_mut()
            .find(|e| category_key(&e.category) == key)
        {
            Some(existing) => {
                existing.absorb(row, source, &mut invalid);
                existing.finish();
            }
            None => {
                let mut created = ConsolidatedExclusion::new(&row.category, row.severity);
                created.absorb(row, source, &mut invalid);
                created.finish();
                self.exclusions.push(created);
                self.exclusions
                    .sort_by_key(|e| category_key(&e.category));
            }
        }
        self.invalid_patterns.extend(invalid);
        self.invalid_patterns.sort();
    }
}

fn category_key(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Consolidates exclusion rows for a set of active conditions
pub struct IngredientExclusionAggregator<'a> {
    catalog: &'a ConditionCatalog,
}

impl<'a> IngredientExclusionAggregator<'a> {
    /// Create an aggregator over a condition catalog
    #[must_use]
    pub const fn new(catalog: &'a ConditionCatalog) -> Self {
        Self { catalog }
    }

    /// Aggregate exclusions for active condition slugs
    #[must_use]
    pub fn aggregate<S: AsRef<str>>(
        &self,
        exclusions: &[IngredientExclusion],
        active_slugs: &[S],
    ) -> AggregatedExclusions {
        let active = self.catalog.resolve_active(active_slugs);
        self.aggregate_ids(exclusions, &active)
    }

    /// Aggregate exclusions for already-resolved active condition ids
    #[must_use]
    pub fn aggregate_ids(
        &self,
        exclusions: &[IngredientExclusion],
        active: &BTreeSet<Uuid>,
    ) -> AggregatedExclusions {
        let mut groups: BTreeMap<String, ConsolidatedExclusion> = BTreeMap::new();
        let mut invalid = Vec::new();

        for row in exclusions {
            let source = match row.condition_id {
                None => sources::GLOBAL.to_owned(),
                Some(id) if active.contains(&id) => match self.catalog.get(&id) {
                    Some(condition) => condition.slug.clone(),
                    None => continue,
                },
                Some(_) => continue,
            };

            groups
                .entry(category_key(&row.category))
                .or_insert_with(|| ConsolidatedExclusion::new(&row.category, row.severity))
                .absorb(row, &source, &mut invalid);
        }

        let exclusions: Vec<ConsolidatedExclusion> = groups
            .into_values()
            .map(|mut exclusion| {
                exclusion.finish();
                exclusion
            })
            .collect();

        invalid.sort();
        invalid.dedup();

        debug!(
            active_conditions = active.len(),
            categories = exclusions.len(),
            critical = exclusions
                .iter()
                .filter(|e| e.severity == ExclusionSeverity::CriticalAvoid)
                .count(),
            invalid_patterns = invalid.len(),
            "Aggregated ingredient exclusions"
        );

        AggregatedExclusions {
            exclusions,
            invalid_patterns: invalid,
        }
    }
}
