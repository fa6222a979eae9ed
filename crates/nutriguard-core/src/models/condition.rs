// ABOUTME: Clinical condition records and slug-based condition classification
// ABOUTME: Defines Condition, ConditionKind, and the ConditionCatalog used to resolve active slugs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::condition_keywords;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use uuid::Uuid;

/// A named clinical condition driving dietary restrictions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Record identifier referenced by limits and exclusions
    pub id: Uuid,
    /// Stable slug, e.g. `ckd-3b-5`
    pub slug: String,
    /// Display label
    pub label: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Risk factors and goals tagged on the condition
    #[serde(default)]
    pub nutritional_focus: Vec<String>,
}

impl Condition {
    /// Classify this condition by its slug
    #[must_use]
    pub fn kind(&self) -> ConditionKind {
        ConditionKind::from_slug(&self.slug)
    }
}

/// Coarse condition families the conflict engine reasons about
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Chronic kidney disease at any stage
    KidneyDisease,
    /// Hypertension
    Hypertension,
    /// Diabetes or prediabetes
    Diabetes,
    /// Polycystic ovary syndrome
    Pcos,
    /// Hyperlipidemia / high cholesterol
    HighCholesterol,
    /// Any condition without engine-specific rules
    Other,
}

impl ConditionKind {
    /// Classify a slug by keyword; unknown slugs map to `Other`
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        let slug = slug.trim().to_lowercase();
        let has_any = |keywords: &[&str]| keywords.iter().any(|k| slug.contains(k));

        if has_any(condition_keywords::KIDNEY) {
            Self::KidneyDisease
        } else if has_any(condition_keywords::HYPERTENSION) {
            Self::Hypertension
        } else if has_any(condition_keywords::DIABETES) {
            Self::Diabetes
        } else if has_any(condition_keywords::PCOS) {
            Self::Pcos
        } else if has_any(condition_keywords::HIGH_CHOLESTEROL) {
            Self::HighCholesterol
        } else {
            Self::Other
        }
    }
}

/// Read-only snapshot of known conditions, indexed by id and slug
#[derive(Debug, Clone, Default)]
pub struct ConditionCatalog {
    by_id: BTreeMap<Uuid, Condition>,
    slug_to_id: BTreeMap<String, Uuid>,
}

impl ConditionCatalog {
    /// Build a catalog from condition records
    ///
    /// Slugs are matched case-insensitively. A later record with a duplicate
    /// slug replaces the earlier one.
    #[must_use]
    pub fn new(conditions: impl IntoIterator<Item = Condition>) -> Self {
        let mut catalog = Self::default();
        for condition in conditions {
            catalog
                .slug_to_id
                .insert(condition.slug.trim().to_lowercase(), condition.id);
            catalog.by_id.insert(condition.id, condition);
        }
        catalog
    }

    /// Look up a condition by record id
    #[must_use]
    pub fn get(&self, id: &Uuid) -> Option<&Condition> {
        self.by_id.get(id)
    }

    /// Look up a condition by slug
    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&Condition> {
        self.slug_to_id
            .get(&slug.trim().to_lowercase())
            .and_then(|id| self.by_id.get(id))
    }

    /// Resolve active slugs to the ids of known conditions
    ///
    /// Unknown slugs are dropped rather than failing the whole resolution.
    #[must_use]
    pub fn resolve_active<S: AsRef<str>>(&self, slugs: &[S]) -> BTreeSet<Uuid> {
        slugs
            .iter()
            .filter_map(|slug| {
                let found = self.by_slug(slug.as_ref()).map(|c| c.id);
                if found.is_none() {
                    debug!(slug = slug.as_ref(), "Ignoring unknown condition slug");
                }
                found
            })
            .collect()
    }

    /// Number of known conditions
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True when the catalog has no conditions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_slug() {
        assert_eq!(ConditionKind::from_slug("ckd-3b-5"), ConditionKind::KidneyDisease);
        assert_eq!(ConditionKind::from_slug("Hypertension"), ConditionKind::Hypertension);
        assert_eq!(ConditionKind::from_slug("type-2-diabetes"), ConditionKind::Diabetes);
        assert_eq!(ConditionKind::from_slug("pcos"), ConditionKind::Pcos);
        assert_eq!(
            ConditionKind::from_slug("hyperlipidemia"),
            ConditionKind::HighCholesterol
        );
        assert_eq!(ConditionKind::from_slug("gout"), ConditionKind::Other);
    }

    #[test]
    fn test_resolve_active_skips_unknown() {
        let ckd = Condition {
            id: Uuid::from_u128(1),
            slug: "ckd-3b-5".into(),
            label: "CKD".into(),
            description: String::new(),
            nutritional_focus: vec![],
        };
        let catalog = ConditionCatalog::new([ckd]);
        let ids = catalog.resolve_active(&["CKD-3b-5", "not-a-condition"]);
        assert_eq!(ids.len(), 1);
        assert!(ids.contains(&Uuid::from_u128(1)));
    }
}
