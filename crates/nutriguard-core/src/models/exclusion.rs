// ABOUTME: Ingredient exclusion rules owned by a condition or applying globally
// ABOUTME: Defines IngredientExclusion and the ordered ExclusionSeverity (LIMIT < CRITICAL_AVOID)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exclusion severity, ordered so `max` picks the more severe rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExclusionSeverity {
    /// Moderate, context-dependent
    Limit,
    /// Non-negotiable; never downgraded by another rule
    CriticalAvoid,
}

impl ExclusionSeverity {
    /// Stored string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::CriticalAvoid => "CRITICAL_AVOID",
        }
    }
}

/// One ingredient-pattern rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientExclusion {
    /// Owning condition; `None` applies to every condition
    #[serde(default)]
    pub condition_id: Option<Uuid>,
    /// Additive category label, e.g. `Phosphate additives`
    pub category: String,
    /// Case-insensitive alternation of ingredient synonyms
    pub pattern: String,
    /// Human-readable risk description
    pub risk_description: String,
    /// Rule severity
    pub severity: ExclusionSeverity,
    /// Provenance label
    #[serde(default)]
    pub source: String,
}

impl IngredientExclusion {
    /// True when the rule applies regardless of condition
    #[must_use]
    pub const fn is_global(&self) -> bool {
        self.condition_id.is_none()
    }
}
