// ABOUTME: Read-only snapshot of condition, limit, and exclusion records
// ABOUTME: Supplied by the external persistence layer and passed into the aggregators as-is
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::condition::{Condition, ConditionCatalog};
use super::exclusion::IngredientExclusion;
use super::limits::NutrientLimit;
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};

/// Already-loaded restriction records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestrictionStore {
    /// Known conditions
    pub conditions: Vec<Condition>,
    /// Nutrient limit rows
    pub limits: Vec<NutrientLimit>,
    /// Ingredient exclusion rows (condition-owned and global)
    pub exclusions: Vec<IngredientExclusion>,
}

impl RestrictionStore {
    /// Parse a JSON snapshot
    ///
    /// # Errors
    ///
    /// Returns a serialization error when the JSON does not match the snapshot shape.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Index the snapshot's conditions
    #[must_use]
    pub fn catalog(&self) -> ConditionCatalog {
        ConditionCatalog::new(self.conditions.iter().cloned())
    }
}
