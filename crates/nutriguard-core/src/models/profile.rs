// ABOUTME: User profile subset consumed by the conflict engine
// ABOUTME: Active condition slugs, biometrics, dietary goal, and optional CKD stage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::condition::ConditionKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Biological sex used for carbohydrate ceilings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Not provided; treated with the more conservative female ceilings
    #[default]
    Unspecified,
}

impl Gender {
    /// Parse leniently from user-entered text
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" => Self::Male,
            "female" | "f" | "woman" => Self::Female,
            _ => Self::Unspecified,
        }
    }
}

/// Dietary goal driving per-meal carbohydrate ceilings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryGoal {
    /// Caloric deficit
    WeightLoss,
    /// Caloric balance
    #[default]
    Maintenance,
}

/// Body measurements
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Biometrics {
    /// Age in years
    pub age: Option<u32>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Biological sex
    pub gender: Gender,
}

/// User profile consumed by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Active condition slugs (order irrelevant)
    pub conditions: BTreeSet<String>,
    /// Biometrics
    pub biometrics: Biometrics,
    /// Dietary goal
    pub goal: DietaryGoal,
    /// Numeric CKD stage (1-5) when known
    pub ckd_stage: Option<u8>,
}

impl UserProfile {
    /// Profile with the given active condition slugs and default biometrics
    pub fn with_conditions<I, S>(conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            conditions: conditions
                .into_iter()
                .map(|slug| slug.into().trim().to_lowercase())
                .collect(),
            ..Self::default()
        }
    }

    /// Set gender
    #[must_use]
    pub const fn gender(mut self, gender: Gender) -> Self {
        self.biometrics.gender = gender;
        self
    }

    /// Set dietary goal
    #[must_use]
    pub const fn goal(mut self, goal: DietaryGoal) -> Self {
        self.goal = goal;
        self
    }

    /// Set CKD stage
    #[must_use]
    pub const fn ckd_stage(mut self, stage: u8) -> Self {
        self.ckd_stage = Some(stage);
        self
    }

    /// Condition families active for this profile
    ///
    /// A known CKD stage activates kidney disease even without a matching slug.
    #[must_use]
    pub fn condition_kinds(&self) -> BTreeSet<ConditionKind> {
        let mut kinds: BTreeSet<ConditionKind> = self
            .conditions
            .iter()
            .map(|slug| ConditionKind::from_slug(slug))
            .collect();
        if self.ckd_stage.is_some_and(|stage| stage >= 1) {
            kinds.insert(ConditionKind::KidneyDisease);
        }
        kinds
    }

    /// Sorted active slugs
    #[must_use]
    pub fn condition_slugs(&self) -> Vec<String> {
        self.conditions.iter().cloned().collect()
    }
}
