// ABOUTME: Clinical cutoff policy for the conflict engine rules
// ABOUTME: Sodium, carbohydrate, potassium, PCOS, and diabetes-kidney tradeoff thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Conflict Engine Policy
//!
//! Every numeric cutoff a rule compares against lives here. The defaults are
//! the values the product has shipped with; they are not clinically validated
//! thresholds and can be swapped per deployment or per engine instance.
//!
//! # Guideline context
//!
//! - Sodium: 2,300 mg/day general ceiling (Dietary Guidelines for Americans 2020-2025)
//! - Potassium and phosphorus in CKD: KDOQI Clinical Practice Guideline for
//!   Nutrition in CKD, 2020 update

use nutriguard_core::models::{DietaryGoal, Gender};
use serde::{Deserialize, Serialize};

/// Complete rule policy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Per-meal sodium ceilings
    pub sodium: SodiumPolicy,
    /// Per-meal carbohydrate ceilings and fiber buffering
    pub carbohydrates: CarbPolicy,
    /// Potassium thresholds
    pub potassium: PotassiumPolicy,
    /// PCOS inflammatory-trigger thresholds
    pub pcos: PcosPolicy,
    /// Diabetes plus kidney disease fiber/phosphorus tradeoff
    pub diabetes_kidney: DiabetesKidneyPolicy,
}

/// Sodium ceilings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SodiumPolicy {
    /// Daily limit used when the restriction profile has no resolved sodium MAX (mg)
    pub default_daily_limit_mg: f64,
    /// Meals per day the daily limit is spread across
    pub meals_per_day: f64,
    /// Per-meal ceiling with hypertension (mg)
    pub hypertension_meal_ceiling_mg: f64,
    /// Per-meal ceiling with hypertension and kidney disease together (mg)
    pub hypertension_kidney_meal_ceiling_mg: f64,
}

impl Default for SodiumPolicy {
    fn default() -> Self {
        Self {
            default_daily_limit_mg: 2300.0,
            meals_per_day: 3.0,
            hypertension_meal_ceiling_mg: 600.0,
            hypertension_kidney_meal_ceiling_mg: 500.0,
        }
    }
}

/// Carbohydrate ceilings per meal, by gender and goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbPolicy {
    /// Male, weight loss (g)
    pub male_weight_loss_g: f64,
    /// Male, maintenance (g)
    pub male_maintenance_g: f64,
    /// Female, weight loss (g)
    pub female_weight_loss_g: f64,
    /// Female, maintenance (g)
    pub female_maintenance_g: f64,
    /// Fiber above which over-ceiling carbs only reach Caution (g)
    pub fiber_buffer_g: f64,
    /// Carbs above which low fiber warrants Caution even under the ceiling (g)
    pub moderate_carbs_g: f64,
    /// Fiber below which moderate carbs warrant Caution (g)
    pub low_fiber_g: f64,
}

impl Default for CarbPolicy {
    fn default() -> Self {
        Self {
            male_weight_loss_g: 60.0,
            male_maintenance_g: 75.0,
            female_weight_loss_g: 45.0,
            female_maintenance_g: 60.0,
            fiber_buffer_g: 10.0,
            moderate_carbs_g: 40.0,
            low_fiber_g: 3.0,
        }
    }
}

impl CarbPolicy {
    /// Per-meal ceiling for a gender and goal
    ///
    /// An unspecified gender uses the female (lower) ceilings.
    #[must_use]
    pub const fn meal_ceiling_g(&self, gender: Gender, goal: DietaryGoal) -> f64 {
        match (gender, goal) {
            (Gender::Male, DietaryGoal::WeightLoss) => self.male_weight_loss_g,
            (Gender::Male, DietaryGoal::Maintenance) => self.male_maintenance_g,
            (Gender::Female | Gender::Unspecified, DietaryGoal::WeightLoss) => {
                self.female_weight_loss_g
            }
            (Gender::Female | Gender::Unspecified, DietaryGoal::Maintenance) => {
                self.female_maintenance_g
            }
        }
    }
}

/// Potassium thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotassiumPolicy {
    /// Kidney disease: above this is at least Caution (mg)
    pub kidney_caution_mg: f64,
    /// Kidney disease: above this is Avoid (mg)
    pub kidney_avoid_mg: f64,
    /// Hypertension: potassium above this earns a positive note (mg)
    pub blood_pressure_support_min_mg: f64,
    /// Hypertension: the note requires sodium below this (mg)
    pub blood_pressure_support_max_sodium_mg: f64,
}

impl Default for PotassiumPolicy {
    fn default() -> Self {
        Self {
            kidney_caution_mg: 200.0,
            kidney_avoid_mg: 350.0,
            blood_pressure_support_min_mg: 300.0,
            blood_pressure_support_max_sodium_mg: 400.0,
        }
    }
}

/// PCOS thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcosPolicy {
    /// Added sugar above this is an inflammatory trigger (g)
    pub added_sugar_max_g: f64,
    /// Fat below this counts as a "low-fat" label (g)
    pub low_fat_g: f64,
}

impl Default for PcosPolicy {
    fn default() -> Self {
        Self {
            added_sugar_max_g: 10.0,
            low_fat_g: 5.0,
        }
    }
}

/// Diabetes plus kidney disease interaction thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesKidneyPolicy {
    /// Fiber above this (g)
    pub fiber_g: f64,
    /// Phosphorus above this (mg)
    pub phosphorus_mg: f64,
}

impl Default for DiabetesKidneyPolicy {
    fn default() -> Self {
        Self {
            fiber_g: 5.0,
            phosphorus_mg: 200.0,
        }
    }
}
