// ABOUTME: Policy configuration loading with environment overrides and validation
// ABOUTME: Provides the process-wide PolicyConfig singleton and explicit load/validate entry points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Policy Configuration Module
//!
//! `PolicyConfig::global()` is loaded once per process from defaults plus
//! `NUTRIGUARD_*` environment overrides. Engines can also be built with an
//! explicit policy, which is how tests and per-tenant deployments swap cutoffs.

pub mod error;
pub mod policy;

pub use error::ConfigError;
pub use policy::{
    CarbPolicy, DiabetesKidneyPolicy, PcosPolicy, PolicyConfig, PotassiumPolicy, SodiumPolicy,
};

use std::env::{self, VarError};
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static POLICY_CONFIG: OnceLock<PolicyConfig> = OnceLock::new();

impl PolicyConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        POLICY_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load policy config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate threshold ordering and ranges
    ///
    /// # Errors
    ///
    /// Returns an error when a threshold is negative or not finite, zero where
    /// a divisor is required, or ordered against its sibling thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN fails every comparison below, so reject it before ordering checks
        if let Some((name, _)) = self
            .thresholds()
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(name));
        }

        let sodium = &self.sodium;
        if sodium.meals_per_day < 1.0 {
            return Err(ConfigError::ValueOutOfRange("sodium.meals_per_day must be >= 1"));
        }
        if sodium.default_daily_limit_mg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "sodium.default_daily_limit_mg must be > 0",
            ));
        }
        if sodium.hypertension_kidney_meal_ceiling_mg > sodium.hypertension_meal_ceiling_mg {
            return Err(ConfigError::InvalidRange(
                "hypertension_kidney_meal_ceiling must be <= hypertension_meal_ceiling",
            ));
        }

        let carbs = &self.carbohydrates;
        if carbs.male_weight_loss_g > carbs.male_maintenance_g
            || carbs.female_weight_loss_g > carbs.female_maintenance_g
        {
            return Err(ConfigError::InvalidRange(
                "weight-loss carb ceilings must be <= maintenance ceilings",
            ));
        }
        if carbs.female_weight_loss_g > carbs.male_weight_loss_g
            || carbs.female_maintenance_g > carbs.male_maintenance_g
        {
            return Err(ConfigError::InvalidRange(
                "female carb ceilings must be <= male ceilings",
            ));
        }
        if carbs.low_fiber_g > carbs.fiber_buffer_g {
            return Err(ConfigError::InvalidRange(
                "carbohydrates.low_fiber must be <= fiber_buffer",
            ));
        }

        if self.potassium.kidney_caution_mg >= self.potassium.kidney_avoid_mg {
            return Err(ConfigError::InvalidRange(
                "potassium.kidney_caution must be < kidney_avoid",
            ));
        }

        Ok(())
    }

    /// Every threshold with its field name
    fn thresholds(&self) -> [(&'static str, f64); 19] {
        let sodium = &self.sodium;
        let carbs = &self.carbohydrates;
        let potassium = &self.potassium;
        [
            ("sodium.default_daily_limit_mg", sodium.default_daily_limit_mg),
            ("sodium.meals_per_day", sodium.meals_per_day),
            ("sodium.hypertension_meal_ceiling_mg", sodium.hypertension_meal_ceiling_mg),
            (
                "sodium.hypertension_kidney_meal_ceiling_mg",
                sodium.hypertension_kidney_meal_ceiling_mg,
            ),
            ("carbohydrates.male_weight_loss_g", carbs.male_weight_loss_g),
            ("carbohydrates.male_maintenance_g", carbs.male_maintenance_g),
            ("carbohydrates.female_weight_loss_g", carbs.female_weight_loss_g),
            ("carbohydrates.female_maintenance_g", carbs.female_maintenance_g),
            ("carbohydrates.fiber_buffer_g", carbs.fiber_buffer_g),
            ("carbohydrates.moderate_carbs_g", carbs.moderate_carbs_g),
            ("carbohydrates.low_fiber_g", carbs.low_fiber_g),
            ("potassium.kidney_caution_mg", potassium.kidney_caution_mg),
            ("potassium.kidney_avoid_mg", potassium.kidney_avoid_mg),
            (
                "potassium.blood_pressure_support_min_mg",
                potassium.blood_pressure_support_min_mg,
            ),
            (
                "potassium.blood_pressure_support_max_sodium_mg",
                potassium.blood_pressure_support_max_sodium_mg,
            ),
            ("pcos.added_sugar_max_g", self.pcos.added_sugar_max_g),
            ("pcos.low_fat_g", self.pcos.low_fat_g),
            ("diabetes_kidney.fiber_g", self.diabetes_kidney.fiber_g),
            ("diabetes_kidney.phosphorus_mg", self.diabetes_kidney.phosphorus_mg),
        ]
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        match env::var(env_var_name) {
            Ok(val) => {
                *target = val
                    .parse()
                    .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
                Ok(())
            }
            Err(VarError::NotPresent) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "NUTRIGUARD_SODIUM_DAILY_LIMIT_MG",
            &mut self.sodium.default_daily_limit_mg,
        )?;
        Self::apply_env_var(
            "NUTRIGUARD_SODIUM_MEALS_PER_DAY",
            &mut self.sodium.meals_per_day,
        )?;
        Self::apply_env_var(
            "NUTRIGUARD_SODIUM_HYPERTENSION_MEAL_MG",
            &mut self.sodium.hypertension_meal_ceiling_mg,
        )?;
        Self::apply_env_var(
            "NUTRIGUARD_SODIUM_HYPERTENSION_KIDNEY_MEAL_MG",
            &mut self.sodium.hypertension_kidney_meal_ceiling_mg,
        )?;

        Self::apply_env_var(
            "NUTRIGUARD_CARBS_MALE_WEIGHT_LOSS_G",
            &mut self.carbohydrates.male_weight_loss_g,
        )?;
        Self::apply_env_var(
            "NUTRIGUARD_CARBS_MALE_MAINTENANCE_G",
            &mut self.carbohydrates.male_maintenance_g,
        )?;
        Self::apply_env_var(
            "NUTRIGUARD_CARBS_FEMALE_WEIGHT_LOSS_G",
            &mut self.carbohydrates.female_weight_loss_g,
        )?;
        Self::apply_env_var(
            "NUTRIGUARD_CARBS_FEMALE_MAINTENANCE_G",
            &mut self.carbohydrates.female_maintenance_g,
        )?;
        Self::apply_env_var(
            "NUTRIGUARD_CARBS_FIBER_BUFFER_G",
            &mut self.carbohydrates.fiber_buffer_g,
        )?;

        Self::apply_env_var(
            "NUTRIGUARD_POTASSIUM_KIDNEY_CAUTION_MG",
            &mut self.potassium.kidney_caution_mg,
        )?;
        Self::apply_env_var(
            "NUTRIGUARD_POTASSIUM_KIDNEY_AVOID_MG",
            &mut self.potassium.kidney_avoid_mg,
        )?;

        Self::apply_env_var(
            "NUTRIGUARD_PCOS_ADDED_SUGAR_MAX_G",
            &mut self.pcos.added_sugar_max_g,
        )?;

        Self::apply_env_var(
            "NUTRIGUARD_DIABETES_KIDNEY_FIBER_G",
            &mut self.diabetes_kidney.fiber_g,
        )?;
        Self::apply_env_var(
            "NUTRIGUARD_DIABETES_KIDNEY_PHOSPHORUS_MG",
            &mut self.diabetes_kidney.phosphorus_mg,
        )?;

        Ok(self)
    }
}
