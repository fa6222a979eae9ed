// ABOUTME: Food item input model with lenient nutrient parsing and ingredient splitting
// ABOUTME: Malformed, negative, or NaN nutrient values are normalized to zero rather than rejected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::nutrients;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Food item under evaluation: nutrient values plus raw ingredient text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Food or recipe name
    #[serde(default)]
    pub name: String,
    /// Nutrient values per serving
    #[serde(default)]
    pub nutrients: NutrientValues,
    /// Comma-joined ingredient list as printed on a label or recipe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
}

impl FoodItem {
    /// Create a named food with no nutrient data
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach ingredient text
    #[must_use]
    pub fn with_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = Some(ingredients.into());
        self
    }

    /// Attach nutrient values
    #[must_use]
    pub const fn with_nutrients(mut self, nutrients: NutrientValues) -> Self {
        self.nutrients = nutrients;
        self
    }

    /// Lowercased ingredient text, empty when absent
    #[must_use]
    pub fn ingredient_text(&self) -> String {
        self.ingredients
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default()
    }

    /// Individual ingredient names split on commas, semicolons, and parentheses
    #[must_use]
    pub fn ingredient_list(&self) -> Vec<String> {
        split_ingredients(self.ingredients.as_deref().unwrap_or_default())
    }
}

/// Split a label ingredient string into trimmed lowercase ingredient names
#[must_use]
pub fn split_ingredients(text: &str) -> Vec<String> {
    text.split([',', ';', '(', ')', '[', ']'])
        .map(|part| part.trim().trim_end_matches('.').trim().to_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Nutrient values for one serving
///
/// Units: energy kcal; sodium, potassium, phosphorus, cholesterol, calcium,
/// iron and vitamin C in mg; vitamins A and D in mcg; everything else in g.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientValues {
    /// Energy (kcal)
    #[serde(deserialize_with = "lenient_amount")]
    pub calories: f64,
    /// Carbohydrates (g)
    #[serde(deserialize_with = "lenient_amount")]
    pub carbs_g: f64,
    /// Protein (g)
    #[serde(deserialize_with = "lenient_amount")]
    pub protein_g: f64,
    /// Total fat (g)
    #[serde(deserialize_with = "lenient_amount")]
    pub fat_g: f64,
    /// Total sugar (g)
    #[serde(deserialize_with = "lenient_amount")]
    pub sugar_g: f64,
    /// Added sugar (g)
    #[serde(deserialize_with = "lenient_amount")]
    pub added_sugar_g: f64,
    /// Dietary fiber (g)
    #[serde(deserialize_with = "lenient_amount")]
    pub fiber_g: f64,
    /// Sodium (mg)
    #[serde(deserialize_with = "lenient_amount")]
    pub sodium_mg: f64,
    /// Potassium (mg)
    #[serde(deserialize_with = "lenient_amount")]
    pub potassium_mg: f64,
    /// Phosphorus (mg)
    #[serde(deserialize_with = "lenient_amount")]
    pub phosphorus_mg: f64,
    /// Saturated fat (g)
    #[serde(deserialize_with = "lenient_amount")]
    pub saturated_fat_g: f64,
    /// Trans fat (g)
    #[serde(deserialize_with = "lenient_amount")]
    pub trans_fat_g: f64,
    /// Cholesterol (mg)
    #[serde(deserialize_with = "lenient_amount")]
    pub cholesterol_mg: f64,
    /// Calcium (mg)
    #[serde(deserialize_with = "lenient_amount")]
    pub calcium_mg: f64,
    /// Iron (mg)
    #[serde(deserialize_with = "lenient_amount")]
    pub iron_mg: f64,
    /// Vitamin A (mcg)
    #[serde(deserialize_with = "lenient_amount")]
    pub vitamin_a_mcg: f64,
    /// Vitamin C (mg)
    #[serde(deserialize_with = "lenient_amount")]
    pub vitamin_c_mg: f64,
    /// Vitamin D (mcg)
    #[serde(deserialize_with = "lenient_amount")]
    pub vitamin_d_mcg: f64,
}

impl NutrientValues {
    /// Copy with every negative or non-finite field clamped to zero
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            calories: clamp_amount(self.calories),
            carbs_g: clamp_amount(self.carbs_g),
            protein_g: clamp_amount(self.protein_g),
            fat_g: clamp_amount(self.fat_g),
            sugar_g: clamp_amount(self.sugar_g),
            added_sugar_g: clamp_amount(self.added_sugar_g),
            fiber_g: clamp_amount(self.fiber_g),
            sodium_mg: clamp_amount(self.sodium_mg),
            potassium_mg: clamp_amount(self.potassium_mg),
            phosphorus_mg: clamp_amount(self.phosphorus_mg),
            saturated_fat_g: clamp_amount(self.saturated_fat_g),
            trans_fat_g: clamp_amount(self.trans_fat_g),
            cholesterol_mg: clamp_amount(self.cholesterol_mg),
            calcium_mg: clamp_amount(self.calcium_mg),
            iron_mg: clamp_amount(self.iron_mg),
            vitamin_a_mcg: clamp_amount(self.vitamin_a_mcg),
            vitamin_c_mg: clamp_amount(self.vitamin_c_mg),
            vitamin_d_mcg: clamp_amount(self.vitamin_d_mcg),
        }
    }

    /// Look up a value by free-form nutrient name (case-insensitive)
    ///
    /// Returns `None` for nutrients this model does not track.
    #[must_use]
    pub fn amount_for(&self, nutrient: &str) -> Option<f64> {
        let name = nutrients::canonical_name(nutrient)?;
        self.entries()
            .into_iter()
            .find(|(canonical, _)| *canonical == name)
            .map(|(_, value)| clamp_amount(value))
    }

    /// Canonical `(name, value)` pairs for display
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 18] {
        [
            (nutrients::ENERGY, self.calories),
            (nutrients::CARBOHYDRATES, self.carbs_g),
            (nutrients::PROTEIN, self.protein_g),
            (nutrients::FAT, self.fat_g),
            (nutrients::SUGAR, self.sugar_g),
            (nutrients::ADDED_SUGAR, self.added_sugar_g),
            (nutrients::FIBER, self.fiber_g),
            (nutrients::SODIUM, self.sodium_mg),
            (nutrients::POTASSIUM, self.potassium_mg),
            (nutrients::PHOSPHORUS, self.phosphorus_mg),
            (nutrients::SATURATED_FAT, self.saturated_fat_g),
            (nutrients::TRANS_FAT, self.trans_fat_g),
            (nutrients::CHOLESTEROL, self.cholesterol_mg),
            (nutrients::CALCIUM, self.calcium_mg),
            (nutrients::IRON, self.iron_mg),
            (nutrients::VITAMIN_A, self.vitamin_a_mcg),
            (nutrients::VITAMIN_C, self.vitamin_c_mg),
            (nutrients::VITAMIN_D, self.vitamin_d_mcg),
        ]
    }
}

/// Clamp a nutrient amount: negative and non-finite values become zero
#[must_use]
pub fn clamp_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Accept a number, a numeric string, `null`, or anything else (treated as zero)
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let value = match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_alphabetic())
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(clamp_amount(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_deserialization() {
        let values: NutrientValues = serde_json::from_str(
            r#"{"sodium_mg": "450mg", "potassium_mg": -20, "fiber_g": "lots", "carbs_g": null, "protein_g": 12.5}"#,
        )
        .unwrap();
        assert!((values.sodium_mg - 450.0).abs() < f64::EPSILON);
        assert!(values.potassium_mg.abs() < f64::EPSILON);
        assert!(values.fiber_g.abs() < f64::EPSILON);
        assert!(values.carbs_g.abs() < f64::EPSILON);
        assert!((values.protein_g - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sanitized_clamps_nan() {
        let values = NutrientValues {
            sodium_mg: f64::NAN,
            sugar_g: -3.0,
            ..NutrientValues::default()
        }
        .sanitized();
        assert!(values.sodium_mg.abs() < f64::EPSILON);
        assert!(values.sugar_g.abs() < f64::EPSILON);
    }

    #[test]
    fn test_amount_for_accepts_label_aliases() {
        let values = NutrientValues {
            carbs_g: 120.0,
            fat_g: 4.0,
            sugar_g: -1.0,
            ..NutrientValues::default()
        };
        assert_eq!(values.amount_for("Carbs"), Some(120.0));
        assert_eq!(values.amount_for(" Total Fat"), Some(4.0));
        assert_eq!(values.amount_for("Sugars"), Some(0.0));
        assert_eq!(values.amount_for("Purines"), None);
    }

    #[test]
    fn test_split_ingredients() {
        let parts = split_ingredients("Water, Enriched Flour (Wheat Flour, Niacin); Salt.");
        assert_eq!(parts, vec!["water", "enriched flour", "wheat flour", "niacin", "salt"]);
    }
}
