// ABOUTME: Personalized limits returned by the external AI limit generator
// ABOUTME: Raw JSON fields are validated as numbers before any numeric use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{nutrient_codes, nutrients};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw `{min?, max?}` pair as produced by the generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBounds {
    /// Lower bound, expected numeric
    #[serde(default)]
    pub min: Option<Value>,
    /// Upper bound, expected numeric
    #[serde(default)]
    pub max: Option<Value>,
}

/// AI-generated limit payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedLimits {
    /// Daily calorie band
    pub daily_calories: RawBounds,
    /// Per-nutrient bounds keyed by nutrient code (NA, K, P, PROCNT, ...)
    pub nutrients: BTreeMap<String, RawBounds>,
    /// Ingredients the generator says to avoid
    pub avoid_ingredients: Vec<String>,
    /// Short explanation from the generator
    pub reasoning: String,
}

/// One nutrient's validated numeric bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedBounds {
    /// Canonical nutrient name
    pub nutrient: String,
    /// Source code from the payload
    pub code: String,
    /// Validated lower bound
    pub min: Option<f64>,
    /// Validated upper bound
    pub max: Option<f64>,
}

/// A payload field that could not be used numerically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedField {
    /// Nutrient code (or `daily_calories`)
    pub code: String,
    /// `min`, `max`, or `code` for unknown nutrient codes
    pub field: String,
    /// Raw value as received
    pub raw: String,
}

impl ComputedLimits {
    /// Parse a generator payload
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the payload is not a JSON object of the
    /// expected shape.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every bound, splitting usable numbers from rejected fields
    ///
    /// Unknown nutrient codes and non-numeric, negative, or non-finite values
    /// are rejected. Output is ordered by canonical nutrient name.
    #[must_use]
    pub fn validate(&self) -> (Vec<ValidatedBounds>, Vec<RejectedField>) {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        let mut entries: Vec<(&str, &str, &RawBounds)> = Vec::new();
        entries.push(("daily_calories", nutrients::ENERGY, &self.daily_calories));
        for (code, bounds) in &self.nutrients {
            match nutrient_codes::nutrient_for_code(code) {
                Some(nutrient) => entries.push((code.as_str(), nutrient, bounds)),
                None => rejected.push(RejectedField {
                    code: code.clone(),
                    field: "code".into(),
                    raw: code.clone(),
                }),
            }
        }

        for (code, nutrient, bounds) in entries {
            let min = validate_field(code, "min", bounds.min.as_ref(), &mut rejected);
            let max = validate_field(code, "max", bounds.max.as_ref(), &mut rejected);
            if min.is_some() || max.is_some() {
                accepted.push(ValidatedBounds {
                    nutrient: nutrient.to_owned(),
                    code: code.to_owned(),
                    min,
                    max,
                });
            }
        }

        accepted.sort_by(|a, b| a.nutrient.cmp(&b.nutrient).then(a.code.cmp(&b.code)));
        (accepted, rejected)
    }
}

fn validate_field(
    code: &str,
    field: &str,
    value: Option<&Value>,
    rejected: &mut Vec<RejectedField>,
) -> Option<f64> {
    let value = value?;
    if value.is_null() {
        return None;
    }
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() && v >= 0.0 => Some(v),
        _ => {
            rejected.push(RejectedField {
                code: code.to_owned(),
                field: field.to_owned(),
                raw: value.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_splits_numeric_and_rejected() {
        let limits = ComputedLimits::from_json(
            r#"{
                "daily_calories": {"min": 1600, "max": "2000"},
                "nutrients": {
                    "NA": {"max": 1500},
                    "K": {"min": "about 2000", "max": 3000},
                    "XYZ": {"max": 1}
                },
                "avoid_ingredients": ["starfruit"],
                "reasoning": "CKD with hypertension"
            }"#,
        )
        .unwrap();

        let (accepted, rejected) = limits.validate();
        let names: Vec<&str> = accepted.iter().map(|b| b.nutrient.as_str()).collect();
        assert_eq!(names, vec!["Energy", "Potassium", "Sodium"]);

        let potassium = accepted.iter().find(|b| b.code == "K").unwrap();
        assert_eq!(potassium.min, None);
        assert_eq!(potassium.max, Some(3000.0));

        assert_eq!(rejected.len(), 2);
        assert!(rejected.iter().any(|r| r.code == "XYZ" && r.field == "code"));
        assert!(rejected.iter().any(|r| r.code == "K" && r.field == "min"));
    }
}
