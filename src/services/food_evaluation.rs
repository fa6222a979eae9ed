// ABOUTME: Evaluates one food or a batch of foods read from a single JSON document
// ABOUTME: Accepts an object or an array and mirrors that shape in the verdict output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutriguard_core::errors::{AppError, AppResult};
use nutriguard_core::models::{AnalysisResult, FoodItem, UserProfile};
use nutriguard_intelligence::{ConflictEngine, RestrictionProfile};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

/// Foods from one JSON document
#[derive(Debug, Clone, PartialEq)]
pub enum FoodInput {
    /// A single food object
    One(FoodItem),
    /// An array of foods
    Many(Vec<FoodItem>),
}

impl FoodInput {
    /// Interpret a JSON document as one food or an array of foods
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for documents that are neither an object
    /// nor an array, and a serialization error when an element is not a food.
    pub fn from_value(value: Value) -> AppResult<Self> {
        let kind = match value {
            Value::Object(_) => return Ok(Self::One(serde_json::from_value(value)?)),
            Value::Array(_) => return Ok(Self::Many(serde_json::from_value(value)?)),
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
        };
        Err(
            AppError::invalid_input("food input must be a JSON object or an array of objects")
                .with_details(json!({ "found": kind })),
        )
    }

    /// Number of foods
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(foods) => foods.len(),
        }
    }

    /// True for an empty array
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Verdicts in the same shape as the input
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EvaluationOutput {
    /// Verdict for a single food
    One(AnalysisResult),
    /// Verdicts in input order
    Many(Vec<AnalysisResult>),
}

/// Evaluate every food in the input against the profile and its restrictions
#[must_use]
pub fn evaluate_input(
    engine: &ConflictEngine,
    input: &FoodInput,
    profile: &UserProfile,
    restrictions: &RestrictionProfile,
) -> EvaluationOutput {
    match input {
        FoodInput::One(food) => EvaluationOutput::One(engine.evaluate_with_restrictions(
            food,
            profile,
            restrictions,
        )),
        FoodInput::Many(foods) => {
            info!(count = foods.len(), "Evaluating foods");
            EvaluationOutput::Many(engine.evaluate_many(foods, profile, Some(restrictions)))
        }
    }
}
