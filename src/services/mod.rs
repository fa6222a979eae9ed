// ABOUTME: Service layer sitting between callers and the pure engine
// ABOUTME: Holds the per-user restriction profile cache and JSON food batch evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Single-or-batch food evaluation from JSON documents
pub mod food_evaluation;

/// Per-user restriction profile cache
pub mod restriction_cache;

pub use food_evaluation::{evaluate_input, EvaluationOutput, FoodInput};
pub use restriction_cache::{CachedProfile, RestrictionProfileCache};
