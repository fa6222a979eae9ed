// ABOUTME: Safety verdict types produced by the conflict engine
// ABOUTME: Ordered SafetyStatus (Safe < Caution < Avoid) and the AnalysisResult payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::food::NutrientValues;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Food safety verdict, ordered by severity
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyStatus {
    /// Fits the profile
    #[default]
    Safe,
    /// Acceptable with care or modification
    Caution,
    /// Should not be eaten
    Avoid,
}

impl SafetyStatus {
    /// The more severe of two statuses
    #[must_use]
    pub fn escalate(self, other: Self) -> Self {
        self.max(other)
    }

    /// Uppercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Caution => "CAUTION",
            Self::Avoid => "AVOID",
        }
    }
}

impl fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine output for one food evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Highest severity reached across every rule
    pub status: SafetyStatus,
    /// Human-readable reasons in the order rules fired
    pub reasons: Vec<String>,
    /// Suggested modifications, de-duplicated, in the order rules fired
    pub modifications: Vec<String>,
    /// Copy of the evaluated nutrient data for display
    pub nutrients: NutrientValues,
}

impl AnalysisResult {
    /// True when the verdict is `Safe`
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.status == SafetyStatus::Safe
    }

    /// True when any reason contains the needle (case-insensitive)
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.reasons
            .iter()
            .any(|reason| reason.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering() {
        assert!(SafetyStatus::Safe < SafetyStatus::Caution);
        assert!(SafetyStatus::Caution < SafetyStatus::Avoid);
        assert_eq!(
            SafetyStatus::Avoid.escalate(SafetyStatus::Caution),
            SafetyStatus::Avoid
        );
        assert_eq!(
            SafetyStatus::Safe.escalate(SafetyStatus::Caution),
            SafetyStatus::Caution
        );
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&SafetyStatus::Caution).unwrap();
        assert_eq!(json, "\"CAUTION\"");
    }
}
