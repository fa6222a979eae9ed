// ABOUTME: Grain phosphorus bioavailability tiers for kidney-disease reasoning
// ABOUTME: Classifies a grain or starch ingredient as OPTIMAL, MODERATE, CONDITIONAL, or AVOID
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Bioavailability Classifier
//!
//! Informational only. The tier feeds grain notes in the conflict engine and
//! never sets a verdict by itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phosphorus absorption burden of a grain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrainTier {
    /// Lower phosphorus absorption burden, high fiber
    Optimal,
    /// Whole grains with moderate phytate-bound phosphorus
    Moderate,
    /// Low phosphorus but high glycemic index
    Conditional,
    /// Anything not otherwise classified
    Avoid,
}

impl GrainTier {
    /// Stable identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Optimal => "OPTIMAL",
            Self::Moderate => "MODERATE",
            Self::Conditional => "CONDITIONAL",
            Self::Avoid => "AVOID",
        }
    }
}

impl fmt::Display for GrainTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const OPTIMAL_GRAINS: &[&str] = &["bulgur", "barley", "buckwheat", "couscous", "millet"];

const MODERATE_GRAINS: &[&str] = &["brown rice", "wild rice", "oat", "quinoa", "amaranth"];

const CONDITIONAL_GRAINS: &[&str] = &["white rice", "white bread", "refined"];

/// Words that mark an ingredient as a grain or starch worth classifying
const GRAIN_MARKERS: &[&str] = &[
    "grain", "rice", "wheat", "flour", "bread", "pasta", "noodle", "corn", "maize", "rye",
    "cereal", "cracker", "tortilla", "bran", "semolina", "spelt", "sorghum", "teff", "polenta",
];

/// Classify a grain ingredient name
///
/// Checked in tier order, so "brown rice" is MODERATE even though it also
/// contains "rice". Unrecognised names fall back to AVOID.
#[must_use]
pub fn classify_grain(ingredient_name: &str) -> GrainTier {
    let name = ingredient_name.trim().to_lowercase();
    let contains_any = |terms: &[&str]| terms.iter().any(|term| has_term(&name, term));

    if contains_any(OPTIMAL_GRAINS) {
        GrainTier::Optimal
    } else if contains_any(MODERATE_GRAINS) {
        GrainTier::Moderate
    } else if contains_any(CONDITIONAL_GRAINS) {
        GrainTier::Conditional
    } else if name.contains("whole") || name.contains("grain") {
        GrainTier::Moderate
    } else {
        GrainTier::Avoid
    }
}

/// Whether an ingredient names a grain or starch at all
///
/// Used to keep grain notes away from non-grain ingredients, which would
/// otherwise all land in the AVOID fallback.
#[must_use]
pub fn looks_like_grain(ingredient_name: &str) -> bool {
    let name = ingredient_name.trim().to_lowercase();
    OPTIMAL_GRAINS
        .iter()
        .chain(MODERATE_GRAINS)
        .chain(GRAIN_MARKERS)
        .any(|term| has_term(&name, term))
}

/// Term occurs at the start of a word ("oats" yes, "goat" no)
fn has_term(name: &str, term: &str) -> bool {
    name.match_indices(term)
        .any(|(i, _)| !matches!(name[..i].chars().next_back(), Some(c) if c.is_alphabetic()))
}

/// Swap suggestion for grains outside the preferred tier
pub const PREFERRED_SWAP: &str = "bulgur, barley, or buckwheat";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order() {
        assert_eq!(classify_grain("Bulgur wheat"), GrainTier::Optimal);
        assert_eq!(classify_grain("brown rice"), GrainTier::Moderate);
        assert_eq!(classify_grain("rolled oats"), GrainTier::Moderate);
        assert_eq!(classify_grain("white rice"), GrainTier::Conditional);
        assert_eq!(classify_grain("refined wheat flour"), GrainTier::Conditional);
        assert_eq!(classify_grain("whole wheat flour"), GrainTier::Moderate);
        assert_eq!(classify_grain("cornmeal"), GrainTier::Avoid);
        assert_eq!(classify_grain(""), GrainTier::Avoid);
    }

    #[test]
    fn test_looks_like_grain() {
        assert!(looks_like_grain("enriched wheat flour"));
        assert!(looks_like_grain("millet"));
        assert!(!looks_like_grain("water"));
        assert!(!looks_like_grain("salt"));
        assert!(!looks_like_grain("goat cheese"));
        assert!(!looks_like_grain("black licorice"));
        assert!(!looks_like_grain("ground peppercorn"));
    }
}
