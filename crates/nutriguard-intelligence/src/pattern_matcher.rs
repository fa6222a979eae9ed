// ABOUTME: Additive category detection over free-form ingredient label text
// ABOUTME: Fixed phosphate, potassium, sodium, hidden sugar, trans fat, and nitrite pattern tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Ingredient Pattern Matcher
//!
//! Each additive category is one case-insensitive alternation of ingredient
//! synonyms, compiled once per process. Matching is pure: the same text always
//! yields the same categories, and empty text yields nothing.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;
use tracing::warn;

/// Additive categories recognised in ingredient text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdditiveCategory {
    /// Inorganic phosphate additives (near-complete absorption)
    PhosphateAdditive,
    /// Potassium salts used as additives or salt substitutes
    PotassiumAdditive,
    /// Sodium-bearing additives and salt
    SodiumAdditive,
    /// Sugars listed under other names
    HiddenSugar,
    /// Partially hydrogenated fats
    TransFat,
    /// Curing agents
    Nitrites,
}

impl AdditiveCategory {
    /// Every category, in evaluation order
    pub const ALL: [Self; 6] = [
        Self::PhosphateAdditive,
        Self::PotassiumAdditive,
        Self::SodiumAdditive,
        Self::HiddenSugar,
        Self::TransFat,
        Self::Nitrites,
    ];

    /// Stable identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PhosphateAdditive => "phosphate_additive",
            Self::PotassiumAdditive => "potassium_additive",
            Self::SodiumAdditive => "sodium_additive",
            Self::HiddenSugar => "hidden_sugar",
            Self::TransFat => "trans_fat",
            Self::Nitrites => "nitrites",
        }
    }

    /// Ingredient synonyms for this category, as regex alternatives
    ///
    /// Longer phrases come first so the reported match is the full phrase.
    #[must_use]
    pub const fn patterns(&self) -> &'static [&'static str] {
        match self {
            Self::PhosphateAdditive => PHOSPHATE_PATTERNS,
            Self::PotassiumAdditive => POTASSIUM_PATTERNS,
            Self::SodiumAdditive => SODIUM_PATTERNS,
            Self::HiddenSugar => HIDDEN_SUGAR_PATTERNS,
            Self::TransFat => TRANS_FAT_PATTERNS,
            Self::Nitrites => NITRITE_PATTERNS,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::PhosphateAdditive => 0,
            Self::PotassiumAdditive => 1,
            Self::SodiumAdditive => 2,
            Self::HiddenSugar => 3,
            Self::TransFat => 4,
            Self::Nitrites => 5,
        }
    }
}

impl fmt::Display for AdditiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PHOSPHATE_PATTERNS: &[&str] = &[
    r"phosphoric\s+acid",
    r"(?:(?:mono|di|tri|tetra)?(?:sodium|potassium|calcium|aluminum|magnesium|ammonium)\s+)+[a-z]*phosphates?",
    r"[a-z]*phosphates?",
];

const POTASSIUM_PATTERNS: &[&str] = &[
    r"potassium\s+(?:chloride|citrate|lactate|bicarbonate|carbonate|hydroxide|alginate|sorbate|benzoate|iodide)",
    r"salt\s+substitute",
];

const SODIUM_PATTERNS: &[&str] = &[
    r"monosodium\s+glutamate",
    r"msg",
    r"sodium\s+(?:benzoate|nitrite|nitrate|bicarbonate|citrate|chloride|erythorbate|ascorbate|caseinate|alginate|diacetate|lactate|propionate)",
    r"baking\s+(?:soda|powder)",
    r"soy\s+sauce",
    r"(?:sea\s+|kosher\s+)?salt",
    r"brine",
];

const HIDDEN_SUGAR_PATTERNS: &[&str] = &[
    r"high[\s-]fructose\s+corn\s+syrup",
    r"hfcs",
    r"corn\s+syrup(?:\s+solids)?",
    r"(?:brown\s+)?rice\s+syrup",
    r"barley\s+malt(?:\s+syrup)?",
    r"(?:evaporated\s+)?cane\s+(?:juice|sugar)",
    r"[a-z]+\s+juice\s+concentrate",
    r"invert\s+sugar",
    r"(?:brown|raw|powdered|turbinado)\s+sugar",
    r"agave(?:\s+nectar)?",
    r"maltodextrin",
    r"dextrose|maltose|sucrose|fructose|glucose|galactose",
    r"molasses",
    r"honey",
];

const TRANS_FAT_PATTERNS: &[&str] = &[
    r"partially[\s-]hydrogenated(?:\s+[a-z]+)*?\s+oils?",
    r"partially[\s-]hydrogenated",
    r"vegetable\s+shortening",
    r"shortening",
];

const NITRITE_PATTERNS: &[&str] = &[
    r"(?:sodium|potassium)\s+nitr(?:ite|ate)s?",
    r"nitr(?:ite|ate)s?",
    r"celery\s+(?:juice\s+)?powder",
];

/// Compiled category alternations, indexed by `AdditiveCategory::index`
///
/// Stored as Option so a compilation failure disables only that category.
static CATEGORY_PATTERNS: LazyLock<[Option<Regex>; 6]> =
    LazyLock::new(|| AdditiveCategory::ALL.map(compile_category));

fn compile_category(category: AdditiveCategory) -> Option<Regex> {
    let source = format!(r"(?i)\b(?:{})\b", category.patterns().join("|"));
    match Regex::new(&source) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(category = %category, error = %e, "Additive pattern failed to compile");
            None
        }
    }
}

fn category_regex(category: AdditiveCategory) -> Option<&'static Regex> {
    CATEGORY_PATTERNS[category.index()].as_ref()
}

/// Categories whose patterns occur anywhere in the ingredient text
#[must_use]
pub fn match_categories(ingredient_text: &str) -> BTreeSet<AdditiveCategory> {
    if ingredient_text.trim().is_empty() {
        return BTreeSet::new();
    }
    AdditiveCategory::ALL
        .into_iter()
        .filter(|category| matches_category(ingredient_text, *category))
        .collect()
}

/// Whether a single category occurs in the ingredient text
#[must_use]
pub fn matches_category(ingredient_text: &str, category: AdditiveCategory) -> bool {
    category_regex(category).is_some_and(|regex| regex.is_match(ingredient_text))
}

/// The distinct ingredient phrases that matched a category
///
/// Phrases are lowercased, whitespace-collapsed, and listed in order of first
/// appearance.
#[must_use]
pub fn found_patterns(ingredient_text: &str, category: AdditiveCategory) -> Vec<String> {
    category_regex(category)
        .map(|regex| matched_terms(regex, ingredient_text))
        .unwrap_or_default()
}

/// Distinct matches of any regex in text, normalised for display
#[must_use]
pub fn matched_terms(regex: &Regex, text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    regex
        .find_iter(text)
        .map(|m| {
            m.as_str()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase()
        })
        .filter(|term| !term.is_empty() && seen.insert(term.clone()))
        .collect()
}

/// Every matched category with its matched phrases
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternScan {
    /// Matches grouped by category
    pub matches: Vec<CategoryMatch>,
}

/// Phrases found for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatch {
    /// Matched category
    pub category: AdditiveCategory,
    /// Distinct matched phrases
    pub found: Vec<String>,
}

impl PatternScan {
    /// Scan ingredient text against every category
    #[must_use]
    pub fn scan(ingredient_text: &str) -> Self {
        let matches = match_categories(ingredient_text)
            .into_iter()
            .map(|category| CategoryMatch {
                category,
                found: found_patterns(ingredient_text, category),
            })
            .collect();
        Self { matches }
    }

    /// True when nothing matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
