// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Nutrient names, condition slug keywords, AI nutrient codes, and verdict strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants grouped by domain. Clinical cutoffs are NOT here: they
//! are policy data owned by the intelligence crate's `PolicyConfig`.

/// Canonical nutrient display names
pub mod nutrients {
    /// Energy (kcal)
    pub const ENERGY: &str = "Energy";
    /// Sodium (mg)
    pub const SODIUM: &str = "Sodium";
    /// Potassium (mg)
    pub const POTASSIUM: &str = "Potassium";
    /// Phosphorus (mg)
    pub const PHOSPHORUS: &str = "Phosphorus";
    /// Protein (g)
    pub const PROTEIN: &str = "Protein";
    /// Total sugar (g)
    pub const SUGAR: &str = "Sugar";
    /// Added sugar (g)
    pub const ADDED_SUGAR: &str = "Added Sugar";
    /// Carbohydrates (g)
    pub const CARBOHYDRATES: &str = "Carbohydrates";
    /// Total fat (g)
    pub const FAT: &str = "Fat";
    /// Saturated fat (g)
    pub const SATURATED_FAT: &str = "Saturated Fat";
    /// Trans fat (g)
    pub const TRANS_FAT: &str = "Trans Fat";
    /// Dietary fiber (g)
    pub const FIBER: &str = "Fiber";
    /// Cholesterol (mg)
    pub const CHOLESTEROL: &str = "Cholesterol";
    /// Calcium (mg)
    pub const CALCIUM: &str = "Calcium";
    /// Iron (mg)
    pub const IRON: &str = "Iron";
    /// Vitamin A (mcg)
    pub const VITAMIN_A: &str = "Vitamin A";
    /// Vitamin C (mg)
    pub const VITAMIN_C: &str = "Vitamin C";
    /// Vitamin D (mcg)
    pub const VITAMIN_D: &str = "Vitamin D";

    /// Canonical name for a free-form nutrient label, case-insensitive
    ///
    /// Returns `None` for labels with no known canonical form.
    #[must_use]
    pub fn canonical_name(label: &str) -> Option<&'static str> {
        let name = match label.trim().to_lowercase().as_str() {
            "energy" | "calories" | "kcal" => ENERGY,
            "sodium" => SODIUM,
            "potassium" => POTASSIUM,
            "phosphorus" | "phosphate" => PHOSPHORUS,
            "protein" => PROTEIN,
            "sugar" | "sugars" | "total sugar" | "total sugars" => SUGAR,
            "added sugar" | "added sugars" => ADDED_SUGAR,
            "carbohydrates" | "carbohydrate" | "carbs" | "total carbohydrate" => CARBOHYDRATES,
            "fat" | "total fat" => FAT,
            "saturated fat" => SATURATED_FAT,
            "trans fat" => TRANS_FAT,
            "fiber" | "fibre" | "dietary fiber" => FIBER,
            "cholesterol" => CHOLESTEROL,
            "calcium" => CALCIUM,
            "iron" => IRON,
            "vitamin a" => VITAMIN_A,
            "vitamin c" => VITAMIN_C,
            "vitamin d" => VITAMIN_D,
            _ => return None,
        };
        Some(name)
    }
}

/// Nutrient codes used by the AI limit generator (Edamam/USDA style)
pub mod nutrient_codes {
    use super::nutrients;

    /// `(code, canonical nutrient name)` pairs
    pub const CODE_TABLE: &[(&str, &str)] = &[
        ("ENERC_KCAL", nutrients::ENERGY),
        ("NA", nutrients::SODIUM),
        ("K", nutrients::POTASSIUM),
        ("P", nutrients::PHOSPHORUS),
        ("PROCNT", nutrients::PROTEIN),
        ("SUGAR", nutrients::SUGAR),
        ("SUGAR.added", nutrients::ADDED_SUGAR),
        ("CHOCDF", nutrients::CARBOHYDRATES),
        ("FAT", nutrients::FAT),
        ("FASAT", nutrients::SATURATED_FAT),
        ("FATRN", nutrients::TRANS_FAT),
        ("FIBTG", nutrients::FIBER),
        ("CHOLE", nutrients::CHOLESTEROL),
        ("CA", nutrients::CALCIUM),
        ("FE", nutrients::IRON),
        ("VITA_RAE", nutrients::VITAMIN_A),
        ("VITC", nutrients::VITAMIN_C),
        ("VITD", nutrients::VITAMIN_D),
    ];

    /// Map an AI nutrient code to its canonical name (case-insensitive)
    #[must_use]
    pub fn nutrient_for_code(code: &str) -> Option<&'static str> {
        let code = code.trim();
        CODE_TABLE
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(code))
            .map(|(_, name)| *name)
    }
}

/// Keywords that classify a condition slug into a condition kind
pub mod condition_keywords {
    /// Chronic kidney disease
    pub const KIDNEY: &[&str] = &["ckd", "kidney", "renal", "nephro", "dialysis"];
    /// Hypertension
    pub const HYPERTENSION: &[&str] = &["hypertension", "htn", "blood-pressure", "high-bp"];
    /// Diabetes (type 1, type 2, prediabetes, gestational)
    pub const DIABETES: &[&str] = &["diabetes", "diabetic", "t1d", "t2d", "prediabet"];
    /// Polycystic ovary syndrome
    pub const PCOS: &[&str] = &["pcos", "polycystic"];
    /// High cholesterol / hyperlipidemia
    pub const HIGH_CHOLESTEROL: &[&str] = &["cholesterol", "hyperlipid", "dyslipid"];
}

/// Provenance labels attached to rows the engine synthesizes itself
pub mod sources {
    /// Contributor label for AI-generated personalized limits
    pub const AI_GENERATED: &str = "ai-generated";
    /// Owner label for exclusions that apply to every condition
    pub const GLOBAL: &str = "global";
    /// Category label for the AI `avoid_ingredients` list
    pub const AI_AVOID_CATEGORY: &str = "Personalized avoid list";
}

/// Fixed user-facing verdict strings
pub mod messages {
    /// Default reason attached to a food that triggered no rule
    pub const FITS_PROFILE: &str = "Fits your profile";
    /// Modification attached to sodium escalations
    pub const AVOID_ADDING_SALT: &str = "Avoid adding salt";
    /// Modification attached to portion-driven tradeoffs
    pub const REDUCE_PORTION: &str = "Reduce portion size";
}
