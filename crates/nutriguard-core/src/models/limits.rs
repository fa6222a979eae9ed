// ABOUTME: Per-condition nutrient limit records and their typed numeric interpretation
// ABOUTME: Parses stored MAX/MIN/RANGE/TEXT rows into LimitSpec so TEXT never reaches numeric code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Stored limit type column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LimitType {
    /// Daily ceiling
    Max,
    /// Daily floor
    Min,
    /// Inclusive `lo-hi` band
    Range,
    /// Free-text guidance with no numeric meaning
    Text,
}

/// One stored constraint on one nutrient for one condition
///
/// `limit_value` is kept as the raw stored string; call [`NutrientLimit::spec`]
/// to obtain the typed interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientLimit {
    /// Owning condition record id
    pub condition_id: Uuid,
    /// Free-form nutrient label, e.g. `Sodium`
    pub nutrient: String,
    /// How `limit_value` should be read
    pub limit_type: LimitType,
    /// Raw encoded value: a number, `lo-hi`, or free text
    pub limit_value: String,
    /// Optional unit (mg, g, kcal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl NutrientLimit {
    /// Interpret the stored value according to its limit type
    ///
    /// # Errors
    ///
    /// Returns [`LimitParseError`] when a MAX/MIN/RANGE value is not numeric,
    /// negative, non-finite, or a range whose bounds are out of order.
    pub fn spec(&self) -> Result<LimitSpec, LimitParseError> {
        LimitSpec::parse(self.limit_type, &self.limit_value)
    }
}

/// Typed limit: numeric variants can never carry free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum LimitSpec {
    /// Value must not exceed
    Max {
        /// Ceiling
        value: f64,
    },
    /// Value must reach at least
    Min {
        /// Floor
        value: f64,
    },
    /// Value must fall within `[low, high]`
    Range {
        /// Lower bound
        low: f64,
        /// Upper bound
        high: f64,
    },
    /// Guidance text only
    Text {
        /// Verbatim guidance
        text: String,
    },
}

impl LimitSpec {
    /// Parse a raw stored value for the given limit type
    ///
    /// # Errors
    ///
    /// See [`NutrientLimit::spec`].
    pub fn parse(limit_type: LimitType, raw: &str) -> Result<Self, LimitParseError> {
        match limit_type {
            LimitType::Max => parse_number(raw).map(|value| Self::Max { value }),
            LimitType::Min => parse_number(raw).map(|value| Self::Min { value }),
            LimitType::Range => {
                let (low, high) = split_range(raw)?;
                if low > high {
                    return Err(LimitParseError::InvertedRange { low, high });
                }
                Ok(Self::Range { low, high })
            }
            LimitType::Text => Ok(Self::Text {
                text: raw.trim().to_owned(),
            }),
        }
    }

    /// Numeric bounds as a half-open interval, `None` for TEXT
    #[must_use]
    pub const fn bounds(&self) -> Option<(Option<f64>, Option<f64>)> {
        match self {
            Self::Max { value } => Some((None, Some(*value))),
            Self::Min { value } => Some((Some(*value), None)),
            Self::Range { low, high } => Some((Some(*low), Some(*high))),
            Self::Text { .. } => None,
        }
    }
}

impl fmt::Display for LimitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Max { value } => write!(f, "max {value}"),
            Self::Min { value } => write!(f, "min {value}"),
            Self::Range { low, high } => write!(f, "{low}-{high}"),
            Self::Text { text } => f.write_str(text),
        }
    }
}

/// Why a stored limit value could not be interpreted numerically
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LimitParseError {
    /// Value is empty or whitespace
    #[error("limit value is empty")]
    Empty,
    /// Value is not a number
    #[error("'{0}' is not a number")]
    NotNumeric(String),
    /// Value is negative or non-finite
    #[error("{0} is not a valid non-negative amount")]
    OutOfRange(f64),
    /// Range value is not of the form `lo-hi`
    #[error("'{0}' is not a range of the form lo-hi")]
    MalformedRange(String),
    /// Range lower bound exceeds upper bound
    #[error("range lower bound {low} exceeds upper bound {high}")]
    InvertedRange {
        /// Parsed lower bound
        low: f64,
        /// Parsed upper bound
        high: f64,
    },
}

fn parse_number(raw: &str) -> Result<f64, LimitParseError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(LimitParseError::Empty);
    }
    let value: f64 = cleaned
        .parse()
        .map_err(|_| LimitParseError::NotNumeric(raw.trim().to_owned()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(LimitParseError::OutOfRange(value));
    }
    Ok(value)
}

fn split_range(raw: &str) -> Result<(f64, f64), LimitParseError> {
    let normalized = raw.trim().replace(['\u{2013}', '\u{2014}'], "-");
    let parts: Vec<&str> = if normalized.contains(" to ") {
        normalized.split(" to ").collect()
    } else {
        normalized.split('-').collect()
    };

    match parts.as_slice() {
        [low, high] => Ok((parse_number(low)?, parse_number(high)?)),
        _ if normalized.is_empty() => Err(LimitParseError::Empty),
        _ => Err(LimitParseError::MalformedRange(raw.trim().to_owned())),
    }
}
