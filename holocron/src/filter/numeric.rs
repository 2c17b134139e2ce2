//! Numeric interpretation of catalogue measurements.

use serde::{Deserialize, Serialize};

/// Grouping character the catalogue uses in large numbers ("1,358").
pub const THOUSANDS_SEPARATOR: char = ',';

/// Parses a measurement such as `"77"`, `"1,358"` or `"78.2"`.
///
/// Returns `None` for blank text, `"unknown"`, `"n/a"` and anything else that
/// is not a finite number once separators are stripped.
#[must_use]
pub fn parse_measurement(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| *c != THOUSANDS_SEPARATOR).collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// An inclusive range over a measurement. Either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    /// Lower bound, inclusive.
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound, inclusive.
    #[serde(default)]
    pub max: Option<f64>,
}

impl NumericRange {
    /// A range with no bounds; admits everything.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Creates a range from optional bounds.
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Whether neither bound is set.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether the measurement text falls inside the range.
    ///
    /// An unbounded range never inspects the text. A bounded range rejects
    /// text that does not parse.
    #[must_use]
    pub fn admits(&self, text: &str) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(value) = parse_measurement(text) else {
            return false;
        };
        if self.min.is_some_and(|min| value < min) {
            return false;
        }
        if self.max.is_some_and(|max| value > max) {
            return false;
        }
        true
    }
}
