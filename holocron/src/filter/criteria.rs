//! Filter criteria and parsing of the raw form inputs behind them.

use serde::{Deserialize, Serialize};

use super::numeric::NumericRange;
use crate::catalog::Character;
use crate::errors::FilterError;

/// Gender values the catalogue uses, in display order.
pub const GENDER_OPTIONS: [&str; 5] = ["female", "male", "hermaphrodite", "n/a", "unknown"];

/// Client-side filter criteria. The default admits every character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact, case-insensitive gender to keep.
    #[serde(default)]
    pub gender: Option<String>,
    /// Mass range in kilograms.
    #[serde(default)]
    pub mass: NumericRange,
    /// Height range in centimetres.
    #[serde(default)]
    pub height: NumericRange,
}

impl FilterCriteria {
    /// Creates criteria that admit everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the five text inputs of the filter form.
    ///
    /// Blank inputs leave that criterion unset.
    pub fn from_form(
        gender: &str,
        min_mass: &str,
        max_mass: &str,
        min_height: &str,
        max_height: &str,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            gender: non_blank(gender),
            mass: NumericRange::new(
                parse_bound("min mass", min_mass)?,
                parse_bound("max mass", max_mass)?,
            ),
            height: NumericRange::new(
                parse_bound("min height", min_height)?,
                parse_bound("max height", max_height)?,
            ),
        })
    }

    /// Sets the gender filter; blank clears it.
    #[must_use]
    pub fn with_gender(mut self, gender: impl AsRef<str>) -> Self {
        self.gender = non_blank(gender.as_ref());
        self
    }

    /// Sets the mass range.
    #[must_use]
    pub fn with_mass(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.mass = NumericRange::new(min, max);
        self
    }

    /// Sets the height range.
    #[must_use]
    pub fn with_height(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.height = NumericRange::new(min, max);
        self
    }

    /// Whether no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gender.is_none() && self.mass.is_unbounded() && self.height.is_unbounded()
    }

    /// Gender check alone.
    #[must_use]
    pub fn matches_gender(&self, character: &Character) -> bool {
        self.gender
            .as_deref()
            .map_or(true, |wanted| character.gender.to_lowercase() == wanted.to_lowercase())
    }

    /// Whether `character` passes gender, mass and height.
    #[must_use]
    pub fn matches(&self, character: &Character) -> bool {
        let gender = self.matches_gender(character);
        let mass = self.mass.admits(&character.mass);
        let height = self.height.admits(&character.height);
        gender && mass && height
    }
}

fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_bound(field: &str, input: &str) -> Result<Option<f64>, FilterError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| FilterError::new(field, input))
}
