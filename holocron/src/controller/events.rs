//! Messages from the presentation layer to the controller.

use serde::{Deserialize, Serialize};

use crate::filter::FilterCriteria;

/// A user action forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchEvent {
    /// The search box text changed.
    QueryChanged {
        /// New text, untrimmed.
        text: String,
    },
    /// The gender selector changed; blank clears it.
    GenderChanged {
        /// Selected gender.
        gender: String,
    },
    /// Either mass bound changed.
    MassRangeChanged {
        /// Lower bound.
        min: Option<f64>,
        /// Upper bound.
        max: Option<f64>,
    },
    /// Either height bound changed.
    HeightRangeChanged {
        /// Lower bound.
        min: Option<f64>,
        /// Upper bound.
        max: Option<f64>,
    },
    /// All criteria replaced at once.
    CriteriaReplaced {
        /// New criteria.
        criteria: FilterCriteria,
    },
    /// The "load all" button was pressed.
    LoadAllRequested,
}

impl SearchEvent {
    /// Shorthand for [`SearchEvent::QueryChanged`].
    #[must_use]
    pub fn query(text: impl Into<String>) -> Self {
        Self::QueryChanged { text: text.into() }
    }
}
