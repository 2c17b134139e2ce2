//! Typed search lifecycle events.

use serde::Serialize;

use crate::errors::{NetworkError, NetworkErrorKind};
use crate::filter::FilterCriteria;

use super::{
    FETCH_COMPLETED, FETCH_DISCARDED, FETCH_FAILED, FETCH_STARTED, FILTER_CHANGED, SEARCH_RESET,
};

/// Something the controller did, with the generation it happened under.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchLifecycle {
    /// A fetch began.
    FetchStarted {
        /// Generation the fetch will write under.
        generation: u64,
        /// First page requested.
        locator: String,
        /// Rendered label, `All` or `Search: "q"`.
        label: String,
    },
    /// A fetch finished and its characters were applied.
    FetchCompleted {
        /// Generation of the fetch.
        generation: u64,
        /// Rendered label.
        label: String,
        /// Characters across all pages.
        items: usize,
        /// Pages followed.
        pages: usize,
        /// Wall time in milliseconds.
        duration_ms: f64,
    },
    /// A fetch failed and the user-facing error was recorded.
    FetchFailed {
        /// Generation of the fetch.
        generation: u64,
        /// Rendered label.
        label: String,
        /// Failure category.
        kind: &'static str,
        /// HTTP status, for status failures.
        status: Option<u16>,
        /// Locator whose request failed.
        locator: String,
        /// Diagnostic detail.
        message: String,
    },
    /// A fetch finished after being superseded.
    FetchDiscarded {
        /// Generation of the stale fetch.
        generation: u64,
        /// Generation current when it finished.
        current_generation: u64,
        /// Rendered label.
        label: String,
    },
    /// The query turned blank and results were cleared.
    SearchReset {
        /// Generation after the reset.
        generation: u64,
    },
    /// Filter criteria changed.
    FilterChanged {
        /// Criteria now in effect.
        criteria: FilterCriteria,
    },
}

impl SearchLifecycle {
    /// Builds a failure event from a fetch error.
    #[must_use]
    pub fn fetch_failed(generation: u64, label: impl Into<String>, err: &NetworkError) -> Self {
        let status = match err.kind {
            NetworkErrorKind::Status(code) => Some(code),
            _ => None,
        };
        Self::FetchFailed {
            generation,
            label: label.into(),
            kind: err.kind.as_str(),
            status,
            locator: err.locator.clone(),
            message: err.message.clone(),
        }
    }

    /// Dotted event name, e.g. `search.fetch_started`.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::FetchStarted { .. } => FETCH_STARTED,
            Self::FetchCompleted { .. } => FETCH_COMPLETED,
            Self::FetchFailed { .. } => FETCH_FAILED,
            Self::FetchDiscarded { .. } => FETCH_DISCARDED,
            Self::SearchReset { .. } => SEARCH_RESET,
            Self::FilterChanged { .. } => FILTER_CHANGED,
        }
    }

    /// Generation the event belongs to; criteria changes have none.
    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::FetchStarted { generation, .. }
            | Self::FetchCompleted { generation, .. }
            | Self::FetchFailed { generation, .. }
            | Self::FetchDiscarded { generation, .. }
            | Self::SearchReset { generation } => Some(*generation),
            Self::FilterChanged { .. } => None,
        }
    }
}
