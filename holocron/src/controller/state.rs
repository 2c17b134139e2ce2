//! Search state held by the controller and the view derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Character;
use crate::filter::{FilterCriteria, ResultFilter};

/// Describes the most recently completed fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryLabel {
    /// The unfiltered listing.
    All,
    /// A server-side text search for the contained (trimmed) query.
    Search(String),
}

impl fmt::Display for QueryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Search(query) => write!(f, "Search: \"{query}\""),
        }
    }
}

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPhase {
    /// No query, nothing loaded.
    Idle,
    /// Text entered; waiting for the quiet period to elapse.
    Debouncing,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed.
    Failed,
}

/// Everything the controller knows.
///
/// `characters` always holds the result of the latest fetch that completed
/// without being superseded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Unfiltered results of the last applied fetch.
    pub characters: Vec<Character>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// User-facing error from the last failed fetch.
    pub error: Option<String>,
    /// Current free-text input, untrimmed.
    pub query: String,
    /// Label of the last applied fetch.
    pub last_query: Option<QueryLabel>,
    /// Whether a debounce timer is waiting to fire.
    pub debounce_pending: bool,
    /// Client-side filter criteria.
    pub criteria: FilterCriteria,
    /// Supersession token; bumped by every fetch start and every reset.
    pub generation: u64,
    /// When a fetch last completed and was applied.
    pub updated_at: Option<DateTime<Utc>>,
}

impl SearchState {
    /// Derives the lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Loading
        } else if self.debounce_pending {
            SearchPhase::Debouncing
        } else if self.error.is_some() {
            SearchPhase::Failed
        } else if self.last_query.is_some() {
            SearchPhase::Loaded
        } else {
            SearchPhase::Idle
        }
    }

    /// Whether the trimmed query is empty.
    #[must_use]
    pub fn query_is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Filtered, ordered characters for display.
    #[must_use]
    pub fn filtered(&self) -> Vec<Character> {
        ResultFilter::apply(&self.characters, &self.criteria)
    }
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    /// Current text input.
    pub query: String,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Error text to show, if any.
    pub error: Option<String>,
    /// Ordered, filtered characters.
    pub characters: Vec<Character>,
    /// Number of characters shown.
    pub count: usize,
    /// Criteria in effect.
    pub criteria: FilterCriteria,
    /// Label of the last applied fetch, rendered.
    pub last_query: Option<String>,
    /// Lifecycle phase.
    pub phase: SearchPhase,
    /// Whether to show the "nothing matches the filters" notice.
    pub show_no_matches: bool,
    /// Whether "load all" may be triggered; false while any fetch runs.
    pub load_all_enabled: bool,
    /// Whether the in-flight fetch belongs to "load all" rather than a
    /// typed search, i.e. loading with a blank query.
    pub load_all_busy: bool,
}

impl From<&SearchState> for SearchView {
    fn from(state: &SearchState) -> Self {
        let characters = state.filtered();
        let count = characters.len();
        Self {
            query: state.query.clone(),
            loading: state.loading,
            error: state.error.clone(),
            count,
            criteria: state.criteria.clone(),
            last_query: state.last_query.as_ref().map(ToString::to_string),
            phase: state.phase(),
            show_no_matches: !state.loading && state.last_query.is_some() && count == 0,
            load_all_enabled: !state.loading,
            load_all_busy: state.loading && state.query_is_blank(),
            characters,
        }
    }
}
