//! Event sinks for search lifecycle observability.
//!
//! The controller reports every fetch start, completion, failure and
//! discard, plus resets and criteria changes, to an [`EventSink`] as a
//! [`SearchLifecycle`] value.

mod lifecycle;
mod sink;

pub use lifecycle::SearchLifecycle;
pub use sink::{CollectingEventSink, EventSink, NoOpEventSink};

/// A fetch began.
pub const FETCH_STARTED: &str = "search.fetch_started";
/// A fetch finished and its result was applied.
pub const FETCH_COMPLETED: &str = "search.fetch_completed";
/// A fetch failed and the error was recorded.
pub const FETCH_FAILED: &str = "search.fetch_failed";
/// A fetch finished after being superseded; its outcome was dropped.
pub const FETCH_DISCARDED: &str = "search.fetch_discarded";
/// The query became blank and state was cleared.
pub const SEARCH_RESET: &str = "search.reset";
/// Filter criteria were replaced.
pub const FILTER_CHANGED: &str = "filter.changed";
