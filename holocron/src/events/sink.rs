//! Sinks receiving search lifecycle events.

use parking_lot::Mutex;

use super::SearchLifecycle;

/// Receives every lifecycle event the controller produces.
///
/// Called synchronously, possibly while a fetch task is finishing, so
/// implementations must not block.
pub trait EventSink: Send + Sync {
    /// Records one event.
    fn record(&self, event: &SearchLifecycle);
}

/// Drops everything. The controller's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn record(&self, _event: &SearchLifecycle) {}
}

/// Keeps every event in order.
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: Mutex<Vec<SearchLifecycle>>,
}

impl CollectingEventSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<SearchLifecycle> {
        self.events.lock().clone()
    }

    /// Event names in order.
    #[must_use]
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(SearchLifecycle::event_type).collect()
    }

    /// Events whose name is exactly `event_type`.
    #[must_use]
    pub fn events_of_type(&self, event_type: &str) -> Vec<SearchLifecycle> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.event_type() == event_type)
            .cloned()
            .collect()
    }

    /// Generations of fetches whose outcome was dropped.
    #[must_use]
    pub fn discarded_generations(&self) -> Vec<u64> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SearchLifecycle::FetchDiscarded { generation, .. } => Some(*generation),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for CollectingEventSink {
    fn record(&self, event: &SearchLifecycle) {
        self.events.lock().push(event.clone());
    }
}
