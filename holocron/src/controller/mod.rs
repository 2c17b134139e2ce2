//! The search controller: debounced search-as-you-type over the catalogue.
//!
//! Events go in through [`SearchController::dispatch`] (or the typed
//! methods), state comes out through [`SearchController::snapshot`],
//! [`SearchController::view`] or a [`watch`] subscription.
//!
//! Supersession uses the `generation` counter in [`SearchState`]: every fetch
//! start and every blank-query reset bumps it, and a fetch only writes its
//! outcome if the generation it captured at start is still current. In-flight
//! requests are never cancelled, only ignored.

mod events;
mod state;

pub use events::SearchEvent;
pub use state::{QueryLabel, SearchPhase, SearchState, SearchView};

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::catalog::{Locator, LocatorBuilder, PageFetcher};
use crate::config::HolocronConfig;
use crate::errors::ConfigError;
use crate::events::{EventSink, NoOpEventSink, SearchLifecycle};
use crate::filter::{FilterCriteria, NumericRange};

/// Orchestrates debouncing, fetch decisions and supersession.
///
/// Cheap to clone; clones share state. Methods that start work spawn Tokio
/// tasks and must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

struct Inner {
    fetcher: PageFetcher,
    locators: LocatorBuilder,
    debounce: Duration,
    sink: RwLock<Arc<dyn EventSink>>,
    state: watch::Sender<SearchState>,
    /// Keystroke counter; a debounce timer fires only if it is still current.
    input_seq: AtomicU64,
    /// The not-yet-fired debounce timer, if any.
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("fetcher", &self.inner.fetcher)
            .field("debounce", &self.inner.debounce)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl SearchController {
    /// Creates a controller over `fetcher` using the search and catalogue
    /// sections of `config`.
    pub fn new(fetcher: PageFetcher, config: &HolocronConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let locators = LocatorBuilder::new(&config.catalog.base_url)?;
        let (state, _) = watch::channel(SearchState::default());
        Ok(Self {
            inner: Arc::new(Inner {
                fetcher,
                locators,
                debounce: config.search.debounce(),
                sink: RwLock::new(Arc::new(NoOpEventSink)),
                state,
                input_seq: AtomicU64::new(0),
                pending: Mutex::new(None),
            }),
        })
    }

    /// Creates a controller talking HTTP to the configured catalogue.
    #[cfg(feature = "http")]
    pub fn connect(config: &HolocronConfig) -> Result<Self, ConfigError> {
        let transport = crate::catalog::ReqwestTransport::new(&config.catalog)?;
        let fetcher = PageFetcher::from_config(Arc::new(transport), &config.catalog);
        Self::new(fetcher, config)
    }

    /// Routes lifecycle events to `sink`.
    #[must_use]
    pub fn with_event_sink(self, sink: Arc<dyn EventSink>) -> Self {
        *self.inner.sink.write() = sink;
        self
    }

    /// Applies one user action.
    pub fn dispatch(&self, event: SearchEvent) {
        match event {
            SearchEvent::QueryChanged { text } => self.set_query(text),
            SearchEvent::GenderChanged { gender } => {
                self.update_criteria(|c| *c = c.clone().with_gender(gender));
            }
            SearchEvent::MassRangeChanged { min, max } => {
                self.update_criteria(|c| c.mass = NumericRange::new(min, max));
            }
            SearchEvent::HeightRangeChanged { min, max } => {
                self.update_criteria(|c| c.height = NumericRange::new(min, max));
            }
            SearchEvent::CriteriaReplaced { criteria } => self.set_criteria(criteria),
            SearchEvent::LoadAllRequested => {
                drop(self.load_all());
            }
        }
    }

    /// Records new search text.
    ///
    /// Text that turns blank resets to idle immediately; blank text over an
    /// already blank query only updates the input. Anything else (re)starts the
    /// debounce timer; when it fires without further edits, one search fetch
    /// starts for the trimmed text.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        let mut pending = self.inner.pending.lock();
        if text.trim().is_empty() && self.inner.state.borrow().query_is_blank() {
            // Still blank: no timer can be pending and nothing needs resetting.
            self.inner.state.send_modify(|s| s.query = text);
            return;
        }
        if let Some(timer) = pending.take() {
            timer.abort();
        }
        let seq = self.inner.input_seq.fetch_add(1, Ordering::SeqCst) + 1;

        if text.trim().is_empty() {
            let mut generation = 0;
            self.inner.state.send_modify(|s| {
                s.query = text;
                s.characters.clear();
                s.last_query = None;
                s.loading = false;
                s.error = None;
                s.debounce_pending = false;
                s.generation += 1;
                generation = s.generation;
            });
            debug!(generation, "Query cleared, search reset");
            self.inner
                .sink()
                .record(&SearchLifecycle::SearchReset { generation });
            return;
        }

        let query = text.trim().to_string();
        self.inner.state.send_modify(|s| {
            s.query = text;
            s.debounce_pending = true;
        });

        let inner = Arc::clone(&self.inner);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            let start = {
                let mut pending = inner.pending.lock();
                if inner.input_seq.load(Ordering::SeqCst) != seq {
                    return;
                }
                // Detach so a later keystroke cannot abort the fetch itself.
                pending.take();
                inner.state.send_modify(|s| s.debounce_pending = false);
                let locator = inner.locators.search(&query);
                let label = QueryLabel::Search(query);
                let generation = inner.begin_fetch(&locator, &label);
                (generation, locator, label)
            };
            let (generation, locator, label) = start;
            inner.complete_fetch(generation, locator, label).await;
        }));
    }

    /// Starts an immediate fetch of the full listing, labelled "All".
    ///
    /// The returned handle resolves once the outcome has been applied or
    /// discarded; dropping it does not cancel the fetch.
    pub fn load_all(&self) -> JoinHandle<()> {
        let locator = self.inner.locators.list_all();
        let label = QueryLabel::All;
        let generation = self.inner.begin_fetch(&locator, &label);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.complete_fetch(generation, locator, label).await })
    }

    /// Replaces the filter criteria.
    pub fn set_criteria(&self, criteria: FilterCriteria) {
        self.update_criteria(|c| *c = criteria);
    }

    /// Edits the filter criteria in place.
    pub fn update_criteria<F>(&self, edit: F)
    where
        F: FnOnce(&mut FilterCriteria),
    {
        let mut criteria = FilterCriteria::default();
        self.inner.state.send_modify(|s| {
            edit(&mut s.criteria);
            criteria = s.criteria.clone();
        });
        debug!(?criteria, "Filter criteria changed");
        self.inner
            .sink()
            .record(&SearchLifecycle::FilterChanged { criteria });
    }

    /// Current criteria.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        self.inner.state.borrow().criteria.clone()
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.inner.state.borrow().clone()
    }

    /// The filtered, ordered view for rendering.
    #[must_use]
    pub fn view(&self) -> SearchView {
        SearchView::from(&self.snapshot())
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }
}

impl Inner {
    fn sink(&self) -> Arc<dyn EventSink> {
        Arc::clone(&self.sink.read())
    }

    /// Marks a fetch as started and returns its generation.
    fn begin_fetch(&self, locator: &Locator, label: &QueryLabel) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            s.loading = true;
            s.error = None;
            generation = s.generation;
        });
        info!(generation, locator = %locator, label = %label, "Fetch started");
        self.sink().record(&SearchLifecycle::FetchStarted {
            generation,
            locator: locator.to_string(),
            label: label.to_string(),
        });
        generation
    }

    /// Awaits the fetch and applies its outcome unless superseded.
    async fn complete_fetch(&self, generation: u64, locator: Locator, label: QueryLabel) {
        let result = self.fetcher.fetch_report(&locator).await;
        let sink = self.sink();

        match result {
            Ok(report) => {
                let label_text = label.to_string();
                let completed = SearchLifecycle::FetchCompleted {
                    generation,
                    label: label_text.clone(),
                    items: report.characters.len(),
                    pages: report.pages,
                    duration_ms: report.duration_ms,
                };
                let applied = self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.characters = report.characters;
                    s.last_query = Some(label);
                    s.loading = false;
                    s.updated_at = Some(Utc::now());
                    true
                });
                if applied {
                    info!(generation, label = %label_text, "Fetch applied");
                    sink.record(&completed);
                } else {
                    self.discard(&*sink, generation, label_text);
                }
            }
            Err(err) => {
                let label_text = label.to_string();
                let message = err.user_message().to_string();
                let applied = self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.error = Some(message);
                    s.loading = false;
                    true
                });
                if applied {
                    warn!(generation, label = %label_text, error = %err, "Fetch failed");
                    sink.record(&SearchLifecycle::fetch_failed(generation, label_text, &err));
                } else {
                    self.discard(&*sink, generation, label_text);
                }
            }
        }
    }

    fn discard(&self, sink: &dyn EventSink, generation: u64, label: String) {
        let current_generation = self.state.borrow().generation;
        debug!(generation, current_generation, label = %label, "Discarding superseded fetch outcome");
        sink.record(&SearchLifecycle::FetchDiscarded {
            generation,
            current_generation,
            label,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Character, CharacterPage};
    use crate::errors::{NetworkError, USER_FACING_FETCH_ERROR};
    use crate::events::{
        CollectingEventSink, FETCH_COMPLETED, FETCH_DISCARDED, FETCH_FAILED, SEARCH_RESET,
    };
    use crate::testing::ScriptedTransport;
    use pretty_assertions::assert_eq;

    const BASE: &str = "https://c.test/people/";

    fn config() -> HolocronConfig {
        HolocronConfig::default().with_catalog(crate::config::CatalogConfig::new().with_base_url(BASE))
    }

    fn search(q: &str) -> String {
        format!("{BASE}?search={q}")
    }

    fn page(names: &[&str]) -> CharacterPage {
        CharacterPage::last(
            names
                .iter()
                .map(|n| Character::new(*n, format!("{BASE}{n}/")))
                .collect(),
        )
    }

    fn controller(transport: &Arc<ScriptedTransport>) -> SearchController {
        let fetcher = PageFetcher::new(Arc::clone(transport) as Arc<dyn crate::catalog::PageTransport>);
        SearchController::new(fetcher, &config()).unwrap()
    }

    fn names(state: &SearchState) -> Vec<String> {
        state.characters.iter().map(|c| c.name.clone()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounced_search_fires_once() {
        let transport = Arc::new(ScriptedTransport::new().with_page(&search("Leia"), page(&["Leia Organa"])));
        let controller = controller(&transport);

        controller.set_query("L");
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.set_query("Le");
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.set_query(" Leia ");
        assert_eq!(controller.snapshot().phase(), SearchPhase::Debouncing);

        tokio::time::sleep(Duration::from_millis(399)).await;
        assert_eq!(transport.request_count(), 0);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(transport.requests(), vec![search("Leia")]);

        let state = controller.snapshot();
        assert_eq!(names(&state), vec!["Leia Organa"]);
        assert_eq!(state.last_query, Some(QueryLabel::Search("Leia".into())));
        assert_eq!(state.query, " Leia ");
        assert_eq!(state.phase(), SearchPhase::Loaded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_within_window_cancels_and_resets() {
        let transport = Arc::new(ScriptedTransport::new().with_page(&search("Leia"), page(&["Leia Organa"])));
        let controller = controller(&transport);

        controller.set_query("Leia");
        tokio::time::sleep(Duration::from_millis(200)).await;
        controller.set_query("   ");

        let state = controller.snapshot();
        assert!(state.characters.is_empty());
        assert!(state.last_query.is_none());
        assert_eq!(state.phase(), SearchPhase::Idle);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_all_is_immediate() {
        let transport = Arc::new(ScriptedTransport::new().with_delayed_page(
            BASE,
            page(&["Luke", "Leia"]),
            Duration::from_millis(50),
        ));
        let controller = controller(&transport);

        let handle = controller.load_all();
        let state = controller.snapshot();
        assert!(state.loading);
        assert_eq!(state.phase(), SearchPhase::Loading);

        handle.await.unwrap();
        let state = controller.snapshot();
        assert!(!state.loading);
        assert_eq!(state.last_query, Some(QueryLabel::All));
        assert_eq!(names(&state), vec!["Luke", "Leia"]);
        assert!(state.updated_at.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_previous_results() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .with_page(BASE, page(&["Luke"]))
                .with_failure(&search("Vader"), NetworkError::status(search("Vader"), 500)),
        );
        let sink = Arc::new(CollectingEventSink::new());
        let controller = controller(&transport).with_event_sink(sink.clone());

        controller.load_all().await.unwrap();
        controller.set_query("Vader");
        tokio::time::sleep(Duration::from_millis(500)).await;

        let state = controller.snapshot();
        assert_eq!(state.error.as_deref(), Some(USER_FACING_FETCH_ERROR));
        assert!(!state.loading);
        assert_eq!(names(&state), vec!["Luke"]);
        assert_eq!(state.last_query, Some(QueryLabel::All));
        assert_eq!(state.phase(), SearchPhase::Failed);
        assert_eq!(sink.events_of_type(FETCH_FAILED).len(), 1);

        controller.load_all().await.unwrap();
        assert!(controller.snapshot().error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_fetch_does_not_overwrite_newer() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .with_delayed_page(&search("A"), page(&["Stale"]), Duration::from_millis(1000))
                .with_delayed_page(&search("B"), page(&["Fresh"]), Duration::from_millis(100)),
        );
        let sink = Arc::new(CollectingEventSink::new());
        let controller = controller(&transport).with_event_sink(sink.clone());

        controller.set_query("A");
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(controller.snapshot().loading);

        controller.set_query("B");
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(names(&controller.snapshot()), vec!["Fresh"]);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        let state = controller.snapshot();
        assert_eq!(names(&state), vec!["Fresh"]);
        assert_eq!(state.last_query, Some(QueryLabel::Search("B".into())));
        assert_eq!(transport.requests(), vec![search("A"), search("B")]);
        assert_eq!(sink.events_of_type(FETCH_DISCARDED).len(), 1);
        assert_eq!(sink.discarded_generations(), vec![1]);
        assert_eq!(sink.events_of_type(FETCH_COMPLETED).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_supersedes_in_flight_fetch() {
        let transport = Arc::new(ScriptedTransport::new().with_delayed_page(
            &search("Han"),
            page(&["Han Solo"]),
            Duration::from_millis(300),
        ));
        let controller = controller(&transport);

        controller.set_query("Han");
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert!(controller.snapshot().loading);

        controller.set_query("");
        tokio::time::sleep(Duration::from_secs(1)).await;

        let state = controller.snapshot();
        assert!(state.characters.is_empty());
        assert!(state.last_query.is_none());
        assert!(!state.loading);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_over_blank_query_keeps_load_all() {
        let transport = Arc::new(ScriptedTransport::new().with_delayed_page(
            BASE,
            page(&["Luke", "Leia"]),
            Duration::from_millis(200),
        ));
        let sink = Arc::new(CollectingEventSink::new());
        let controller = controller(&transport).with_event_sink(sink.clone());

        let handle = controller.load_all();
        controller.set_query("");
        controller.dispatch(SearchEvent::query(" "));
        assert!(controller.snapshot().loading);

        handle.await.unwrap();
        let state = controller.snapshot();
        assert_eq!(names(&state), vec!["Luke", "Leia"]);
        assert_eq!(state.last_query, Some(QueryLabel::All));
        assert_eq!(state.query, " ");
        assert!(sink.events_of_type(SEARCH_RESET).is_empty());
        assert!(sink.discarded_generations().is_empty());
        assert_eq!(sink.events_of_type(FETCH_COMPLETED).len(), 1);
    }

    #[tokio::test]
    async fn test_criteria_events_filter_view() {
        let transport = Arc::new(ScriptedTransport::new().with_page(
            BASE,
            CharacterPage::last(vec![
                Character::new("Luke", "1").with_gender("male").with_mass("77"),
                Character::new("Jabba", "2").with_gender("hermaphrodite").with_mass("1,358"),
                Character::new("Arvel", "3").with_gender("male").with_mass("unknown"),
            ]),
        ));
        let controller = controller(&transport);
        controller.load_all().await.unwrap();

        controller.dispatch(SearchEvent::MassRangeChanged { min: Some(75.0), max: None });
        let view = controller.view();
        let shown: Vec<&str> = view.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(shown, vec!["Jabba", "Luke"]);
        assert_eq!(view.count, 2);

        controller.dispatch(SearchEvent::GenderChanged { gender: "male".into() });
        assert_eq!(controller.view().count, 1);

        controller.dispatch(SearchEvent::CriteriaReplaced { criteria: FilterCriteria::new() });
        assert_eq!(controller.view().count, 3);
        assert_eq!(controller.snapshot().characters.len(), 3);
    }

    #[tokio::test]
    async fn test_subscribe_sees_loaded_state() {
        let transport = Arc::new(ScriptedTransport::new().with_page(BASE, page(&["Luke"])));
        let controller = controller(&transport);
        let mut rx = controller.subscribe();

        controller.dispatch(SearchEvent::LoadAllRequested);
        let state = rx
            .wait_for(|s| s.phase() == SearchPhase::Loaded)
            .await
            .unwrap()
            .clone();
        assert_eq!(names(&state), vec!["Luke"]);
    }
}
