//! # Holocron
//!
//! Headless search, pagination and filtering over a public REST catalogue of
//! fictional characters.
//!
//! Holocron is the logic behind a search-as-you-type character browser,
//! without the rendering:
//!
//! - **Page following**: `PageFetcher` walks a listing's next links and
//!   concatenates every page
//! - **Client-side filtering**: `ResultFilter` orders by name and filters by
//!   gender and mass/height ranges
//! - **Search orchestration**: `SearchController` debounces text input,
//!   chooses "list all" or "search" requests, and discards superseded results
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use holocron::prelude::*;
//!
//! let controller = SearchController::connect(&HolocronConfig::default())?;
//! let mut updates = controller.subscribe();
//!
//! controller.dispatch(SearchEvent::query("Skywalker"));
//! updates.wait_for(|s| !s.loading && s.last_query.is_some()).await?;
//!
//! let view = controller.view();
//! println!("{} results for {:?}", view.count, view.last_query);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod catalog;
pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod filter;
pub mod observability;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::{
        Character, CharacterPage, FetchReport, Locator, LocatorBuilder, PageFetcher,
        PageTransport,
    };
    #[cfg(feature = "http")]
    pub use crate::catalog::ReqwestTransport;
    pub use crate::config::{CatalogConfig, HolocronConfig, LoggingConfig, SearchConfig};
    pub use crate::controller::{
        QueryLabel, SearchController, SearchEvent, SearchPhase, SearchState, SearchView,
    };
    pub use crate::errors::{
        ConfigError, FilterError, HolocronError, NetworkError, NetworkErrorKind,
        USER_FACING_FETCH_ERROR,
    };
    pub use crate::events::{EventSink, NoOpEventSink, SearchLifecycle};
    pub use crate::filter::{FilterCriteria, NumericRange, ResultFilter, GENDER_OPTIONS};
    pub use crate::observability::init_tracing;
}
