//! Catalogue access: wire models, locators, transport and page following.
//!
//! This module provides:
//! - Data models for characters and result pages
//! - Locator building for "list all" and "search by text"
//! - The `PageTransport` seam and its `reqwest` implementation
//! - `PageFetcher`, which follows next links until the listing ends

mod fetcher;
mod locator;
mod models;
mod transport;

pub use fetcher::{FetchReport, PageFetcher};
pub use locator::{Locator, LocatorBuilder, SEARCH_PARAM};
pub use models::{Character, CharacterPage};
pub use transport::PageTransport;

#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
