//! Following a catalogue listing from page one to the end.

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::locator::Locator;
use super::models::Character;
use super::transport::PageTransport;
use crate::config::CatalogConfig;
use crate::errors::NetworkError;
use crate::observability::FetchTimer;

/// Everything a completed multi-page fetch produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
    /// Identifier used in logs for this fetch.
    pub fetch_id: Uuid,
    /// Concatenated results, in page order.
    pub characters: Vec<Character>,
    /// Number of requests issued.
    pub pages: usize,
    /// Total the server reported on page one, if any.
    pub reported_count: Option<u64>,
    /// Wall time in milliseconds.
    pub duration_ms: f64,
}

/// Retrieves every page of a listing and concatenates the results.
///
/// Holds no state between calls. Termination depends on the server
/// eventually reporting no next page unless `max_pages` is configured.
#[derive(Clone)]
pub struct PageFetcher {
    transport: Arc<dyn PageTransport>,
    upgrade_insecure_links: bool,
    max_pages: Option<usize>,
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("upgrade_insecure_links", &self.upgrade_insecure_links)
            .field("max_pages", &self.max_pages)
            .finish_non_exhaustive()
    }
}

impl PageFetcher {
    /// Creates a fetcher with default link handling and no page ceiling.
    #[must_use]
    pub fn new(transport: Arc<dyn PageTransport>) -> Self {
        Self {
            transport,
            upgrade_insecure_links: true,
            max_pages: None,
        }
    }

    /// Creates a fetcher using the link and ceiling settings of `config`.
    #[must_use]
    pub fn from_config(transport: Arc<dyn PageTransport>, config: &CatalogConfig) -> Self {
        Self {
            transport,
            upgrade_insecure_links: config.upgrade_insecure_links,
            max_pages: config.max_pages,
        }
    }

    /// Caps the number of pages followed per fetch.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Fetches every page starting at `start` and returns all results.
    pub async fn fetch_all(&self, start: &Locator) -> Result<Vec<Character>, NetworkError> {
        self.fetch_report(start).await.map(|report| report.characters)
    }

    /// Like [`fetch_all`](Self::fetch_all), also returning paging statistics.
    ///
    /// Any failing request aborts the fetch; pages already gathered are
    /// discarded.
    pub async fn fetch_report(&self, start: &Locator) -> Result<FetchReport, NetworkError> {
        let fetch_id = Uuid::new_v4();
        let timer = FetchTimer::start();
        let mut characters = Vec::new();
        let mut reported_count = None;
        let mut pages = 0usize;
        let mut current = start.clone();

        loop {
            if let Some(max) = self.max_pages {
                if pages >= max {
                    warn!(%fetch_id, locator = %current, max_pages = max, "Page limit reached");
                    return Err(NetworkError::transport(
                        current.as_str(),
                        format!("page limit of {max} reached"),
                    ));
                }
            }

            let page = match self.transport.get_page(&current).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        %fetch_id,
                        locator = %current,
                        page = pages + 1,
                        discarded = characters.len(),
                        error = %e,
                        "Page request failed"
                    );
                    return Err(e);
                }
            };
            pages += 1;
            if pages == 1 {
                reported_count = page.count;
            }
            debug!(%fetch_id, locator = %current, page = pages, items = page.results.len(), "Page received");

            let next = page.next.filter(|n| !n.is_empty());
            characters.extend(page.results);

            match next {
                Some(link) => current = current.resolve_next(&link, self.upgrade_insecure_links)?,
                None => break,
            }
        }

        let duration_ms = timer.finish();
        info!(
            %fetch_id,
            locator = %start,
            pages,
            items = characters.len(),
            duration_ms,
            "Fetch complete"
        );

        Ok(FetchReport {
            fetch_id,
            characters,
            pages,
            reported_count,
            duration_ms,
        })
    }
}
