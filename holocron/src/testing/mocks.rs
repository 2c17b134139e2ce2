//! Scripted transport for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use crate::catalog::{CharacterPage, Locator, PageTransport};
use crate::errors::NetworkError;

#[derive(Debug, Clone)]
struct Route {
    response: Result<CharacterPage, NetworkError>,
    delay: Duration,
}

/// A transport serving canned responses keyed by locator string.
///
/// Every request is recorded before its delay elapses, so a request counts
/// as issued even if its outcome is later discarded. Unknown locators answer
/// with a 404 status error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    /// Creates a transport with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `page` for `locator` immediately.
    #[must_use]
    pub fn with_page(self, locator: &str, page: CharacterPage) -> Self {
        self.set_route(locator, Ok(page), Duration::ZERO);
        self
    }

    /// Serves `page` for `locator` after `delay`.
    #[must_use]
    pub fn with_delayed_page(self, locator: &str, page: CharacterPage, delay: Duration) -> Self {
        self.set_route(locator, Ok(page), delay);
        self
    }

    /// Fails requests for `locator` with `error`.
    #[must_use]
    pub fn with_failure(self, locator: &str, error: NetworkError) -> Self {
        self.set_route(locator, Err(error), Duration::ZERO);
        self
    }

    /// Serves a chain of pages starting at `start`.
    ///
    /// Page one lives at `start`; page `n` at `start` plus `page=n`. Each
    /// page links the next one; the last links nothing.
    #[must_use]
    pub fn with_chain(self, start: &str, pages: Vec<CharacterPage>) -> Self {
        let total = pages.len();
        for (index, mut page) in pages.into_iter().enumerate() {
            page.next = (index + 1 < total).then(|| page_locator(start, index + 2));
            self.set_route(&page_locator(start, index + 1), Ok(page), Duration::ZERO);
        }
        self
    }

    /// Adds or replaces a route.
    pub fn set_route(
        &self,
        locator: &str,
        response: Result<CharacterPage, NetworkError>,
        delay: Duration,
    ) {
        self.routes
            .lock()
            .insert(locator.to_string(), Route { response, delay });
    }

    /// Locators requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Number of requests issued.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Forgets recorded requests.
    pub fn reset(&self) {
        self.requests.lock().clear();
    }
}

/// Locator of page `n` of the listing starting at `start`.
#[must_use]
pub fn page_locator(start: &str, n: usize) -> String {
    if n == 1 {
        return start.to_string();
    }
    match url::Url::parse(start) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("page", &n.to_string());
            url.into()
        }
        Err(_) => format!("{start}?page={n}"),
    }
}

#[async_trait]
impl PageTransport for ScriptedTransport {
    async fn get_page(&self, locator: &Locator) -> Result<CharacterPage, NetworkError> {
        self.requests.lock().push(locator.as_str().to_string());
        let route = self.routes.lock().get(locator.as_str()).cloned();
        let Some(route) = route else {
            return Err(NetworkError::status(locator.as_str(), 404));
        };
        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }
        route.response
    }
}
