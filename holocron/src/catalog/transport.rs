//! The transport seam between the page fetcher and the network.

use async_trait::async_trait;

use super::locator::Locator;
use super::models::CharacterPage;
use crate::errors::NetworkError;

/// Protocol for retrieving a single page of results.
///
/// Implementations make exactly one attempt per call; there is no retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageTransport: Send + Sync {
    /// Requests the page at `locator`.
    async fn get_page(&self, locator: &Locator) -> Result<CharacterPage, NetworkError>;
}

#[cfg(feature = "http")]
pub use http::ReqwestTransport;

#[cfg(feature = "http")]
mod http {
    use async_trait::async_trait;
    use tracing::debug;

    use super::PageTransport;
    use crate::catalog::locator::Locator;
    use crate::catalog::models::CharacterPage;
    use crate::config::CatalogConfig;
    use crate::errors::{ConfigError, NetworkError};

    /// HTTP transport backed by `reqwest`.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Builds a client honouring the configured timeout and user agent.
        pub fn new(config: &CatalogConfig) -> Result<Self, ConfigError> {
            config.validate()?;
            let client = reqwest::Client::builder()
                .timeout(config.timeout())
                .user_agent(config.user_agent.clone())
                .build()
                .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
            Ok(Self { client })
        }

        /// Wraps an existing client.
        #[must_use]
        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    fn classify(locator: &Locator, err: &reqwest::Error) -> NetworkError {
        if err.is_timeout() {
            NetworkError::timeout(locator.as_str())
        } else if let Some(status) = err.status() {
            NetworkError::status(locator.as_str(), status.as_u16())
        } else if err.is_decode() {
            NetworkError::decode(locator.as_str(), err.to_string())
        } else {
            NetworkError::transport(locator.as_str(), err.to_string())
        }
    }

    #[async_trait]
    impl PageTransport for ReqwestTransport {
        async fn get_page(&self, locator: &Locator) -> Result<CharacterPage, NetworkError> {
            let response = self
                .client
                .get(locator.url().clone())
                .send()
                .await
                .map_err(|e| classify(locator, &e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(NetworkError::status(locator.as_str(), status.as_u16()));
            }

            let page = response
                .json::<CharacterPage>()
                .await
                .map_err(|e| classify(locator, &e))?;
            debug!(
                locator = %locator,
                items = page.results.len(),
                has_next = !page.is_last(),
                "Fetched catalogue page"
            );
            Ok(page)
        }
    }

}
