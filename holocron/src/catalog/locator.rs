//! Locators: references to one page of catalogue results.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::errors::{ConfigError, NetworkError};

/// Query parameter the catalogue uses for free-text search.
pub const SEARCH_PARAM: &str = "search";

/// A resource reference used to request one page of results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locator(Url);

impl Locator {
    /// Parses a locator from an absolute URL.
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Url::parse(input).map(Self)
    }

    /// The locator as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The underlying URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.0
    }

    /// Resolves a `next` link reported by the page at this locator.
    ///
    /// Relative links resolve against this locator. With `upgrade_insecure`,
    /// an `http` link is rewritten to `https` before reuse.
    pub fn resolve_next(&self, next: &str, upgrade_insecure: bool) -> Result<Self, NetworkError> {
        let mut url = self.0.join(next).map_err(|e| {
            NetworkError::decode(self.as_str(), format!("invalid next link '{next}': {e}"))
        })?;
        if upgrade_insecure && url.scheme() == "http" && url.set_scheme("https").is_err() {
            return Err(NetworkError::decode(
                self.as_str(),
                format!("cannot upgrade next link '{next}' to https"),
            ));
        }
        Ok(Self(url))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for Locator {
    type Error = url::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locator> for String {
    fn from(locator: Locator) -> Self {
        locator.0.into()
    }
}

/// Builds the two kinds of page-one locators from the catalogue base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorBuilder {
    base: Url,
}

impl LocatorBuilder {
    /// Creates a builder over `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base = Url::parse(base_url)
            .map_err(|e| ConfigError::invalid_base_url(base_url, e.to_string()))?;
        Ok(Self { base })
    }

    /// Page one of the unfiltered listing.
    #[must_use]
    pub fn list_all(&self) -> Locator {
        Locator(self.base.clone())
    }

    /// Page one of a server-side text search for the trimmed, escaped `query`.
    #[must_use]
    pub fn search(&self, query: &str) -> Locator {
        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair(SEARCH_PARAM, query.trim());
        Locator(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> LocatorBuilder {
        LocatorBuilder::new("https://swapi.dev/api/people/").unwrap()
    }

    #[test]
    fn test_list_all_is_base() {
        assert_eq!(builder().list_all().as_str(), "https://swapi.dev/api/people/");
    }

    #[test]
    fn test_search_trims_and_escapes() {
        let locator = builder().search("  Obi-Wan & co ");
        assert_eq!(
            locator.as_str(),
            "https://swapi.dev/api/people/?search=Obi-Wan+%26+co"
        );
        let (key, value) = locator.url().query_pairs().next().unwrap();
        assert_eq!(key, "search");
        assert_eq!(value, "Obi-Wan & co");
    }

    #[test]
    fn test_search_escapes_non_ascii() {
        let locator = builder().search("Padmé");
        assert_eq!(locator.as_str(), "https://swapi.dev/api/people/?search=Padm%C3%A9");
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            LocatorBuilder::new("swapi"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_resolve_next_upgrades_scheme() {
        let current = Locator::parse("https://swapi.dev/api/people/").unwrap();
        let next = current
            .resolve_next("http://swapi.dev/api/people/?page=2", true)
            .unwrap();
        assert_eq!(next.as_str(), "https://swapi.dev/api/people/?page=2");

        let kept = current
            .resolve_next("http://swapi.dev/api/people/?page=2", false)
            .unwrap();
        assert_eq!(kept.as_str(), "http://swapi.dev/api/people/?page=2");
    }

    #[test]
    fn test_resolve_relative_next() {
        let current = Locator::parse("https://swapi.dev/api/people/?page=1").unwrap();
        let next = current.resolve_next("?page=2", true).unwrap();
        assert_eq!(next.as_str(), "https://swapi.dev/api/people/?page=2");
    }

    #[test]
    fn test_locator_serde() {
        let locator: Locator = serde_json::from_str(r#""https://swapi.dev/api/people/""#).unwrap();
        assert_eq!(serde_json::to_string(&locator).unwrap(), r#""https://swapi.dev/api/people/""#);
        assert!(serde_json::from_str::<Locator>(r#""nope""#).is_err());
    }
}
