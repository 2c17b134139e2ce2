//! Data models for the character catalogue.

use serde::{Deserialize, Serialize};

/// A character as received from the catalogue.
///
/// Every attribute is kept as the catalogue's text; `mass` and `height` in
/// particular may carry thousands separators or the literal `"unknown"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    /// Display name.
    pub name: String,
    /// Free-text gender (female, male, hermaphrodite, n/a, unknown, ...).
    #[serde(default)]
    pub gender: String,
    /// Mass in kilograms, as text.
    #[serde(default)]
    pub mass: String,
    /// Height in centimetres, as text.
    #[serde(default)]
    pub height: String,
    /// Birth year in the catalogue's calendar (e.g. "19BBY").
    #[serde(default)]
    pub birth_year: String,
    /// Eye colour.
    #[serde(default)]
    pub eye_color: String,
    /// Hair colour, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<String>,
    /// Skin colour, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_color: Option<String>,
    /// Stable unique identifier; used as the display key.
    pub url: String,
}

impl Character {
    /// Creates a character with a name and identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the gender.
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    /// Sets the mass text.
    #[must_use]
    pub fn with_mass(mut self, mass: impl Into<String>) -> Self {
        self.mass = mass.into();
        self
    }

    /// Sets the height text.
    #[must_use]
    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = height.into();
        self
    }

    /// Sets the birth year.
    #[must_use]
    pub fn with_birth_year(mut self, birth_year: impl Into<String>) -> Self {
        self.birth_year = birth_year.into();
        self
    }

    /// Sets the eye colour.
    #[must_use]
    pub fn with_eye_color(mut self, eye_color: impl Into<String>) -> Self {
        self.eye_color = eye_color.into();
        self
    }
}

/// One page of a catalogue listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CharacterPage {
    /// Total number of matches across all pages, when reported.
    #[serde(default)]
    pub count: Option<u64>,
    /// Locator of the following page; `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,
    /// Locator of the preceding page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Items on this page.
    pub results: Vec<Character>,
}

impl CharacterPage {
    /// Creates a final page holding `results`.
    #[must_use]
    pub fn last(results: Vec<Character>) -> Self {
        Self {
            count: None,
            next: None,
            previous: None,
            results,
        }
    }

    /// Sets the next locator.
    #[must_use]
    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    /// Sets the total count.
    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Whether this is the final page.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next.as_deref().map_or(true, str::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LUKE_PAGE: &str = r#"{
        "count": 82,
        "next": "http://swapi.dev/api/people/?page=2",
        "previous": null,
        "results": [
            {
                "name": "Luke Skywalker",
                "height": "172",
                "mass": "77",
                "hair_color": "blond",
                "skin_color": "fair",
                "eye_color": "blue",
                "birth_year": "19BBY",
                "gender": "male",
                "homeworld": "https://swapi.dev/api/planets/1/",
                "films": ["https://swapi.dev/api/films/1/"],
                "created": "2014-12-09T13:50:51.644000Z",
                "url": "https://swapi.dev/api/people/1/"
            }
        ]
    }"#;

    #[test]
    fn test_page_deserializes_upstream_shape() {
        let page: CharacterPage = serde_json::from_str(LUKE_PAGE).unwrap();
        assert_eq!(page.count, Some(82));
        assert_eq!(page.next.as_deref(), Some("http://swapi.dev/api/people/?page=2"));
        assert!(page.previous.is_none());
        assert!(!page.is_last());

        let luke = &page.results[0];
        assert_eq!(luke.name, "Luke Skywalker");
        assert_eq!(luke.mass, "77");
        assert_eq!(luke.hair_color.as_deref(), Some("blond"));
        assert_eq!(luke.url, "https://swapi.dev/api/people/1/");
    }

    #[test]
    fn test_page_missing_results_is_rejected() {
        let result: Result<CharacterPage, _> = serde_json::from_str(r#"{"next": null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_next_counts_as_last() {
        let page = CharacterPage::last(Vec::new()).with_next("");
        assert!(page.is_last());
    }

    #[test]
    fn test_character_builder() {
        let c = Character::new("Yoda", "https://swapi.dev/api/people/20/")
            .with_gender("male")
            .with_mass("17")
            .with_height("66");
        assert_eq!(c.gender, "male");
        assert_eq!(c.height, "66");
        assert!(c.skin_color.is_none());
    }
}
