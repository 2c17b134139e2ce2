//! Client-side filtering and ordering of fetched characters.
//!
//! This module provides:
//! - Measurement parsing that tolerates thousands separators
//! - Case- and accent-insensitive name ordering
//! - `FilterCriteria` and the `ResultFilter` that applies them

mod collation;
mod criteria;
mod numeric;

pub use collation::{collation_key, compare_names};
pub use criteria::{FilterCriteria, GENDER_OPTIONS};
pub use numeric::{parse_measurement, NumericRange, THOUSANDS_SEPARATOR};

use crate::catalog::Character;

/// Produces the ordered, filtered view of a result set.
///
/// Pure: the input is never modified and equal inputs give equal outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultFilter;

impl ResultFilter {
    /// Keeps characters passing `criteria`, ordered by name.
    ///
    /// Ordering is stable: names that compare equal keep their input order.
    #[must_use]
    pub fn apply(characters: &[Character], criteria: &FilterCriteria) -> Vec<Character> {
        let mut kept: Vec<Character> = characters
            .iter()
            .filter(|c| criteria.matches(c))
            .cloned()
            .collect();
        kept.sort_by_cached_key(|c| collation_key(&c.name));
        kept
    }

    /// Number of characters that would survive [`apply`](Self::apply).
    #[must_use]
    pub fn count(characters: &[Character], criteria: &FilterCriteria) -> usize {
        characters.iter().filter(|c| criteria.matches(c)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(name: &str, url: &str) -> Character {
        Character::new(name, url)
    }

    fn with_mass(name: &str, mass: &str) -> Character {
        Character::new(name, format!("https://c.test/{name}/")).with_mass(mass)
    }

    fn names(characters: &[Character]) -> Vec<&str> {
        characters.iter().map(|c| c.name.as_str()).collect()
    }

    fn cast() -> Vec<Character> {
        vec![
            named("Luke Skywalker", "1").with_gender("male").with_mass("77").with_height("172"),
            named("leia Organa", "5").with_gender("female").with_mass("49").with_height("150"),
            named("Jabba Desilijic Tiure", "16").with_gender("hermaphrodite").with_mass("1,358").with_height("175"),
            named("R2-D2", "3").with_gender("n/a").with_mass("32").with_height("96"),
            named("Arvel Crynyd", "28").with_gender("male").with_mass("unknown").with_height("unknown"),
            named("Ábaco", "99").with_gender("unknown").with_mass("80").with_height("180"),
        ]
    }

    #[test]
    fn test_sorts_case_and_accent_insensitively() {
        let out = ResultFilter::apply(&cast(), &FilterCriteria::new());
        assert_eq!(
            names(&out),
            vec![
                "Ábaco",
                "Arvel Crynyd",
                "Jabba Desilijic Tiure",
                "leia Organa",
                "Luke Skywalker",
                "R2-D2",
            ]
        );
    }

    #[test]
    fn test_equal_names_keep_input_order() {
        let input = vec![
            named("Padmé", "first"),
            named("Anakin", "a"),
            named("padme", "second"),
            named("PADME", "third"),
        ];
        let out = ResultFilter::apply(&input, &FilterCriteria::new());
        let urls: Vec<&str> = out.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["a", "first", "second", "third"]);
    }

    #[test]
    fn test_min_mass_scenario() {
        let input = vec![
            with_mass("a", "77"),
            with_mass("b", "unknown"),
            with_mass("c", "1,358"),
        ];
        let criteria = FilterCriteria::from_form("", "75", "", "", "").unwrap();
        let out = ResultFilter::apply(&input, &criteria);
        let masses: Vec<&str> = out.iter().map(|c| c.mass.as_str()).collect();
        assert_eq!(masses, vec!["77", "1,358"]);
    }

    #[test]
    fn test_unbounded_fields_exclude_nothing() {
        let out = ResultFilter::apply(&cast(), &FilterCriteria::new().with_gender(""));
        assert_eq!(out.len(), cast().len());
    }

    #[test]
    fn test_height_bound_excludes_unknown() {
        let criteria = FilterCriteria::new().with_height(Some(100.0), None);
        let out = ResultFilter::apply(&cast(), &criteria);
        assert!(out.iter().all(|c| c.name != "Arvel Crynyd" && c.name != "R2-D2"));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_gender_and_ranges_compose() {
        let criteria = FilterCriteria::new()
            .with_gender("male")
            .with_mass(None, Some(100.0));
        let out = ResultFilter::apply(&cast(), &criteria);
        assert_eq!(names(&out), vec!["Luke Skywalker"]);
        assert_eq!(ResultFilter::count(&cast(), &criteria), 1);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let criteria = FilterCriteria::new().with_mass(Some(40.0), None);
        let once = ResultFilter::apply(&cast(), &criteria);
        let twice = ResultFilter::apply(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_is_untouched() {
        let input = cast();
        let before = input.clone();
        let _ = ResultFilter::apply(&input, &FilterCriteria::new().with_gender("female"));
        assert_eq!(input, before);
    }
}
