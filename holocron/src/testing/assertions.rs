//! Test assertions for search state and filtered views.

use crate::catalog::Character;
use crate::controller::{SearchPhase, SearchState};
use crate::filter::compare_names;

/// Asserts that the state is in the expected phase.
pub fn assert_phase(state: &SearchState, expected: SearchPhase) {
    assert_eq!(
        state.phase(),
        expected,
        "Expected phase {:?}, got {:?} (loading: {}, error: {:?})",
        expected,
        state.phase(),
        state.loading,
        state.error
    );
}

/// Asserts that characters are ordered by collated name.
pub fn assert_sorted_by_name(characters: &[Character]) {
    for pair in characters.windows(2) {
        assert!(
            compare_names(&pair[0].name, &pair[1].name).is_le(),
            "'{}' sorted before '{}'",
            pair[0].name,
            pair[1].name
        );
    }
}

/// Asserts that the characters carry exactly these names, in order.
pub fn assert_names(characters: &[Character], expected: &[&str]) {
    let actual: Vec<&str> = characters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(actual, expected, "Unexpected characters");
}
