//! Sample catalogue data.

use crate::catalog::{Character, CharacterPage};

/// A character with every attribute set.
#[must_use]
pub fn character(name: &str, gender: &str, mass: &str, height: &str) -> Character {
    let slug: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    Character::new(name, format!("https://swapi.dev/api/people/{slug}/"))
        .with_gender(gender)
        .with_mass(mass)
        .with_height(height)
        .with_birth_year("unknown")
        .with_eye_color("brown")
}

/// A small, deliberately unsorted cast covering the awkward values:
/// thousands separators, "unknown" measurements, every gender option and
/// mixed case.
#[must_use]
pub fn sample_cast() -> Vec<Character> {
    vec![
        character("Luke Skywalker", "male", "77", "172"),
        character("C-3PO", "n/a", "75", "167"),
        character("leia Organa", "female", "49", "150"),
        character("Jabba Desilijic Tiure", "hermaphrodite", "1,358", "175"),
        character("Arvel Crynyd", "male", "unknown", "unknown"),
        character("R2-D2", "n/a", "32", "96"),
        character("Padmé Amidala", "female", "45", "185"),
        character("Yoda", "male", "17", "66"),
        character("Captain Phasma", "female", "unknown", "unknown"),
        character("Sly Moore", "unknown", "48", "178"),
    ]
}

/// Splits `characters` into pages of `per_page` items.
#[must_use]
pub fn paginate(characters: &[Character], per_page: usize) -> Vec<CharacterPage> {
    let total = characters.len() as u64;
    characters
        .chunks(per_page.max(1))
        .map(|chunk| CharacterPage::last(chunk.to_vec()).with_count(total))
        .collect()
}
