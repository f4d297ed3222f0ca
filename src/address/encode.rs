//! Path segment encoding rules
//!
//! The directory encodes taxonomy names into URL path segments with two
//! casing conventions: continents are title-cased per word, countries and
//! states are uppercased per word. Words are always joined with a literal
//! `%20`. Segments are opaque once encoded; nothing downstream re-normalizes
//! them.

/// Encodes a continent name: each word title-cased, joined with `%20`.
///
/// # Example
///
/// ```
/// use aerodex::encode_continent;
///
/// assert_eq!(encode_continent("north america"), "North%20America");
/// ```
pub fn encode_continent(name: &str) -> String {
    name.split(' ')
        .map(title_case)
        .collect::<Vec<_>>()
        .join("%20")
}

/// Encodes a country name: each word uppercased, joined with `%20`.
pub fn encode_country(name: &str) -> String {
    name.split(' ')
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("%20")
}

/// Encodes a state name: same rule as countries.
pub fn encode_state(name: &str) -> String {
    encode_country(name)
}

/// Uppercases the first character of a word and lowercases the rest.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
