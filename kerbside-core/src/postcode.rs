//! Canonicalization of UK postcodes.

use std::sync::LazyLock;

use regex::Regex;

// Outward code (area + district, optional trailing alphanumeric) followed by
// the inward code, with or without separating whitespace.
static POSTCODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-Z]{1,2}[0-9][A-Z0-9]?)\s*([0-9][A-Z]{2})")
        .expect("postcode pattern is valid")
});

/// Extract and canonicalize the first UK postcode found in `text`.
///
/// Returns the outward and inward codes upper-cased and joined with a single
/// space, or `None` when no postcode-shaped run is present. Postcodes
/// supplied without an internal space are accepted.
#[must_use]
pub fn normalise_postcode(text: &str) -> Option<String> {
    let captures = POSTCODE_PATTERN.captures(text)?;
    let outward = captures.get(1)?.as_str().to_uppercase();
    let inward = captures.get(2)?.as_str().to_uppercase();
    Some(format!("{outward} {inward}"))
}
