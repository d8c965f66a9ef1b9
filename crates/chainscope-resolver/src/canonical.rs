//! Name normalization and canonicalization
//!
//! `normalize` produces a comparison form of a name; `canonicalize` further
//! strips the location-specific qualifiers ("#4521", "- East", "of Miami",
//! "Store 12") so that every location of a brand reduces to the same text.
//! Both are total: unmatched input comes back normalized.

use regex::Regex;
use std::sync::LazyLock;

static APOSTROPHE_VARIANTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\u{2018}\u{2019}\u{201B}\u{2032}`\u{00B4}]")
        .expect("APOSTROPHE_VARIANTS regex is invalid")
});

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s']").expect("NON_WORD regex is invalid"));

static LEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*\d+\s*").expect("LEADING_MARKER regex is invalid"));

static TRAILING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*#\s*\d+$").expect("TRAILING_MARKER regex is invalid"));

static DIRECTIONAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*-\s*(?:east|west|north|south|central|downtown|midtown)$")
        .expect("DIRECTIONAL_SUFFIX regex is invalid")
});

static LOCATION_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(?:of|at)\s+.+$").expect("LOCATION_CLAUSE regex is invalid"));

static UNIT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+(?:store|location|branch|unit)(?:\s*#?\s*\d+)?$")
        .expect("UNIT_SUFFIX regex is invalid")
});

/// Lowercase and map apostrophe look-alikes to `'`
fn fold(name: &str) -> String {
    APOSTROPHE_VARIANTS
        .replace_all(&name.to_lowercase(), "'")
        .into_owned()
}

/// Normalize a business name for comparison
///
/// Lowercases, folds apostrophe variants, removes punctuation other than
/// word characters and apostrophes (so "Chick-fil-A" becomes "chickfila"),
/// and collapses whitespace.
///
/// # Examples
///
/// ```
/// use chainscope_resolver::canonical::normalize;
///
/// assert_eq!(normalize("  Joe\u{2019}s   PIZZA!! "), "joe's pizza");
/// ```
pub fn normalize(name: &str) -> String {
    let folded = fold(name);
    let stripped = NON_WORD.replace_all(&folded, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reduce a business name to its brand identity
///
/// Strips, in order: a leading or trailing `#<digits>` marker, a hyphenated
/// directional suffix, a trailing `of ...`/`at ...` clause, and a trailing
/// `store|location|branch|unit [digits]` token, then normalizes. A name that
/// would strip to nothing falls back to its normalized form.
///
/// # Examples
///
/// ```
/// use chainscope_resolver::canonical::canonicalize;
///
/// assert_eq!(canonicalize("Subway #4521"), "subway");
/// assert_eq!(canonicalize("Joe's Pizza - East"), "joe's pizza");
/// ```
pub fn canonicalize(name: &str) -> String {
    let folded = fold(name);
    let mut text = folded.trim().to_string();

    for pattern in [
        &*LEADING_MARKER,
        &*TRAILING_MARKER,
        &*DIRECTIONAL_SUFFIX,
        &*LOCATION_CLAUSE,
        &*UNIT_SUFFIX,
    ] {
        text = pattern.replace(&text, "").trim().to_string();
    }

    let canonical = normalize(&text);
    if canonical.is_empty() {
        normalize(name)
    } else {
        canonical
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: normalization is idempotent
        #[test]
        fn test_normalize_idempotent(name in "[ -~]{0,40}") {
            let once = normalize(&name);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Property: a location marker never changes the canonical name
        #[test]
        fn test_marker_does_not_change_canonical(brand in "[A-Za-z]{3,12}( [A-Za-z]{3,12})?", n in 0u32..100_000) {
            let marked = format!("{} #{}", brand, n);
            prop_assert_eq!(canonicalize(&marked), canonicalize(&brand));
        }
    }
}
