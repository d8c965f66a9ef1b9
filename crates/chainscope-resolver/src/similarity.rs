//! Name similarity scoring
//!
//! Identical normalized names score 1.0, identical canonical names 0.95, and
//! everything else `1 - levenshtein / max_len` over the normalized forms.

use crate::canonical::{canonicalize, normalize};

/// Score for names that differ only in location qualifiers
pub const CANONICAL_MATCH_SCORE: f64 = 0.95;

/// Levenshtein edit distance between two strings, counted in chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let m = a.len();
    let n = b.len();

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Precomputed comparison forms of one name
#[derive(Debug, Clone, PartialEq)]
pub struct NameKey {
    /// Normalized name
    pub normalized: String,
    /// Canonical name
    pub canonical: String,
    /// Length of the normalized name in chars
    pub len: usize,
}

impl NameKey {
    /// Compute the comparison forms of a raw name
    pub fn new(name: &str) -> Self {
        let normalized = normalize(name);
        let len = normalized.chars().count();
        Self {
            canonical: canonicalize(name),
            normalized,
            len,
        }
    }

    /// Similarity score in [0, 1]
    pub fn similarity(&self, other: &NameKey) -> f64 {
        if self.normalized == other.normalized {
            return 1.0;
        }
        if self.canonical == other.canonical {
            return CANONICAL_MATCH_SCORE;
        }

        let max_len = self.len.max(other.len);
        if max_len == 0 {
            return 1.0;
        }

        let distance = levenshtein(&self.normalized, &other.normalized);
        1.0 - distance as f64 / max_len as f64
    }

    /// Similarity if it reaches `threshold`, skipping the edit distance when
    /// the length gap alone rules a match out
    ///
    /// Levenshtein distance is at least the length difference, so
    /// `1 - |la - lb| / max` bounds the score from above.
    pub fn similarity_at_least(&self, other: &NameKey, threshold: f64) -> Option<f64> {
        if self.normalized != other.normalized && self.canonical != other.canonical {
            let max_len = self.len.max(other.len);
            if max_len > 0 {
                let gap = self.len.abs_diff(other.len);
                if 1.0 - (gap as f64 / max_len as f64) < threshold {
                    return None;
                }
            }
        }

        let score = self.similarity(other);
        (score >= threshold).then_some(score)
    }
}

/// Similarity of two raw business names, in [0, 1]
///
/// # Examples
///
/// ```
/// use chainscope_resolver::similarity::name_similarity;
///
/// assert_eq!(name_similarity("Subway", "SUBWAY!"), 1.0);
/// assert_eq!(name_similarity("Joe's Pizza - East", "Joe's Pizza - West"), 0.95);
/// ```
pub fn name_similarity(a: &str, b: &str) -> f64 {
    NameKey::new(a).similarity(&NameKey::new(b))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every name is fully similar to itself
        #[test]
        fn test_similarity_reflexive(name in ".{0,30}") {
            prop_assert_eq!(name_similarity(&name, &name), 1.0);
        }

        /// Property: similarity is symmetric and bounded
        #[test]
        fn test_similarity_symmetric(a in "[a-zA-Z#' -]{0,20}", b in "[a-zA-Z#' -]{0,20}") {
            let ab = name_similarity(&a, &b);
            prop_assert_eq!(ab, name_similarity(&b, &a));
            prop_assert!((0.0..=1.0).contains(&ab));
        }

        /// Property: levenshtein is symmetric
        #[test]
        fn test_levenshtein_symmetric(a in "[a-d]{0,12}", b in "[a-d]{0,12}") {
            prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
        }

        /// Property: levenshtein satisfies the triangle inequality
        #[test]
        fn test_levenshtein_triangle(a in "[a-d]{0,10}", b in "[a-d]{0,10}", c in "[a-d]{0,10}") {
            prop_assert!(levenshtein(&a, &c) <= levenshtein(&a, &b) + levenshtein(&b, &c));
        }

        /// Property: pruning never drops a pair that reaches the threshold
        #[test]
        fn test_pruning_is_lossless(a in "[a-c ]{0,16}", b in "[a-c ]{0,16}", t in 0.0f64..=1.0) {
            let ka = NameKey::new(&a);
            let kb = NameKey::new(&b);
            let full = ka.similarity(&kb);
            let pruned = ka.similarity_at_least(&kb, t);
            prop_assert_eq!(pruned.is_some(), full >= t);
        }
    }
}
