//! String similarity metrics
//!
//! Two metrics drive outlier repair:
//! - character trigram Jaccard similarity, for deciding whether two values
//!   are variants of each other
//! - the Ratcliff-Obershelp ratio, for shortlisting close matches (cutoff
//!   0.6, best three, the behavior users of this kind of repair expect)
//!
//! Both operate on char boundaries, so multibyte input never splits a
//! codepoint.

use std::collections::HashSet;

/// The set of contiguous character trigrams of a string
///
/// Strings shorter than three chars contribute themselves as a single gram,
/// so identical short strings still compare equal. The empty string has an
/// empty gram set.
#[must_use]
pub fn trigram_set(s: &str) -> HashSet<String> {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return HashSet::new();
    }
    if chars.len() < 3 {
        return std::iter::once(s.to_string()).collect();
    }
    chars.windows(3).map(|w| w.iter().collect()).collect()
}

/// Trigram Jaccard similarity: |intersection| / |union|
///
/// Returns 0.0 when both strings are empty.
#[must_use]
pub fn trigram_jaccard(a: &str, b: &str) -> f64 {
    let ga = trigram_set(a);
    let gb = trigram_set(b);
    let union = ga.union(&gb).count();
    if union == 0 {
        return 0.0;
    }
    let intersect = ga.intersection(&gb).count();
    intersect as f64 / union as f64
}

/// Ratcliff-Obershelp similarity: 2 * matches / (len_a + len_b)
///
/// Matches are counted by recursing around the longest common substring.
/// Returns 1.0 for two empty strings.
#[must_use]
pub fn ratcliff_obershelp(a: &str, b: &str) -> f64 {
    let ca: Vec<char> = a.chars().collect();
    let cb: Vec<char> = b.chars().collect();
    let total = ca.len() + cb.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_chars(&ca, &cb);
    2.0 * matches as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (start_a, start_b, len) = longest_common_substring(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..start_a], &b[..start_b])
        + matching_chars(&a[start_a + len..], &b[start_b + len..])
}

fn longest_common_substring(a: &[char], b: &[char]) -> (usize, usize, usize) {
    if a.is_empty() || b.is_empty() {
        return (0, 0, 0);
    }
    let mut best = (0, 0, 0);
    // Rolling row of match lengths ending at (i, j)
    let mut prev = vec![0usize; b.len() + 1];
    for (i, ch_a) in a.iter().enumerate() {
        let mut current = vec![0usize; b.len() + 1];
        for (j, ch_b) in b.iter().enumerate() {
            if ch_a == ch_b {
                let len = prev[j] + 1;
                current[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            }
        }
        prev = current;
    }
    best
}

/// Best close matches for a target among candidates
///
/// Candidates scoring at least `cutoff` by Ratcliff-Obershelp, best first,
/// at most `cap` results. The target itself is included when present among
/// the candidates, matching how the repair loop pairs a suspect with its
/// neighborhood.
#[must_use]
pub fn close_matches<'a, I>(target: &str, candidates: I, cutoff: f64, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .map(|c| (ratcliff_obershelp(target, c), c))
        .filter(|(score, _)| *score >= cutoff)
        .collect();
    // Stable order: score descending, input order on ties
    scored.sort_by(|(sa, _), (sb, _)| sb.partial_cmp(sa).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(cap)
        .map(|(_, c)| c.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigram_set_basic() {
        let grams = trigram_set("example");
        assert!(grams.contains("exa"));
        assert!(grams.contains("ple"));
        assert_eq!(grams.len(), 5);
    }

    #[test]
    fn trigram_set_short_strings() {
        assert_eq!(trigram_set("ab").len(), 1);
        assert!(trigram_set("ab").contains("ab"));
        assert!(trigram_set("").is_empty());
    }

    #[test]
    fn jaccard_identical() {
        assert!((trigram_jaccard("chevrolet", "chevrolet") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn jaccard_near_variants_clear_threshold() {
        // One dropped letter in a long word keeps most trigrams
        assert!(trigram_jaccard("chevrolet", "chevrolte") > 0.5);
        assert!(trigram_jaccard("chevrolet", "toyota") < 0.25);
    }

    #[test]
    fn jaccard_both_empty_is_zero() {
        assert_eq!(trigram_jaccard("", ""), 0.0);
    }

    #[test]
    fn jaccard_symmetric() {
        let ab = trigram_jaccard("mazda", "madza");
        let ba = trigram_jaccard("madza", "mazda");
        assert_eq!(ab, ba);
    }

    #[test]
    fn ratcliff_identical_and_disjoint() {
        assert!((ratcliff_obershelp("abc", "abc") - 1.0).abs() < f64::EPSILON);
        assert_eq!(ratcliff_obershelp("abc", "xyz"), 0.0);
        assert!((ratcliff_obershelp("", "") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ratcliff_known_value() {
        // matches("abcd", "bcde") = lcs "bcd" (3) -> 2*3/8
        assert!((ratcliff_obershelp("abcd", "bcde") - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn ratcliff_multibyte_safe() {
        let r = ratcliff_obershelp("naïve", "naive");
        assert!(r > 0.7 && r < 1.0);
    }

    #[test]
    fn ratcliff_symmetric_on_plain_variants() {
        assert_eq!(
            ratcliff_obershelp("chevrolet", "chevrolte"),
            ratcliff_obershelp("chevrolte", "chevrolet")
        );
    }

    #[test]
    fn close_matches_respects_cutoff_and_cap() {
        let candidates = ["york", "yrok", "yor", "london", "paris"];
        let matches = close_matches("york", candidates.iter().copied(), 0.6, 3);
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0], "york");
        assert!(!matches.contains(&"london".to_string()));
    }

    #[test]
    fn close_matches_empty_when_nothing_close() {
        let matches = close_matches("york", ["tokyo", "lima"].iter().copied(), 0.6, 3);
        assert!(matches.is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn jaccard_bounded_and_symmetric(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
                let sim = trigram_jaccard(&a, &b);
                prop_assert!((0.0..=1.0).contains(&sim));
                prop_assert_eq!(sim, trigram_jaccard(&b, &a));
            }

            #[test]
            fn jaccard_identity(a in "[a-z]{1,12}") {
                prop_assert!((trigram_jaccard(&a, &a) - 1.0).abs() < f64::EPSILON);
            }

            // No symmetry assertion: LCS tie-breaking picks the first
            // maximal block, which can differ between argument orders.
            #[test]
            fn ratcliff_bounded(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
                let sim = ratcliff_obershelp(&a, &b);
                prop_assert!((0.0..=1.0).contains(&sim));
            }

            #[test]
            fn ratcliff_identity(a in "[a-z]{0,10}") {
                prop_assert!((ratcliff_obershelp(&a, &a) - 1.0).abs() < f64::EPSILON);
            }
        }
    }
}
