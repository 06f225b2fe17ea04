//! Fuzzy handle matching for "did you mean" hints.
//!
//! Scores with the Ratcliff/Obershelp ratio: twice the number of matched
//! characters divided by the combined length, where matches are found by
//! recursively taking the longest common substring on either side.

use std::collections::HashMap;

/// Score cutoff below which no suggestion is offered.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Similarity ratio between two strings in `[0.0, 1.0]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio(matching_chars(&a, &b), a.len() + b.len())
}

/// Best candidate scoring at or above `cutoff`.
///
/// Ties go to the shorter candidate, then to the lexicographically smaller one.
/// Candidates whose length or character counts cannot reach the cutoff (or the
/// best score so far) are rejected before the full ratio is computed.
pub fn closest_match<'a, I>(query: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let query_chars: Vec<char> = query.chars().collect();
    let query_counts = char_counts(&query_chars);
    let mut best: Option<(f64, &'a str)> = None;

    for candidate in candidates {
        let floor = best.map_or(cutoff, |(score, _)| score.max(cutoff));
        let candidate_chars: Vec<char> = candidate.chars().collect();
        let total = query_chars.len() + candidate_chars.len();

        if ratio(query_chars.len().min(candidate_chars.len()), total) < floor {
            continue;
        }
        if ratio(common_chars(&query_counts, &candidate_chars), total) < floor {
            continue;
        }

        let score = ratio(matching_chars(&query_chars, &candidate_chars), total);
        if score < cutoff {
            continue;
        }

        let better = match best {
            None => true,
            Some((best_score, best_candidate)) => {
                score > best_score
                    || (score == best_score
                        && (candidate.len(), candidate) < (best_candidate.len(), best_candidate))
            }
        };

        if better {
            best = Some((score, candidate));
        }
    }

    best.map(|(_, candidate)| candidate)
}

fn ratio(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    2.0 * matched as f64 / total as f64
}

fn char_counts(chars: &[char]) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for &c in chars {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

/// Size of the character multiset intersection; never less than `matching_chars`.
fn common_chars(counts: &HashMap<char, usize>, other: &[char]) -> usize {
    let mut remaining = counts.clone();
    let mut common = 0;
    for c in other {
        if let Some(left) = remaining.get_mut(c) {
            if *left > 0 {
                *left -= 1;
                common += 1;
            }
        }
    }
    common
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (start_a, start_b, len) = longest_common_substring(a, b);
    if len == 0 {
        return 0;
    }

    len + matching_chars(&a[..start_a], &b[..start_b])
        + matching_chars(&a[start_a + len..], &b[start_b + len..])
}

/// Earliest longest common substring as `(start_a, start_b, len)`.
fn longest_common_substring(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // lengths[j + 1] = length of the common suffix ending at a[i], b[j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            let len = curr[j + 1];
            if len > best.2 {
                best = (i + 1 - len, j + 1 - len, len);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_one() {
        assert_eq!(similarity("player", "player"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_disjoint_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_ratio_counts_all_matching_blocks() {
        // "abcd" vs "bcda": "bcd" matches (3 chars), nothing left to match around it
        let score = similarity("abcd", "bcda");
        assert!((score - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_closest_match_prefers_shorter_on_tie() {
        let handles = ["a", "aa"];
        assert_eq!(closest_match("ab", handles, DEFAULT_CUTOFF), Some("a"));
    }

    #[test]
    fn test_closest_match_picks_highest_score() {
        let handles = ["sounds/jump", "sprites/player", "sprites/enemy"];
        assert_eq!(
            closest_match("sprites/playr", handles, DEFAULT_CUTOFF),
            Some("sprites/player")
        );
    }

    #[test]
    fn test_closest_match_respects_cutoff() {
        let handles = ["a", "b"];
        assert_eq!(closest_match("missing", handles, DEFAULT_CUTOFF), None);
        assert_eq!(closest_match("anything", std::iter::empty(), 0.0), None);
    }

    #[test]
    fn test_character_bound_never_undercuts_ratio() {
        for (a, b) in [("abcd", "bcda"), ("sprites/playr", "sprites/player"), ("ab", "ba"), ("", "x")] {
            let a_chars: Vec<char> = a.chars().collect();
            let b_chars: Vec<char> = b.chars().collect();
            let bound = ratio(common_chars(&char_counts(&a_chars), &b_chars), a_chars.len() + b_chars.len());
            assert!(bound >= similarity(a, b), "{a} vs {b}");
        }
    }

    #[test]
    fn test_long_dissimilar_candidates_are_rejected_quickly() {
        let long_a = "a".repeat(3000);
        let long_b = "b".repeat(3000);
        let started = std::time::Instant::now();
        for _ in 0..100 {
            assert_eq!(closest_match(&long_a, [long_b.as_str()], DEFAULT_CUTOFF), None);
            assert_eq!(closest_match("hero", [long_a.as_str()], DEFAULT_CUTOFF), None);
        }
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_unicode_handles() {
        assert!(similarity("crème", "creme") > 0.7);
    }
}
