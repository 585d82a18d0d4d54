//! Fuzzy matching utilities
//!
//! Nearest-match lookup used when an utterance matches no keyword directly.

use strsim::normalized_levenshtein;

/// Result of a fuzzy match with the matched value and score
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyMatch<'a> {
    pub value: &'a str,
    pub score: f64,
}

/// Find matches in a list of candidates
///
/// Returns up to `n` matches with scores at or above `cutoff`, best first.
/// Ties keep candidate order.
pub fn find_matches<'a>(
    search_term: &str,
    candidates: &[&'a str],
    n: usize,
    cutoff: f64,
) -> Vec<FuzzyMatch<'a>> {
    let search_term = search_term.trim();

    let mut matches: Vec<FuzzyMatch<'a>> = candidates
        .iter()
        .map(|&candidate| FuzzyMatch {
            value: candidate,
            score: similarity(search_term, candidate),
        })
        .filter(|m| m.score >= cutoff)
        .collect();

    // Stable sort so equal scores keep vocabulary order
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    matches.truncate(n);
    matches
}

/// Find the best match above a minimum score
///
/// Returns None if no match meets the cutoff
pub fn find_best_match<'a>(
    search_term: &str,
    candidates: &[&'a str],
    cutoff: f64,
) -> Option<FuzzyMatch<'a>> {
    find_matches(search_term, candidates, 1, cutoff)
        .into_iter()
        .next()
}

/// Calculate similarity score between two strings
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}
