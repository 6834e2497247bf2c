//! Name similarity scoring.
//!
//! Scores how closely a candidate name returned by a platform search matches
//! the user's query. Scores live in `[0, 1]`, higher is closer.

use super::levenshtein::levenshtein_distance;

/// Score for identical names (after case folding).
pub const EXACT_MATCH_SCORE: f64 = 1.0;
/// Score when one name contains the other.
pub const CONTAINS_SCORE: f64 = 0.8;
/// Score when one name is a prefix of the other.
pub const PREFIX_SCORE: f64 = 0.7;

/// Compute the similarity between two names.
///
/// Exact, containment and prefix matches get fixed scores; everything else
/// falls back to a normalized Levenshtein similarity
/// `1 - distance / max(len(a), len(b))`.
///
/// Containment is checked in both directions, so the prefix branch can never
/// fire on its own (any prefix is also contained). It is kept so the scoring
/// table stays explicit.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a == b {
        return EXACT_MATCH_SCORE;
    }

    if a.contains(&b) || b.contains(&a) {
        return CONTAINS_SCORE;
    }

    if a.starts_with(&b) || b.starts_with(&a) {
        return PREFIX_SCORE;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein_distance(&a, &b);
    1.0 - distance as f64 / max_len as f64
}
