//! Ordering of scored search candidates.

use super::similarity::similarity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Score gap under which Spotify results are ordered by popularity instead.
pub const DEFAULT_TIE_BAND: f64 = 0.3;

/// Something returned by a platform search that can be ranked against a query.
pub trait Candidate {
    /// Display name compared against the query.
    fn name(&self) -> &str;

    /// Secondary popularity metric, higher is more popular.
    fn popularity(&self) -> u32 {
        0
    }
}

/// A candidate paired with its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<T> {
    pub candidate: T,
    pub score: f64,
}

/// How scored candidates are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum RankingPolicy {
    /// Descending by score only.
    ScoreOnly,

    /// Descending by score when two scores differ by more than `tie_band`,
    /// otherwise descending by popularity.
    ScoreThenPopularity { tie_band: f64 },
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self::ScoreThenPopularity {
            tie_band: DEFAULT_TIE_BAND,
        }
    }
}

impl RankingPolicy {
    /// Compare two scored candidates; `Less` means `a` ranks before `b`.
    pub fn compare<T: Candidate>(&self, a: &ScoredCandidate<T>, b: &ScoredCandidate<T>) -> Ordering {
        let by_score = b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal);
        match self {
            Self::ScoreOnly => by_score,
            Self::ScoreThenPopularity { tie_band } => {
                if (a.score - b.score).abs() > *tie_band {
                    by_score
                } else {
                    b.candidate.popularity().cmp(&a.candidate.popularity())
                }
            }
        }
    }
}

/// Score every candidate against `query` and order them with `policy`.
pub fn rank_candidates<T: Candidate>(
    query: &str,
    candidates: Vec<T>,
    policy: &RankingPolicy,
) -> Vec<ScoredCandidate<T>> {
    let scored = candidates
        .into_iter()
        .map(|candidate| {
            let score = similarity(candidate.name(), query);
            ScoredCandidate { candidate, score }
        })
        .collect();
    order_scored(scored, policy)
}

/// Order already scored candidates.
///
/// The popularity tie band makes the comparator non-transitive, so this is a
/// stable insertion sort driven directly by the comparator. Candidates that
/// compare equal keep their input order.
pub fn order_scored<T: Candidate>(
    scored: Vec<ScoredCandidate<T>>,
    policy: &RankingPolicy,
) -> Vec<ScoredCandidate<T>> {
    let mut ordered: Vec<ScoredCandidate<T>> = Vec::with_capacity(scored.len());
    for item in scored {
        let mut position = ordered.len();
        while position > 0 && policy.compare(&item, &ordered[position - 1]) == Ordering::Less {
            position -= 1;
        }
        ordered.insert(position, item);
    }
    ordered
}
