mod levenshtein;
mod ranking;
mod similarity;

pub use levenshtein::levenshtein_distance;
pub use ranking::{
    order_scored, rank_candidates, Candidate, RankingPolicy, ScoredCandidate, DEFAULT_TIE_BAND,
};
pub use similarity::{similarity, CONTAINS_SCORE, EXACT_MATCH_SCORE, PREFIX_SCORE};
