//! Utterance matching: candidate filter, scorer and ranker
//!
//! ```text
//! utterance ─► normalize ─► is_candidate? ─► score ─► best ≥ threshold ─► keyword
//! ```

pub mod filter;
pub mod ranker;
pub mod scoring;

pub use filter::is_candidate;
pub use ranker::{
    best_match, find_best_match, is_accepted, rank_candidates, MatchCandidate,
    ACCEPTANCE_THRESHOLD,
};
pub use scoring::{score, score_breakdown, ScoreBreakdown, WordMatch};
