//! Best-match selection across a knowledge base

use tracing::debug;

use super::filter::is_candidate;
use super::scoring::score;
use crate::knowledge::KnowledgeBase;
use crate::normalize::normalize;

/// Minimum score a match must reach to be returned.
pub const ACCEPTANCE_THRESHOLD: f64 = 5.0;

/// A scored keyword, produced while ranking
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub keyword: String,
    pub score: f64,
}

/// Whether a score clears `threshold` (inclusive).
pub fn is_accepted(score: f64, threshold: f64) -> bool {
    score >= threshold
}

/// Score every candidate entry, in knowledge-base order.
pub fn rank_candidates(kb: &KnowledgeBase, utterance: &str) -> Vec<MatchCandidate> {
    let normalized = normalize(utterance);
    kb.iter()
        .filter_map(|(keyword, entry)| {
            let normalized_keyword = normalize(keyword);
            if !is_candidate(&normalized, &normalized_keyword) {
                return None;
            }
            Some(MatchCandidate {
                keyword: keyword.to_string(),
                score: score(&normalized, &normalized_keyword, entry.base_score),
            })
        })
        .collect()
}

/// Highest-scoring candidate at or above `threshold`.
///
/// Ties go to the candidate seen first.
pub fn best_match(kb: &KnowledgeBase, utterance: &str, threshold: f64) -> Option<MatchCandidate> {
    let mut best: Option<MatchCandidate> = None;
    for candidate in rank_candidates(kb, utterance) {
        if best.as_ref().map_or(true, |b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    match best {
        Some(candidate) if is_accepted(candidate.score, threshold) => {
            debug!(keyword = %candidate.keyword, score = candidate.score, "Matched keyword");
            Some(candidate)
        }
        Some(candidate) => {
            debug!(
                keyword = %candidate.keyword,
                score = candidate.score,
                threshold,
                "Best candidate below threshold"
            );
            None
        }
        None => {
            debug!("No candidate keywords");
            None
        }
    }
}

/// Keyword best matching `utterance`, or `None`.
pub fn find_best_match(kb: &KnowledgeBase, utterance: &str) -> Option<String> {
    best_match(kb, utterance, ACCEPTANCE_THRESHOLD).map(|c| c.keyword)
}
