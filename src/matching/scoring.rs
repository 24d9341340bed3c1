//! Utterance/keyword scoring
//!
//! The score is the entry's base score plus independent bonus terms,
//! scaled down for long utterances so they cannot win purely by containing
//! many incidental substrings. Every term is kept in a [`ScoreBreakdown`]
//! and traced so a surprising match can be attributed.
//!
//! The constants are empirically tuned. Changing any of them changes which
//! entry wins for real utterances.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{trace, warn};

use crate::normalize::char_len;

// ---------------------------------------------------------------------------
// Scoring Constants
// ---------------------------------------------------------------------------

/// Bonus when the utterance is exactly the keyword.
pub const EXACT_MATCH_BONUS: f64 = 20.0;

/// Bonus when the utterance contains the whole keyword.
pub const PHRASE_MATCH_BONUS: f64 = 10.0;

/// Additional bonus when the utterance starts with the keyword.
pub const PREFIX_BONUS: f64 = 5.0;

/// Bonus per keyword token found as a whole word.
pub const WORD_MATCH_BONUS: f64 = 2.0;

/// Keyword tokens shorter than this are never tested as whole words.
pub const MIN_WORD_LEN: usize = 3;

/// Bonus per matched token when more than one token matched.
pub const MULTI_WORD_BONUS_PER_WORD: f64 = 3.0;

/// Bonus when every token of a multi-token keyword matched.
pub const ALL_WORDS_BONUS: f64 = 8.0;

/// Divisor turning a length in characters into a length bonus.
pub const LENGTH_BONUS_DIVISOR: f64 = 10.0;

/// Length factor applied to arbitrarily long utterances.
pub const LENGTH_FACTOR_FLOOR: f64 = 0.7;

/// Share of the score that decays with utterance length.
pub const LENGTH_FACTOR_WEIGHT: f64 = 0.3;

/// Utterances up to this many characters are not discounted.
pub const REFERENCE_UTTERANCE_LEN: f64 = 15.0;

/// One keyword token found as a whole word in the utterance
#[derive(Debug, Clone, PartialEq)]
pub struct WordMatch {
    pub token: String,
    pub bonus: f64,
}

/// Every term contributing to a score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub exact: f64,
    pub phrase: f64,
    pub prefix: f64,
    pub word_matches: Vec<WordMatch>,
    pub multi_word_bonus: f64,
    pub all_words_bonus: f64,
    pub length_factor: f64,
}

impl ScoreBreakdown {
    /// Sum of the base score and all bonuses, before length normalization
    pub fn raw(&self) -> f64 {
        self.base
            + self.exact
            + self.phrase
            + self.prefix
            + self.word_matches.iter().map(|m| m.bonus).sum::<f64>()
            + self.multi_word_bonus
            + self.all_words_bonus
    }

    /// Final score
    pub fn total(&self) -> f64 {
        self.raw() * self.length_factor
    }
}

/// Score a normalized utterance against a normalized keyword.
pub fn score(utterance: &str, keyword: &str, base_score: f64) -> f64 {
    score_breakdown(utterance, keyword, base_score).total()
}

/// Score with every term kept separately.
pub fn score_breakdown(utterance: &str, keyword: &str, base_score: f64) -> ScoreBreakdown {
    let keyword_len = char_len(keyword) as f64;

    let exact = if utterance == keyword {
        EXACT_MATCH_BONUS
    } else {
        0.0
    };

    let (phrase, prefix) = if utterance.contains(keyword) {
        let phrase = PHRASE_MATCH_BONUS + keyword_len / LENGTH_BONUS_DIVISOR;
        let prefix = if utterance.starts_with(keyword) {
            PREFIX_BONUS
        } else {
            0.0
        };
        (phrase, prefix)
    } else {
        (0.0, 0.0)
    };

    let keyword_tokens: Vec<&str> = keyword.split_whitespace().collect();
    let word_matches: Vec<WordMatch> = keyword_tokens
        .iter()
        .filter(|token| char_len(token) >= MIN_WORD_LEN)
        .filter(|token| contains_whole_word(utterance, token))
        .map(|token| WordMatch {
            token: token.to_string(),
            bonus: WORD_MATCH_BONUS + char_len(token) as f64 / LENGTH_BONUS_DIVISOR,
        })
        .collect();

    let matched = word_matches.len();
    let multi_word_bonus = if matched > 1 {
        MULTI_WORD_BONUS_PER_WORD * matched as f64
    } else {
        0.0
    };
    let all_words_bonus = if keyword_tokens.len() > 1 && matched == keyword_tokens.len() {
        ALL_WORDS_BONUS
    } else {
        0.0
    };

    let breakdown = ScoreBreakdown {
        base: base_score,
        exact,
        phrase,
        prefix,
        word_matches,
        multi_word_bonus,
        all_words_bonus,
        length_factor: length_factor(char_len(utterance)),
    };

    trace!(
        keyword,
        base = breakdown.base,
        exact = breakdown.exact,
        phrase = breakdown.phrase,
        prefix = breakdown.prefix,
        words = ?breakdown.word_matches,
        multi_word = breakdown.multi_word_bonus,
        all_words = breakdown.all_words_bonus,
        length_factor = breakdown.length_factor,
        total = breakdown.total(),
        "Scored keyword"
    );

    breakdown
}

/// Discount applied to long utterances.
///
/// The denominator is clamped to 1 so empty utterances stay finite.
pub fn length_factor(utterance_len: usize) -> f64 {
    let len = utterance_len.max(1) as f64;
    LENGTH_FACTOR_FLOOR + LENGTH_FACTOR_WEIGHT * (REFERENCE_UTTERANCE_LEN / len).min(1.0)
}

/// Compiled word-boundary patterns, keyed by keyword token.
///
/// Bounded by the distinct tokens of every keyword ever scored.
static WORD_PATTERNS: Lazy<RwLock<HashMap<String, Regex>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Whether `word` occurs in `haystack` delimited by word boundaries
fn contains_whole_word(haystack: &str, word: &str) -> bool {
    {
        let patterns = match WORD_PATTERNS.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(re) = patterns.get(word) {
            return re.is_match(haystack);
        }
    }

    let re = match Regex::new(&format!(r"\b{}\b", regex::escape(word))) {
        Ok(re) => re,
        Err(e) => {
            warn!(word, error = %e, "Failed to build word-boundary pattern");
            return false;
        }
    };
    let found = re.is_match(haystack);
    let mut patterns = match WORD_PATTERNS.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    patterns.entry(word.to_string()).or_insert(re);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_length_factor() {
        assert!((length_factor(0) - 1.0).abs() < EPS);
        assert!((length_factor(15) - 1.0).abs() < EPS);
        assert!((length_factor(30) - 0.85).abs() < EPS);
        assert!(length_factor(10_000) > LENGTH_FACTOR_FLOOR);
    }

    #[test]
    fn test_exact_match_terms() {
        let b = score_breakdown("contato", "contato", 1.0);
        assert_eq!(b.exact, EXACT_MATCH_BONUS);
        assert!((b.phrase - 10.7).abs() < EPS);
        assert_eq!(b.prefix, PREFIX_BONUS);
        assert_eq!(b.word_matches.len(), 1);
        assert!((b.word_matches[0].bonus - 2.7).abs() < EPS);
        assert_eq!(b.multi_word_bonus, 0.0);
        assert_eq!(b.all_words_bonus, 0.0);
        // 1 + 20 + 10.7 + 5 + 2.7, utterance shorter than 15 chars
        assert!((b.total() - 39.4).abs() < EPS);
    }

    #[test]
    fn test_phrase_inside_long_utterance() {
        let u = normalize("Como funciona a assistência técnica?");
        let k = normalize("assistência técnica");
        let b = score_breakdown(&u, &k, 2.0);

        assert_eq!(b.exact, 0.0);
        assert!((b.phrase - 11.9).abs() < EPS);
        assert_eq!(b.prefix, 0.0);
        let tokens: Vec<_> = b.word_matches.iter().map(|m| m.token.as_str()).collect();
        assert_eq!(tokens, vec!["assistencia", "tecnica"]);
        assert_eq!(b.multi_word_bonus, 6.0);
        assert_eq!(b.all_words_bonus, ALL_WORDS_BONUS);
        // raw = 2 + 11.9 + 3.1 + 2.7 + 6 + 8, 36 chars
        assert!((b.raw() - 33.7).abs() < EPS);
        assert!((b.length_factor - (0.7 + 0.3 * 15.0 / 36.0)).abs() < EPS);
    }

    #[test]
    fn test_short_tokens_block_all_words_bonus() {
        // "de" is never tested, so not every token can match
        let b = score_breakdown("analise de solo", "analise de solo", 2.0);
        assert_eq!(b.word_matches.len(), 2);
        assert_eq!(b.multi_word_bonus, 6.0);
        assert_eq!(b.all_words_bonus, 0.0);
    }

    #[test]
    fn test_word_boundary_required() {
        let b = score_breakdown("cafezinho", "caf", 3.0);
        assert!(b.word_matches.is_empty());
        assert!(b.phrase > 0.0);
        assert_eq!(b.prefix, PREFIX_BONUS);

        let b = score_breakdown("o caf, por favor", "caf", 3.0);
        assert_eq!(b.word_matches.len(), 1);
    }

    #[test]
    fn test_word_patterns_compiled_once() {
        assert!(contains_whole_word("quero piscicultura hoje", "piscicultura"));
        assert!(!contains_whole_word("pisciculturas", "piscicultura"));
        assert!(contains_whole_word("piscicultura", "piscicultura"));

        let patterns = WORD_PATTERNS.read().unwrap();
        assert!(patterns.contains_key("piscicultura"));
    }

    #[test]
    fn test_no_overlap_scores_base_only() {
        let b = score_breakdown("zabcdefghz", "abcdefgh xyz", 5.0);
        assert_eq!(b.raw(), 5.0);
        assert_eq!(b.total(), 5.0);
    }

    fn keyword_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z]{3,8}", 1..4).prop_map(|words| words.join(" "))
    }

    proptest! {
        #[test]
        fn exact_match_dominates_superstrings(
            k in keyword_strategy(),
            prefix in "([a-z]{1,8} ){0,3}",
            suffix in "( [a-z]{1,8}){0,3}",
            base in 0.5f64..10.0,
        ) {
            let u = format!("{prefix}{k}{suffix}");
            prop_assume!(u != k);
            prop_assert!(score(&k, &k, base) > score(&u, &k, base));
        }

        #[test]
        fn exact_match_dominates_truncations(
            k in keyword_strategy(),
            cut in 1usize..8,
            base in 0.5f64..10.0,
        ) {
            let keep = k.len().saturating_sub(cut);
            let u = &k[..keep];
            prop_assert!(score(&k, &k, base) > score(u, &k, base));
        }
    }
}
