//! Candidate filter
//!
//! Cheap pre-check deciding whether an entry is worth scoring for an
//! utterance. Entries that fail it are never scored, which keeps ranking
//! cost bounded on large knowledge bases. Both inputs must already be
//! normalized.

use crate::normalize::char_len;

/// Keyword tokens longer than this take part in token overlap.
const SIGNIFICANT_TOKEN_LEN: usize = 3;

/// Keyword tokens longer than this qualify on their own when present in the utterance.
const DISTINCTIVE_TOKEN_LEN: usize = 6;

/// Check whether `keyword` should be scored against `utterance`.
///
/// An entry is a candidate when the utterance contains the whole keyword,
/// when at least half of the keyword's significant tokens overlap an
/// utterance token (either one containing the other), or when any
/// distinctive keyword token appears literally in the utterance.
pub fn is_candidate(utterance: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    if utterance.contains(keyword) {
        return true;
    }

    let significant: Vec<&str> = keyword
        .split_whitespace()
        .filter(|token| char_len(token) > SIGNIFICANT_TOKEN_LEN)
        .collect();
    if significant.is_empty() {
        return false;
    }

    let utterance_tokens: Vec<&str> = utterance.split_whitespace().collect();
    let overlapping = significant
        .iter()
        .filter(|kt| tokens_overlap(kt, &utterance_tokens))
        .count();

    if overlapping * 2 >= significant.len() {
        return true;
    }

    significant
        .iter()
        .any(|kt| char_len(kt) > DISTINCTIVE_TOKEN_LEN && utterance.contains(*kt))
}

fn tokens_overlap(keyword_token: &str, utterance_tokens: &[&str]) -> bool {
    utterance_tokens
        .iter()
        .any(|ut| ut.contains(keyword_token) || keyword_token.contains(*ut))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn candidate(utterance: &str, keyword: &str) -> bool {
        is_candidate(&normalize(utterance), &normalize(keyword))
    }

    #[test]
    fn test_substring_is_candidate() {
        assert!(candidate("Como funciona a assistência técnica?", "assistência técnica"));
        assert!(candidate("quero emitir o caf", "caf"));
    }

    #[test]
    fn test_half_of_tokens_overlap() {
        // "analise" present, "solo" absent: one of two significant tokens
        assert!(candidate("preciso de uma analise", "análise de solo"));
        // utterance token contained in keyword token
        assert!(candidate("sobre licenciamento", "licenciamento pesca"));
        assert!(candidate("piscicult", "piscicultura"));
    }

    #[test]
    fn test_distinctive_token_present() {
        // one of three significant tokens, but it is distinctive
        assert!(candidate(
            "mecanizacao?",
            "programa federal mecanizacao agricola"
        ));
    }

    #[test]
    fn test_short_keywords_need_substring() {
        assert!(!candidate("cadastro familiar", "caf"));
        assert!(!candidate("oi", "contato"));
    }

    #[test]
    fn test_short_utterance_tokens_reverse_match() {
        // "a" sits inside both "xablau" and "teste"
        assert!(candidate("a", "xablau teste"));
        assert!(candidate("a o e", "piscicultura"));
        assert!(!candidate("oi", "horário de atendimento"));
    }

    #[test]
    fn test_unrelated_text_is_not_candidate() {
        assert!(!candidate("bom dia", "vender para o governo"));
        assert!(!candidate("", "endereço"));
    }
}
