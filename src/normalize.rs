//! Text normalization for keyword matching
//!
//! Every comparison in the matcher happens on normalized text:
//! - Lowercase conversion
//! - Unicode canonical decomposition (NFD)
//! - Combining diacritical marks (U+0300..=U+036F) removed
//!
//! Whitespace and punctuation pass through untouched. The tokenizer half of
//! this module feeds the keyword frequency analysis used when curating the
//! knowledge base; it is not on the matching path.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use unicode_normalization::UnicodeNormalization;

/// Portuguese stop words dropped by [`extract_keywords`], in normalized form.
const STOP_WORDS_LIST: &[&str] = &[
    "a", "o", "e", "de", "da", "do", "em", "para", "por", "com", "sem", "como", "qual", "quais",
    "onde", "quando", "quem", "que", "porque", "pois", "ao", "aos", "ou", "um", "uma", "uns",
    "umas", "me", "mim", "meu", "minha", "seu", "sua", "seus", "suas", "nao", "sim", "talvez",
];

static STOP_WORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS_LIST.iter().copied().collect());

/// Tokens of this many characters or fewer are never significant.
const MIN_SIGNIFICANT_LEN: usize = 2;

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Normalize text for matching.
///
/// # Examples
///
/// ```
/// use kb_intent::normalize::normalize;
///
/// assert_eq!(normalize("Assistência Técnica"), "assistencia tecnica");
/// assert_eq!(normalize("Horário de atendimento?"), "horario de atendimento?");
/// ```
pub fn normalize(text: &str) -> String {
    // Lowercasing can itself introduce combining marks ('İ' -> "i\u{307}"),
    // so decomposition runs after it.
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect()
}

/// Number of characters, the unit every length in the scorer is measured in.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Check if a normalized token is a stop word
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Extract the significant tokens of a text.
///
/// Normalizes, strips punctuation, splits on whitespace and drops stop
/// words and tokens of two characters or fewer.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let stripped: String = normalize(text)
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    stripped
        .split_whitespace()
        .filter(|token| char_len(token) > MIN_SIGNIFICANT_LEN && !is_stop_word(token))
        .map(|token| token.to_string())
        .collect()
}

/// Count significant-token occurrences across a batch of texts.
///
/// Used to spot recurring terms in logged utterances that deserve their own
/// knowledge-base entry.
pub fn analyze_keyword_frequency<I, S>(texts: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut frequency = HashMap::new();
    for text in texts {
        for keyword in extract_keywords(text.as_ref()) {
            *frequency.entry(keyword).or_insert(0) += 1;
        }
    }
    frequency
}
