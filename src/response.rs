//! Response selection
//!
//! Turns a matched keyword into the payload the dialogue layer renders.
//! Suggestions and actions are returned exactly as authored; only the reply
//! text involves a choice, drawn uniformly from the entry's responses with
//! a caller-supplied random source.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::knowledge::{KnowledgeBase, Suggestion};

/// Everything the dialogue layer needs to answer a matched utterance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyPayload {
    pub keyword: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<Suggestion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// One response for `keyword`, chosen uniformly at random.
///
/// `None` if the keyword is unknown or has no responses.
pub fn random_response<R: Rng + ?Sized>(
    kb: &KnowledgeBase,
    keyword: &str,
    rng: &mut R,
) -> Option<String> {
    kb.get(keyword)?.responses.choose(rng).cloned()
}

/// Suggestions for `keyword`, verbatim
pub fn suggestions_for(kb: &KnowledgeBase, keyword: &str) -> Option<Vec<Suggestion>> {
    kb.suggestions_for(keyword).map(<[Suggestion]>::to_vec)
}

/// Follow-up action for `keyword`, verbatim
pub fn action_for(kb: &KnowledgeBase, keyword: &str) -> Option<String> {
    kb.action_for(keyword).map(str::to_string)
}

/// Assemble the full reply for a matched keyword.
pub fn build_reply<R: Rng + ?Sized>(
    kb: &KnowledgeBase,
    keyword: &str,
    rng: &mut R,
) -> Option<ReplyPayload> {
    let text = random_response(kb, keyword, rng)?;
    Some(ReplyPayload {
        keyword: keyword.to_string(),
        text,
        suggestions: suggestions_for(kb, keyword),
        action: action_for(kb, keyword),
    })
}
