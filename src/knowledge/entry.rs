//! Knowledge-base entry types

use serde::{Deserialize, Serialize};

/// Base score given to entries whose source omits one.
pub const DEFAULT_BASE_SCORE: f64 = 1.0;

/// A suggestion button offered alongside a reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text shown on the button
    #[serde(alias = "text")]
    pub label: String,
    /// Identifier of the dialogue action the button triggers
    #[serde(rename = "actionId", alias = "action")]
    pub action_id: String,
}

impl Suggestion {
    pub fn new(label: impl Into<String>, action_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action_id: action_id.into(),
        }
    }
}

/// One curated knowledge-base record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Canned replies; one is drawn at random per answer
    pub responses: Vec<String>,
    /// Optional suggestion buttons, returned verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<Suggestion>>,
    /// Optional follow-up action identifier, returned verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Starting weight before utterance-specific bonuses (always > 0)
    pub base_score: f64,
}

impl Entry {
    /// Create an entry with the given responses and base score.
    ///
    /// A base score that is not a positive finite number falls back to
    /// [`DEFAULT_BASE_SCORE`].
    pub fn new<I, S>(responses: I, base_score: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            suggestions: None,
            action: None,
            base_score: sanitize_base_score(base_score),
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Whether this entry can ever produce a reply
    pub fn is_selectable(&self) -> bool {
        !self.responses.is_empty()
    }
}

pub(crate) fn sanitize_base_score(score: f64) -> f64 {
    if score.is_finite() && score > 0.0 {
        score
    } else {
        DEFAULT_BASE_SCORE
    }
}
