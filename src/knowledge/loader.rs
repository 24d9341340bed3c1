//! Knowledge-base loader
//!
//! Builds a replacement knowledge base from the built-in defaults plus an
//! externally supplied batch of records. The batch is consumed in full before
//! anything is returned; any error while iterating it aborts the build so the
//! caller never publishes a partial base.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::base::KnowledgeBase;
use super::defaults::builtin_knowledge_base;
use super::entry::{Entry, Suggestion, DEFAULT_BASE_SCORE};
use crate::error::LoadError;

/// One externally supplied knowledge record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub responses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<Suggestion>>,
}

impl KnowledgeRecord {
    pub fn new<I, S>(keyword: impl Into<String>, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keyword: keyword.into(),
            responses: responses.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    /// Convert into a keyword/entry pair, or `None` if the record is unusable.
    fn into_entry(self) -> Option<(String, Entry)> {
        if self.keyword.is_empty() || self.responses.is_empty() {
            return None;
        }
        if let Some(score) = self.score {
            if !(score.is_finite() && score > 0.0) {
                warn!(
                    keyword = %self.keyword,
                    score,
                    "Non-positive knowledge score, using default"
                );
            }
        }
        let mut entry = Entry::new(self.responses, self.score.unwrap_or(DEFAULT_BASE_SCORE));
        entry.action = self.action;
        entry.suggestions = self.suggestions;
        Some((self.keyword, entry))
    }
}

/// Build a fresh knowledge base from the built-in defaults plus `batch`.
///
/// Every usable record inserts or wholesale overwrites its keyword; there is
/// no field-level merge. Records with an empty keyword or no responses are
/// skipped. The first `Err` in the batch aborts the build.
pub fn build_knowledge_base<I, E>(batch: I) -> Result<KnowledgeBase, LoadError>
where
    I: IntoIterator<Item = Result<KnowledgeRecord, E>>,
    LoadError: From<E>,
{
    let mut kb = builtin_knowledge_base().clone();
    let mut applied = 0usize;
    let mut skipped = 0usize;

    for record in batch {
        let record = record?;
        let keyword = record.keyword.clone();
        match record.into_entry() {
            Some((keyword, entry)) => {
                if kb.insert(keyword.clone(), entry).is_some() {
                    debug!(keyword = %keyword, "Overriding knowledge entry");
                }
                applied += 1;
            }
            None => {
                warn!(keyword = %keyword, "Skipping knowledge record without keyword or responses");
                skipped += 1;
            }
        }
    }

    debug!(applied, skipped, total = kb.len(), "Knowledge base built");
    Ok(kb)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_batch(records: Vec<KnowledgeRecord>) -> Vec<Result<KnowledgeRecord, LoadError>> {
        records.into_iter().map(Ok).collect()
    }

    #[test]
    fn test_empty_batch_yields_defaults() {
        let kb = build_knowledge_base(ok_batch(vec![])).unwrap();
        assert_eq!(kb.len(), builtin_knowledge_base().len());
    }

    #[test]
    fn test_override_replaces_whole_entry() {
        let kb = build_knowledge_base(ok_batch(vec![KnowledgeRecord::new(
            "endereço",
            ["Rua Nova, 10"],
        )]))
        .unwrap();

        let entry = kb.get("endereço").unwrap();
        assert_eq!(entry.responses, vec!["Rua Nova, 10".to_string()]);
        assert_eq!(entry.base_score, DEFAULT_BASE_SCORE);
        assert_eq!(kb.len(), builtin_knowledge_base().len());
    }

    #[test]
    fn test_override_drops_absent_optional_fields() {
        let kb = build_knowledge_base(ok_batch(vec![
            KnowledgeRecord::new("piscicultura", ["Novo texto"]).with_score(4.0)
        ]))
        .unwrap();

        let entry = kb.get("piscicultura").unwrap();
        assert_eq!(entry.action, None);
        assert_eq!(entry.base_score, 4.0);
    }

    #[test]
    fn test_new_keyword_is_appended() {
        let kb = build_knowledge_base(ok_batch(vec![KnowledgeRecord::new(
            "feira do produtor",
            ["A feira acontece aos sábados."],
        )
        .with_action("fluxoFeira")]))
        .unwrap();

        assert_eq!(kb.keywords().last(), Some("feira do produtor"));
        assert_eq!(kb.action_for("feira do produtor"), Some("fluxoFeira"));
    }

    #[test]
    fn test_unusable_records_are_skipped() {
        let kb = build_knowledge_base(ok_batch(vec![
            KnowledgeRecord::new("", ["sem chave"]),
            KnowledgeRecord::new("contato", Vec::<String>::new()),
        ]))
        .unwrap();

        assert_eq!(kb.len(), builtin_knowledge_base().len());
        assert_eq!(
            kb.get("contato").map(|e| e.responses.len()),
            Some(2),
            "contato must keep its default responses"
        );
    }

    #[test]
    fn test_whitespace_keyword_is_kept() {
        let kb = build_knowledge_base(ok_batch(vec![KnowledgeRecord::new("   ", ["só espaços"])]))
            .unwrap();
        assert_eq!(kb.len(), builtin_knowledge_base().len() + 1);
        assert!(kb.contains("   "));
    }

    #[test]
    fn test_non_positive_score_defaults() {
        let kb = build_knowledge_base(ok_batch(vec![
            KnowledgeRecord::new("zero", ["x"]).with_score(0.0)
        ]))
        .unwrap();
        assert_eq!(kb.get("zero").map(|e| e.base_score), Some(DEFAULT_BASE_SCORE));
    }

    #[test]
    fn test_error_aborts_build() {
        let batch: Vec<Result<KnowledgeRecord, LoadError>> = vec![
            Ok(KnowledgeRecord::new("contato", ["x"])),
            Err(LoadError::Fetch("connection reset".to_string())),
        ];
        let err = build_knowledge_base(batch).unwrap_err();
        assert!(matches!(err, LoadError::Fetch(_)));
    }

    #[test]
    fn test_record_deserializes_optional_fields() {
        let record: KnowledgeRecord = serde_json::from_str(
            r#"{"keyword": "caf", "responses": ["X"], "score": 5,
                "suggestions": [{"label": "Emitir", "actionId": "fluxoCAF"}]}"#,
        )
        .unwrap();
        assert_eq!(record.score, Some(5.0));
        assert_eq!(record.action, None);
        assert_eq!(
            record.suggestions,
            Some(vec![Suggestion::new("Emitir", "fluxoCAF")])
        );
    }
}
