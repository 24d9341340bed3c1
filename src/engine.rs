//! Intent engine
//!
//! The session object a dialogue layer talks to. It owns the live knowledge
//! base, the acceptance threshold and the random source used for reply
//! selection.
//!
//! Matching is pure and read-only: each call loads the current snapshot once
//! and scores against it, so any number of callers can match concurrently
//! while a reload is being built.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument, warn};

use crate::config::EngineConfig;
use crate::error::LoadError;
use crate::knowledge::{
    KnowledgeBase, KnowledgeRecord, KnowledgeSource, LiveKnowledgeBase, Suggestion,
};
use crate::matching::{self, MatchCandidate, ACCEPTANCE_THRESHOLD};
use crate::response::{self, ReplyPayload};

/// Keyword matcher over a reloadable knowledge base
#[derive(Debug)]
pub struct IntentEngine {
    knowledge: LiveKnowledgeBase,
    threshold: f64,
    rng: Mutex<StdRng>,
}

impl IntentEngine {
    /// Engine over the built-in defaults with the default threshold
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Engine over the built-in defaults configured by `config`.
    ///
    /// `config.knowledge_file` is not read here; see [`IntentEngine::reload_from`].
    pub fn with_config(config: &EngineConfig) -> Self {
        Self::with_knowledge_base(crate::knowledge::builtin_knowledge_base().clone(), config)
    }

    /// Engine over an explicit knowledge base.
    ///
    /// `kb` is only the initial snapshot: every reload rebuilds from the
    /// built-in defaults plus its batch, so a custom base is replaced by the
    /// first successful reload.
    ///
    /// A threshold below [`ACCEPTANCE_THRESHOLD`] is raised to it.
    pub fn with_knowledge_base(kb: KnowledgeBase, config: &EngineConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            knowledge: LiveKnowledgeBase::with_base(kb),
            threshold: config.acceptance_threshold.max(ACCEPTANCE_THRESHOLD),
            rng: Mutex::new(rng),
        }
    }

    /// Current acceptance threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The currently published knowledge base
    pub fn snapshot(&self) -> Arc<KnowledgeBase> {
        self.knowledge.snapshot()
    }

    /// Best keyword for `utterance`, or `None`.
    #[instrument(skip(self), level = "debug")]
    pub fn match_intent(&self, utterance: &str) -> Option<String> {
        self.best_candidate(utterance).map(|c| c.keyword)
    }

    /// Best accepted candidate with its score
    pub fn best_candidate(&self, utterance: &str) -> Option<MatchCandidate> {
        matching::best_match(&self.snapshot(), utterance, self.threshold)
    }

    /// All scored candidates in knowledge-base order
    pub fn explain(&self, utterance: &str) -> Vec<MatchCandidate> {
        matching::rank_candidates(&self.snapshot(), utterance)
    }

    /// One randomly chosen response for `keyword`
    pub fn reply(&self, keyword: &str) -> Option<String> {
        let kb = self.snapshot();
        let mut rng = self.lock_rng();
        response::random_response(&kb, keyword, &mut *rng)
    }

    pub fn suggestions_for(&self, keyword: &str) -> Option<Vec<Suggestion>> {
        response::suggestions_for(&self.snapshot(), keyword)
    }

    pub fn action_for(&self, keyword: &str) -> Option<String> {
        response::action_for(&self.snapshot(), keyword)
    }

    /// Match `utterance` and build the full reply from the same snapshot.
    #[instrument(skip(self), level = "debug")]
    pub fn respond(&self, utterance: &str) -> Option<ReplyPayload> {
        let kb = self.snapshot();
        let candidate = matching::best_match(&kb, utterance, self.threshold)?;
        let mut rng = self.lock_rng();
        response::build_reply(&kb, &candidate.keyword, &mut *rng)
    }

    /// Rebuild the knowledge base from defaults plus `batch` and publish it.
    ///
    /// On error the previously published knowledge base stays live.
    pub fn reload<I, E>(&self, batch: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = Result<KnowledgeRecord, E>>,
        LoadError: From<E>,
    {
        self.knowledge.reload(batch).map_err(|e| {
            warn!(error = %e, "Knowledge reload failed, keeping current knowledge base");
            e
        })
    }

    /// Reload from an already materialised list of records
    pub fn reload_records(&self, records: Vec<KnowledgeRecord>) -> Result<(), LoadError> {
        self.reload(records.into_iter().map(Ok::<_, LoadError>))
    }

    /// Fetch a batch from `source` and reload from it.
    #[instrument(skip(self, source), fields(source = source.name()))]
    pub fn reload_from(&self, source: &dyn KnowledgeSource) -> Result<(), LoadError> {
        let records = source.fetch().map_err(|e| {
            warn!(error = %e, "Knowledge fetch failed, keeping current knowledge base");
            e
        })?;
        info!(records = records.len(), "Fetched knowledge batch");
        self.reload_records(records)
    }

    fn lock_rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        // A panic mid-draw leaves the generator usable
        match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for IntentEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::StaticSource;

    fn seeded(seed: u64) -> IntentEngine {
        IntentEngine::with_config(&EngineConfig {
            rng_seed: Some(seed),
            ..EngineConfig::default()
        })
    }

    struct FailingSource;

    impl KnowledgeSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        fn fetch(&self) -> Result<Vec<KnowledgeRecord>, LoadError> {
            Err(LoadError::Fetch("permission denied".to_string()))
        }
    }

    #[test]
    fn test_respond_bundles_reply() {
        let engine = seeded(11);
        let reply = engine.respond("Quero vender para o governo").unwrap();
        assert_eq!(reply.keyword, "vender para o governo");
        assert_eq!(reply.action.as_deref(), Some("fluxoPAA"));
        assert_eq!(reply.suggestions, None);
    }

    #[test]
    fn test_respond_none_when_unmatched() {
        assert_eq!(seeded(11).respond("oi"), None);
    }

    #[test]
    fn test_same_seed_same_replies() {
        let a = seeded(99);
        let b = seeded(99);
        for _ in 0..10 {
            assert_eq!(a.reply("piscicultura"), b.reply("piscicultura"));
        }
    }

    #[test]
    fn test_configured_threshold_applies() {
        let strict = IntentEngine::with_config(&EngineConfig {
            acceptance_threshold: 1_000.0,
            ..EngineConfig::default()
        });
        assert_eq!(strict.match_intent("piscicultura"), None);
        assert_eq!(
            seeded(1).match_intent("piscicultura"),
            Some("piscicultura".to_string())
        );
    }

    #[test]
    fn test_threshold_never_below_constant() {
        let lax = IntentEngine::with_config(&EngineConfig {
            acceptance_threshold: 0.0,
            ..EngineConfig::default()
        });
        assert_eq!(lax.threshold(), ACCEPTANCE_THRESHOLD);
        // "análise de solo" scores below 5 here
        assert_eq!(lax.best_candidate("analise"), None);
    }

    #[test]
    fn test_custom_base_replaced_on_reload() {
        let kb = [("feira", crate::knowledge::Entry::new(["Sábados"], 1.0))]
            .into_iter()
            .collect();
        let engine = IntentEngine::with_knowledge_base(kb, &EngineConfig::default());
        assert!(engine.snapshot().contains("feira"));

        engine.reload_records(Vec::new()).unwrap();
        let kb = engine.snapshot();
        assert!(!kb.contains("feira"));
        assert!(kb.contains("endereço"));
    }

    #[test]
    fn test_reload_from_static_source() {
        let engine = seeded(5);
        let source = StaticSource::new(vec![KnowledgeRecord::new(
            "feira do produtor",
            ["A feira acontece aos sábados."],
        )]);
        engine.reload_from(&source).unwrap();

        assert_eq!(
            engine.match_intent("onde fica a feira do produtor?"),
            Some("feira do produtor".to_string())
        );
        assert_eq!(
            engine.reply("feira do produtor").as_deref(),
            Some("A feira acontece aos sábados.")
        );
        // defaults survive
        assert!(engine.snapshot().contains("endereço"));
    }

    #[test]
    fn test_failed_fetch_keeps_knowledge() {
        let engine = seeded(5);
        let before = engine.snapshot();
        let err = engine.reload_from(&FailingSource).unwrap_err();
        assert!(matches!(err, LoadError::Fetch(_)));
        assert!(Arc::ptr_eq(&before, &engine.snapshot()));
    }
}
