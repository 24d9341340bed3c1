//! kb-intent - keyword knowledge-base intent matching
//!
//! Given a raw user utterance, decides which entry of a curated knowledge
//! base it refers to and surfaces that entry's canned reply, suggestion
//! buttons and follow-up action. Exactly one best match (or none) is
//! returned per call.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Dialogue layer (chat widget, CLI)                              │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │ utterance
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  IntentEngine                                                   │
//! │  normalize → candidate filter → score → best ≥ 5.0              │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │ keyword
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Response selection (random reply, suggestions, action)         │
//! └─────────────────────────────────────────────────────────────────┘
//!
//!   KnowledgeSource ──► build from defaults + batch ──► atomic swap
//! ```
//!
//! # Usage
//!
//! ```
//! use kb_intent::{IntentEngine, KnowledgeRecord};
//!
//! let engine = IntentEngine::new();
//! let keyword = engine.match_intent("Como funciona a assistência técnica?");
//! assert_eq!(keyword.as_deref(), Some("assistência técnica"));
//!
//! engine
//!     .reload_records(vec![KnowledgeRecord::new("feira", ["Aos sábados."])])
//!     .unwrap();
//! assert_eq!(engine.reply("feira").as_deref(), Some("Aos sábados."));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod knowledge;
pub mod matching;
pub mod normalize;
pub mod response;

pub use config::EngineConfig;
pub use engine::IntentEngine;
pub use error::{ConfigError, LoadError};
pub use knowledge::{
    build_knowledge_base, builtin_knowledge_base, Entry, FileSource, KnowledgeBase,
    KnowledgeRecord, KnowledgeSource, LiveKnowledgeBase, StaticSource, Suggestion,
};
pub use matching::{find_best_match, MatchCandidate, ScoreBreakdown, ACCEPTANCE_THRESHOLD};
pub use normalize::{analyze_keyword_frequency, extract_keywords, normalize};
pub use response::ReplyPayload;
