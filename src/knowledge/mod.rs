//! Knowledge base, built-in defaults and the reload path

pub mod base;
pub mod defaults;
pub mod entry;
pub mod live;
pub mod loader;
pub mod source;

pub use base::KnowledgeBase;
pub use defaults::builtin_knowledge_base;
pub use entry::{Entry, Suggestion, DEFAULT_BASE_SCORE};
pub use live::LiveKnowledgeBase;
pub use loader::{build_knowledge_base, KnowledgeRecord};
pub use source::{FileSource, KnowledgeSource, StaticSource};
