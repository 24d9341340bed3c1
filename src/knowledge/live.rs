//! Published knowledge-base snapshot
//!
//! Readers load the current `Arc<KnowledgeBase>` and score against it without
//! holding any lock. A reload builds its replacement off to the side and the
//! write lock is held only for the pointer swap, so no reader can observe a
//! partially populated base.

use std::sync::{Arc, RwLock};

use tracing::info;

use super::base::KnowledgeBase;
use super::defaults::builtin_knowledge_base;
use super::loader::{build_knowledge_base, KnowledgeRecord};
use crate::error::LoadError;

/// The live, atomically replaceable knowledge base
#[derive(Debug)]
pub struct LiveKnowledgeBase {
    current: RwLock<Arc<KnowledgeBase>>,
}

impl LiveKnowledgeBase {
    /// Start from the built-in defaults
    pub fn new() -> Self {
        Self::with_base(builtin_knowledge_base().clone())
    }

    /// Start from an explicit knowledge base
    pub fn with_base(kb: KnowledgeBase) -> Self {
        Self {
            current: RwLock::new(Arc::new(kb)),
        }
    }

    /// The currently published snapshot
    pub fn snapshot(&self) -> Arc<KnowledgeBase> {
        // The guarded value is only ever replaced whole, so a poisoned lock
        // still holds a complete snapshot.
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Publish a fully built knowledge base, returning the previous snapshot.
    pub fn publish(&self, kb: KnowledgeBase) -> Arc<KnowledgeBase> {
        let next = Arc::new(kb);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }

    /// Rebuild from defaults plus `batch` and publish the result.
    ///
    /// On error nothing is published and the previous snapshot stays live.
    pub fn reload<I, E>(&self, batch: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = Result<KnowledgeRecord, E>>,
        LoadError: From<E>,
    {
        let kb = build_knowledge_base(batch)?;
        let entries = kb.len();
        let previous = self.publish(kb);
        info!(
            entries,
            previous_entries = previous.len(),
            "Knowledge base reloaded"
        );
        Ok(())
    }
}

impl Default for LiveKnowledgeBase {
    fn default() -> Self {
        Self::new()
    }
}
