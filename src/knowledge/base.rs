//! In-memory knowledge base keyed by canonical keyword
//!
//! Enumeration follows first-seen order: the order keywords were first
//! inserted. Overwriting an existing keyword keeps its slot. The ranker
//! breaks score ties by this order, so it is part of the matching contract.

use std::collections::HashMap;

use super::entry::{Entry, Suggestion};

/// Mapping from canonical keyword (exact case as authored) to [`Entry`]
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<(String, Entry)>,
    positions: HashMap<String, usize>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, wholesale replacing any existing entry for the keyword.
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(&mut self, keyword: impl Into<String>, entry: Entry) -> Option<Entry> {
        let keyword = keyword.into();
        match self.positions.get(&keyword) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, entry)),
            None => {
                self.positions.insert(keyword.clone(), self.entries.len());
                self.entries.push((keyword, entry));
                None
            }
        }
    }

    /// Look up an entry by its exact keyword
    pub fn get(&self, keyword: &str) -> Option<&Entry> {
        self.positions
            .get(keyword)
            .map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.positions.contains_key(keyword)
    }

    /// Iterate entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Keywords in first-seen order
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Suggestions for a keyword, verbatim
    pub fn suggestions_for(&self, keyword: &str) -> Option<&[Suggestion]> {
        self.get(keyword)?.suggestions.as_deref()
    }

    /// Follow-up action for a keyword, verbatim
    pub fn action_for(&self, keyword: &str) -> Option<&str> {
        self.get(keyword)?.action.as_deref()
    }
}

impl<K: Into<String>> FromIterator<(K, Entry)> for KnowledgeBase {
    fn from_iter<T: IntoIterator<Item = (K, Entry)>>(iter: T) -> Self {
        let mut kb = KnowledgeBase::new();
        for (keyword, entry) in iter {
            kb.insert(keyword, entry);
        }
        kb
    }
}
