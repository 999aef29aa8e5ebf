use std::collections::BTreeMap;

use canvas_model::PlainNode;

use crate::error::StoreResult;
use crate::store::TreeStore;

/// In-process store for tests and scratch documents
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, PlainNode>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TreeStore for MemoryStore {
    fn save(&mut self, key: &str, tree: &PlainNode) -> StoreResult<()> {
        self.entries.insert(key.to_string(), tree.clone());
        Ok(())
    }

    fn load(&self, key: &str) -> StoreResult<Option<PlainNode>> {
        Ok(self.entries.get(key).cloned())
    }

    fn clear(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.entries.contains_key(key))
    }
}
