use std::fmt::Debug;
use std::path::Path;

use canvas_model::PlainNode;

use crate::error::StoreResult;
use crate::json_file::JsonFileStore;
use crate::memory::MemoryStore;

/// Key-addressed collection of plain trees
///
/// Every call completes or fails as a whole. A missing key is not an error.
pub trait TreeStore: Debug {
    /// Insert or replace the tree stored under `key`
    fn save(&mut self, key: &str, tree: &PlainNode) -> StoreResult<()>;

    /// Stored tree for `key`, or `None` if there is none
    fn load(&self, key: &str) -> StoreResult<Option<PlainNode>>;

    /// Remove `key`. Other entries are untouched.
    fn clear(&mut self, key: &str) -> StoreResult<()>;

    /// Stored keys in ascending order
    fn list(&self) -> StoreResult<Vec<String>>;

    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.load(key)?.is_some())
    }
}

pub const DOCUMENTS_FILE: &str = "documents.json";
pub const TEMPLATES_FILE: &str = "templates.json";

/// The two independently keyed stores an editor works against
#[derive(Debug)]
pub struct StoreSet {
    /// Live documents keyed by document id
    pub documents: Box<dyn TreeStore>,

    /// Named snapshots keyed by template name
    pub templates: Box<dyn TreeStore>,
}

impl StoreSet {
    pub fn new(documents: Box<dyn TreeStore>, templates: Box<dyn TreeStore>) -> Self {
        Self {
            documents,
            templates,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()))
    }

    /// File-backed stores under `dir` (created on first write)
    pub fn open(dir: &Path) -> Self {
        Self::new(
            Box::new(JsonFileStore::new(dir.join(DOCUMENTS_FILE))),
            Box::new(JsonFileStore::new(dir.join(TEMPLATES_FILE))),
        )
    }
}
