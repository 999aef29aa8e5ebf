//! JSON-file backed store.
//!
//! The whole collection lives in one JSON object keyed by id:
//!
//! ```json
//! { "home": { "id": "home", "type": "root-node", ... },
//!   "about": { "id": "about", "type": "root-node", ... } }
//! ```
//!
//! Every write rewrites the file through a temp file and a rename, so readers
//! never observe a half-written collection. Entries are kept as raw JSON, so
//! saving one key never rewrites the content of another. Object key order is
//! child order; serde_json's `preserve_order` keeps it through `Value`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use canvas_model::PlainNode;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::TreeStore;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or blank file is an empty collection
    fn read_all(&self) -> StoreResult<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, entries: &Map<String, Value>) -> StoreResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }
}

impl TreeStore for JsonFileStore {
    fn save(&mut self, key: &str, tree: &PlainNode) -> StoreResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), serde_json::to_value(tree)?);
        self.write_all(&entries)?;
        debug!(key, path = %self.path.display(), "Saved tree");
        Ok(())
    }

    fn load(&self, key: &str) -> StoreResult<Option<PlainNode>> {
        let mut entries = self.read_all()?;
        let Some(value) = entries.remove(key) else {
            return Ok(None);
        };

        serde_json::from_value(value)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    fn clear(&mut self, key: &str) -> StoreResult<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
            debug!(key, path = %self.path.display(), "Cleared tree");
        }
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.read_all()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
