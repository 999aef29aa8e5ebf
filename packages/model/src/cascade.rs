//! Settings cascade: document defaults overridden per leaf, per field.
//!
//! Resolution happens on every read, so an edit to the defaults shows up on
//! each leaf that does not override that field.

use crate::node::Tree;
use crate::settings::{EffectiveSettings, SettingKey};

/// Effective settings of a leaf. Containers and unknown ids have none.
pub fn resolve(tree: &Tree, id: &str) -> Option<EffectiveSettings> {
    let leaf = tree.get(id)?.as_leaf()?;
    Some(tree.global_settings().cascade(leaf.local_settings()))
}

/// Effective value of one field of a leaf
pub fn resolve_field(tree: &Tree, id: &str, key: SettingKey) -> Option<String> {
    let leaf = tree.get(id)?.as_leaf()?;
    let value = leaf
        .local_settings()
        .get(key)
        .unwrap_or_else(|| tree.global_settings().get(key));
    Some(value.to_string())
}
