//! # Plain form
//!
//! Parent-free, behavior-free copy of a tree used for storage.
//!
//! - [`to_plain`] deep-copies a live tree; the tree itself is untouched.
//! - [`from_plain`] rebuilds a live tree, choosing each node's variant from its
//!   stored `type` tag and restoring parent links as children are attached.
//!
//! Children are stored as a JSON object keyed by id. Key order is the child
//! order, which matters for the row sequence.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{TreeError, TreeResult};
use crate::node::{ImageLeaf, ListEntry, ListLeaf, Node, NodeKind, NodeType, TextLeaf, Tree};
use crate::settings::{GlobalSettings, LocalSettings};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainNode {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default)]
    pub tag: String,

    #[serde(default, with = "ordered_children")]
    pub children: Vec<PlainNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_settings: Option<GlobalSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_settings: Option<PlainLocalSettings>,
}

/// Leaf settings as stored: the override fragment plus variant content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainLocalSettings {
    #[serde(flatten)]
    pub settings: LocalSettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<ListEntry>>,
}

impl PlainNode {
    fn new(node: &Node) -> Self {
        Self {
            id: node.id().to_string(),
            tag: node.node_type().tag().to_string(),
            children: Vec::new(),
            text: None,
            global_settings: None,
            local_settings: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Every id in this subtree, depth-first
    pub fn ids(&self) -> Vec<&str> {
        let mut out = vec![self.id.as_str()];
        for child in &self.children {
            out.extend(child.ids());
        }
        out
    }
}

/// Deep-copy a live tree into its plain form
pub fn to_plain(tree: &Tree) -> PlainNode {
    node_to_plain(tree, tree.root())
}

fn node_to_plain(tree: &Tree, node: &Node) -> PlainNode {
    let mut plain = PlainNode::new(node);
    plain.children = tree
        .children_of(node.id())
        .map(|child| node_to_plain(tree, child))
        .collect();

    match node.kind() {
        NodeKind::Root(settings) => plain.global_settings = Some(settings.clone()),
        NodeKind::Row | NodeKind::Column => {}
        NodeKind::Text(leaf) => {
            plain.text = Some(leaf.text.clone());
            plain.local_settings = Some(PlainLocalSettings {
                settings: leaf.local.clone(),
                ..Default::default()
            });
        }
        NodeKind::Image(leaf) => {
            plain.text = Some(leaf.text.clone());
            plain.local_settings = Some(PlainLocalSettings {
                settings: leaf.local.clone(),
                src: leaf.src.clone(),
                list: None,
            });
        }
        NodeKind::List(leaf) => {
            plain.text = Some(leaf.text.clone());
            plain.local_settings = Some(PlainLocalSettings {
                settings: leaf.local.clone(),
                src: None,
                list: leaf.list.clone(),
            });
        }
    }

    plain
}

/// Rebuild a live tree, keeping the stored root id as the document id
pub fn from_plain(plain: &PlainNode) -> TreeResult<Tree> {
    from_plain_as(plain, &plain.id)
}

/// Rebuild a live tree under a different document id.
///
/// Only the root id changes; every other id is kept verbatim.
pub fn from_plain_as(plain: &PlainNode, document_id: &str) -> TreeResult<Tree> {
    if NodeType::from_tag(&plain.tag) != Some(NodeType::Root) {
        return Err(TreeError::unexpected_tag(
            &plain.id,
            NodeType::Root.tag(),
            &plain.tag,
        ));
    }

    let settings = plain.global_settings.clone().unwrap_or_default();
    let mut tree = Tree::with_settings(document_id, settings);
    for row in &plain.children {
        attach(&mut tree, document_id, row)?;
    }
    Ok(tree)
}

fn attach(tree: &mut Tree, parent_id: &str, plain: &PlainNode) -> TreeResult<()> {
    let parent = tree.require(parent_id)?;
    let parent_type = parent.node_type();
    let occupied = !parent.children().is_empty();

    let kind = match kind_from_plain(plain) {
        Some(kind) if parent_type.accepts(kind.node_type()) => kind,
        None if parent_type == NodeType::Column => {
            warn!(id = %plain.id, tag = %plain.tag, "Skipping leaf with unknown type");
            return Ok(());
        }
        _ => {
            return Err(TreeError::unexpected_tag(
                &plain.id,
                expected_child(parent_type),
                &plain.tag,
            ))
        }
    };

    if parent_type == NodeType::Column && occupied {
        warn!(id = %plain.id, column = %parent_id, "Dropping extra leaf in occupied column");
        return Ok(());
    }
    if kind == NodeKind::Row && plain.children.is_empty() {
        return Err(TreeError::invalid_structure(format!(
            "row {} has no columns",
            plain.id
        )));
    }

    let is_container = !kind.node_type().is_leaf();
    let index = tree.require(parent_id)?.children().len();
    tree.insert(parent_id, index, plain.id.clone(), kind)?;

    if is_container {
        for child in &plain.children {
            attach(tree, &plain.id, child)?;
        }
    }
    Ok(())
}

/// Tag-driven variant selection. Unknown tags yield `None`.
fn kind_from_plain(plain: &PlainNode) -> Option<NodeKind> {
    let node_type = NodeType::from_tag(&plain.tag)?;
    let text = plain.text.clone().unwrap_or_default();
    let local = plain.local_settings.clone().unwrap_or_default();

    let kind = match node_type {
        NodeType::Root => NodeKind::Root(plain.global_settings.clone().unwrap_or_default()),
        NodeType::Row => NodeKind::Row,
        NodeType::Column => NodeKind::Column,
        NodeType::Text => NodeKind::Text(TextLeaf {
            text,
            local: local.settings,
        }),
        NodeType::Image => NodeKind::Image(ImageLeaf {
            text,
            src: local.src,
            local: local.settings,
        }),
        NodeType::List => NodeKind::List(ListLeaf {
            text,
            list: local.list,
            local: local.settings,
        }),
    };
    Some(kind)
}

fn expected_child(parent: NodeType) -> &'static str {
    match parent {
        NodeType::Root => NodeType::Row.tag(),
        NodeType::Row => NodeType::Column.tag(),
        NodeType::Column => "leaf node",
        NodeType::Text | NodeType::Image | NodeType::List => "no children",
    }
}

/// Children as an id-keyed map that keeps insertion order
mod ordered_children {
    use std::fmt;

    use serde::de::{MapAccess, SeqAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::PlainNode;

    pub fn serialize<S: Serializer>(children: &[PlainNode], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(children.len()))?;
        for child in children {
            map.serialize_entry(&child.id, child)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<PlainNode>, D::Error> {
        deserializer.deserialize_any(ChildrenVisitor)
    }

    struct ChildrenVisitor;

    impl<'de> Visitor<'de> for ChildrenVisitor {
        type Value = Vec<PlainNode>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of node id to node")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut children = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, mut child)) = access.next_entry::<String, PlainNode>()? {
                if child.id.is_empty() {
                    child.id = key;
                }
                children.push(child);
            }
            Ok(children)
        }

        // Older exports stored children as an array
        fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut children = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(child) = access.next_element::<PlainNode>()? {
                children.push(child);
            }
            Ok(children)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{PaletteField, SettingKey};

    fn sample() -> Tree {
        let mut tree = Tree::new("home");
        tree.insert("home", 0, "r1", NodeKind::Row).unwrap();
        tree.insert("r1", 0, "c1", NodeKind::Column).unwrap();
        tree.insert("r1", 1, "c2", NodeKind::Column).unwrap();
        tree.insert("home", 1, "r2", NodeKind::Row).unwrap();
        tree.insert("r2", 0, "c3", NodeKind::Column).unwrap();

        let mut local = LocalSettings::default();
        local.set(SettingKey::Palette(PaletteField::Text), "#ff0000");
        tree.insert(
            "c1",
            0,
            "t1",
            NodeKind::Text(TextLeaf {
                text: "Hello".to_string(),
                local,
            }),
        )
        .unwrap();
        tree.insert(
            "c3",
            0,
            "s1",
            NodeKind::List(ListLeaf {
                text: "Sidebar".to_string(),
                list: Some(vec![ListEntry::new("About", "about")]),
                local: LocalSettings::default(),
            }),
        )
        .unwrap();
        tree
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let tree = sample();
        let restored = from_plain(&to_plain(&tree)).unwrap();
        assert_eq!(restored, tree);
    }

    #[test]
    fn test_to_plain_leaves_live_tree_untouched() {
        let tree = sample();
        let before = tree.clone();
        let _ = to_plain(&tree);
        assert_eq!(tree, before);
        assert_eq!(tree.parent_of("t1").unwrap().id(), "c1");
    }

    #[test]
    fn test_persisted_shape() {
        let json: serde_json::Value = serde_json::to_value(to_plain(&sample())).unwrap();

        assert_eq!(json["type"], "root-node");
        assert_eq!(json["globalSettings"]["palette"]["onBrand"], "#ffffff");
        assert_eq!(json["children"]["r1"]["type"], "row-node");
        assert_eq!(json["children"]["r1"]["children"]["c2"]["type"], "col-node");

        let leaf = &json["children"]["r1"]["children"]["c1"]["children"]["t1"];
        assert_eq!(leaf["type"], "text-node");
        assert_eq!(leaf["text"], "Hello");
        assert_eq!(leaf["localSettings"]["palette"]["text"], "#ff0000");
        assert!(leaf.get("parent").is_none());
        assert!(leaf["localSettings"].get("styling").is_none());

        let list = &json["children"]["r2"]["children"]["c3"]["children"]["s1"];
        assert_eq!(list["type"], "sidebar-node");
        assert_eq!(list["localSettings"]["list"][0]["name"], "About");
    }

    #[test]
    fn test_json_keeps_row_order() {
        let mut tree = Tree::new("home");
        for (i, id) in ["zeta", "alpha", "mid"].iter().enumerate() {
            tree.insert("home", i, *id, NodeKind::Row).unwrap();
            tree.insert(id, 0, format!("{}-col", id), NodeKind::Column).unwrap();
        }

        let json = to_plain(&tree).to_json().unwrap();
        let restored = from_plain(&PlainNode::from_json(&json).unwrap()).unwrap();

        assert_eq!(restored.row_ids(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_unknown_leaf_type_leaves_column_empty() {
        let json = r#"{
            "id": "home", "type": "root-node",
            "children": { "r": { "id": "r", "type": "row-node",
                "children": { "c": { "id": "c", "type": "col-node",
                    "children": { "v": { "id": "v", "type": "video-node", "text": "Clip" } } } } } }
        }"#;

        let tree = from_plain(&PlainNode::from_json(json).unwrap()).unwrap();
        assert!(tree.contains("c"));
        assert!(tree.leaf_of("c").is_none());
        assert!(!tree.contains("v"));
    }

    #[test]
    fn test_unknown_row_type_is_an_error() {
        let json = r#"{ "id": "home", "type": "root-node",
            "children": { "x": { "id": "x", "type": "grid-node", "children": {} } } }"#;

        let err = from_plain(&PlainNode::from_json(json).unwrap()).unwrap_err();
        assert!(matches!(err, TreeError::UnexpectedTag { .. }));
    }

    #[test]
    fn test_row_without_columns_is_rejected() {
        let json = r#"{ "id": "home", "type": "root-node",
            "children": { "r": { "id": "r", "type": "row-node", "children": {} } } }"#;

        let err = from_plain(&PlainNode::from_json(json).unwrap()).unwrap_err();
        assert!(matches!(err, TreeError::InvalidStructure(_)));
    }

    #[test]
    fn test_missing_settings_fall_back_to_defaults() {
        let json = r#"{ "id": "home", "type": "root-node", "children": {} }"#;
        let tree = from_plain(&PlainNode::from_json(json).unwrap()).unwrap();
        assert_eq!(tree.global_settings(), &GlobalSettings::default());
    }

    #[test]
    fn test_missing_child_id_is_taken_from_key() {
        let json = r#"{ "id": "home", "type": "root-node",
            "children": { "r": { "type": "row-node",
                "children": { "c": { "type": "col-node" } } } } }"#;

        let tree = from_plain(&PlainNode::from_json(json).unwrap()).unwrap();
        assert_eq!(tree.row_ids(), vec!["r"]);
        assert_eq!(tree.parent_of("c").unwrap().id(), "r");
    }

    #[test]
    fn test_from_plain_as_renames_only_the_root() {
        let plain = to_plain(&sample());
        let tree = from_plain_as(&plain, "landing").unwrap();

        assert_eq!(tree.root_id(), "landing");
        assert_eq!(tree.parent_of("r1").unwrap().id(), "landing");
        assert!(tree.contains("t1"));
    }
}
