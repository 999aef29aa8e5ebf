//! Mutation semantics through the document handle

use canvas_editor::{
    Document, EditorError, LeafContent, LeafSource, LeafTemplate, Mutation, MutationResult,
    TreeChange,
};
use canvas_model::{
    document_seed, ListEntry, NodeId, NodeType, PaletteField, PlainNode, SettingKey,
    StylingField, TreeError,
};

fn insert_row(doc: &mut Document, columns: usize, index: usize) -> NodeId {
    match doc.apply(Mutation::InsertRow { columns, index }).unwrap() {
        MutationResult::Applied {
            change: TreeChange::RowInserted { row_id, .. },
            ..
        } => row_id,
        other => panic!("expected a row insertion, got {:?}", other),
    }
}

fn columns_of(doc: &Document, row_id: &str) -> Vec<NodeId> {
    doc.tree().get(row_id).unwrap().children().to_vec()
}

fn place_text(doc: &mut Document, column_id: &str, text: &str) -> NodeId {
    match doc
        .apply(Mutation::PlaceLeaf {
            source: LeafSource::Template(LeafTemplate::text(text)),
            column_id: column_id.to_string(),
        })
        .unwrap()
    {
        MutationResult::Applied {
            change: TreeChange::LeafPlaced { leaf_id, .. },
            ..
        } => leaf_id,
        other => panic!("expected a placement, got {:?}", other),
    }
}

fn move_row(doc: &mut Document, row_id: &str, target_index: usize) -> MutationResult {
    doc.apply(Mutation::MoveRow {
        row_id: row_id.to_string(),
        target_index,
    })
    .unwrap()
}

/// Document with rows A, B, C of one column each
fn three_rows() -> (Document, [NodeId; 3]) {
    let mut doc = Document::new("home");
    let a = insert_row(&mut doc, 1, 0);
    let b = insert_row(&mut doc, 1, 1);
    let c = insert_row(&mut doc, 1, 2);
    (doc, [a, b, c])
}

#[test]
fn test_insert_row_between_existing_rows() {
    let mut doc = Document::new("home");
    let r0 = insert_row(&mut doc, 1, 0);
    let r1 = insert_row(&mut doc, 2, 1);
    let r2 = insert_row(&mut doc, 3, 2);

    let new = insert_row(&mut doc, 2, 1);

    assert_eq!(doc.tree().row_ids(), vec![r0, new.clone(), r1, r2]);
    assert_eq!(columns_of(&doc, &new).len(), 2);
}

#[test]
fn test_insert_row_columns_are_empty() {
    let mut doc = Document::new("home");
    let row = insert_row(&mut doc, 3, 0);

    for column in columns_of(&doc, &row) {
        assert_eq!(doc.tree().get(&column).unwrap().node_type(), NodeType::Column);
        assert!(doc.tree().leaf_of(&column).is_none());
    }
}

#[test]
fn test_insert_row_past_end_is_rejected() {
    let mut doc = Document::new("home");
    insert_row(&mut doc, 1, 0);

    let result = doc.apply(Mutation::InsertRow {
        columns: 1,
        index: 2,
    });

    assert!(matches!(
        result,
        Err(EditorError::Tree(TreeError::IndexOutOfBounds { index: 2, len: 1 }))
    ));
    assert_eq!(doc.tree().row_ids().len(), 1);
}

#[test]
fn test_move_row_forward() {
    let (mut doc, [a, b, c]) = three_rows();

    assert!(move_row(&mut doc, &a, 2).is_applied());
    assert_eq!(doc.tree().row_ids(), vec![b, c, a]);
}

#[test]
fn test_move_row_forward_one_slot() {
    let (mut doc, [a, b, c]) = three_rows();

    assert!(move_row(&mut doc, &a, 1).is_applied());
    assert_eq!(doc.tree().row_ids(), vec![b, a, c]);
}

#[test]
fn test_move_row_backward() {
    let (mut doc, [a, b, c]) = three_rows();

    assert!(move_row(&mut doc, &c, 0).is_applied());
    assert_eq!(doc.tree().row_ids(), vec![c, a, b]);
}

#[test]
fn test_move_row_to_end_zone() {
    let (mut doc, [a, b, c]) = three_rows();

    assert!(move_row(&mut doc, &a, 3).is_applied());
    assert_eq!(doc.tree().row_ids(), vec![b, c, a]);
}

#[test]
fn test_move_row_forward_in_longer_sequence() {
    let (mut doc, [a, b, c]) = three_rows();
    let d = insert_row(&mut doc, 1, 3);

    move_row(&mut doc, &a, 2);
    assert_eq!(doc.tree().row_ids(), vec![b, c, a, d]);
}

#[test]
fn test_move_row_onto_itself_is_noop() {
    let (mut doc, [a, b, c]) = three_rows();
    let version = doc.version;

    assert!(!move_row(&mut doc, &b, 1).is_applied());
    assert!(!move_row(&mut doc, &c, 3).is_applied());
    assert_eq!(doc.tree().row_ids(), vec![a, b, c]);
    assert_eq!(doc.version, version);
}

#[test]
fn test_move_row_out_of_range() {
    let (mut doc, [a, ..]) = three_rows();

    let result = doc.apply(Mutation::MoveRow {
        row_id: a,
        target_index: 4,
    });
    assert!(matches!(
        result,
        Err(EditorError::Tree(TreeError::IndexOutOfBounds { .. }))
    ));
}

#[test]
fn test_move_column_as_row_is_rejected() {
    let (mut doc, [a, ..]) = three_rows();
    let column = columns_of(&doc, &a)[0].clone();

    let result = doc.apply(Mutation::MoveRow {
        row_id: column,
        target_index: 0,
    });
    assert!(matches!(
        result,
        Err(EditorError::Tree(TreeError::InvalidTarget {
            expected: NodeType::Row,
            found: NodeType::Column,
            ..
        }))
    ));
}

#[test]
fn test_column_holds_one_leaf() {
    let mut doc = Document::new("home");
    let row = insert_row(&mut doc, 1, 0);
    let column = columns_of(&doc, &row)[0].clone();

    let first = place_text(&mut doc, &column, "first");
    let second = doc
        .apply(Mutation::PlaceLeaf {
            source: LeafSource::Template(LeafTemplate::text("second")),
            column_id: column.clone(),
        })
        .unwrap();

    assert!(matches!(second, MutationResult::Noop { .. }));
    assert_eq!(doc.tree().get(&column).unwrap().children(), &[first]);
}

#[test]
fn test_move_leaf_between_columns() {
    let mut doc = Document::new("home");
    let row = insert_row(&mut doc, 2, 0);
    let cols = columns_of(&doc, &row);
    let leaf = place_text(&mut doc, &cols[0], "moving");

    doc.apply(Mutation::UpdateLocalSetting {
        node_id: leaf.clone(),
        key: SettingKey::Styling(StylingField::Weight),
        value: "700".to_string(),
    })
    .unwrap();

    let result = doc
        .apply(Mutation::PlaceLeaf {
            source: LeafSource::Existing(leaf.clone()),
            column_id: cols[1].clone(),
        })
        .unwrap();

    assert_eq!(
        result.change(),
        Some(&TreeChange::LeafPlaced {
            leaf_id: leaf.clone(),
            column_id: cols[1].clone(),
            from: Some(cols[0].clone()),
        })
    );
    assert!(doc.tree().leaf_of(&cols[0]).is_none());
    assert_eq!(doc.tree().parent_of(&leaf).unwrap().id(), cols[1]);

    let resolved = doc.resolve(&leaf).unwrap();
    assert_eq!(resolved.get(SettingKey::Styling(StylingField::Weight)), "700");
}

#[test]
fn test_move_leaf_into_occupied_column_is_noop() {
    let mut doc = Document::new("home");
    let row = insert_row(&mut doc, 2, 0);
    let cols = columns_of(&doc, &row);
    let left = place_text(&mut doc, &cols[0], "left");
    let right = place_text(&mut doc, &cols[1], "right");

    let result = doc
        .apply(Mutation::PlaceLeaf {
            source: LeafSource::Existing(left.clone()),
            column_id: cols[1].clone(),
        })
        .unwrap();

    assert!(!result.is_applied());
    assert_eq!(doc.tree().leaf_of(&cols[0]).unwrap().id(), left);
    assert_eq!(doc.tree().leaf_of(&cols[1]).unwrap().id(), right);
}

#[test]
fn test_place_into_row_is_rejected() {
    let mut doc = Document::new("home");
    let row = insert_row(&mut doc, 1, 0);

    let result = doc.apply(Mutation::PlaceLeaf {
        source: LeafSource::Template(LeafTemplate::text("x")),
        column_id: row,
    });

    assert!(matches!(
        result,
        Err(EditorError::Tree(TreeError::InvalidTarget {
            expected: NodeType::Column,
            found: NodeType::Row,
            ..
        }))
    ));
}

#[test]
fn test_remove_twice() {
    let (mut doc, [a, b, c]) = three_rows();

    let first = doc
        .apply(Mutation::RemoveNode {
            node_id: b.clone(),
        })
        .unwrap();
    assert!(first.is_applied());

    let second = doc.apply(Mutation::RemoveNode {
        node_id: b.clone(),
    });
    assert!(matches!(
        second,
        Err(EditorError::Tree(TreeError::NotAttached(id))) if id == b
    ));
    assert_eq!(doc.tree().row_ids(), vec![a, c]);
}

#[test]
fn test_remove_row_drops_subtree() {
    let mut doc = Document::new("home");
    let row = insert_row(&mut doc, 2, 0);
    let cols = columns_of(&doc, &row);
    let leaf = place_text(&mut doc, &cols[1], "gone");

    let result = doc
        .apply(Mutation::RemoveNode {
            node_id: row.clone(),
        })
        .unwrap();

    let Some(TreeChange::NodeRemoved { removed, .. }) = result.change() else {
        panic!("expected a removal");
    };
    assert_eq!(removed[0], row);
    assert!(removed.contains(&leaf));
    assert!(!doc.tree().contains(&leaf));
    assert!(doc.tree().is_empty());
}

#[test]
fn test_remove_leaf_frees_column() {
    let mut doc = Document::new("home");
    let row = insert_row(&mut doc, 1, 0);
    let column = columns_of(&doc, &row)[0].clone();
    let leaf = place_text(&mut doc, &column, "old");

    doc.apply(Mutation::RemoveNode { node_id: leaf }).unwrap();
    let replacement = place_text(&mut doc, &column, "new");

    assert_eq!(doc.tree().leaf_of(&column).unwrap().id(), replacement);
}

#[test]
fn test_remove_column_is_rejected() {
    let mut doc = Document::new("home");
    let row = insert_row(&mut doc, 1, 0);
    let column = columns_of(&doc, &row)[0].clone();
    let before = doc.tree().clone();
    let version = doc.version;

    let result = doc.apply(Mutation::RemoveNode {
        node_id: column.clone(),
    });

    assert!(matches!(
        result,
        Err(EditorError::Tree(TreeError::InvalidStructure(_)))
    ));
    assert_eq!(doc.tree(), &before);
    assert_eq!(doc.version, version);
    assert_eq!(columns_of(&doc, &row), vec![column]);

    let json = doc.to_plain().to_json().unwrap();
    let reloaded = Document::from_plain(&PlainNode::from_json(&json).unwrap()).unwrap();
    assert_eq!(reloaded.tree().row_ids(), vec![row]);
}

#[test]
fn test_insert_after_loading_huge_id_suffix() {
    let mut doc = Document::new("home");
    insert_row(&mut doc, 1, 0);
    let mut plain = doc.to_plain();
    let stored = format!("{}-4294967295", document_seed("home"));
    plain.children[0].id = stored.clone();

    let mut reloaded = Document::from_plain(&plain).unwrap();
    let row = insert_row(&mut reloaded, 1, 1);

    assert_ne!(row, stored);
    assert_eq!(reloaded.tree().row_ids()[0], stored);
}

#[test]
fn test_remove_root_is_rejected() {
    let mut doc = Document::new("home");
    let result = doc.apply(Mutation::RemoveNode {
        node_id: "home".to_string(),
    });

    assert!(matches!(
        result,
        Err(EditorError::Tree(TreeError::NotAttached(_)))
    ));
}

#[test]
fn test_local_setting_round() {
    let mut doc = Document::new("home");
    let row = insert_row(&mut doc, 2, 0);
    let cols = columns_of(&doc, &row);
    let styled = place_text(&mut doc, &cols[0], "styled");
    let plain = place_text(&mut doc, &cols[1], "plain");
    let key = SettingKey::Palette(PaletteField::Text);

    doc.apply(Mutation::UpdateLocalSetting {
        node_id: styled.clone(),
        key,
        value: "#ff0000".to_string(),
    })
    .unwrap();

    assert_eq!(doc.resolve(&styled).unwrap().get(key), "#ff0000");
    assert_eq!(doc.resolve(&plain).unwrap().get(key), "#000000");

    doc.apply(Mutation::ClearLocalSetting {
        node_id: styled.clone(),
        key,
    })
    .unwrap();
    assert_eq!(doc.resolve(&styled).unwrap().get(key), "#000000");

    let again = doc
        .apply(Mutation::ClearLocalSetting {
            node_id: styled,
            key,
        })
        .unwrap();
    assert!(!again.is_applied());
}

#[test]
fn test_update_leaf_content() {
    let mut doc = Document::new("home");
    let row = insert_row(&mut doc, 2, 0);
    let cols = columns_of(&doc, &row);
    let text = place_text(&mut doc, &cols[0], "before");
    let sidebar = match doc
        .apply(Mutation::PlaceLeaf {
            source: LeafSource::Template(LeafTemplate::list("Sidebar")),
            column_id: cols[1].clone(),
        })
        .unwrap()
        .change()
    {
        Some(TreeChange::LeafPlaced { leaf_id, .. }) => leaf_id.clone(),
        other => panic!("expected a placement, got {:?}", other),
    };

    doc.apply(Mutation::UpdateLeafContent {
        node_id: text.clone(),
        content: LeafContent::Text("after".to_string()),
    })
    .unwrap();
    assert_eq!(doc.tree().get(&text).unwrap().as_leaf().unwrap().text(), "after");

    let entries = vec![ListEntry::new("About", "about")];
    doc.apply(Mutation::UpdateLeafContent {
        node_id: sidebar.clone(),
        content: LeafContent::List(entries.clone()),
    })
    .unwrap();
    let plain = doc.to_plain();
    let stored = &plain.children[0].children[1].children[0];
    assert_eq!(stored.local_settings.as_ref().unwrap().list, Some(entries));

    let mismatch = doc.apply(Mutation::UpdateLeafContent {
        node_id: text,
        content: LeafContent::Image {
            src: "a.png".to_string(),
        },
    });
    assert!(matches!(
        mismatch,
        Err(EditorError::Tree(TreeError::ContentMismatch {
            node_type: NodeType::Text,
            ..
        }))
    ));
}
