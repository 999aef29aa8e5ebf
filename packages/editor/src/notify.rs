//! # Change Notification
//!
//! Every applied mutation produces one [`TreeChange`], delivered to each
//! subscribed [`ChangeListener`] in subscription order. Views re-render from
//! the tree after being told what changed; they never receive a copy of it.
//!
//! No-ops and rejected mutations notify nobody.

use std::fmt;

use canvas_model::{NodeId, SettingKey};
use serde::{Deserialize, Serialize};

/// Description of one applied change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "camelCase")]
pub enum TreeChange {
    RowInserted {
        row_id: NodeId,
        index: usize,
        column_ids: Vec<NodeId>,
    },
    RowMoved {
        row_id: NodeId,
        from: usize,
        to: usize,
    },
    NodeRemoved {
        node_id: NodeId,
        parent_id: NodeId,
        /// The node itself first, then its former descendants
        removed: Vec<NodeId>,
    },
    LeafPlaced {
        leaf_id: NodeId,
        column_id: NodeId,
        /// Previous column when an existing leaf moved
        from: Option<NodeId>,
    },
    LocalSettingChanged {
        node_id: NodeId,
        key: SettingKey,
    },
    GlobalSettingChanged {
        key: SettingKey,
    },
    LeafContentChanged {
        node_id: NodeId,
    },
    /// The whole tree was swapped (template applied, document reloaded)
    Replaced {
        rows: usize,
    },
}

impl TreeChange {
    /// Whether the change drops `id` from the tree
    pub fn removes(&self, id: &str) -> bool {
        match self {
            TreeChange::NodeRemoved { removed, .. } => removed.iter().any(|r| r == id),
            TreeChange::Replaced { .. } => true,
            _ => false,
        }
    }
}

/// Observer of applied changes
pub trait ChangeListener {
    fn on_change(&mut self, change: &TreeChange, version: u64);
}

impl<F> ChangeListener for F
where
    F: FnMut(&TreeChange, u64),
{
    fn on_change(&mut self, change: &TreeChange, version: u64) {
        self(change, version)
    }
}

/// Handle returned by [`ChangeNotifier::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered set of listeners
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn ChangeListener>)>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn ChangeListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn notify(&mut self, change: &TreeChange, version: u64) {
        for (_, listener) in &mut self.listeners {
            listener.on_change(change, version);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::new();

        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            notifier.subscribe(Box::new(move |_: &TreeChange, version: u64| {
                log.borrow_mut().push((name, version));
            }));
        }

        notifier.notify(&TreeChange::Replaced { rows: 0 }, 7);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Rc::new(RefCell::new(0));
        let mut notifier = ChangeNotifier::new();

        let counter = Rc::clone(&hits);
        let id = notifier.subscribe(Box::new(move |_: &TreeChange, _: u64| {
            *counter.borrow_mut() += 1;
        }));

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify(&TreeChange::Replaced { rows: 0 }, 1);

        assert_eq!(*hits.borrow(), 0);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_removes() {
        let change = TreeChange::NodeRemoved {
            node_id: "row".to_string(),
            parent_id: "doc".to_string(),
            removed: vec!["row".to_string(), "col".to_string()],
        };

        assert!(change.removes("col"));
        assert!(!change.removes("doc"));
    }
}
