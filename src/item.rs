//! Source collection items.
//!
//! A forest is an ordered `Vec<TreeItem<Id, T>>`. Items are immutable input:
//! expansion state lives outside the tree, keyed by id.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Bound for item identifiers (strings and integers both qualify).
///
/// Uniqueness across a forest is a caller-provided invariant and is never checked.
pub trait ItemId: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> ItemId for T {}

/// A node of the source collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeItem<Id, T> {
    /// Stable unique identifier
    pub id: Id,
    /// Opaque payload, never inspected by the windowing core
    pub data: T,
    /// Ordered children; `None` marks a leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeItem<Id, T>>>,
    /// Inline initial-expansion flag
    #[serde(default, skip_serializing_if = "is_false")]
    pub opened: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl<Id, T> TreeItem<Id, T> {
    /// Creates a leaf item.
    pub fn leaf(id: Id, data: T) -> Self {
        Self {
            id,
            data,
            children: None,
            opened: false,
        }
    }

    /// Creates an item with the given children.
    pub fn branch(id: Id, data: T, children: Vec<TreeItem<Id, T>>) -> Self {
        Self {
            id,
            data,
            children: Some(children),
            opened: false,
        }
    }

    /// Marks the item as initially expanded.
    pub fn opened(mut self) -> Self {
        self.opened = true;
        self
    }

    /// Returns the children slice (empty for leaves).
    pub fn children(&self) -> &[TreeItem<Id, T>] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns true if the item has at least one child.
    ///
    /// An item with an empty `children` vector is a leaf for traversal purposes.
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}

/// Collects the ids of every item whose inline `opened` flag is set.
///
/// Walks the whole forest, including children of items that are not opened,
/// so a nested opened flag is remembered once its ancestors get expanded.
pub fn collect_opened_ids<Id: ItemId, T>(roots: &[TreeItem<Id, T>]) -> HashSet<Id> {
    let mut opened = HashSet::new();
    let mut stack: Vec<&TreeItem<Id, T>> = roots.iter().collect();

    while let Some(item) = stack.pop() {
        if item.opened {
            opened.insert(item.id.clone());
        }
        stack.extend(item.children());
    }

    opened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_children_is_leaf() {
        let item: TreeItem<u32, ()> = TreeItem::branch(1, (), vec![]);
        assert!(!item.has_children());
        assert!(item.children().is_empty());
    }

    #[test]
    fn test_collect_opened_ids_walks_closed_parents() {
        let forest = vec![
            TreeItem::branch(
                "a",
                (),
                vec![TreeItem::branch("b", (), vec![TreeItem::leaf("c", ())]).opened()],
            ),
            TreeItem::leaf("d", ()).opened(),
        ];

        let opened = collect_opened_ids(&forest);
        assert_eq!(opened.len(), 2);
        assert!(opened.contains("b"));
        assert!(opened.contains("d"));
        assert!(!opened.contains("a"));
    }

    #[test]
    fn test_item_json_shape() {
        let json = r#"{"id": 7, "data": {"name": "x"}, "children": [{"id": 8, "data": null}], "opened": true}"#;
        let item: TreeItem<u64, serde_json::Value> = serde_json::from_str(json).unwrap();

        assert_eq!(item.id, 7);
        assert!(item.opened);
        assert_eq!(item.children().len(), 1);
        assert_eq!(item.children()[0].children, None);
        assert!(!item.children()[0].opened);
    }
}
