//! Tree expansion state management.
//!
//! The expansion set is owned outside the (immutable) forest and keyed by item
//! id. It is mutated only by explicit expand/collapse requests.

use crate::item::ItemId;
use std::collections::HashSet;

/// Set of expanded item ids.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeState<Id: ItemId> {
    expanded_nodes: HashSet<Id>,
}

impl<Id: ItemId> Default for TreeState<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: ItemId> TreeState<Id> {
    /// Creates a tree state with no expanded nodes.
    pub fn new() -> Self {
        Self {
            expanded_nodes: HashSet::new(),
        }
    }

    /// Creates a tree state with the given ids expanded.
    pub fn with_expanded<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = Id>,
    {
        Self {
            expanded_nodes: ids.into_iter().collect(),
        }
    }

    /// Clears all expansion state (collapses all nodes).
    pub fn clear(&mut self) {
        self.expanded_nodes.clear();
    }

    // ===== Expansion Queries =====

    /// Returns the set of expanded ids, as consumed by the flattener.
    pub fn expanded_nodes_set(&self) -> &HashSet<Id> {
        &self.expanded_nodes
    }

    pub fn is_expanded(&self, node_id: &Id) -> bool {
        self.expanded_nodes.contains(node_id)
    }

    /// Number of expanded ids.
    pub fn expanded_count(&self) -> usize {
        self.expanded_nodes.len()
    }

    // ===== Expansion Mutations =====

    /// Expands the given node.
    ///
    /// # Returns
    /// `true` if the node was newly expanded, `false` if already expanded.
    pub fn expand(&mut self, node_id: Id) -> bool {
        self.expanded_nodes.insert(node_id)
    }

    /// Collapses the given node.
    ///
    /// # Returns
    /// `true` if the node was expanded and is now collapsed, `false` if already collapsed.
    pub fn collapse(&mut self, node_id: &Id) -> bool {
        self.expanded_nodes.remove(node_id)
    }

    /// Flips membership of the given node.
    ///
    /// # Returns
    /// `true` if the node is expanded afterwards.
    pub fn toggle(&mut self, node_id: Id) -> bool {
        if self.expanded_nodes.remove(&node_id) {
            false
        } else {
            self.expanded_nodes.insert(node_id);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_membership() {
        let mut tree = TreeState::new();
        assert!(tree.toggle("a"));
        assert!(tree.is_expanded(&"a"));
        assert!(!tree.toggle("a"));
        assert!(!tree.is_expanded(&"a"));
    }

    #[test]
    fn test_expand_collapse_report_change() {
        let mut tree = TreeState::with_expanded([1u64, 2]);
        assert!(!tree.expand(1));
        assert!(tree.expand(3));
        assert!(tree.collapse(&2));
        assert!(!tree.collapse(&2));
        assert_eq!(tree.expanded_count(), 2);

        tree.clear();
        assert_eq!(tree.expanded_count(), 0);
    }
}
