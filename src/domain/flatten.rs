//! Tree flattening.
//!
//! Converts a forest plus an expansion set into the ordered, position-annotated
//! row sequence the window calculator slices. Traversal is a pre-order walk that
//! only descends into expanded items, driven by an explicit stack so arbitrarily
//! deep trees do not exhaust the call stack.
//!
//! Cyclic input cannot be expressed with owned `TreeItem` children, so the only
//! caller obligation left is id uniqueness.

use crate::item::{ItemId, TreeItem};
use std::collections::HashSet;

/// Kind of tree node (parent or leaf).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NodeKind {
    /// Item with at least one child
    Parent,
    /// Item without children
    Leaf,
}

/// One row of the flattened sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry<Id, T> {
    /// Copied from the source item
    pub id: Id,
    /// Copied from the source item
    pub data: T,
    /// Position in the flattened sequence
    pub index: usize,
    /// 0 for roots, +1 per nesting level
    pub depth: usize,
    /// Absolute offset of the row (`index * item_size`)
    pub top: f64,
    /// Row extent (the configured item size)
    pub height: f64,
    /// Parent or leaf
    pub kind: NodeKind,
    /// Whether this is the last child of its parent (or the last root)
    pub is_last_child: bool,
    /// For each depth level (0 to depth-1), whether there are more siblings
    /// below at that level. Used to draw tree guide lines.
    pub branch_context: Vec<bool>,
}

/// Offset of the row at `index` for a uniform `item_size`.
///
/// The window calculator uses the same expression, which keeps the
/// index-arithmetic and filter-based selections in exact agreement.
pub fn entry_top(index: usize, item_size: f64) -> f64 {
    index as f64 * item_size
}

/// A node reached by the expansion-aware traversal.
#[derive(Debug, Clone)]
pub struct VisitedNode<'a, Id, T> {
    /// The source item
    pub item: &'a TreeItem<Id, T>,
    /// Depth in the tree hierarchy (0 for root)
    pub depth: usize,
    /// Parent or leaf
    pub kind: NodeKind,
    /// Whether this node is the last child of its parent
    pub is_last_child: bool,
    /// Per-level sibling continuation flags
    pub branch_context: Vec<bool>,
}

/// Stack frame for iterative depth-first traversal.
struct TraversalFrame<'a, Id, T> {
    item: &'a TreeItem<Id, T>,
    depth: usize,
    branch_context: Vec<bool>,
    is_last_child: bool,
}

/// Lazy pre-order iterator that descends only into expanded items.
pub struct ExpandedTraversal<'a, Id, T> {
    stack: Vec<TraversalFrame<'a, Id, T>>,
    expanded: &'a HashSet<Id>,
}

impl<'a, Id: ItemId, T> ExpandedTraversal<'a, Id, T> {
    fn new(roots: &'a [TreeItem<Id, T>], expanded: &'a HashSet<Id>) -> Self {
        let num_roots = roots.len();

        // Reversed so the first root is popped first
        let stack = roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, item)| TraversalFrame {
                item,
                depth: 0,
                branch_context: Vec::new(),
                is_last_child: i + 1 == num_roots,
            })
            .collect();

        Self { stack, expanded }
    }
}

impl<'a, Id: ItemId, T> Iterator for ExpandedTraversal<'a, Id, T> {
    type Item = VisitedNode<'a, Id, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.stack.pop()?;
        let children = frame.item.children();
        let kind = if children.is_empty() {
            NodeKind::Leaf
        } else {
            NodeKind::Parent
        };

        if kind == NodeKind::Parent && self.expanded.contains(&frame.item.id) {
            let mut child_context = frame.branch_context.clone();
            child_context.push(!frame.is_last_child);

            let last = children.len() - 1;
            for (i, child) in children.iter().enumerate().rev() {
                self.stack.push(TraversalFrame {
                    item: child,
                    depth: frame.depth + 1,
                    branch_context: child_context.clone(),
                    is_last_child: i == last,
                });
            }
        }

        Some(VisitedNode {
            item: frame.item,
            depth: frame.depth,
            kind,
            is_last_child: frame.is_last_child,
            branch_context: frame.branch_context,
        })
    }
}

/// Walks the forest in pre-order, descending only into expanded items.
///
/// # Example
/// ```
/// use rvtree::{TreeItem, traverse_expanded};
/// use std::collections::HashSet;
///
/// let forest = vec![TreeItem::branch(1, "a", vec![TreeItem::leaf(2, "b")])];
/// let expanded: HashSet<u32> = [1].into_iter().collect();
///
/// let ids: Vec<u32> = traverse_expanded(&forest, &expanded).map(|n| n.item.id).collect();
/// assert_eq!(ids, vec![1, 2]);
/// ```
pub fn traverse_expanded<'a, Id: ItemId, T>(
    roots: &'a [TreeItem<Id, T>],
    expanded: &'a HashSet<Id>,
) -> ExpandedTraversal<'a, Id, T> {
    ExpandedTraversal::new(roots, expanded)
}

/// Flattens a forest into position-annotated rows.
///
/// Deterministic and side-effect free; cost is proportional to the number of
/// reachable rows, collapsed subtrees are never visited.
///
/// # Arguments
/// * `roots` - Ordered root items
/// * `expanded` - Ids whose children are included
/// * `item_size` - Uniform row size
pub fn flatten<Id, T>(
    roots: &[TreeItem<Id, T>],
    expanded: &HashSet<Id>,
    item_size: f64,
) -> Vec<FlatEntry<Id, T>>
where
    Id: ItemId,
    T: Clone,
{
    traverse_expanded(roots, expanded)
        .enumerate()
        .map(|(index, node)| FlatEntry {
            id: node.item.id.clone(),
            data: node.item.data.clone(),
            index,
            depth: node.depth,
            top: entry_top(index, item_size),
            height: item_size,
            kind: node.kind,
            is_last_child: node.is_last_child,
            branch_context: node.branch_context,
        })
        .collect()
}

/// Counts the rows an item contributes: itself plus every reachable descendant.
pub fn visible_subtree_size<Id: ItemId, T>(item: &TreeItem<Id, T>, expanded: &HashSet<Id>) -> usize {
    traverse_expanded(std::slice::from_ref(item), expanded).count()
}

/// Counts all descendants of an item regardless of expansion.
pub fn descendant_count<Id, T>(item: &TreeItem<Id, T>) -> usize {
    let mut count = 0;
    let mut stack: Vec<&TreeItem<Id, T>> = item.children().iter().collect();
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children());
    }
    count
}

/// Returns the deepest depth reachable under the current expansion.
pub fn max_visible_depth<Id: ItemId, T>(roots: &[TreeItem<Id, T>], expanded: &HashSet<Id>) -> usize {
    traverse_expanded(roots, expanded)
        .map(|node| node.depth)
        .max()
        .unwrap_or(0)
}

/// Finds an item anywhere in the forest by id.
pub fn find_item<'a, Id: ItemId, T>(roots: &'a [TreeItem<Id, T>], id: &Id) -> Option<&'a TreeItem<Id, T>> {
    let mut stack: Vec<&TreeItem<Id, T>> = roots.iter().rev().collect();
    while let Some(item) = stack.pop() {
        if &item.id == id {
            return Some(item);
        }
        stack.extend(item.children().iter().rev());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expanded(ids: &[&'static str]) -> HashSet<&'static str> {
        ids.iter().copied().collect()
    }

    fn sample_tree() -> Vec<TreeItem<&'static str, u32>> {
        vec![TreeItem::branch("A", 1, vec![TreeItem::leaf("B", 2), TreeItem::leaf("C", 3)])]
    }

    #[test]
    fn test_flatten_expanded_parent() {
        let entries = flatten(&sample_tree(), &expanded(&["A"]), 10.0);

        assert_eq!(entries.len(), 3);
        assert_eq!((entries[0].id, entries[0].top, entries[0].depth), ("A", 0.0, 0));
        assert_eq!((entries[1].id, entries[1].top, entries[1].depth), ("B", 10.0, 1));
        assert_eq!((entries[2].id, entries[2].top, entries[2].depth), ("C", 20.0, 1));
        assert_eq!(entries[0].kind, NodeKind::Parent);
        assert_eq!(entries[1].kind, NodeKind::Leaf);
        assert!(entries.iter().all(|e| e.height == 10.0));
    }

    #[test]
    fn test_flatten_collapsed_parent() {
        let entries = flatten(&sample_tree(), &expanded(&[]), 10.0);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "A");
        assert_eq!(entries[0].top, 0.0);
        assert_eq!(entries[0].data, 1);
    }

    #[test]
    fn test_flatten_empty_forest() {
        let roots: Vec<TreeItem<&str, ()>> = Vec::new();
        assert!(flatten(&roots, &expanded(&["A"]), 10.0).is_empty());
    }

    #[test]
    fn test_expanded_item_with_empty_children() {
        let roots = vec![TreeItem::branch("A", (), vec![]), TreeItem::leaf("B", ())];
        let entries = flatten(&roots, &expanded(&["A"]), 5.0);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, NodeKind::Leaf);
        assert_eq!(entries[1].top, 5.0);
    }

    #[test]
    fn test_flatten_preorder_across_roots() {
        let roots = vec![
            TreeItem::branch(
                "r1",
                (),
                vec![
                    TreeItem::branch("r1.a", (), vec![TreeItem::leaf("r1.a.x", ())]),
                    TreeItem::leaf("r1.b", ()),
                ],
            ),
            TreeItem::branch("r2", (), vec![TreeItem::leaf("r2.a", ())]),
        ];

        let ids: Vec<_> = flatten(&roots, &expanded(&["r1", "r1.a", "r2"]), 1.0)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["r1", "r1.a", "r1.a.x", "r1.b", "r2", "r2.a"]);

        // Expanded flag on a node under a collapsed parent has no effect
        let ids: Vec<_> = flatten(&roots, &expanded(&["r1.a", "r2"]), 1.0)
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["r1", "r2", "r2.a"]);
    }

    #[test]
    fn test_offset_invariant() {
        let roots: Vec<TreeItem<u32, ()>> = (0..50)
            .map(|i| TreeItem::branch(i * 10, (), (1..4).map(|j| TreeItem::leaf(i * 10 + j, ())).collect()))
            .collect();
        let open: HashSet<u32> = (0..50).filter(|i| i % 3 == 0).map(|i| i * 10).collect();

        let entries = flatten(&roots, &open, 17.5);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.index, i);
            assert_eq!(entry.top, i as f64 * 17.5);
        }
    }

    #[test]
    fn test_collapse_removes_descendant_count() {
        let roots = vec![
            TreeItem::leaf("before", ()),
            TreeItem::branch(
                "p",
                (),
                vec![
                    TreeItem::branch("p.a", (), vec![TreeItem::leaf("p.a.1", ()), TreeItem::leaf("p.a.2", ())]),
                    TreeItem::leaf("p.b", ()),
                ],
            ),
            TreeItem::leaf("after", ()),
        ];

        let open = flatten(&roots, &expanded(&["p", "p.a"]), 1.0);
        let closed = flatten(&roots, &expanded(&["p.a"]), 1.0);

        let reachable = visible_subtree_size(&roots[1], &expanded(&["p", "p.a"])) - 1;
        assert_eq!(reachable, 4);
        assert_eq!(open.len() - closed.len(), reachable);

        let open_siblings: Vec<_> = open.iter().filter(|e| e.depth == 0).map(|e| e.id).collect();
        let closed_siblings: Vec<_> = closed.iter().map(|e| e.id).collect();
        assert_eq!(open_siblings, closed_siblings);
    }

    #[test]
    fn test_branch_context_and_last_child() {
        let roots = vec![
            TreeItem::branch("a", (), vec![TreeItem::leaf("a1", ()), TreeItem::leaf("a2", ())]),
            TreeItem::leaf("b", ()),
        ];
        let entries = flatten(&roots, &expanded(&["a"]), 1.0);

        assert!(!entries[0].is_last_child);
        assert!(entries[0].branch_context.is_empty());
        assert!(!entries[1].is_last_child);
        assert!(entries[2].is_last_child);
        // "a" has a following sibling, so its children carry a continuation line
        assert_eq!(entries[1].branch_context, vec![true]);
        assert!(entries[3].is_last_child);
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let depth = 2_000u32;
        let mut node = TreeItem::leaf(depth, ());
        for id in (0..depth).rev() {
            node = TreeItem::branch(id, (), vec![node]);
        }
        let roots = vec![node];
        let open: HashSet<u32> = (0..depth).collect();

        let entries = flatten(&roots, &open, 1.0);
        assert_eq!(entries.len(), depth as usize + 1);
        assert_eq!(max_visible_depth(&roots, &open), depth as usize);
    }

    #[test]
    fn test_descendant_count_and_find() {
        let roots = sample_tree();
        assert_eq!(descendant_count(&roots[0]), 2);
        assert_eq!(find_item(&roots, &"C").map(|i| i.data), Some(3));
        assert!(find_item(&roots, &"Z").is_none());
    }
}
