//! Seeded synthetic forests for demos and load testing.

use crate::item::TreeItem;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

const DEFAULT_NUM_ROOTS: usize = 5;
const DEFAULT_MAX_DEPTH: usize = 5;
const DEFAULT_MAX_CHILDREN: usize = 10;
const DEFAULT_SEED: u64 = 42;

/// Generated item: numeric id and a JSON payload with `name`, `description`, `value`.
pub type GeneratedItem = TreeItem<u64, Value>;

/// Builds random forests; the same settings always produce the same forest.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestGenerator {
    pub num_roots: usize,
    pub max_depth: usize,
    pub max_children: usize,
    pub seed: u64,
}

impl Default for ForestGenerator {
    fn default() -> Self {
        Self {
            num_roots: DEFAULT_NUM_ROOTS,
            max_depth: DEFAULT_MAX_DEPTH,
            max_children: DEFAULT_MAX_CHILDREN,
            seed: DEFAULT_SEED,
        }
    }
}

impl ForestGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(num_roots: usize, max_depth: usize, max_children: usize, seed: u64) -> Self {
        Self {
            num_roots,
            max_depth,
            max_children,
            seed,
        }
    }

    /// Generates the forest. Ids are assigned in pre-order starting at 1, and
    /// every root is marked opened.
    pub fn generate(&self) -> Vec<GeneratedItem> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut next_id = 1u64;
        let mut forest = Vec::with_capacity(self.num_roots);

        for _ in 0..self.num_roots {
            self.generate_tree(&mut rng, &mut next_id, &mut forest);
        }
        forest
    }

    /// Builds one root and its subtree with an explicit stack, so deep
    /// settings cannot exhaust the call stack. The finished root is pushed
    /// onto `forest`.
    fn generate_tree(&self, rng: &mut StdRng, next_id: &mut u64, forest: &mut Vec<GeneratedItem>) {
        let mut stack = vec![self.start_node(rng, 0, next_id)];

        while let Some(mut node) = stack.pop() {
            if node.remaining > 0 {
                node.remaining -= 1;
                let child = self.start_node(rng, node.depth + 1, next_id);
                stack.push(node);
                stack.push(child);
                continue;
            }

            let item = node.finish();
            match stack.last_mut() {
                Some(parent) => parent.children.push(item),
                None => forest.push(item.opened()),
            }
        }
    }

    fn start_node(&self, rng: &mut StdRng, depth: usize, next_id: &mut u64) -> PendingNode {
        let id = *next_id;
        *next_id += 1;

        let data = json!({
            "name": format!("node_{}", id),
            "description": format!("Synthetic node {} at depth {}", id, depth),
            "value": rng.gen_range(0..1000),
        });

        let remaining = if depth >= self.max_depth || self.max_children == 0 {
            0
        } else {
            rng.gen_range(0..=self.max_children)
        };

        PendingNode {
            id,
            data,
            depth,
            remaining,
            children: Vec::with_capacity(remaining),
        }
    }
}

/// Item whose children are still being generated.
struct PendingNode {
    id: u64,
    data: Value,
    depth: usize,
    remaining: usize,
    children: Vec<GeneratedItem>,
}

impl PendingNode {
    fn finish(self) -> GeneratedItem {
        if self.children.is_empty() {
            TreeItem::leaf(self.id, self.data)
        } else {
            TreeItem::branch(self.id, self.data, self.children)
        }
    }
}

/// Counts every item in a forest, expanded or not.
pub fn count_items<Id, T>(roots: &[TreeItem<Id, T>]) -> usize {
    let mut count = 0;
    let mut stack: Vec<&TreeItem<Id, T>> = roots.iter().collect();
    while let Some(item) = stack.pop() {
        count += 1;
        stack.extend(item.children());
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flatten::traverse_expanded;
    use std::collections::HashSet;

    #[test]
    fn test_generation_is_deterministic() {
        let generator = ForestGenerator::with_config(3, 3, 4, 7);
        assert_eq!(generator.generate(), generator.generate());
    }

    #[test]
    fn test_ids_are_unique_and_preorder() {
        let forest = ForestGenerator::with_config(4, 4, 5, 11).generate();
        let all: HashSet<u64> = forest.iter().map(|r| r.id).collect();
        assert_eq!(all.len(), 4);

        // Expand everything: pre-order traversal yields 1, 2, 3, ...
        let mut ids = HashSet::new();
        let mut stack: Vec<&GeneratedItem> = forest.iter().collect();
        while let Some(item) = stack.pop() {
            ids.insert(item.id);
            stack.extend(item.children());
        }
        let order: Vec<u64> = traverse_expanded(&forest, &ids).map(|node| node.item.id).collect();
        let expected: Vec<u64> = (1..=count_items(&forest) as u64).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_respects_depth_and_fanout() {
        let forest = ForestGenerator::with_config(2, 2, 3, 3).generate();
        assert_eq!(forest.len(), 2);
        assert!(forest.iter().all(|root| root.opened));

        for root in &forest {
            assert!(root.children().len() <= 3);
            for child in root.children() {
                for grandchild in child.children() {
                    assert!(!grandchild.has_children());
                }
            }
        }
    }

    #[test]
    fn test_large_depth_builds_chains() {
        // Fan-out of at most one child builds single chains
        for seed in 0..50 {
            let forest = ForestGenerator::with_config(3, 200_000, 1, seed).generate();
            assert_eq!(forest.len(), 3);

            let mut chain = 0;
            for root in &forest {
                let mut node = root;
                chain += 1;
                while let Some(child) = node.children().first() {
                    assert_eq!(child.id, node.id + 1);
                    node = child;
                    chain += 1;
                }
            }
            assert_eq!(count_items(&forest), chain);
        }
    }

    #[test]
    fn test_zero_children_gives_leaves() {
        let forest = ForestGenerator::with_config(5, 3, 0, 1).generate();
        assert_eq!(count_items(&forest), 5);
        assert_eq!(forest[0].data["name"], "node_1");
    }
}
