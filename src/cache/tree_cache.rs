//! Caching of the flattened row sequence.

use crate::domain::flatten::{self, FlatEntry};
use crate::item::{ItemId, TreeItem};
use std::collections::HashSet;

/// Cache for the flattened forest.
///
/// Flattening depends only on the forest shape, the expansion set and the item
/// size. The cache is invalidated whenever one of those changes and survives
/// scroll and resize signals untouched.
pub struct TreeCache<Id, T> {
    /// Flattened rows for the current expansion sequence.
    entries: Vec<FlatEntry<Id, T>>,

    /// Whether `entries` reflects the current forest and expansion set.
    valid: bool,

    /// Cached maximum visible depth.
    max_visible_depth: Option<usize>,

    /// Sequence number for cache invalidation.
    /// Incremented whenever the expansion set or the forest changes.
    expansion_seq: u64,

    /// Number of flattening passes performed so far.
    flatten_passes: u64,
}

impl<Id: ItemId, T: Clone> TreeCache<Id, T> {
    /// Creates a new empty (invalid) cache.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            valid: false,
            max_visible_depth: None,
            expansion_seq: 0,
            flatten_passes: 0,
        }
    }

    /// Invalidates all cached data.
    ///
    /// This should be called whenever:
    /// - A node is expanded or collapsed
    /// - The forest is replaced
    pub fn invalidate(&mut self) {
        self.valid = false;
        self.max_visible_depth = None;
        self.expansion_seq += 1;
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Re-flattens the forest if the cache is invalid.
    ///
    /// # Returns
    /// `true` if a flattening pass ran.
    pub fn refresh(&mut self, roots: &[TreeItem<Id, T>], expanded: &HashSet<Id>, item_size: f64) -> bool {
        if self.valid {
            return false;
        }

        self.entries = flatten::flatten(roots, expanded, item_size);
        self.max_visible_depth = Some(self.entries.iter().map(|e| e.depth).max().unwrap_or(0));
        self.valid = true;
        self.flatten_passes += 1;

        tracing::debug!(
            rows = self.entries.len(),
            seq = self.expansion_seq,
            "flattened forest"
        );
        true
    }

    /// Returns the cached rows (empty until the first refresh).
    pub fn entries(&self) -> &[FlatEntry<Id, T>] {
        &self.entries
    }

    /// Returns the deepest visible depth, if computed.
    pub fn max_visible_depth(&self) -> Option<usize> {
        self.max_visible_depth
    }

    pub fn expansion_seq(&self) -> u64 {
        self.expansion_seq
    }

    pub fn flatten_passes(&self) -> u64 {
        self.flatten_passes
    }
}

impl<Id: ItemId, T: Clone> Default for TreeCache<Id, T> {
    fn default() -> Self {
        Self::new()
    }
}
