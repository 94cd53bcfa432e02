//! Shared loading flag and the blocking load entry point.

use anyhow::{Context, Result};
use rvtree::{read_forest, ForestFile};
use serde_json::Value;
use std::path::Path;

/// Forest shape the viewer works with.
pub type ViewerForest = ForestFile<u64, Value>;

/// State of a background load, shared behind an `Arc<Mutex<_>>`.
///
/// Only the in-progress flag is shared; results come back over a channel.
#[derive(Debug, Default)]
pub struct LoadingState {
    /// True while a file is being read
    pub in_progress: bool,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Reads a forest file, blocking the calling thread.
pub fn load_forest_file(path: &Path) -> Result<ViewerForest> {
    let path_str = path
        .to_str()
        .with_context(|| format!("Path is not valid UTF-8: {}", path.display()))?;
    read_forest(path_str)
}
