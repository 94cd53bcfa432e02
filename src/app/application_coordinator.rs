//! Application-level coordination and workflow management.
//!
//! Applies load results and panel interactions to [`AppState`].

use crate::app::{AppState, ForestSource};
use crate::io::{AsyncLoader, LoadResult};
use rvtree::ForestGenerator;
use std::path::PathBuf;

/// Roots per synthetic forest.
const SYNTHETIC_ROOTS: usize = 20;
/// Depth limit per synthetic forest.
const SYNTHETIC_DEPTH: usize = 5;
/// Fan-out limit per synthetic forest.
const SYNTHETIC_CHILDREN: usize = 8;

pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Clears the current forest and starts reading `path` in the background.
    pub fn open_file(state: &mut AppState, loader: &mut AsyncLoader, path: PathBuf, ctx: &egui::Context) {
        state.clear_view();
        loader.start_file_load(path, ctx);
    }

    /// Applies a finished background load. Called once per frame.
    ///
    /// Returns true if a load completed (success or error).
    pub fn check_loading_completion(state: &mut AppState, loader: &mut AsyncLoader) -> bool {
        match loader.check_completion() {
            LoadResult::Success { forest, path } => {
                if let Err(e) = state.install_forest(forest.roots, ForestSource::File(path)) {
                    state.error_message = Some(format!("Error loading forest: {}", e));
                }
                true
            }
            LoadResult::Error(error_msg) => {
                state.error_message = Some(format!("Error loading forest: {}", error_msg));
                true
            }
            LoadResult::None => false,
        }
    }

    /// Generates a synthetic forest and displays it. Each call uses a new seed.
    pub fn open_synthetic_forest(state: &mut AppState, loader: &AsyncLoader) {
        let seed = state.next_seed;
        state.next_seed = state.next_seed.wrapping_add(1);

        let generator = ForestGenerator::with_config(SYNTHETIC_ROOTS, SYNTHETIC_DEPTH, SYNTHETIC_CHILDREN, seed);
        let roots = loader.generate_forest(&generator);
        if let Err(e) = state.install_forest(roots, ForestSource::Synthetic { seed }) {
            state.error_message = Some(format!("Error generating forest: {}", e));
        }
    }

    /// Selects a row; clicking the selected row again deselects it.
    pub fn handle_row_selection(state: &mut AppState, id: u64, was_already_selected: bool) {
        state.selected = if was_already_selected { None } else { Some(id) };
    }

    pub fn collapse_all(state: &mut AppState) {
        if let Some(view) = state.view.as_mut() {
            view.controller.collapse_all();
        }
    }

    pub fn expand_all(state: &mut AppState) {
        if let Some(view) = state.view.as_mut() {
            let ids = collect_parent_ids(view.controller.items());
            view.controller.expand_many(ids);
        }
    }
}

fn collect_parent_ids<T>(roots: &[rvtree::TreeItem<u64, T>]) -> Vec<u64> {
    let mut ids = Vec::new();
    let mut stack: Vec<&rvtree::TreeItem<u64, T>> = roots.iter().collect();
    while let Some(item) = stack.pop() {
        if item.has_children() {
            ids.push(item.id);
        }
        stack.extend(item.children());
    }
    ids
}
