//! Centralized application state for the forest viewer.

use rvtree::{ConfigError, ManualSizeObserver, TreeItem, ViewportConfig, ViewportController};
use serde_json::Value;
use std::path::PathBuf;

/// Where the displayed forest came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ForestSource {
    File(PathBuf),
    Synthetic { seed: u64 },
}

/// A mounted forest: its controller plus display metadata.
pub struct ForestView {
    pub controller: ViewportController<u64, Value>,
    pub source: ForestSource,
    /// Every item in the forest, expanded or not
    pub total_items: usize,
}

/// Main application state.
pub struct AppState {
    /// Currently displayed forest, if any
    pub view: Option<ForestView>,
    /// Options every new controller is built with
    pub config: ViewportConfig<u64>,
    /// Fed with the scroll area height each frame
    pub observer: ManualSizeObserver,
    /// Selected row id
    pub selected: Option<u64>,
    /// Current error message to display (if any)
    pub error_message: Option<String>,
    /// Seed for the next synthetic forest
    pub next_seed: u64,
}

impl AppState {
    pub fn new(config: ViewportConfig<u64>) -> Self {
        Self {
            view: None,
            config,
            observer: ManualSizeObserver::new(),
            selected: None,
            error_message: None,
            next_seed: 42,
        }
    }

    /// Drops the current forest, releasing its size observer.
    pub fn clear_view(&mut self) {
        self.view = None;
        self.selected = None;
        self.error_message = None;
    }

    /// Replaces the displayed forest and mounts a fresh controller.
    ///
    /// The previous controller is dropped first: it shares the observer, and
    /// its disposal must not clear the new registration.
    pub fn install_forest(&mut self, roots: Vec<TreeItem<u64, Value>>, source: ForestSource) -> Result<(), ConfigError> {
        self.clear_view();

        let total_items = rvtree::count_items(&roots);
        let mut controller = ViewportController::new(roots, self.config.clone())?;
        controller.mount(self.observer.clone());

        tracing::debug!(items = total_items, rows = controller.entry_count(), ?source, "forest installed");
        self.view = Some(ForestView {
            controller,
            source,
            total_items,
        });
        Ok(())
    }

    pub fn has_forest(&self) -> bool {
        self.view.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_forest() -> Vec<TreeItem<u64, Value>> {
        vec![TreeItem::branch(1, Value::Null, vec![TreeItem::leaf(2, Value::Null)]).opened()]
    }

    #[test]
    fn test_install_mounts_controller() {
        let mut state = AppState::new(ViewportConfig::with_item_size(10.0));
        state.observer.report(25.0);
        state.install_forest(small_forest(), ForestSource::Synthetic { seed: 1 }).unwrap();

        let view = state.view.as_ref().unwrap();
        assert_eq!(view.total_items, 2);
        assert_eq!(view.controller.entry_count(), 2);
        assert_eq!(view.controller.window().range(), 0..2);
        assert!(state.observer.is_observed());
    }

    #[test]
    fn test_reinstall_keeps_observer_registered() {
        let mut state = AppState::new(ViewportConfig::with_item_size(10.0));
        state.install_forest(small_forest(), ForestSource::Synthetic { seed: 1 }).unwrap();
        state.install_forest(small_forest(), ForestSource::Synthetic { seed: 2 }).unwrap();

        assert!(state.observer.is_observed());
        assert_eq!(state.observer.dispose_count(), 1);

        state.clear_view();
        assert!(!state.observer.is_observed());
    }
}
