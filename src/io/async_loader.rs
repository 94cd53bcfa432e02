//! Background forest loading.
//!
//! Forest files are read on a worker thread so the UI keeps repainting while
//! large files decompress and parse.

use crate::io::file_loader::{load_forest_file, ViewerForest};
use crate::io::LoadingState;
use eframe::egui;
use rvtree::{ForestGenerator, GeneratedItem};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;

/// Result of polling for a finished load.
pub enum LoadResult {
    /// Loading completed successfully
    Success {
        forest: ViewerForest,
        path: PathBuf,
    },
    /// Loading failed; the message is ready for display
    Error(String),
    /// Still loading, or nothing was started
    None,
}

/// Runs forest loads on a background thread and hands results to the UI thread.
pub struct AsyncLoader {
    loading_state: Arc<Mutex<LoadingState>>,
    loading_receiver: Option<Receiver<Result<ViewerForest, String>>>,
    pending_load_path: Option<PathBuf>,
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self {
            loading_state: Arc::new(Mutex::new(LoadingState::new())),
            loading_receiver: None,
            pending_load_path: None,
        }
    }

    /// Checks if a loading operation is currently in progress.
    pub fn is_loading(&self) -> bool {
        match self.loading_state.lock() {
            Ok(state) => state.in_progress,
            Err(poisoned) => poisoned.into_inner().in_progress,
        }
    }

    /// Starts reading `path` on a background thread.
    ///
    /// Poll [`check_completion`](Self::check_completion) once per frame for the
    /// result; the worker requests a repaint when it finishes.
    pub fn start_file_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.loading_receiver = Some(receiver);
        set_in_progress(&self.loading_state, true);
        self.pending_load_path = Some(path.clone());

        let loading_state = Arc::clone(&self.loading_state);
        let ctx_handle = ctx.clone();

        tracing::info!(path = %path.display(), "loading forest");
        thread::spawn(move || {
            let result = load_forest_file(&path).map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);

            set_in_progress(&loading_state, false);
            ctx_handle.request_repaint();
        });
    }

    /// Generates a synthetic forest on the calling thread.
    pub fn generate_forest(&self, generator: &ForestGenerator) -> Vec<GeneratedItem> {
        let roots = generator.generate();
        tracing::info!(
            roots = roots.len(),
            items = rvtree::count_items(&roots),
            seed = generator.seed,
            "generated synthetic forest"
        );
        roots
    }

    /// Returns the finished load, if any.
    pub fn check_completion(&mut self) -> LoadResult {
        let Some(receiver) = &self.loading_receiver else {
            return LoadResult::None;
        };
        let Ok(result) = receiver.try_recv() else {
            return LoadResult::None;
        };

        self.loading_receiver = None;
        let path = self.pending_load_path.take();

        match (result, path) {
            (Ok(forest), Some(path)) => {
                tracing::info!(path = %path.display(), nodes = forest.total_nodes, "forest loaded");
                LoadResult::Success { forest, path }
            }
            (Ok(_), None) => LoadResult::Error("Load finished without a source path".to_string()),
            (Err(error_msg), _) => {
                tracing::warn!(error = %error_msg, "forest load failed");
                LoadResult::Error(error_msg)
            }
        }
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn set_in_progress(loading_state: &Mutex<LoadingState>, value: bool) {
    match loading_state.lock() {
        Ok(mut state) => state.in_progress = value,
        Err(poisoned) => poisoned.into_inner().in_progress = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_async_loader_creation() {
        let loader = AsyncLoader::new();
        assert!(!loader.is_loading());
    }

    #[test]
    fn test_synthetic_forest_generation() {
        let loader = AsyncLoader::new();
        let roots = loader.generate_forest(&ForestGenerator::with_config(3, 2, 2, 9));
        assert_eq!(roots.len(), 3);
    }

    #[test]
    fn test_check_completion_when_idle() {
        let mut loader = AsyncLoader::new();
        assert!(matches!(loader.check_completion(), LoadResult::None));
    }

    #[test]
    fn test_background_load_reports_errors() {
        let mut loader = AsyncLoader::new();
        let ctx = egui::Context::default();
        let missing = std::env::temp_dir().join("vtree_gui_missing_forest.jsonl");
        loader.start_file_load(missing, &ctx);

        let mut outcome = LoadResult::None;
        for _ in 0..500 {
            outcome = loader.check_completion();
            if !matches!(outcome, LoadResult::None) {
                break;
            }
            thread::sleep(std::time::Duration::from_millis(10));
        }
        match outcome {
            LoadResult::Error(msg) => assert!(msg.contains("Failed to open file")),
            _ => panic!("expected a load error"),
        }
    }
}
