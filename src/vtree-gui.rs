//! Virtualized forest viewer.
//!
//! Displays forests of hundreds of thousands of rows in an egui scroll area
//! while only painting the rows that intersect the viewport.
//!
//! - `app/` - Application state and coordination
//! - `io/` - Background forest loading
//! - `ui/` - Panels (header, tree, status bar)
//! - `rendering/` - Row drawing and text helpers
//! - `utils/` - Formatting helpers

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::{anyhow, Result};
use eframe::egui;
use rvtree::{ViewportConfig, DEFAULT_ITEM_SIZE};
use std::env;
use std::path::PathBuf;

mod app;
mod io;
mod rendering;
mod ui;
mod utils;

use app::{AppState, ApplicationCoordinator};
use io::AsyncLoader;
use ui::panel_manager::{PanelInteraction, PanelManager};

struct GuiOptions {
    initial_file: Option<PathBuf>,
    item_size: f64,
    render_ahead: usize,
}

fn parse_args() -> Result<GuiOptions> {
    let args: Vec<String> = env::args().collect();
    let mut options = GuiOptions {
        initial_file: None,
        item_size: DEFAULT_ITEM_SIZE,
        render_ahead: 3,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-item_size" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-item_size requires an argument");
                }
                options.item_size = args[i].parse()?;
            }
            "-render_ahead" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-render_ahead requires an argument");
                }
                options.render_ahead = args[i].parse()?;
            }
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Warning: Unknown argument: {}", arg);
            }
            path => {
                options.initial_file = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(options)
}

fn print_help() {
    println!("Virtualized Forest Viewer");
    println!("Usage: vtree-gui [OPTIONS] [FILE]");
    println!();
    println!("OPTIONS:");
    println!("  -item_size <PX>        Row height in pixels (default: {})", DEFAULT_ITEM_SIZE);
    println!("  -render_ahead <N>      Extra rows mounted above and below the viewport (default: 3)");
    println!("  -h, -help, --help      Show this help message");
    println!();
    println!("FILE is a forest file (.jsonl or .jsonl.br) written by vtree-gen.");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(rvtree::logging::env_filter())
        .init();

    let options = parse_args()?;
    let config = ViewportConfig::with_item_size(options.item_size).render_ahead(options.render_ahead);
    config.validate()?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Forest Viewer"),
        ..Default::default()
    };

    let initial_file = options.initial_file;
    eframe::run_native(
        "Forest Viewer",
        native_options,
        Box::new(move |_cc| Ok(Box::new(ForestViewerApp::new(config, initial_file)))),
    )
    .map_err(|e| anyhow!("Failed to start viewer: {}", e))
}

struct ForestViewerApp {
    state: AppState,
    loader: AsyncLoader,
    /// File to load on the first frame
    pending_file_load: Option<PathBuf>,
}

impl ForestViewerApp {
    fn new(config: ViewportConfig<u64>, initial_file: Option<PathBuf>) -> Self {
        Self {
            state: AppState::new(config),
            loader: AsyncLoader::new(),
            pending_file_load: initial_file,
        }
    }

    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::OpenFileRequested(path) => {
                ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
            }
            PanelInteraction::SyntheticForestRequested => {
                ApplicationCoordinator::open_synthetic_forest(&mut self.state, &self.loader);
            }
            PanelInteraction::ExpandAllRequested => {
                ApplicationCoordinator::expand_all(&mut self.state);
            }
            PanelInteraction::CollapseAllRequested => {
                ApplicationCoordinator::collapse_all(&mut self.state);
            }
            PanelInteraction::RowSelected { id, was_already_selected } => {
                ApplicationCoordinator::handle_row_selection(&mut self.state, id, was_already_selected);
            }
        }
    }
}

impl eframe::App for ForestViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_loading_completion(&mut self.state, &mut self.loader);

        if let Some(path) = self.pending_file_load.take() {
            ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, &self.loader) {
            self.handle_panel_interaction(interaction, ctx);
        }
    }
}
