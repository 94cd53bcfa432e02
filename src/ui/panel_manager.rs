//! Panel orchestration and layout management.

use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::ui::{header, status_bar, tree_panel};

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    OpenFileRequested(std::path::PathBuf),
    SyntheticForestRequested,
    ExpandAllRequested,
    CollapseAllRequested,
    RowSelected { id: u64, was_already_selected: bool },
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels; called from `eframe::App::update`.
    pub fn render_all_panels(ctx: &egui::Context, state: &mut AppState, loader: &AsyncLoader) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state, loader.is_loading()) {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::OpenFileRequested(path) => PanelInteraction::OpenFileRequested(path),
                    header::HeaderInteraction::SyntheticForestRequested => PanelInteraction::SyntheticForestRequested,
                    header::HeaderInteraction::ExpandAllRequested => PanelInteraction::ExpandAllRequested,
                    header::HeaderInteraction::CollapseAllRequested => PanelInteraction::CollapseAllRequested,
                });
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        let tree_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default().frame(tree_frame).show(ctx, |ui| {
            ui.heading("Forest");
            ui.separator();

            if let Some(tree_panel::TreePanelInteraction::RowSelected { id, was_already_selected }) =
                tree_panel::render_tree_panel(ui, state)
            {
                interaction = Some(PanelInteraction::RowSelected { id, was_already_selected });
            }
        });

        interaction
    }
}
