//! Header panel UI rendering
//!
//! File controls, synthetic forest generation and bulk expansion buttons.

use crate::app::AppState;
use eframe::egui;
use egui::Color32;
use std::path::PathBuf;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    OpenFileRequested(PathBuf),
    SyntheticForestRequested,
    ExpandAllRequested,
    CollapseAllRequested,
}

/// Renders the application header.
pub fn render_header(ui: &mut egui::Ui, state: &AppState, is_loading: bool) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open Forest").clicked() {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("Forest Files", &["jsonl", "br"])
                .add_filter("All Files", &["*"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🌲 Synthetic Forest").clicked() {
            interaction = Some(HeaderInteraction::SyntheticForestRequested);
        }

        if state.has_forest() {
            ui.separator();

            if ui.button("⊞ Expand All").clicked() {
                interaction = Some(HeaderInteraction::ExpandAllRequested);
            }
            if ui.button("⊟ Collapse All").clicked() {
                interaction = Some(HeaderInteraction::CollapseAllRequested);
            }
        }

        if is_loading {
            ui.separator();
            ui.spinner();
            ui.label("Loading...");
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!(
                "Row height: {} px | Render ahead: {}",
                state.config.item_size, state.config.render_ahead
            ));
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}
