//! Status bar UI rendering
//!
//! Shows memory use and the live windowing figures of the mounted forest.

use crate::app::{AppState, ForestSource};
use crate::utils::{format_count, format_memory_mb, format_pixels, get_current_memory_mb};
use eframe::egui;
use egui::RichText;
use rvtree::ViewportPhase;

pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal(|ui| {
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());
        ui.label(RichText::new("|").strong());

        let Some(view) = state.view.as_ref() else {
            ui.label(RichText::new("No forest loaded").strong());
            return;
        };

        let source = match &view.source {
            ForestSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            ForestSource::Synthetic { seed } => format!("Synthetic (seed {})", seed),
        };

        let controller = &view.controller;
        let window = controller.window();
        let phase = match controller.phase() {
            ViewportPhase::Unmeasured => "unmeasured",
            ViewportPhase::Measured => "measured",
        };

        ui.label(
            RichText::new(format!(
                "{} | Items: {} | Rows: {} | Mounted: {}..{} ({}) | Content: {} | Depth: {} | Flattens: {} | Viewport {}",
                source,
                format_count(view.total_items),
                format_count(controller.entry_count()),
                format_count(window.start_index),
                format_count(window.end_index),
                window.len(),
                format_pixels(controller.content_height()),
                controller.max_visible_depth(),
                controller.flatten_passes(),
                phase,
            ))
            .strong(),
        );
    });
}
