//! Tree panel UI rendering
//!
//! Hosts the viewport controller inside an egui scroll area. Each frame the
//! scroll area's height is reported to the size observer, its offset becomes a
//! scroll signal, and only the windowed rows are painted, each at its absolute
//! offset inside a content area sized to the full scrollable extent.

use crate::app::AppState;
use crate::rendering::row_renderer::{self, RowInteraction};
use egui::ScrollArea;
use rvtree::mount_rows;

/// Result of tree panel interactions that need to be handled by the application.
pub enum TreePanelInteraction {
    RowSelected { id: u64, was_already_selected: bool },
}

pub fn render_tree_panel(ui: &mut egui::Ui, state: &mut AppState) -> Option<TreePanelInteraction> {
    let AppState {
        view,
        observer,
        selected,
        ..
    } = state;

    let Some(view) = view.as_mut() else {
        ui.label("No forest loaded. Open a forest file or generate a synthetic one.");
        return None;
    };

    let selected = *selected;
    let mut interaction = None;

    ScrollArea::vertical()
        .id_salt("forest_scroll_area")
        .auto_shrink([false, false])
        .show_viewport(ui, |ui, viewport| {
            observer.report(viewport.height() as f64);
            view.controller.pump();
            view.controller.scroll_to(viewport.min.y as f64);

            let content_height = view.controller.content_height() as f32;
            ui.set_height(content_height);

            let origin = ui.min_rect().left_top();
            let width = ui.available_width();

            let mounted = mount_rows(&mut view.controller, |entry, toggle, is_expanded| {
                let row_rect = egui::Rect::from_min_size(
                    origin + egui::vec2(0.0, entry.top as f32),
                    egui::vec2(width, entry.height as f32),
                );
                row_renderer::render_row(ui, row_rect, entry, is_expanded, selected == Some(entry.id), toggle)
            });

            for row in mounted.rows {
                if let Some(RowInteraction::Selected { id, was_already_selected }) = row.node {
                    interaction = Some(TreePanelInteraction::RowSelected { id, was_already_selected });
                }
            }
        });

    interaction
}
