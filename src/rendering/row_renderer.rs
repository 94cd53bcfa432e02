//! Row drawing.
//!
//! Paints one mounted row at an absolute rectangle inside the scroll content:
//! tree guide lines, the expand/collapse control, and the payload columns.

use crate::rendering::text_utils::{payload_text, truncate_to_width};
use eframe::egui;
use rvtree::{FlatEntry, NodeKind, ToggleHandle};
use serde_json::Value;

/// Horizontal space per nesting level.
pub const INDENT_WIDTH: f32 = 20.0;
/// Width of the name column, measured from the end of the indentation.
const NAME_COLUMN_WIDTH: f32 = 220.0;
/// Width of the id column at the right edge.
const ID_COLUMN_WIDTH: f32 = 80.0;

/// Result of user interaction with a row.
pub enum RowInteraction {
    /// Row body was clicked
    Selected { id: u64, was_already_selected: bool },
}

/// Draws a row and reports clicks.
///
/// Expand/collapse clicks are requested through `toggle` and take effect after
/// the mount pass.
pub fn render_row(
    ui: &mut egui::Ui,
    row_rect: egui::Rect,
    entry: &FlatEntry<u64, Value>,
    is_expanded: bool,
    is_selected: bool,
    toggle: &mut ToggleHandle,
) -> Option<RowInteraction> {
    let row_response = ui.interact(row_rect, ui.id().with(("row", entry.id)), egui::Sense::click());
    let mut interaction = None;

    if row_response.clicked() {
        interaction = Some(RowInteraction::Selected {
            id: entry.id,
            was_already_selected: is_selected,
        });
    }

    let painter = ui.painter_at(row_rect);
    if is_selected {
        painter.rect_filled(row_rect, 0.0, ui.visuals().selection.bg_fill);
    } else if row_response.hovered() {
        painter.rect_filled(row_rect, 0.0, ui.visuals().widgets.hovered.weak_bg_fill);
    }

    draw_guide_lines(&painter, row_rect, entry, ui.visuals().text_color().gamma_multiply(0.5));

    // Expand control sits right after the indentation
    let indent = entry.depth as f32 * INDENT_WIDTH;
    let control_rect = egui::Rect::from_min_size(
        egui::pos2(row_rect.left() + indent, row_rect.top()),
        egui::vec2(INDENT_WIDTH, row_rect.height()),
    );

    if entry.kind == NodeKind::Parent {
        let button_rect = egui::Rect::from_center_size(control_rect.center(), egui::vec2(16.0, 16.0));
        let button_response = ui.interact(button_rect, ui.id().with(("expand", entry.id)), egui::Sense::click());
        if button_response.clicked() {
            toggle.toggle_expand();
            // The control sits on top of the row; don't also select
            interaction = None;
        }

        let symbol = if is_expanded { "▼" } else { "▶" };
        painter.text(
            button_rect.center(),
            egui::Align2::CENTER_CENTER,
            symbol,
            egui::FontId::proportional(12.0),
            ui.visuals().text_color(),
        );
    }

    let font_id = egui::FontId::proportional(13.0);
    let text_color = ui.visuals().text_color();
    let weak_color = ui.visuals().weak_text_color();

    let name = payload_text(&entry.data, "name").unwrap_or_else(|| format!("#{}", entry.id));
    let name_left = control_rect.right();
    painter.text(
        egui::pos2(name_left + 4.0, row_rect.center().y),
        egui::Align2::LEFT_CENTER,
        truncate_to_width(&name, NAME_COLUMN_WIDTH, &font_id, &painter),
        font_id.clone(),
        text_color,
    );

    let description_left = name_left + NAME_COLUMN_WIDTH;
    let description_width = row_rect.right() - ID_COLUMN_WIDTH - description_left;
    if let Some(description) = payload_text(&entry.data, "description") {
        painter.text(
            egui::pos2(description_left + 4.0, row_rect.center().y),
            egui::Align2::LEFT_CENTER,
            truncate_to_width(&description, description_width, &font_id, &painter),
            font_id.clone(),
            weak_color,
        );
    }

    painter.text(
        egui::pos2(row_rect.right() - 4.0, row_rect.center().y),
        egui::Align2::RIGHT_CENTER,
        truncate_to_width(&entry.id.to_string(), ID_COLUMN_WIDTH, &font_id, &painter),
        font_id,
        weak_color,
    );

    interaction
}

/// Draws the vertical continuation lines and this row's elbow connector.
fn draw_guide_lines(painter: &egui::Painter, row_rect: egui::Rect, entry: &FlatEntry<u64, Value>, color: egui::Color32) {
    let stroke = egui::Stroke::new(1.0, color);
    let top = row_rect.top();
    let bottom = row_rect.bottom();
    let middle = row_rect.center().y;

    // Level 0 continuation belongs to roots, which draw no connector
    for (level, &has_continuation) in entry.branch_context.iter().enumerate().skip(1) {
        if has_continuation {
            let x = row_rect.left() + (level - 1) as f32 * INDENT_WIDTH + INDENT_WIDTH / 2.0;
            painter.line_segment([egui::pos2(x, top), egui::pos2(x, bottom)], stroke);
        }
    }

    if entry.depth > 0 {
        let x = row_rect.left() + (entry.depth - 1) as f32 * INDENT_WIDTH + INDENT_WIDTH / 2.0;
        let elbow_bottom = if entry.is_last_child { middle } else { bottom };
        painter.line_segment([egui::pos2(x, top), egui::pos2(x, elbow_bottom)], stroke);
        painter.line_segment([egui::pos2(x, middle), egui::pos2(x + INDENT_WIDTH / 2.0, middle)], stroke);
    }
}
