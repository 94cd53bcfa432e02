//! Row text helpers.

use eframe::egui;
use serde_json::Value;

const ELLIPSIS: &str = "..";
/// Horizontal padding reserved inside a column (both sides).
const COLUMN_PADDING: f32 = 8.0;

/// Reads a display string from an item payload.
///
/// Strings are returned as-is, numbers and booleans are formatted, anything
/// else (or a missing key) yields `None`.
pub fn payload_text(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Number of leading characters that fit in `max_width`, given per-character
/// right edges in layout order.
fn fitting_prefix(char_right_edges: &[f32], max_width: f32) -> usize {
    char_right_edges.partition_point(|&right| right <= max_width)
}

/// Truncates `text` so it fits in a column of `column_width`, appending ".."
/// when characters were dropped.
///
/// Lays the text out once and cuts at the last glyph that fits.
pub fn truncate_to_width(text: &str, column_width: f32, font_id: &egui::FontId, painter: &egui::Painter) -> String {
    let max_width = column_width - COLUMN_PADDING;
    if max_width <= 0.0 || text.is_empty() {
        return String::new();
    }

    let galley = painter.layout_no_wrap(text.to_string(), font_id.clone(), egui::Color32::WHITE);
    if galley.size().x <= max_width {
        return text.to_string();
    }

    let ellipsis_width = painter
        .layout_no_wrap(ELLIPSIS.to_string(), font_id.clone(), egui::Color32::WHITE)
        .size()
        .x;
    if ellipsis_width >= max_width {
        return String::new();
    }

    let edges: Vec<f32> = galley
        .rows
        .iter()
        .flat_map(|row| row.glyphs.iter())
        .map(|glyph| glyph.pos.x + glyph.advance_width)
        .collect();
    let keep = fitting_prefix(&edges, max_width - ellipsis_width);

    let mut result: String = text.chars().take(keep).collect();
    result.push_str(ELLIPSIS);
    result
}
