//! Low-level drawing for mounted rows.
//!
//! - Row rendering (indentation, guide lines, expand control, columns)
//! - Text utilities (payload labels and width-limited truncation)

pub mod row_renderer;
pub mod text_utils;
