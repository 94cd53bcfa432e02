//! Utility modules for the forest viewer.

pub mod formatting;

pub use formatting::{format_count, format_memory_mb, format_pixels, get_current_memory_mb};
