//! Core windowing logic.
//!
//! - Flattening (expansion-aware pre-order traversal with row offsets)
//! - Window calculation (index arithmetic and the filter-based reference)
//! - Viewport transitions (pure state + signal -> state functions)

pub mod flatten;
pub mod transition;
pub mod window;
