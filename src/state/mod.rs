//! State management modules.
//!
//! This module contains state-only logic (no UI concerns):
//! - Viewport state (scroll offset, measured size, phase)
//! - Tree state (expansion set)

mod tree_state;
mod viewport;

pub use tree_state::TreeState;
pub use viewport::{ViewportPhase, ViewportState};
