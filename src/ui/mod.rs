//! UI panel rendering subsystem
//!
//! - Header panel (open, synthetic forest, expand/collapse all)
//! - Tree panel (virtualized rows inside a scroll area)
//! - Status bar (row counts, window, memory)
//! - Panel manager (panel orchestration and layout)

pub mod header;
pub mod panel_manager;
pub mod status_bar;
pub mod tree_panel;
