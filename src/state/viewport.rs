//! Viewport state management.
//!
//! Holds everything a mounted view mutates in response to environment
//! signals: scroll offset, measured viewport size and the expansion set.
//! Transitions are applied by [`crate::domain::transition::apply`].

use crate::item::ItemId;
use crate::state::TreeState;

/// Measurement phase of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportPhase {
    /// No size signal received yet; the window is empty
    Unmeasured,
    /// At least one size signal received
    Measured,
}

/// State owned by one viewport controller.
///
/// Responsibilities:
/// - Tracking vertical scroll position (never negative)
/// - Tracking the measured viewport height
/// - Owning the expansion set
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState<Id: ItemId> {
    /// Current vertical scroll offset
    scroll_offset: f64,
    /// Current visible height, 0 until measured
    viewport_size: f64,
    phase: ViewportPhase,
    /// Expanded item ids
    tree: TreeState<Id>,
}

impl<Id: ItemId> Default for ViewportState<Id> {
    fn default() -> Self {
        Self::new(TreeState::new())
    }
}

impl<Id: ItemId> ViewportState<Id> {
    /// Creates an unmeasured state at scroll offset 0.
    pub fn new(tree: TreeState<Id>) -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_size: 0.0,
            phase: ViewportPhase::Unmeasured,
            tree,
        }
    }

    // ===== Viewport Queries =====

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    pub fn phase(&self) -> ViewportPhase {
        self.phase
    }

    pub fn is_measured(&self) -> bool {
        self.phase == ViewportPhase::Measured
    }

    /// Returns the expansion state.
    pub fn tree(&self) -> &TreeState<Id> {
        &self.tree
    }

    // ===== Viewport Mutations =====

    /// Sets the vertical scroll position, clamped at 0.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.max(0.0);
    }

    /// Records a viewport measurement and marks the state measured.
    ///
    /// Negative or NaN heights are treated as 0.
    pub fn set_viewport_size(&mut self, height: f64) {
        self.viewport_size = height.max(0.0);
        self.phase = ViewportPhase::Measured;
    }

    /// Mutable access to the expansion state.
    pub fn tree_mut(&mut self) -> &mut TreeState<Id> {
        &mut self.tree
    }
}
