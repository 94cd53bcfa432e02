//! Pure viewport state transitions.
//!
//! Every environment signal and explicit request is applied as
//! `old state + signal -> new state`, together with the follow-up work the
//! controller must do. Nothing here touches the forest or the flattened rows.

use crate::item::ItemId;
use crate::state::ViewportState;

/// Input delivered to a viewport, in delivery order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportSignal<Id> {
    /// Scroll position changed
    Scroll(f64),
    /// Container height changed
    Resize(f64),
    /// Flip expansion of an item
    Toggle(Id),
    /// Expand an item (no-op if already expanded)
    Expand(Id),
    /// Collapse an item (no-op if already collapsed)
    Collapse(Id),
    /// Collapse every item
    CollapseAll,
}

/// Work the controller must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEffect {
    /// Nothing observable changed
    Unchanged,
    /// Scroll or size changed; recompute the window only
    Rewindow,
    /// Expansion changed; re-flatten, then recompute the window
    Reflatten,
}

/// Applies one signal to a viewport state.
///
/// Scroll offset is never adjusted by expansion changes, so toggling a node
/// above the viewport shifts the visible rows instead of following the node.
pub fn apply<Id: ItemId>(
    mut state: ViewportState<Id>,
    signal: ViewportSignal<Id>,
) -> (ViewportState<Id>, TransitionEffect) {
    let effect = match signal {
        ViewportSignal::Scroll(offset) => {
            state.set_scroll_offset(offset);
            TransitionEffect::Rewindow
        }
        ViewportSignal::Resize(height) => {
            state.set_viewport_size(height);
            TransitionEffect::Rewindow
        }
        ViewportSignal::Toggle(id) => {
            state.tree_mut().toggle(id);
            TransitionEffect::Reflatten
        }
        ViewportSignal::Expand(id) => changed(state.tree_mut().expand(id)),
        ViewportSignal::Collapse(id) => changed(state.tree_mut().collapse(&id)),
        ViewportSignal::CollapseAll => {
            let had_expanded = state.tree().expanded_count() > 0;
            state.tree_mut().clear();
            changed(had_expanded)
        }
    };

    (state, effect)
}

fn changed(expansion_changed: bool) -> TransitionEffect {
    if expansion_changed {
        TransitionEffect::Reflatten
    } else {
        TransitionEffect::Unchanged
    }
}
