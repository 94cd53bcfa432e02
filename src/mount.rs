//! Row mounting.
//!
//! Invokes a host-supplied render callback once per row of the current window
//! and pairs each rendered node with its absolute position in the scroll
//! content. Only windowed rows are ever passed to the callback.

use crate::controller::ViewportController;
use crate::domain::flatten::FlatEntry;
use crate::domain::window::VisibleWindow;
use crate::item::ItemId;

/// Handed to the render callback; records a request to flip the row's expansion.
#[derive(Debug, Default)]
pub struct ToggleHandle {
    requested: bool,
}

impl ToggleHandle {
    /// Requests that the row be expanded or collapsed after this pass.
    pub fn toggle_expand(&mut self) {
        self.requested = true;
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }
}

/// One rendered row and where the host must place it.
#[derive(Debug, Clone, PartialEq)]
pub struct MountedRow<Id, R> {
    pub id: Id,
    pub index: usize,
    /// Absolute offset from the top of the scroll content
    pub top: f64,
    pub height: f64,
    pub node: R,
}

/// Output of one mount pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MountedRows<Id, R> {
    /// Height of the scroll content; the host sizes its inner container to this
    pub content_height: f64,
    /// Window the rows were taken from
    pub window: VisibleWindow,
    pub rows: Vec<MountedRow<Id, R>>,
}

/// Renders every row of the controller's current window.
///
/// `render` receives the row, a [`ToggleHandle`] and whether the row is
/// expanded. Toggle requests are applied after the pass in row order, so the
/// returned rows reflect the state the pass started with.
pub fn mount_rows<Id, T, R, F>(controller: &mut ViewportController<Id, T>, mut render: F) -> MountedRows<Id, R>
where
    Id: ItemId + 'static,
    T: Clone,
    F: FnMut(&FlatEntry<Id, T>, &mut ToggleHandle, bool) -> R,
{
    let window = controller.window();
    let mut toggles = Vec::new();

    let rows = controller
        .visible_entries()
        .iter()
        .map(|entry| {
            let mut handle = ToggleHandle::default();
            let node = render(entry, &mut handle, controller.is_expanded(&entry.id));
            if handle.is_requested() {
                toggles.push(entry.id.clone());
            }
            MountedRow {
                id: entry.id.clone(),
                index: entry.index,
                top: entry.top,
                height: entry.height,
                node,
            }
        })
        .collect();

    let mounted = MountedRows {
        content_height: controller.content_height(),
        window,
        rows,
    };

    for id in toggles {
        controller.toggle_node(id);
    }

    mounted
}
