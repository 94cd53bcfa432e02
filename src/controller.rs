//! Viewport controller.
//!
//! Owns the forest, the viewport state and the flattened-row cache for one
//! mounted view, and turns environment signals into window recomputations.
//! Everything runs on the caller's thread: signals are applied synchronously,
//! one at a time, in delivery order.

use crate::cache::TreeCache;
use crate::config::ViewportConfig;
use crate::domain::flatten::FlatEntry;
use crate::domain::transition::{self, TransitionEffect, ViewportSignal};
use crate::domain::window::{self, VisibleWindow};
use crate::error::ConfigError;
use crate::item::{collect_opened_ids, ItemId, TreeItem};
use crate::observer::{ObserverGuard, SizeObserver};
use crate::state::{TreeState, ViewportPhase, ViewportState};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Queue endpoint for delivering signals from host callbacks.
pub type SignalSender<Id> = Sender<ViewportSignal<Id>>;

/// Virtualized view over a forest of items.
///
/// # Example
/// ```
/// use rvtree::{TreeItem, ViewportConfig, ViewportController, ViewportSignal};
///
/// let items: Vec<TreeItem<u32, ()>> = (0..10).map(|i| TreeItem::leaf(i, ())).collect();
/// let mut controller = ViewportController::new(items, ViewportConfig::with_item_size(20.0)).unwrap();
///
/// controller.handle(ViewportSignal::Resize(50.0));
/// assert_eq!(controller.window().range(), 0..3);
/// ```
pub struct ViewportController<Id: ItemId, T: Clone> {
    items: Vec<TreeItem<Id, T>>,
    item_size: f64,
    render_ahead: usize,
    state: ViewportState<Id>,
    cache: TreeCache<Id, T>,
    window: VisibleWindow,
    sender: SignalSender<Id>,
    inbox: Receiver<ViewportSignal<Id>>,
    observer: Option<ObserverGuard>,
}

impl<Id: ItemId + 'static, T: Clone> ViewportController<Id, T> {
    /// Creates an unmeasured controller.
    ///
    /// The initial expansion set is the configured ids plus every item whose
    /// inline `opened` flag is set.
    ///
    /// # Errors
    /// [`ConfigError::InvalidItemSize`] if the item size is not a positive finite number.
    pub fn new(items: Vec<TreeItem<Id, T>>, config: ViewportConfig<Id>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut expanded = collect_opened_ids(&items);
        expanded.extend(config.initially_expanded_ids);

        let (sender, inbox) = channel();
        let mut controller = Self {
            items,
            item_size: config.item_size,
            render_ahead: config.render_ahead,
            state: ViewportState::new(TreeState::with_expanded(expanded)),
            cache: TreeCache::new(),
            window: VisibleWindow::EMPTY,
            sender,
            inbox,
            observer: None,
        };
        controller.reflatten();
        Ok(controller)
    }

    // ===== Lifecycle =====

    /// Subscribes to container size changes.
    ///
    /// Height changes are queued and applied on the next [`pump`](Self::pump),
    /// in delivery order. Mounting again releases the previous observer first.
    pub fn mount<O>(&mut self, observer: O)
    where
        O: SizeObserver + 'static,
    {
        self.unmount();
        let sender = self.sender.clone();
        let guard = ObserverGuard::acquire(
            Box::new(observer),
            Box::new(move |height| {
                // The receiver lives as long as the controller; a failed send
                // means the controller is already gone.
                let _ = sender.send(ViewportSignal::Resize(height));
            }),
        );
        self.observer = Some(guard);
        self.pump();
    }

    /// Releases the size observer. Safe to call when not mounted.
    ///
    /// Signals queued before teardown are applied first, so nothing the
    /// released observer reported is left in the queue.
    pub fn unmount(&mut self) {
        self.pump();
        if self.observer.take().is_some() {
            tracing::debug!("viewport unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.observer.is_some()
    }

    /// Returns a sender that queues signals for the next [`pump`](Self::pump).
    pub fn signal_sender(&self) -> SignalSender<Id> {
        self.sender.clone()
    }

    /// Applies every queued signal in delivery order.
    ///
    /// # Returns
    /// The number of signals applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(signal) = self.inbox.try_recv() {
            self.apply_signal(signal);
            applied += 1;
        }
        applied
    }

    // ===== Signals =====

    /// Applies one signal after every signal already queued.
    pub fn handle(&mut self, signal: ViewportSignal<Id>) {
        self.pump();
        self.apply_signal(signal);
    }

    fn apply_signal(&mut self, signal: ViewportSignal<Id>) {
        let state = std::mem::take(&mut self.state);
        let (state, effect) = transition::apply(state, signal);
        self.state = state;

        match effect {
            TransitionEffect::Unchanged => {}
            TransitionEffect::Rewindow => self.recompute_window(),
            TransitionEffect::Reflatten => self.reflatten(),
        }
    }

    /// Scroll signal: records the new offset and recomputes the window.
    pub fn scroll_to(&mut self, offset: f64) {
        self.handle(ViewportSignal::Scroll(offset));
    }

    /// Resize signal: records the new height and recomputes the window.
    pub fn resize(&mut self, height: f64) {
        self.handle(ViewportSignal::Resize(height));
    }

    /// Flips expansion of `id` and re-flattens. The scroll offset is kept.
    pub fn toggle_node(&mut self, id: Id) {
        self.handle(ViewportSignal::Toggle(id));
    }

    pub fn expand(&mut self, id: Id) {
        self.handle(ViewportSignal::Expand(id));
    }

    pub fn collapse(&mut self, id: Id) {
        self.handle(ViewportSignal::Collapse(id));
    }

    /// Expands every id in `ids` with a single re-flatten.
    pub fn expand_many<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = Id>,
    {
        self.pump();
        let mut changed = false;
        for id in ids {
            changed |= self.state.tree_mut().expand(id);
        }
        if changed {
            self.reflatten();
        }
    }

    pub fn collapse_all(&mut self) {
        self.handle(ViewportSignal::CollapseAll);
    }

    /// Replaces the source forest, keeping scroll offset and expansion set.
    pub fn set_items(&mut self, items: Vec<TreeItem<Id, T>>) {
        self.pump();
        self.items = items;
        self.reflatten();
    }

    // ===== Queries =====

    /// The current visible window.
    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    /// Rows inside the current window, each carrying its absolute `top`.
    pub fn visible_entries(&self) -> &[FlatEntry<Id, T>] {
        &self.cache.entries()[self.window.range()]
    }

    /// All flattened rows.
    pub fn entries(&self) -> &[FlatEntry<Id, T>] {
        self.cache.entries()
    }

    pub fn entry_count(&self) -> usize {
        self.cache.entries().len()
    }

    /// Scrollable extent: `entry_count * item_size`.
    pub fn content_height(&self) -> f64 {
        window::content_height(self.entry_count(), self.item_size)
    }

    pub fn is_expanded(&self, id: &Id) -> bool {
        self.state.tree().is_expanded(id)
    }

    pub fn items(&self) -> &[TreeItem<Id, T>] {
        &self.items
    }

    pub fn state(&self) -> &ViewportState<Id> {
        &self.state
    }

    pub fn phase(&self) -> ViewportPhase {
        self.state.phase()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.state.scroll_offset()
    }

    pub fn viewport_size(&self) -> f64 {
        self.state.viewport_size()
    }

    pub fn item_size(&self) -> f64 {
        self.item_size
    }

    pub fn render_ahead(&self) -> usize {
        self.render_ahead
    }

    /// Deepest depth among the flattened rows.
    pub fn max_visible_depth(&self) -> usize {
        self.cache.max_visible_depth().unwrap_or(0)
    }

    /// Number of flattening passes run so far.
    pub fn flatten_passes(&self) -> u64 {
        self.cache.flatten_passes()
    }

    // ===== Internals =====

    fn reflatten(&mut self) {
        self.cache.invalidate();
        self.cache
            .refresh(&self.items, self.state.tree().expanded_nodes_set(), self.item_size);
        self.recompute_window();
    }

    fn recompute_window(&mut self) {
        self.window = if self.state.is_measured() {
            window::window_for_count(
                self.entry_count(),
                self.item_size,
                self.state.scroll_offset(),
                self.state.viewport_size(),
                self.render_ahead,
            )
        } else {
            VisibleWindow::EMPTY
        };

        tracing::trace!(
            start = self.window.start_index,
            end = self.window.end_index,
            scroll = self.state.scroll_offset(),
            viewport = self.state.viewport_size(),
            "window recomputed"
        );
    }
}
