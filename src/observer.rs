//! Viewport size observation.
//!
//! The host environment provides "notify me when this container's height
//! changes" as an opaque capability. A controller acquires it on mount and
//! releases it on unmount; [`ObserverGuard`] ties the release to `Drop` so it
//! also happens when the controller is dropped mid-measurement.

use std::cell::RefCell;
use std::rc::Rc;

/// Callback receiving a new container height.
pub type SizeCallback = Box<dyn FnMut(f64)>;

/// Capability that reports container height changes.
pub trait SizeObserver {
    /// Starts delivering height changes to `on_resize`.
    fn observe(&mut self, on_resize: SizeCallback);

    /// Stops delivering and releases the callback.
    fn dispose(&mut self);
}

/// Scoped acquisition of a [`SizeObserver`]; disposes it when dropped.
pub struct ObserverGuard {
    observer: Box<dyn SizeObserver>,
}

impl ObserverGuard {
    /// Registers `on_resize` with the observer and takes ownership of it.
    pub fn acquire(mut observer: Box<dyn SizeObserver>, on_resize: SizeCallback) -> Self {
        observer.observe(on_resize);
        tracing::debug!("size observer acquired");
        Self { observer }
    }
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.dispose();
        tracing::debug!("size observer disposed");
    }
}

#[derive(Default)]
struct ManualState {
    callback: Option<SizeCallback>,
    last_height: Option<f64>,
    dispose_count: usize,
}

/// Observer driven by the host: the host measures and calls [`report`](Self::report).
///
/// Clones share state, so the host keeps one handle and hands another to the
/// controller. Callbacks run synchronously inside `report`/`notify` and must not
/// call back into the observer.
#[derive(Clone, Default)]
pub struct ManualSizeObserver {
    inner: Rc<RefCell<ManualState>>,
}

impl ManualSizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `height` only if it differs from the last reported height.
    ///
    /// # Returns
    /// `true` if the callback was invoked.
    pub fn report(&self, height: f64) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.last_height == Some(height) {
            return false;
        }
        inner.last_height = Some(height);
        match inner.callback.as_mut() {
            Some(callback) => {
                callback(height);
                true
            }
            None => false,
        }
    }

    /// Delivers `height` unconditionally.
    pub fn notify(&self, height: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.last_height = Some(height);
        if let Some(callback) = inner.callback.as_mut() {
            callback(height);
        }
    }

    /// Whether a callback is currently registered.
    pub fn is_observed(&self) -> bool {
        self.inner.borrow().callback.is_some()
    }

    /// How many times the observer has been disposed.
    pub fn dispose_count(&self) -> usize {
        self.inner.borrow().dispose_count
    }
}

impl SizeObserver for ManualSizeObserver {
    /// Registers the callback and immediately delivers the last known height,
    /// mirroring the initial measurement taken on mount.
    fn observe(&mut self, on_resize: SizeCallback) {
        let mut inner = self.inner.borrow_mut();
        let mut callback = on_resize;
        if let Some(height) = inner.last_height {
            callback(height);
        }
        inner.callback = Some(callback);
    }

    fn dispose(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.callback = None;
        inner.dispose_count += 1;
    }
}
