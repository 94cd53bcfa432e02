//! Visible window calculation.
//!
//! Given the flattened rows and the live scroll/size state, selects the
//! contiguous index range that must be mounted. Edge convention: a row is
//! visible when its half-open extent `[top, top + height)` intersects the
//! half-open viewport `[scroll_offset, scroll_offset + viewport_size)`, so
//! partially visible boundary rows are included. The look-ahead widens the
//! viewport by `look_ahead * item_size` on both ends before rows are tested.

use crate::domain::flatten::{entry_top, FlatEntry};
use std::ops::Range;

/// Contiguous slice `[start_index, end_index)` of the flattened sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleWindow {
    pub start_index: usize,
    pub end_index: usize,
}

impl VisibleWindow {
    /// The empty window at index 0.
    pub const EMPTY: VisibleWindow = VisibleWindow {
        start_index: 0,
        end_index: 0,
    };

    /// Returns the window as a slice range.
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    /// Number of rows in the window.
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// Whether the row at `index` falls inside the window.
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// Whether every row of `other` is also inside this window.
    pub fn covers(&self, other: &VisibleWindow) -> bool {
        other.is_empty() || (self.start_index <= other.start_index && other.end_index <= self.end_index)
    }
}

/// Total scrollable extent of `entry_count` uniform rows.
///
/// The look-ahead margin never contributes to the content height.
pub fn content_height(entry_count: usize, item_size: f64) -> f64 {
    entry_top(entry_count, item_size)
}

/// Index-arithmetic window over `entry_count` uniform rows, O(1).
///
/// # Arguments
/// * `entry_count` - Length of the flattened sequence
/// * `item_size` - Uniform row size
/// * `scroll_offset` - Current scroll position (negative values act as 0)
/// * `viewport_size` - Visible height; 0 means not yet measured
/// * `look_ahead` - Extra rows mounted on both ends
pub fn window_for_count(
    entry_count: usize,
    item_size: f64,
    scroll_offset: f64,
    viewport_size: f64,
    look_ahead: usize,
) -> VisibleWindow {
    if entry_count == 0 || !(viewport_size > 0.0) || !(item_size > 0.0) {
        return VisibleWindow::EMPTY;
    }

    let (lower, upper) = widened_bounds(scroll_offset, viewport_size, item_size, look_ahead);

    // `as usize` saturates; `first` may point past the end when scrolled beyond
    // the content, and a negative lower bound lands on 0.
    let mut first = (lower / item_size).floor() as usize;
    let mut last = ((upper / item_size).ceil() as usize).min(entry_count);

    // Division rounding can land one row off; settle both bounds against the
    // same row extents the filter strategy tests.
    while first > 0 && entry_top(first - 1, item_size) + item_size > lower {
        first -= 1;
    }
    while first < entry_count && entry_top(first, item_size) + item_size <= lower {
        first += 1;
    }
    while last > 0 && entry_top(last - 1, item_size) >= upper {
        last -= 1;
    }
    while last < entry_count && entry_top(last, item_size) < upper {
        last += 1;
    }

    VisibleWindow {
        start_index: first.min(last),
        end_index: last,
    }
}

/// Viewport interval widened by the look-ahead margin; negative scroll acts as 0.
fn widened_bounds(scroll_offset: f64, viewport_size: f64, item_size: f64, look_ahead: usize) -> (f64, f64) {
    let scroll = scroll_offset.max(0.0);
    let margin = look_ahead as f64 * item_size;
    (scroll - margin, scroll + viewport_size + margin)
}

/// Index-arithmetic window over flattened rows.
///
/// The item size is read from the rows themselves; an empty sequence yields
/// the empty window.
pub fn compute_window<Id, T>(
    entries: &[FlatEntry<Id, T>],
    scroll_offset: f64,
    viewport_size: f64,
    look_ahead: usize,
) -> VisibleWindow {
    match entries.first() {
        Some(first) => window_for_count(entries.len(), first.height, scroll_offset, viewport_size, look_ahead),
        None => VisibleWindow::EMPTY,
    }
}

/// Filter-based window: tests every row's extent against the widened
/// viewport, O(n).
///
/// Kept as the reference selection; [`compute_window`] must always cover it.
pub fn compute_window_filtered<Id, T>(
    entries: &[FlatEntry<Id, T>],
    scroll_offset: f64,
    viewport_size: f64,
    look_ahead: usize,
) -> VisibleWindow {
    let item_size = match entries.first() {
        Some(first) => first.height,
        None => return VisibleWindow::EMPTY,
    };
    if !(viewport_size > 0.0) {
        return VisibleWindow::EMPTY;
    }

    let (lower, upper) = widened_bounds(scroll_offset, viewport_size, item_size, look_ahead);
    let mut selected = entries
        .iter()
        .filter(|entry| entry.top < upper && entry.top + entry.height > lower);

    match selected.next() {
        Some(first) => {
            let last = selected.last().unwrap_or(first);
            VisibleWindow {
                start_index: first.index,
                end_index: last.index + 1,
            }
        }
        None => VisibleWindow::EMPTY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flatten::flatten;
    use crate::item::TreeItem;
    use std::collections::HashSet;

    fn leaves(count: u32, item_size: f64) -> Vec<FlatEntry<u32, ()>> {
        let roots: Vec<TreeItem<u32, ()>> = (0..count).map(|i| TreeItem::leaf(i, ())).collect();
        flatten(&roots, &HashSet::new(), item_size)
    }

    #[test]
    fn test_partial_trailing_row_included() {
        // 10 rows of 20px in a 50px viewport: row 2 spans [40, 60) and is partially visible
        let entries = leaves(10, 20.0);
        let window = compute_window(&entries, 0.0, 50.0, 0);
        assert_eq!(window, VisibleWindow { start_index: 0, end_index: 3 });
        assert_eq!(compute_window_filtered(&entries, 0.0, 50.0, 0), window);
    }

    #[test]
    fn test_exact_boundaries_are_exclusive() {
        let entries = leaves(10, 20.0);
        // Viewport [20, 60): row 0 ends at 20 and row 3 starts at 60, both excluded
        let window = compute_window(&entries, 20.0, 40.0, 0);
        assert_eq!(window.range(), 1..3);
    }

    #[test]
    fn test_unmeasured_viewport_is_empty() {
        let entries = leaves(10, 20.0);
        assert_eq!(compute_window(&entries, 0.0, 0.0, 3), VisibleWindow::EMPTY);
        assert_eq!(compute_window(&entries, 100.0, 0.0, 0), VisibleWindow::EMPTY);
        assert_eq!(compute_window_filtered(&entries, 0.0, 0.0, 0), VisibleWindow::EMPTY);
    }

    #[test]
    fn test_empty_entries() {
        let entries = leaves(0, 20.0);
        assert_eq!(compute_window(&entries, 0.0, 500.0, 2), VisibleWindow::EMPTY);
        assert_eq!(content_height(0, 20.0), 0.0);
    }

    #[test]
    fn test_look_ahead_is_clamped() {
        let entries = leaves(10, 20.0);
        let window = compute_window(&entries, 60.0, 40.0, 2);
        assert_eq!(window.range(), 1..7);

        let window = compute_window(&entries, 0.0, 500.0, 5);
        assert_eq!(window.range(), 0..10);
    }

    #[test]
    fn test_scroll_past_content() {
        let entries = leaves(10, 20.0);
        let window = compute_window(&entries, 10_000.0, 50.0, 0);
        assert!(window.is_empty());
        assert!(window.end_index <= entries.len());

        let window = compute_window(&entries, 10_000.0, 50.0, 2);
        assert_eq!(window.range(), 10..10);

        // Just past the end, look-ahead still reaches the last two rows
        let window = compute_window(&entries, 205.0, 50.0, 2);
        assert_eq!(window.range(), 8..10);
        assert_eq!(compute_window_filtered(&entries, 205.0, 50.0, 2), window);

        // One row of look-ahead reaches only the last row
        assert_eq!(compute_window_filtered(&entries, 215.0, 50.0, 1).range(), 9..10);
        assert_eq!(compute_window(&entries, 215.0, 50.0, 1).range(), 9..10);
    }

    #[test]
    fn test_negative_scroll_acts_as_zero() {
        let entries = leaves(10, 20.0);
        assert_eq!(compute_window(&entries, -35.0, 50.0, 0).range(), 0..3);
    }

    #[test]
    fn test_index_window_covers_filter_window() {
        for &item_size in &[1.0, 7.0, 20.0, 22.5, 0.1, 33.333] {
            let entries = leaves(200, item_size);
            for step in 0..300 {
                let scroll = step as f64 * 3.7;
                for &viewport in &[0.5, 13.0, 64.0, 333.3] {
                    for look_ahead in 0..3 {
                        let fast = compute_window(&entries, scroll, viewport, look_ahead);
                        let reference = compute_window_filtered(&entries, scroll, viewport, look_ahead);
                        if !reference.is_empty() {
                            assert_eq!(fast, reference);
                        }
                        assert!(
                            fast.covers(&reference),
                            "size={} scroll={} viewport={} ahead={}: {:?} vs {:?}",
                            item_size, scroll, viewport, look_ahead, fast, reference
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_monotonic_scroll() {
        let entries = leaves(500, 18.0);
        for look_ahead in [0, 4] {
            let mut previous = compute_window(&entries, 0.0, 250.0, look_ahead);
            for step in 1..2_000 {
                let window = compute_window(&entries, step as f64 * 5.3, 250.0, look_ahead);
                assert!(window.start_index >= previous.start_index);
                assert!(window.end_index >= previous.end_index);
                previous = window;
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let entries = leaves(100, 20.0);
        let a = compute_window(&entries, 123.0, 321.0, 2);
        let b = compute_window(&entries, 123.0, 321.0, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_window_helpers() {
        let window = VisibleWindow { start_index: 2, end_index: 5 };
        assert_eq!(window.len(), 3);
        assert!(window.contains(2));
        assert!(!window.contains(5));
        assert!(window.covers(&VisibleWindow { start_index: 3, end_index: 5 }));
        assert!(!window.covers(&VisibleWindow { start_index: 1, end_index: 4 }));
        assert!(window.covers(&VisibleWindow::EMPTY));
    }
}
