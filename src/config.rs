//! Construction-time options for a virtualized view.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default row height in pixels.
pub const DEFAULT_ITEM_SIZE: f64 = 22.0;

/// Options recognized when building a [`ViewportController`](crate::ViewportController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig<Id> {
    /// Uniform per-row size
    pub item_size: f64,
    /// Extra rows mounted above and below the visible range
    pub render_ahead: usize,
    /// Ids expanded when the view is created
    pub initially_expanded_ids: Vec<Id>,
}

impl<Id> Default for ViewportConfig<Id> {
    fn default() -> Self {
        Self {
            item_size: DEFAULT_ITEM_SIZE,
            render_ahead: 0,
            initially_expanded_ids: Vec::new(),
        }
    }
}

impl<Id> ViewportConfig<Id> {
    /// Creates a config with the given item size and no look-ahead.
    pub fn with_item_size(item_size: f64) -> Self {
        Self {
            item_size,
            ..Self::default()
        }
    }

    /// Sets the look-ahead margin in rows.
    pub fn render_ahead(mut self, rows: usize) -> Self {
        self.render_ahead = rows;
        self
    }

    /// Sets the initial expansion set.
    pub fn initially_expanded<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = Id>,
    {
        self.initially_expanded_ids = ids.into_iter().collect();
        self
    }

    /// Checks the options the windowing arithmetic depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.item_size.is_finite() || self.item_size <= 0.0 {
            return Err(ConfigError::InvalidItemSize(self.item_size));
        }
        Ok(())
    }
}
