pub mod cache;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod generator;
pub mod item;
pub mod logging;
pub mod mount;
pub mod observer;
pub mod parser;
pub mod state;
pub mod writer;

// Source collection
pub use item::{collect_opened_ids, ItemId, TreeItem};

// Flattening and windowing
pub use domain::flatten::{
    descendant_count, entry_top, find_item, flatten, max_visible_depth, traverse_expanded,
    visible_subtree_size, ExpandedTraversal, FlatEntry, NodeKind, VisitedNode,
};
pub use domain::transition::{apply, TransitionEffect, ViewportSignal};
pub use domain::window::{
    compute_window, compute_window_filtered, content_height, window_for_count, VisibleWindow,
};

// Controller and host seams
pub use cache::TreeCache;
pub use config::{ViewportConfig, DEFAULT_ITEM_SIZE};
pub use controller::{SignalSender, ViewportController};
pub use error::ConfigError;
pub use mount::{mount_rows, MountedRow, MountedRows, ToggleHandle};
pub use observer::{ManualSizeObserver, ObserverGuard, SizeCallback, SizeObserver};
pub use state::{TreeState, ViewportPhase, ViewportState};

// Forest files and synthetic data
pub use generator::{count_items, ForestGenerator, GeneratedItem};
pub use parser::{read_forest, ForestFile};
pub use writer::{write_forest, ForestWriter, FOREST_FORMAT_VERSION};
